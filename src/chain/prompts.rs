//! Prompt templates for Cypher generation and answer synthesis.

use std::sync::LazyLock;

use regex::Regex;

/// Prompt for turning a question into a Cypher query. Encodes the drug
/// graph shape (brand drug, generic alternatives, ingredient, manufacturer,
/// price records) so generated queries follow the expected relationships.
pub const CYPHER_GENERATION_TEMPLATE: &str = r"
You are a Neo4j Cypher expert.
Generate Cypher to retrieve:
- Generic alternatives of a given BrandDrug
- For each generic: name, manufacturer name, ingredient name
- And all price info: amount, currency, quantity, and date

Use these relationships:
- (BrandDrug)-[:HAS_GENERIC_ALTERNATIVE]->(GenericDrug)
- (GenericDrug)-[:CONTAINS]->(Ingredient)
- (GenericDrug)-[:MANUFACTURED_BY]->(Manufacturer)
- (GenericDrug)-[:HAS_PRICE]->(Price)

Always use exact label and property names.
Use a single RETURN statement at the end of the query.

Schema: {schema}
Question: {question}
";

/// Prompt for turning raw query rows into a readable answer.
pub const QA_TEMPLATE: &str = r"You are an assistant that helps to form nice and human understandable answers.
The information part contains the provided information that you must use to construct an answer.
The provided information is authoritative, you must never doubt it or try to use your internal knowledge to correct it.
Make the answer sound as a response to the question. Do not mention that you based the result on the given information.
If the provided information is empty, say that you don't know the answer.
Information:
{context}

Question: {question}
Helpful Answer:";

/// Fill a template's `{name}` slots with the given values.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (name, value) in values {
        rendered = rendered.replace(&format!("{{{name}}}"), value);
    }
    rendered
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:cypher)?\s*(.*?)```").expect("code fence pattern is valid"));

/// Extract the Cypher query from a model completion.
///
/// Models often wrap queries in Markdown code fences; strip them when
/// present, otherwise return the trimmed completion unchanged.
pub fn extract_cypher(completion: &str) -> String {
    match CODE_FENCE.captures(completion) {
        Some(caps) => caps[1].trim().to_string(),
        None => completion.trim().to_string(),
    }
}
