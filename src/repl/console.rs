//! Console read-eval-print loop over the QA chain.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::chain::GraphCypherQaChain;
use crate::graph::GraphStore;
use crate::llm::LanguageModel;

/// Sentinel word that ends the loop instead of being asked as a question.
const EXIT_WORD: &str = "exit";

/// Check whether a line of input asks to leave the loop.
///
/// Matched case-insensitively with surrounding whitespace ignored. A drug
/// literally named "exit" cannot be queried; there is no escape syntax.
fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_WORD)
}

/// Wrap a raw drug name in the fixed question shape the chain expects.
///
/// The input is substituted as-is, without trimming or escaping; empty or
/// unknown names simply produce a question the graph has no rows for.
fn format_question(drug_name: &str) -> String {
    format!("What are the generic alternatives for {drug_name}, their prices, ingredients, and manufacturers?")
}

/// Run the interactive loop until "exit" or end of input.
///
/// One chain invocation per non-sentinel line. Chain errors that are not
/// absorbed inside the chain propagate and end the process.
pub async fn run<M, G, R>(chain: &GraphCypherQaChain<M, G>, input: R) -> Result<()>
where
    M: LanguageModel,
    G: GraphStore,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("\n💊 Enter a brand drug name (or 'exit'): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        if is_exit(&line) {
            break;
        }

        let question = format_question(&line);
        let response = chain.run(&question).await?;

        println!("\n🧠 Result: {}", response.answer);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::io::BufReader;

    use super::*;
    use crate::chain::ChainOptions;

    /// Model that replays scripted completions and records every prompt.
    #[derive(Clone)]
    struct ScriptedModel {
        completions: Arc<Mutex<Vec<String>>>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedModel {
        fn new(completions: &[&str]) -> Self {
            Self {
                completions: Arc::new(Mutex::new(completions.iter().map(|s| s.to_string()).collect())),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            let mut completions = self.completions.lock().unwrap();
            assert!(!completions.is_empty(), "chain invoked more often than scripted");
            Ok(completions.remove(0))
        }
    }

    /// Graph with no rows that counts executed queries.
    #[derive(Clone)]
    struct CountingGraph {
        queries: Arc<Mutex<Vec<String>>>,
    }

    impl CountingGraph {
        fn new() -> Self {
            Self { queries: Arc::new(Mutex::new(Vec::new())) }
        }
    }

    #[async_trait]
    impl GraphStore for CountingGraph {
        async fn query(&self, cypher: &str) -> Result<Vec<serde_json::Value>> {
            self.queries.lock().unwrap().push(cypher.to_string());
            Ok(Vec::new())
        }

        async fn schema_text(&self) -> Result<String> {
            Ok("Node labels: BrandDrug".to_string())
        }
    }

    async fn chain_with(model: ScriptedModel) -> GraphCypherQaChain<ScriptedModel, CountingGraph> {
        GraphCypherQaChain::from_parts(model, CountingGraph::new(), ChainOptions { allow_dangerous_queries: true, top_k: 10 })
            .await
            .unwrap()
    }

    #[test]
    fn test_exit_word_any_case() {
        assert!(is_exit("exit"));
        assert!(is_exit("EXIT"));
        assert!(is_exit("Exit"));
        assert!(is_exit("  exit  "));
        assert!(!is_exit("exit now"));
        assert!(!is_exit("Lipitor"));
        assert!(!is_exit(""));
    }

    #[test]
    fn test_question_shape() {
        assert_eq!(
            format_question("Lipitor"),
            "What are the generic alternatives for Lipitor, their prices, ingredients, and manufacturers?"
        );
    }

    #[test]
    fn test_question_keeps_input_untouched() {
        // No trimming, no escaping, substituted exactly once
        assert_eq!(
            format_question("  Advil "),
            "What are the generic alternatives for   Advil , their prices, ingredients, and manufacturers?"
        );
        assert_eq!(
            format_question(""),
            "What are the generic alternatives for , their prices, ingredients, and manufacturers?"
        );
    }

    #[tokio::test]
    async fn test_sentinel_skips_the_chain() {
        for sentinel in ["exit\n", "EXIT\n", "Exit\n"] {
            let model = ScriptedModel::new(&[]);
            let prompts_seen = model.prompts.clone();
            let chain = chain_with(model).await;

            run(&chain, BufReader::new(sentinel.as_bytes())).await.unwrap();

            assert!(prompts_seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_one_chain_call_per_line_then_exit() {
        let model = ScriptedModel::new(&[
            "MATCH (b:BrandDrug {name: 'Lipitor'}) RETURN b",
            "Lipitor has one generic alternative.",
            "MATCH (b:BrandDrug {name: 'Advil'}) RETURN b",
            "Advil has two generic alternatives.",
        ]);
        let prompts_seen = model.prompts.clone();
        let chain = chain_with(model).await;

        run(&chain, BufReader::new(&b"Lipitor\nAdvil\nexit\n"[..])).await.unwrap();

        // Two questions, two generation prompts plus two QA prompts
        let prompts = prompts_seen.lock().unwrap();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].contains("What are the generic alternatives for Lipitor, their prices, ingredients, and manufacturers?"));
        assert!(prompts[2].contains("What are the generic alternatives for Advil, their prices, ingredients, and manufacturers?"));
    }

    #[tokio::test]
    async fn test_empty_line_is_forwarded() {
        let model = ScriptedModel::new(&["MATCH (b:BrandDrug) RETURN b", "I don't know the answer."]);
        let prompts_seen = model.prompts.clone();
        let chain = chain_with(model).await;

        // A single empty line, then end of input
        run(&chain, BufReader::new(&b"\n"[..])).await.unwrap();

        let prompts = prompts_seen.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("What are the generic alternatives for , their prices, ingredients, and manufacturers?"));
    }

    #[tokio::test]
    async fn test_end_of_input_terminates() {
        let model = ScriptedModel::new(&[]);
        let prompts_seen = model.prompts.clone();
        let chain = chain_with(model).await;

        run(&chain, BufReader::new(&b""[..])).await.unwrap();

        assert!(prompts_seen.lock().unwrap().is_empty());
    }
}
