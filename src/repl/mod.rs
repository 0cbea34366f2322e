//! Interactive console loop.
//!
//! Reads one brand-drug name per line, asks the QA chain about it, and
//! prints the answer until the user types "exit" or input ends.

mod console;

pub use console::run;
