pub mod naming;
pub mod parser;
pub mod progress;
