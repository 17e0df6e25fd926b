// Lexical layer: raw source text to tokens, and the two order-free views
// (frequency vector, distinct set) the metrics compare.

pub mod tokenizer;
pub mod vector;

pub use tokenizer::tokenize;
pub use vector::{FrequencyVector, TokenSet};
