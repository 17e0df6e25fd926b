// Source files and their derived token views.
//
// A SourceFile is built once from (identifier, text, language) and never
// changes afterwards. Tokenization and both vector views happen at
// construction, so the O(N^2) pair loop only ever reads them.

pub mod language;
pub mod loader;

use rayon::prelude::*;
use tracing::debug;

use crate::tokens::{tokenize, FrequencyVector, TokenSet};

pub use language::Language;

/// Raw input handed over by the loader: already read and decoded.
#[derive(Debug, Clone)]
pub struct SourceInput {
    pub id: String,
    pub text: String,
    pub language: Language,
}

/// A loaded file together with its token sequence, frequency vector and set.
#[derive(Debug, Clone)]
pub struct SourceFile {
    id: String,
    text: String,
    language: Language,
    tokens: Vec<String>,
    vector: FrequencyVector,
    set: TokenSet,
}

impl SourceFile {
    pub fn new(id: impl Into<String>, text: impl Into<String>, language: Language) -> Self {
        let id = id.into();
        let text = text.into();
        let tokens = tokenize(&text);
        let vector = FrequencyVector::from_tokens(&tokens);
        let set = TokenSet::from(&vector);

        debug!(
            file = %id,
            tokens = tokens.len(),
            distinct = set.len(),
            "Tokenized source file"
        );

        Self {
            id,
            text,
            language,
            tokens,
            vector,
            set,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn vector(&self) -> &FrequencyVector {
        &self.vector
    }

    pub fn set(&self) -> &TokenSet {
        &self.set
    }

    /// Metadata reporters show for each file.
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            id: self.id.clone(),
            language: self.language,
            token_count: self.tokens.len(),
            distinct_tokens: self.set.len(),
        }
    }
}

impl From<SourceInput> for SourceFile {
    fn from(input: SourceInput) -> Self {
        SourceFile::new(input.id, input.text, input.language)
    }
}

/// Per-file metadata for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub id: String,
    pub language: Language,
    pub token_count: usize,
    pub distinct_tokens: usize,
}

/// Build SourceFiles in parallel, preserving input order.
pub fn prepare(inputs: Vec<SourceInput>) -> Vec<SourceFile> {
    inputs.into_par_iter().map(SourceFile::from).collect()
}
