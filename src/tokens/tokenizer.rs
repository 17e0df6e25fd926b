// Generic lexical tokenizer for source code.
//
// This is a lexical approximation, not a compiler lexer: it knows nothing
// about any particular language. Text is split on whitespace, then each
// chunk is cut at the boundaries between identifier runs and operator runs.
// Comments and string literals are ordinary text, and case is preserved so
// that `Foo` and `foo` count as different tokens.

/// Lexical class of a single non-whitespace character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Unicode letters and digits, plus `_`.
    Identifier,
    /// `( ) [ ] { } ; ,`, always a token of its own.
    Delimiter,
    /// Everything else. Adjacent operator characters form one run, so
    /// `==`, `->`, `::` and `+=` stay whole.
    Operator,
}

impl CharClass {
    fn of(c: char) -> Self {
        match c {
            '(' | ')' | '[' | ']' | '{' | '}' | ';' | ',' => CharClass::Delimiter,
            c if c == '_' || c.is_alphanumeric() => CharClass::Identifier,
            _ => CharClass::Operator,
        }
    }
}

/// Convert raw file content into an ordered token sequence.
///
/// Total over all input: empty or whitespace-only text yields an empty
/// sequence. Identical input always yields an identical sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

/// Cut a whitespace-free chunk wherever the character class changes, and
/// around every delimiter.
fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (i, c) in chunk.char_indices() {
        let class = CharClass::of(c);
        if let Some(prev) = current {
            if prev != class || class == CharClass::Delimiter {
                tokens.push(chunk[start..i].to_string());
                start = i;
            }
        }
        current = Some(class);
    }

    if start < chunk.len() {
        tokens.push(chunk[start..].to_string());
    }
}
