//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on the ASCII whitespace class.
///
/// The separator set is space, tab, newline, carriage return, vertical tab
/// and form feed. Runs of separators never produce empty tokens, and any
/// other character (including Unicode spaces) belongs to a token.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }

    /// Whether `c` separates tokens.
    pub fn is_separator(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}')
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split(Self::is_separator)
            .filter(|word| !word.is_empty())
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();

        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        WhitespaceTokenizer::new()
            .tokenize(input)
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_all_separator_classes() {
        assert_eq!(
            texts("a\nb\rc\u{0B}d\u{0C}e f\tg"),
            vec!["a", "b", "c", "d", "e", "f", "g"]
        );
    }

    #[test]
    fn test_punctuation_tokens_are_kept() {
        assert_eq!(texts("-- , (U.S.)"), vec!["--", ",", "(U.S.)"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(texts("").is_empty());
        assert!(texts(" \t\r\n ").is_empty());
    }

    #[test]
    fn test_non_breaking_space_is_not_a_separator() {
        assert_eq!(texts("a\u{A0}b c"), vec!["a\u{A0}b", "c"]);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
