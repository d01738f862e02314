//! HTML entity decoding for Reuters SGML text.
//!
//! Each recognized entity is rewritten in place without changing the byte
//! length of the document: every byte of the entity except the last becomes
//! a space, and the last byte becomes the decoded character.
//!
//! | Entity   | Decoded |
//! |----------|---------|
//! | `&#1;`   | space   |
//! | `&#2;`   | space   |
//! | `&#3;`   | space   |
//! | `&#5;`   | U+0005  |
//! | `&#22;`  | space   |
//! | `&#27;`  | space   |
//! | `&#30;`  | U+001E  |
//! | `&#31;`  | U+001F  |
//! | `&#127;` | space   |
//! | `&amp;`  | `&`     |
//! | `&lt;`   | `<`     |
//! | `&gt;`   | `>`     |

use aho_corasick::{AhoCorasick, MatchKind};

use super::CharFilter;
use crate::error::{LexiclassError, Result};

const ENTITIES: &[(&str, char)] = &[
    ("&#1;", ' '),
    ("&#2;", ' '),
    ("&#3;", ' '),
    ("&#5;", '\u{05}'),
    ("&#22;", ' '),
    ("&#27;", ' '),
    ("&#30;", '\u{1E}'),
    ("&#31;", '\u{1F}'),
    ("&#127;", ' '),
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
];

/// Char filter that decodes the fixed set of HTML entities used by the corpus.
pub struct HtmlEntityCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl std::fmt::Debug for HtmlEntityCharFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlEntityCharFilter")
            .field("entities", &self.replacements.len())
            .finish()
    }
}

impl HtmlEntityCharFilter {
    /// Create a new entity filter.
    pub fn new() -> Result<Self> {
        let patterns: Vec<&str> = ENTITIES.iter().map(|(entity, _)| *entity).collect();
        let replacements = ENTITIES
            .iter()
            .map(|(entity, decoded)| {
                let mut replacement = " ".repeat(entity.len() - 1);
                replacement.push(*decoded);
                replacement
            })
            .collect();

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| LexiclassError::Anyhow(anyhow::Error::from(e)))?;

        Ok(Self { ac, replacements })
    }
}

impl CharFilter for HtmlEntityCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut last_match_end = 0;

        for m in self.ac.find_iter(input) {
            output.push_str(&input[last_match_end..m.start()]);
            output.push_str(&self.replacements[m.pattern().as_usize()]);
            last_match_end = m.end();
        }
        output.push_str(&input[last_match_end..]);

        output
    }

    fn name(&self) -> &'static str {
        "html_entity"
    }
}
