//! Syntax highlighting for editor rows.
//!
//! A [`Lexer`] turns one row of text into a token tree; a [`Theme`] resolves
//! the accumulated token types of a run into a color and weight.

mod syntax;
mod theme;

pub use syntax::SyntectLexer;
pub use theme::{MonokaiTheme, TextStyle, Theme};

/// A node of a row's token tree.
///
/// Flattening the tree left to right yields the row text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Text(String),
    Styled {
        /// Token types, e.g. `["keyword"]` or `["string", "url"]`.
        types: Vec<String>,
        children: Vec<Self>,
    },
}

impl Token {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn styled<I, S>(types: I, children: Vec<Self>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Styled {
            types: types.into_iter().map(Into::into).collect(),
            children,
        }
    }

    /// Concatenate every text leaf below this node.
    pub fn flat_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Styled { children, .. } => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }
}

/// Concatenate the text of a row's tokens.
pub fn flat_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::flat_text).collect()
}

/// Tokenizes a single row.
///
/// Rows are tokenized independently; multi-row constructs such as block
/// comments are not tracked across rows.
pub trait Lexer {
    /// Tokenize `row` as `language`. `None` means the row could not be
    /// tokenized; the renderer then skips its text.
    fn tokenize(&self, row: &str, language: &str) -> Option<Vec<Token>>;
}

/// A lexer that never highlights anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLexer;

impl Lexer for PlainLexer {
    fn tokenize(&self, row: &str, _language: &str) -> Option<Vec<Token>> {
        if row.is_empty() {
            return Some(Vec::new());
        }
        Some(vec![Token::text(row)])
    }
}
