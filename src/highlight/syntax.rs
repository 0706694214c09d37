//! A [`Lexer`] backed by syntect's Sublime Text grammars.
//!
//! syntect reports a flat stream of scope push/pop operations; this module
//! folds them into the nested [`Token`] tree the renderer walks, naming
//! each node with the short token types the theme understands.

use std::sync::OnceLock;

use syntect::parsing::{ClearAmount, ParseState, ScopeStackOp, SyntaxReference, SyntaxSet};

use super::{Lexer, Token};

/// Highlights rows with the syntect default grammar set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntectLexer;

impl SyntectLexer {
    pub const fn new() -> Self {
        Self
    }

    /// Whether a grammar exists for `language`.
    pub fn supports(language: &str) -> bool {
        find_syntax(language).is_some()
    }
}

impl Lexer for SyntectLexer {
    fn tokenize(&self, row: &str, language: &str) -> Option<Vec<Token>> {
        let Some(syntax) = find_syntax(language) else {
            return super::PlainLexer.tokenize(row, language);
        };

        let line = format!("{row}\n");
        let mut state = ParseState::new(syntax);
        let ops = match state.parse_line(&line, syntax_set()) {
            Ok(ops) => ops,
            Err(err) => {
                tracing::debug!(%err, language, "tokenizer failed");
                return None;
            }
        };

        let mut tree = TreeBuilder::new();
        let mut saved: Vec<Vec<Vec<String>>> = Vec::new();
        let mut last = 0;
        for (pos, op) in ops {
            let pos = floor_char_boundary(row, pos);
            if pos > last {
                tree.text(&row[last..pos]);
                last = pos;
            }
            match op {
                ScopeStackOp::Push(scope) => tree.open(token_types(&scope.build_string())),
                ScopeStackOp::Pop(count) => {
                    for _ in 0..count {
                        tree.close();
                    }
                }
                ScopeStackOp::Clear(amount) => {
                    let count = match amount {
                        ClearAmount::TopN(n) => n,
                        ClearAmount::All => usize::MAX,
                    };
                    let mut cleared = Vec::new();
                    for _ in 0..count {
                        let Some(types) = tree.close() else { break };
                        cleared.push(types);
                    }
                    cleared.reverse();
                    saved.push(cleared);
                }
                ScopeStackOp::Restore => {
                    for types in saved.pop().unwrap_or_default() {
                        tree.open(types);
                    }
                }
                ScopeStackOp::Noop => {}
            }
        }
        if last < row.len() {
            tree.text(&row[last..]);
        }
        Some(tree.finish())
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    if language.is_empty() {
        return None;
    }
    let set = syntax_set();
    set.find_syntax_by_token(language)
        .or_else(|| set.find_syntax_by_name(language))
}

/// Map a dotted syntect scope onto token types.
///
/// Structural scopes (`source.*`, `meta.*`) map to nothing.
fn token_types(scope: &str) -> Vec<String> {
    const TABLE: &[(&str, &[&str])] = &[
        ("comment", &["comment"]),
        ("string.regexp", &["regex"]),
        ("string.unquoted", &["attr-value"]),
        ("string", &["string"]),
        ("constant.numeric", &["number"]),
        ("constant.language", &["boolean"]),
        ("constant.character.escape", &["entity"]),
        ("constant.other.placeholder", &["placeholder"]),
        ("constant", &["constant"]),
        ("keyword.operator", &["operator"]),
        ("keyword.control.import", &["keyword", "directive"]),
        ("keyword.control", &["keyword", "control"]),
        ("keyword.other.unit", &["unit"]),
        ("keyword", &["keyword"]),
        ("storage", &["keyword"]),
        ("entity.name.function", &["function"]),
        ("support.function", &["function"]),
        ("variable.function", &["function"]),
        ("entity.name.tag", &["tag"]),
        ("entity.other.attribute-name", &["attr-name"]),
        ("entity.name", &["class-name"]),
        ("support.type", &["class-name"]),
        ("variable", &["variable"]),
        ("punctuation", &["punctuation"]),
        ("markup.bold", &["bold"]),
        ("markup.italic", &["italic"]),
        ("markup.heading", &["important"]),
        ("markup.underline.link", &["url"]),
        ("meta.preprocessor", &["directive"]),
    ];

    TABLE
        .iter()
        .find(|(prefix, _)| {
            scope
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
        .map(|(_, types)| types.iter().map(|t| (*t).to_string()).collect())
        .unwrap_or_default()
}

fn floor_char_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

struct Frame {
    types: Vec<String>,
    children: Vec<Token>,
}

/// Builds a token tree from nested open/close calls.
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame {
                types: Vec::new(),
                children: Vec::new(),
            }],
        }
    }

    fn text(&mut self, text: &str) {
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        push_text(&mut top.children, text);
    }

    fn open(&mut self, types: Vec<String>) {
        self.stack.push(Frame {
            types,
            children: Vec::new(),
        });
    }

    /// Close the innermost open node. Returns its types, or `None` at the root.
    fn close(&mut self) -> Option<Vec<String>> {
        if self.stack.len() <= 1 {
            return None;
        }
        let frame = self.stack.pop()?;
        let parent = self.stack.last_mut()?;
        if frame.types.is_empty() {
            for child in frame.children {
                match child {
                    Token::Text(text) => push_text(&mut parent.children, &text),
                    styled @ Token::Styled { .. } => parent.children.push(styled),
                }
            }
        } else if !frame.children.is_empty() {
            parent.children.push(Token::Styled {
                types: frame.types.clone(),
                children: frame.children,
            });
        }
        Some(frame.types)
    }

    fn finish(mut self) -> Vec<Token> {
        while self.close().is_some() {}
        self.stack.pop().map(|root| root.children).unwrap_or_default()
    }
}

/// Append text, merging with a trailing text leaf.
fn push_text(children: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Token::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(Token::text(text));
    }
}
