//! Custom property declarations from token groups.

use std::fmt;

use crate::diagnostics::{Diagnostics, FormatWarning};
use crate::token::Token;
use crate::transform::{CssValue, TokenTransformer};

/// A CSS custom property declaration, e.g. `--spacing-3: 0.75rem`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Property name including the leading `--`.
    pub prop: String,
    pub value: CssValue,
}

impl Declaration {
    pub fn new(name: &str, value: impl Into<CssValue>) -> Self {
        Self {
            prop: format!("--{}", name),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.prop, self.value)
    }
}

/// Declarations produced from token groups, with the warnings raised along
/// the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Emitted {
    pub declarations: Vec<Declaration>,
    pub diagnostics: Diagnostics,
}

/// Builds declarations from ordered groups of tokens.
#[derive(Debug, Clone, Default)]
pub struct DeclarationEmitter {
    transformer: TokenTransformer,
}

impl DeclarationEmitter {
    pub fn new(transformer: TokenTransformer) -> Self {
        Self { transformer }
    }

    /// Emits one declaration per token, group by group.
    ///
    /// Output order is the order of `groups`, then token order within each
    /// group. Tokens whose name contains whitespace are dropped with a
    /// warning; every other token yields a declaration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lookbook::{DeclarationEmitter, Token, TokenValue};
    ///
    /// let primitives = vec![Token::new("spacing-3", TokenValue::Float(12.0))];
    /// let semantic = vec![Token::new("gutter", TokenValue::Float(12.0)).aliasing("spacing-3")];
    ///
    /// let emitted = DeclarationEmitter::default().emit(&[&primitives[..], &semantic[..]]);
    /// let lines: Vec<String> = emitted.declarations.iter().map(|d| d.to_string()).collect();
    /// assert_eq!(lines, vec!["--spacing-3: 0.75rem", "--gutter: var(--spacing-3)"]);
    /// ```
    pub fn emit(&self, groups: &[&[Token]]) -> Emitted {
        let mut emitted = Emitted::default();

        for token in groups.iter().flat_map(|group| group.iter()) {
            if token.name.chars().any(breaks_name) {
                emitted.diagnostics.push(FormatWarning::WhitespaceInName {
                    token: token.name.clone(),
                });
                continue;
            }

            let value = self.transformer.format_value(token, &mut emitted.diagnostics);
            emitted.declarations.push(Declaration::new(&token.name, value));
        }

        tracing::debug!(
            declarations = emitted.declarations.len(),
            warnings = emitted.diagnostics.len(),
            "emitted declarations"
        );
        emitted
    }
}

/// Whitespace as ECMAScript's `\s` defines it: Unicode `White_Space` plus
/// the byte order mark, but without U+0085 (next line).
fn breaks_name(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}
