//! `@figma-variables` marker replacement.
//!
//! The marker must sit inside a rule that may hold declarations, usually
//! `:root`:
//!
//! ```css
//! :root {
//!   @figma-variables;
//! }
//! ```
//!
//! It is replaced by one custom property per token, primitives first, then
//! semantic tokens, then theme tokens.

use crate::emit::{Declaration, DeclarationEmitter, Emitted};
use crate::token::{Token, TokenDocument};
use crate::transform::{TokenTransformer, UnitRules};

use super::processor::{Plugin, ProcessContext};
use super::scan::{indentation_before, landmarks, splice, Landmark};

/// Replaces every `@figma-variables;` marker in `css` with `declarations`,
/// one per line at the marker's indentation.
pub fn inject_declarations(css: &str, declarations: &[Declaration]) -> String {
    let edits: Vec<_> = landmarks(css)
        .into_iter()
        .filter_map(|landmark| match landmark {
            Landmark::VariablesMarker(range) => {
                let indent = indentation_before(css, range.start);
                let lines = declarations
                    .iter()
                    .map(|d| format!("{};", d))
                    .collect::<Vec<_>>()
                    .join(&format!("\n{}", indent));
                Some((range, lines))
            }
            _ => None,
        })
        .collect();

    if edits.is_empty() {
        return css.to_string();
    }
    splice(css, edits)
}

/// Returns `true` if `css` contains a `@figma-variables` marker.
pub fn has_marker(css: &str) -> bool {
    landmarks(css)
        .iter()
        .any(|landmark| matches!(landmark, Landmark::VariablesMarker(_)))
}

/// Plugin emitting a token document's tiers at the `@figma-variables` marker.
#[derive(Debug, Clone)]
pub struct FigmaVariables {
    document: TokenDocument,
    tiers: Vec<String>,
    emitter: DeclarationEmitter,
}

impl FigmaVariables {
    /// Creates the plugin for the given tiers, in output order.
    pub fn new(document: TokenDocument, tiers: Vec<String>, rules: UnitRules) -> Self {
        Self {
            document,
            tiers,
            emitter: DeclarationEmitter::new(TokenTransformer::new(rules)),
        }
    }

    /// Emits the declarations for all tiers. Tiers missing from the document
    /// contribute nothing.
    pub fn declarations(&self) -> Emitted {
        let groups: Vec<&[Token]> = self
            .tiers
            .iter()
            .filter_map(|tier| {
                let group = self.document.get(tier);
                if group.is_none() {
                    tracing::debug!(tier = %tier, "tier not present in token document");
                }
                group
            })
            .collect();
        self.emitter.emit(&groups)
    }
}

impl Plugin for FigmaVariables {
    fn name(&self) -> &str {
        "figma-variables"
    }

    fn process(&self, css: String, ctx: &mut ProcessContext) -> String {
        if !has_marker(&css) {
            return css;
        }

        let Emitted {
            declarations,
            diagnostics,
        } = self.declarations();
        ctx.diagnostics.extend(diagnostics);
        inject_declarations(&css, &declarations)
    }
}
