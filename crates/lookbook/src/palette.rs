//! Hex color palette and its TypeScript declaration.
//!
//! The palette is the set of primitive colors, keyed by token name, as hex
//! strings. It is what JavaScript consumers of the design system import, and
//! [`typescript_declaration`] produces the matching `.d.ts` module.
//!
//! ```rust
//! use lookbook::{hex_palette, Rgba, Token, TokenDocument, TokenValue};
//!
//! let mut document = TokenDocument::new();
//! document.push(
//!     "primitives",
//!     Token::new("color-black", TokenValue::Color(Rgba::rgb(0.0, 0.0, 0.0))),
//! );
//!
//! let palette = hex_palette(&document);
//! assert_eq!(palette["color-black"], "#000000");
//! ```

use indexmap::IndexMap;
use minijinja::{context, Environment};

use crate::color::to_hex;
use crate::error::Error;
use crate::token::{TokenDocument, TokenValue};

/// Collection the palette is read from.
pub const PALETTE_TIER: &str = "primitives";

/// Module name used when none is given.
pub const DEFAULT_MODULE: &str = "@lookback/lookbook";

/// Token name to hex color, in token order.
pub type Palette = IndexMap<String, String>;

const DECLARATION_TEMPLATE: &str = r#"declare module '{{ module }}' {

  /** The design system's color palette. */
  export type Color = {% for name in names %}'{{ name }}'{% if not loop.last %} | {% endif %}{% else %}never{% endfor %};

  /** A concrete dictionary of colors exported by the module. */
  export const colors: {
    [key in Color]: string;
  };
}
"#;

/// Collects the primitive color tokens as hex strings.
///
/// Only tokens with a concrete RGBA value are included. A document without a
/// `primitives` collection yields an empty palette.
pub fn hex_palette(document: &TokenDocument) -> Palette {
    document
        .get(PALETTE_TIER)
        .unwrap_or_default()
        .iter()
        .filter_map(|token| match &token.value {
            TokenValue::Color(color) => Some((token.name.clone(), to_hex(color))),
            _ => None,
        })
        .collect()
}

/// Renders a TypeScript `declare module` block for `palette`.
///
/// The block exports a `Color` union of the palette's names and a `colors`
/// record typed by it. An empty palette gives `Color = never`.
pub fn typescript_declaration(palette: &Palette, module: &str) -> Result<String, Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("colors.d.ts", DECLARATION_TEMPLATE)?;

    let names: Vec<&str> = palette.keys().map(String::as_str).collect();
    let rendered = env
        .get_template("colors.d.ts")?
        .render(context! { module, names })?;
    Ok(rendered)
}
