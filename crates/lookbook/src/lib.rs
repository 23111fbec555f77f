//! # Lookbook - Figma variables to CSS design tokens
//!
//! Lookbook turns variables exported from a Figma file into CSS custom
//! properties, and post-processes the stylesheets that use them.
//!
//! ## Stages
//!
//! 1. **Export**: raw variables (a [`FigmaExport`]) are resolved through their
//!    alias chains and named, giving a [`TokenDocument`]: tokens grouped by
//!    collection. See [`export_tokens`].
//! 2. **Transform**: each token's value becomes a CSS value. Colors are
//!    written as `oklch(...)`, aliases as `var(--target)`, and numbers get
//!    `rem`, `px` or no unit depending on the token's name. See
//!    [`TokenTransformer`].
//! 3. **Emit**: tokens become `--name: value` declarations, primitives first,
//!    then semantic tokens, then theme tokens. See [`DeclarationEmitter`].
//! 4. **Stylesheet**: the declarations replace the `@figma-variables;` marker
//!    in a stylesheet, alongside the other [`css`] plugins.
//!
//! ## Quick start
//!
//! ```rust
//! use lookbook::{run_from_figma, Config, FigmaExport};
//!
//! let export = FigmaExport::from_json(r#"{
//!     "collections": [{ "id": "c1", "name": "primitives" }],
//!     "variables": [{
//!         "id": "v1",
//!         "name": "spacing/spacing-2",
//!         "resolvedType": "FLOAT",
//!         "valuesByMode": { "m1": 8 },
//!         "variableCollectionId": "c1"
//!     }]
//! }"#).unwrap();
//!
//! let css = ":root {\n  @figma-variables;\n}";
//! let out = run_from_figma(export, css, None, &Config::default()).unwrap();
//! assert_eq!(out.css, ":root {\n  --spacing-2: 0.5rem;\n}");
//! ```
//!
//! ## Errors and warnings
//!
//! A broken alias graph (missing target, cycle) is fatal: nothing is emitted
//! and an [`Error`] is returned. Problems with single tokens (an unknown
//! font-weight keyword, a name with whitespace) are collected as
//! [`Diagnostics`] next to the output and don't stop the build.

pub mod color;
pub mod config;
pub mod css;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod naming;
pub mod palette;
pub mod pipeline;
pub mod resolve;
pub mod token;
pub mod transform;
pub mod variable;

pub use color::{oklch_of, to_hex, to_oklch, Oklch, Rgba};
pub use config::Config;
pub use diagnostics::{Diagnostics, FormatWarning};
pub use emit::{Declaration, DeclarationEmitter, Emitted};
pub use error::{Error, NamingError, ResolutionError};
pub use naming::name_of;
pub use palette::{hex_palette, typescript_declaration, Palette};
pub use pipeline::{build_processor, process_stylesheet, render_declarations, run_from_figma};
pub use resolve::{Resolved, Resolver};
pub use token::{export_tokens, Token, TokenDocument, TokenValue};
pub use transform::{font_weight, round_to_3, CssValue, TokenTransformer, UnitRules};
pub use variable::{
    FigmaExport, RawValue, Variable, VariableAlias, VariableCollection, VariableId, VariableSet,
    VariableType,
};
