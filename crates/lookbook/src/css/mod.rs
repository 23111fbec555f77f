//! Stylesheet plugins.
//!
//! This module provides the text-level transformations applied to design
//! system stylesheets:
//!
//! - [`FigmaVariables`]: replaces `@figma-variables;` with token declarations
//! - [`InjectTailwind`]: replaces `/* =inject-tailwind */` with Tailwind's
//!   layered imports
//! - [`Header`]: prepends a banner
//! - [`ExtractMediaQuery`]: splits `@media` rules into separate sheets
//!
//! Plugins implement [`Plugin`] and are chained with a [`Processor`]. Each is
//! also available as a plain function for one-off use.

mod inject;
mod media;
mod processor;
mod scan;
mod variables;

pub use inject::{inject_tailwind, prepend_header, Header, InjectTailwind, TAILWIND_IMPORTS};
pub use media::{
    extract_media_queries, query_key, ExtractMediaQuery, ExtractedSheet, Extraction, MediaOptions,
};
pub use processor::{Plugin, ProcessContext, Processed, Processor};
pub use scan::{TAILWIND_MARKER, VARIABLES_MARKER};
pub use variables::{has_marker, inject_declarations, FigmaVariables};
