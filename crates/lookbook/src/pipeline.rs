//! End-to-end orchestration.
//!
//! Ties the stages together: raw Figma export to token document, token
//! document to declarations, declarations into a stylesheet. The stylesheet
//! plugins run in this order:
//!
//! 1. [`InjectTailwind`]
//! 2. [`FigmaVariables`] for the configured tiers
//! 3. [`ExtractMediaQuery`], when `media` is configured
//! 4. [`Header`], when `header` is configured
//!
//! Resolution is all-or-nothing: if any variable fails to resolve, no
//! stylesheet is produced.

use crate::config::Config;
use crate::css::{ExtractMediaQuery, FigmaVariables, Header, InjectTailwind, Processed, Processor};
use crate::emit::Emitted;
use crate::error::Error;
use crate::token::{export_tokens, TokenDocument};
use crate::variable::{FigmaExport, VariableSet};

/// Emits declarations for the configured tiers of `document`, in tier order.
pub fn render_declarations(document: &TokenDocument, config: &Config) -> Emitted {
    FigmaVariables::new(document.clone(), config.tiers.clone(), config.units.clone())
        .declarations()
}

/// Builds the stylesheet plugin chain for `document`.
pub fn build_processor(document: TokenDocument, config: &Config) -> Processor {
    let mut processor = Processor::new().plugin(InjectTailwind).plugin(FigmaVariables::new(
        document,
        config.tiers.clone(),
        config.units.clone(),
    ));

    if let Some(media) = &config.media {
        processor = processor.plugin(ExtractMediaQuery::new(media.clone()));
    }
    if let Some(header) = &config.header {
        processor = processor.plugin(Header::new(header.clone()));
    }
    processor
}

/// Processes a stylesheet against an already exported token document.
pub fn process_stylesheet(
    document: TokenDocument,
    css: &str,
    from: Option<&str>,
    config: &Config,
) -> Processed {
    build_processor(document, config).process(css, from)
}

/// Exports `export` and processes `css` against the result.
///
/// # Errors
///
/// Returns the first resolution or naming failure; no stylesheet is
/// produced in that case.
pub fn run_from_figma(
    export: FigmaExport,
    css: &str,
    from: Option<&str>,
    config: &Config,
) -> Result<Processed, Error> {
    let set = VariableSet::new(export);
    let document = export_tokens(&set)?;
    tracing::debug!(collections = document.len(), "exported token document");
    Ok(process_stylesheet(document, css, from, config))
}
