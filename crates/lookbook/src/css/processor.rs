//! Plugin chain over stylesheet text.

use crate::diagnostics::Diagnostics;

use super::media::ExtractedSheet;

/// State shared by the plugins of one [`Processor::process`] run.
#[derive(Debug, Clone, Default)]
pub struct ProcessContext {
    /// Path of the stylesheet being processed, if known.
    pub from: Option<String>,
    /// Warnings raised by any plugin.
    pub diagnostics: Diagnostics,
    /// Sheets split off the main stylesheet.
    pub extracted: Vec<ExtractedSheet>,
}

/// A transformation of stylesheet text.
///
/// Plugins run in registration order, each receiving the previous plugin's
/// output. A plugin that finds nothing to do returns its input unchanged.
pub trait Plugin {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Transforms `css`, recording warnings and side outputs in `ctx`.
    fn process(&self, css: String, ctx: &mut ProcessContext) -> String;
}

/// Output of a [`Processor`] run.
#[derive(Debug, Clone, Default)]
pub struct Processed {
    pub css: String,
    pub diagnostics: Diagnostics,
    pub extracted: Vec<ExtractedSheet>,
}

/// An ordered chain of [`Plugin`]s.
///
/// # Example
///
/// ```rust
/// use lookbook::css::{Header, InjectTailwind, Processor};
///
/// let processor = Processor::new()
///     .plugin(InjectTailwind)
///     .plugin(Header::new("/*! lookbook */"));
///
/// let out = processor.process("/* =inject-tailwind */", None);
/// assert!(out.css.starts_with("/*! lookbook */\n@import 'tailwindcss/theme.css'"));
/// ```
#[derive(Default)]
pub struct Processor {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin to the chain.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Runs every plugin over `css`.
    ///
    /// `from` is the stylesheet's path; plugins that name output files after
    /// their input use it.
    pub fn process(&self, css: &str, from: Option<&str>) -> Processed {
        let mut ctx = ProcessContext {
            from: from.map(str::to_string),
            ..ProcessContext::default()
        };

        let mut css = css.to_string();
        for plugin in &self.plugins {
            tracing::debug!(plugin = plugin.name(), "running stylesheet plugin");
            css = plugin.process(css, &mut ctx);
        }

        Processed {
            css,
            diagnostics: ctx.diagnostics,
            extracted: ctx.extracted,
        }
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("Processor").field("plugins", &names).finish()
    }
}
