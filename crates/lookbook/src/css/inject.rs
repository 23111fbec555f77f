//! Banner and Tailwind import injection.

use super::processor::{Plugin, ProcessContext};
use super::scan::{indentation_before, landmarks, splice, Landmark};

/// Tailwind's stylesheets and the cascade layer each is imported into.
pub const TAILWIND_IMPORTS: &[(&str, &str)] = &[
    ("tailwindcss/theme.css", "theme"),
    ("tailwindcss/preflight.css", "base"),
    ("tailwindcss/utilities.css", "utilities"),
];

/// Prepends `header` and a newline to `css`. An empty header is a no-op.
pub fn prepend_header(css: &str, header: &str) -> String {
    if header.is_empty() {
        return css.to_string();
    }
    format!("{}\n{}", header, css)
}

/// Replaces every `/* =inject-tailwind */` comment with Tailwind's layered
/// `@import`s.
pub fn inject_tailwind(css: &str) -> String {
    let edits: Vec<_> = landmarks(css)
        .into_iter()
        .filter_map(|landmark| match landmark {
            Landmark::TailwindMarker(range) => {
                let indent = indentation_before(css, range.start);
                let imports = TAILWIND_IMPORTS
                    .iter()
                    .map(|(path, layer)| format!("@import '{}' layer({});", path, layer))
                    .collect::<Vec<_>>()
                    .join(&format!("\n{}", indent));
                Some((range, imports))
            }
            _ => None,
        })
        .collect();

    if edits.is_empty() {
        return css.to_string();
    }
    splice(css, edits)
}

/// Plugin form of [`prepend_header`].
#[derive(Debug, Clone, Default)]
pub struct Header {
    header: String,
}

impl Header {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }
}

impl Plugin for Header {
    fn name(&self) -> &str {
        "header"
    }

    fn process(&self, css: String, _ctx: &mut ProcessContext) -> String {
        prepend_header(&css, &self.header)
    }
}

/// Plugin form of [`inject_tailwind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectTailwind;

impl Plugin for InjectTailwind {
    fn name(&self) -> &str {
        "inject-tailwind"
    }

    fn process(&self, css: String, _ctx: &mut ProcessContext) -> String {
        inject_tailwind(&css)
    }
}
