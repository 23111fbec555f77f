//! Non-fatal warnings collected while formatting tokens.
//!
//! Warnings are returned alongside output instead of printed, so callers
//! decide how to surface them and tests can assert on them directly.

use std::fmt;

/// A recoverable problem with a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatWarning {
    /// A `font-weight*` token whose value isn't a known weight keyword.
    /// The value is passed through unchanged.
    UnknownFontWeight { token: String, value: String },
    /// A token using the rem unit whose value isn't a number.
    /// The conversion is skipped.
    RemNotNumeric { token: String, value: String },
    /// A token name containing whitespace, which isn't a valid custom
    /// property. The token is dropped.
    WhitespaceInName { token: String },
}

impl fmt::Display for FormatWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatWarning::UnknownFontWeight { token, value } => {
                write!(f, "unknown font weight \"{}\" for variable \"{}\"", value, token)
            }
            FormatWarning::RemNotNumeric { token, value } => write!(
                f,
                "\"{}\" is marked as using the rem unit, but value is not a number: {}",
                token, value
            ),
            FormatWarning::WhitespaceInName { token } => {
                write!(f, "skipping variable \"{}\" as it contains whitespace", token)
            }
        }
    }
}

/// Ordered collection of [`FormatWarning`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<FormatWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: FormatWarning) {
        tracing::debug!(%warning, "format warning");
        self.warnings.push(warning);
    }

    /// Moves all warnings from `other` to the end of this collection.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatWarning> {
        self.warnings.iter()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, warning) in self.warnings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", warning)?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = FormatWarning;
    type IntoIter = std::vec::IntoIter<FormatWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a FormatWarning;
    type IntoIter = std::slice::Iter<'a, FormatWarning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}
