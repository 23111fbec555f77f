//! Token value formatting.
//!
//! Turns a [`Token`] into the value written after its custom property. The
//! rules are applied in this order:
//!
//! 1. Aliases always render as `var(--target)`, whatever their type.
//! 2. Tokens named `font-weight*` map weight keywords (`Bold`) to numbers.
//! 3. Tokens matching a rem prefix (`spacing-`, `text-sm`, ...) convert pixel
//!    numbers to rem.
//! 4. Everything else is formatted by type (colors to OKLCH, floats rounded to
//!    three decimals) and numbers get a `px` suffix unless the name has a
//!    unit-less prefix (`leading-`).
//!
//! Rules 2 and 3 key on the token *name*, not its type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::to_oklch;
use crate::diagnostics::{Diagnostics, FormatWarning};
use crate::token::{Token, TokenValue};

/// Font weight keywords and their numeric weights.
pub const FONT_WEIGHTS: &[(&str, u16)] = &[
    ("thin", 100),
    ("extralight", 200),
    ("light", 300),
    ("normal", 400),
    ("regular", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("black", 900),
];

const FONT_WEIGHT_PREFIX: &str = "font-weight";

/// Looks a weight keyword up, ignoring case.
pub fn font_weight(keyword: &str) -> Option<u16> {
    let keyword = keyword.to_lowercase();
    FONT_WEIGHTS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, weight)| *weight)
}

/// Magnitude from which every `f64` is already a multiple of 1/8.
const ROUNDING_LIMIT: f64 = 1.0e15;

/// Rounds to three decimals, with ties going away from zero.
///
/// The decision is made on the exact binary value, as JavaScript's
/// `toFixed(3)` does: `1.0625` becomes `1.063`, while `1.0005` (stored as
/// `1.000499...`) becomes `1`. Trailing zeros disappear, so `2.5` stays `2.5`.
pub fn round_to_3(n: f64) -> f64 {
    if !n.is_finite() || n.abs() >= ROUNDING_LIMIT {
        return n;
    }

    let magnitude = n.abs();
    let mut thousandths = (magnitude * 1000.0).floor();
    // exact `magnitude * 1000 - thousandths`, the product isn't rounded first
    let mut rest = magnitude.mul_add(1000.0, -thousandths);
    if rest < 0.0 {
        thousandths -= 1.0;
        rest += 1.0;
    }
    if rest >= 0.5 {
        thousandths += 1.0;
    }

    let rounded = thousandths / 1000.0;
    // -0.0004 rounds to -0, which would print as "-0"
    if rounded == 0.0 {
        0.0
    } else if n < 0.0 {
        -rounded
    } else {
        rounded
    }
}

/// Name-prefix rules deciding which unit a numeric token gets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitRules {
    /// Names starting with one of these are converted from px to rem.
    pub rem_prefixes: Vec<String>,
    /// Names starting with one of these never get a unit.
    pub unitless_prefixes: Vec<String>,
    /// Pixel size of `1rem`. Must be a positive, finite number.
    #[serde(deserialize_with = "positive_size")]
    pub root_font_size: f64,
}

fn positive_size<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let size = f64::deserialize(deserializer)?;
    if size.is_finite() && size > 0.0 {
        Ok(size)
    } else {
        Err(serde::de::Error::custom(format!(
            "root_font_size must be a positive number, got {}",
            size
        )))
    }
}

impl Default for UnitRules {
    fn default() -> Self {
        let strings = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };
        Self {
            rem_prefixes: strings(&[
                "spacing-",
                "text-xs",
                "text-sm",
                "text-base",
                "text-lg",
                "text-xl",
                "text-2xl",
                "text-3xl",
                "text-4xl",
            ]),
            unitless_prefixes: strings(&["leading-"]),
            root_font_size: 16.0,
        }
    }
}

impl UnitRules {
    pub fn uses_rem(&self, name: &str) -> bool {
        self.rem_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    pub fn is_unitless(&self, name: &str) -> bool {
        self.unitless_prefixes
            .iter()
            .any(|p| name.starts_with(p.as_str()))
    }
}

/// A formatted custom property value.
#[derive(Debug, Clone, PartialEq)]
pub enum CssValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssValue::Number(n) => write!(f, "{}", n),
            CssValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CssValue {
    fn from(s: &str) -> Self {
        CssValue::Text(s.to_string())
    }
}

impl From<f64> for CssValue {
    fn from(n: f64) -> Self {
        CssValue::Number(n)
    }
}

/// Formats token values according to a set of [`UnitRules`].
#[derive(Debug, Clone, Default)]
pub struct TokenTransformer {
    rules: UnitRules,
}

impl TokenTransformer {
    pub fn new(rules: UnitRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &UnitRules {
        &self.rules
    }

    /// Formats a token's value, recording anything suspicious in `diagnostics`.
    ///
    /// Never fails: a token that can't be formatted as its name suggests is
    /// passed through and a [`FormatWarning`] is recorded instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lookbook::{CssValue, Diagnostics, Token, TokenTransformer, TokenValue};
    ///
    /// let transformer = TokenTransformer::default();
    /// let mut diagnostics = Diagnostics::new();
    ///
    /// let bold = Token::new("font-weight-heading", TokenValue::String("Bold".into()));
    /// assert_eq!(transformer.format_value(&bold, &mut diagnostics), CssValue::Number(700.0));
    ///
    /// let spacing = Token::new("spacing-3", TokenValue::Float(12.0));
    /// assert_eq!(transformer.format_value(&spacing, &mut diagnostics).to_string(), "0.75rem");
    /// assert!(diagnostics.is_empty());
    /// ```
    pub fn format_value(&self, token: &Token, diagnostics: &mut Diagnostics) -> CssValue {
        if let Some(target) = &token.target {
            return CssValue::Text(format!("var(--{})", target));
        }

        if token.name.starts_with(FONT_WEIGHT_PREFIX) {
            return self.font_weight_value(token, diagnostics);
        }

        if self.rules.uses_rem(&token.name) {
            match token.value {
                TokenValue::Float(px) => {
                    return CssValue::Text(format!("{}rem", px / self.rules.root_font_size));
                }
                _ => diagnostics.push(FormatWarning::RemNotNumeric {
                    token: token.name.clone(),
                    value: token.value.to_string(),
                }),
            }
        }

        let value = value_of(&token.value);
        match value {
            CssValue::Number(n) if !self.rules.is_unitless(&token.name) => {
                CssValue::Text(format!("{}px", n))
            }
            other => other,
        }
    }

    fn font_weight_value(&self, token: &Token, diagnostics: &mut Diagnostics) -> CssValue {
        match &token.value {
            TokenValue::String(keyword) => match font_weight(keyword) {
                Some(weight) => CssValue::Number(f64::from(weight)),
                None => {
                    diagnostics.push(FormatWarning::UnknownFontWeight {
                        token: token.name.clone(),
                        value: keyword.clone(),
                    });
                    CssValue::Text(keyword.clone())
                }
            },
            // Already numeric weights are written as-is, without a unit.
            TokenValue::Float(n) => CssValue::Number(round_to_3(*n)),
            other => value_of(other),
        }
    }
}

/// Type-directed formatting, before any unit is attached.
fn value_of(value: &TokenValue) -> CssValue {
    match value {
        TokenValue::Color(color) => CssValue::Text(to_oklch(color)),
        TokenValue::Float(n) => CssValue::Number(round_to_3(*n)),
        TokenValue::Boolean(b) => CssValue::Text(b.to_string()),
        TokenValue::String(s) => CssValue::Text(s.clone()),
    }
}
