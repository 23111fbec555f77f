//! Design tokens and the token document.
//!
//! A [`Token`] is what one published [`Variable`](crate::variable::Variable)
//! turns into once its alias chain is resolved and its path is shortened to a
//! name. Tokens are grouped per collection in a [`TokenDocument`], the JSON
//! artifact handed from the Figma export step to stylesheet generation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, ResolutionError};
use crate::naming::name_of;
use crate::resolve::Resolver;
use crate::transform::round_to_3;
use crate::variable::{VariableSet, VariableType};

/// A concrete design value.
///
/// The variant carries the value's type, so formatting can match on it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Color(Rgba),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl TokenValue {
    /// The Figma type this value belongs to.
    pub fn kind(&self) -> VariableType {
        match self {
            TokenValue::Color(_) => VariableType::Color,
            TokenValue::Float(_) => VariableType::Float,
            TokenValue::Boolean(_) => VariableType::Boolean,
            TokenValue::String(_) => VariableType::String,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Color(c) => match c.a {
                Some(a) => write!(f, "rgba({}, {}, {}, {})", c.r, c.g, c.b, a),
                None => write!(f, "rgb({}, {}, {})", c.r, c.g, c.b),
            },
            TokenValue::Float(n) => write!(f, "{}", n),
            TokenValue::Boolean(b) => write!(f, "{}", b),
            TokenValue::String(s) => f.write_str(s),
        }
    }
}

/// A named, typed design value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableType,
    /// The concrete value, resolved through any aliases.
    pub value: TokenValue,
    /// Token name of the immediate alias target, if the variable is an alias.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Token {
    /// Creates a concrete token, typed after its value.
    pub fn new(name: impl Into<String>, value: TokenValue) -> Self {
        Self {
            name: name.into(),
            kind: value.kind(),
            value,
            target: None,
            description: None,
        }
    }

    /// Marks the token as an alias of another token.
    pub fn aliasing(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Tokens grouped by collection name, in collection order.
///
/// Serializes as a JSON object whose keys are collection names
/// (`primitives`, `semantic`, `theme`, ...) and whose values are token lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDocument {
    collections: IndexMap<String, Vec<Token>>,
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty collection if it isn't present yet.
    pub fn add_collection(&mut self, name: &str) {
        self.collections.entry(name.to_string()).or_default();
    }

    /// Appends a token to a collection, creating the collection if needed.
    pub fn push(&mut self, collection: &str, token: Token) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(token);
    }

    /// Returns a collection's tokens, or `None` if the collection is absent.
    pub fn get(&self, collection: &str) -> Option<&[Token]> {
        self.collections.get(collection).map(Vec::as_slice)
    }

    /// Collection names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Turns every published variable into a token, grouped by collection.
///
/// Each collection in the set gets an entry, even if all of its variables are
/// hidden. Variables marked `hiddenFromPublishing` are skipped. Floats are
/// rounded to three decimals; colors stay RGBA so both the stylesheet and the
/// hex palette can be derived from the document.
///
/// # Errors
///
/// Fails on the first variable whose alias chain or name can't be resolved,
/// or that points at an unknown collection. Nothing is returned in that case.
pub fn export_tokens(set: &VariableSet) -> Result<TokenDocument, Error> {
    let resolver = Resolver::new(set);
    let mut document = TokenDocument::new();

    for collection in set.collections() {
        document.add_collection(&collection.name);
    }

    for variable in set.variables() {
        if variable.hidden_from_publishing {
            tracing::info!(variable = %variable.name, "skipping variable hidden from publishing");
            continue;
        }

        let collection = set
            .collection(&variable.variable_collection_id)
            .ok_or_else(|| ResolutionError::UnknownCollection {
                variable: variable.name.clone(),
                collection_id: variable.variable_collection_id.clone(),
            })?;

        let resolved = resolver.resolve(variable)?;
        let value = match resolved.value {
            TokenValue::Float(n) => TokenValue::Float(round_to_3(n)),
            other => other,
        };

        let token = Token {
            name: name_of(&variable.name)?,
            kind: variable.resolved_type,
            value,
            target: resolved.target,
            description: variable
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };
        tracing::trace!(collection = %collection.name, token = %token.name, "exported token");
        document.push(&collection.name, token);
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::{FigmaExport, RawValue, Variable, VariableCollection};
    use serde_json::json;

    fn export() -> FigmaExport {
        FigmaExport {
            collections: vec![
                VariableCollection::new("c1", "primitives"),
                VariableCollection::new("c2", "semantic"),
                VariableCollection::new("c3", "theme"),
            ],
            variables: vec![
                Variable::new(
                    "v1",
                    "color/blue-60",
                    VariableType::Color,
                    "c1",
                    Rgba::rgba(0.0, 0.478, 0.694, 1.0),
                ),
                Variable::new("v2", "spacing/3", VariableType::Float, "c1", 12.00049),
                Variable::new(
                    "v3",
                    "color/link",
                    VariableType::Color,
                    "c2",
                    RawValue::alias("v1"),
                )
                .with_description("Default link color"),
                Variable::new("v4", "draft/wip", VariableType::String, "c2", "x").hidden(),
            ],
        }
    }

    #[test]
    fn test_export_groups_by_collection() {
        let set = VariableSet::new(export());
        let document = export_tokens(&set).unwrap();

        assert_eq!(
            document.names().collect::<Vec<_>>(),
            vec!["primitives", "semantic", "theme"]
        );
        assert_eq!(document.get("primitives").unwrap().len(), 2);
        assert_eq!(document.get("semantic").unwrap().len(), 1);
        assert!(document.get("theme").unwrap().is_empty());
    }

    #[test]
    fn test_export_resolves_alias_and_rounds() {
        let set = VariableSet::new(export());
        let document = export_tokens(&set).unwrap();

        let spacing = &document.get("primitives").unwrap()[1];
        assert_eq!(spacing.name, "3");
        assert_eq!(spacing.value, TokenValue::Float(12.0));

        let link = &document.get("semantic").unwrap()[0];
        assert_eq!(link.name, "color-link");
        assert_eq!(link.target.as_deref(), Some("color-blue-60"));
        assert_eq!(
            link.value,
            TokenValue::Color(Rgba::rgba(0.0, 0.478, 0.694, 1.0))
        );
        assert_eq!(link.description.as_deref(), Some("Default link color"));
    }

    #[test]
    fn test_export_skips_hidden() {
        let set = VariableSet::new(export());
        let document = export_tokens(&set).unwrap();
        let semantic = document.get("semantic").unwrap();
        assert!(semantic.iter().all(|t| t.name != "wip"));
    }

    #[test]
    fn test_export_unknown_collection_fails() {
        let mut export = export();
        export.variables.push(Variable::new(
            "v9",
            "stray",
            VariableType::Boolean,
            "nope",
            true,
        ));
        let err = export_tokens(&VariableSet::new(export)).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::UnknownCollection { .. })
        ));
    }

    #[test]
    fn test_document_json_shape() {
        let mut document = TokenDocument::new();
        document.push(
            "primitives",
            Token::new("spacing-3", TokenValue::Float(12.0)),
        );
        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value,
            json!({
                "primitives": [
                    { "name": "spacing-3", "type": "FLOAT", "value": 12.0, "target": null, "description": null }
                ]
            })
        );
    }

    #[test]
    fn test_document_parses_without_optional_fields() {
        let document = TokenDocument::from_json(
            r#"{ "theme": [ { "name": "font-weight-heading", "type": "STRING", "value": "Bold" } ] }"#,
        )
        .unwrap();
        let token = &document.get("theme").unwrap()[0];
        assert_eq!(token.value, TokenValue::String("Bold".to_string()));
        assert!(token.target.is_none());
    }
}
