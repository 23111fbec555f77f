//! Figma variable records and the arena they are resolved against.
//!
//! The records mirror what Figma's plugin API hands out for local variables:
//! each [`Variable`] has a slash-delimited name, a resolved type, one raw
//! value per mode, and the id of the [`VariableCollection`] it lives in.
//!
//! A [`VariableSet`] indexes an export by variable id so alias chains can be
//! followed without re-scanning the list.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::Error;
use crate::token::TokenValue;

/// Stable identifier of a variable, e.g. `VariableID:12:34`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VariableId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VariableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The type Figma resolves a variable to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VariableType {
    Color,
    Float,
    Boolean,
    String,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableType::Color => "COLOR",
            VariableType::Float => "FLOAT",
            VariableType::Boolean => "BOOLEAN",
            VariableType::String => "STRING",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

/// A reference to another variable, as stored in `valuesByMode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAlias {
    #[serde(rename = "type")]
    tag: AliasTag,
    pub id: VariableId,
}

impl VariableAlias {
    pub fn new(id: impl Into<VariableId>) -> Self {
        Self {
            tag: AliasTag::VariableAlias,
            id: id.into(),
        }
    }
}

/// A value for one mode: either a concrete value or an alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Alias(VariableAlias),
    Concrete(TokenValue),
}

impl RawValue {
    pub fn alias(id: impl Into<VariableId>) -> Self {
        RawValue::Alias(VariableAlias::new(id))
    }
}

impl From<Rgba> for RawValue {
    fn from(color: Rgba) -> Self {
        RawValue::Concrete(TokenValue::Color(color))
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Concrete(TokenValue::Float(n))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Concrete(TokenValue::Boolean(b))
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Concrete(TokenValue::String(s.to_string()))
    }
}

/// A named group of variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    pub name: String,
}

impl VariableCollection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A single Figma variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub id: VariableId,
    /// Slash-delimited path, e.g. `color/blue/60`.
    pub name: String,
    pub resolved_type: VariableType,
    /// Values keyed by mode id, in the order the export lists them.
    pub values_by_mode: IndexMap<String, RawValue>,
    pub variable_collection_id: String,
    #[serde(default)]
    pub hidden_from_publishing: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Variable {
    /// Creates a variable with a single mode value.
    pub fn new(
        id: impl Into<VariableId>,
        name: impl Into<String>,
        resolved_type: VariableType,
        collection_id: impl Into<String>,
        value: impl Into<RawValue>,
    ) -> Self {
        let mut values_by_mode = IndexMap::new();
        values_by_mode.insert("default".to_string(), value.into());
        Self {
            id: id.into(),
            name: name.into(),
            resolved_type,
            values_by_mode,
            variable_collection_id: collection_id.into(),
            hidden_from_publishing: false,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden_from_publishing = true;
        self
    }

    /// The value of the first mode listed.
    ///
    /// Multi-mode variables (light/dark and so on) only contribute their first
    /// mode.
    pub fn first_value(&self) -> Option<&RawValue> {
        self.values_by_mode.values().next()
    }
}

/// Everything a Figma export hands over: collections and their variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigmaExport {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl FigmaExport {
    /// Parses an export from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An export indexed by variable and collection id.
#[derive(Debug, Clone)]
pub struct VariableSet {
    collections: Vec<VariableCollection>,
    variables: Vec<Variable>,
    by_id: HashMap<VariableId, usize>,
}

impl VariableSet {
    pub fn new(export: FigmaExport) -> Self {
        let by_id = export
            .variables
            .iter()
            .enumerate()
            .map(|(index, v)| (v.id.clone(), index))
            .collect();
        Self {
            collections: export.collections,
            variables: export.variables,
            by_id,
        }
    }

    /// Looks a variable up by id.
    pub fn get(&self, id: &VariableId) -> Option<&Variable> {
        self.by_id.get(id).map(|&index| &self.variables[index])
    }

    /// Looks a collection up by id.
    pub fn collection(&self, id: &str) -> Option<&VariableCollection> {
        self.collections.iter().find(|c| c.id == id)
    }

    pub fn collections(&self) -> &[VariableCollection] {
        &self.collections
    }

    /// Variables in export order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<FigmaExport> for VariableSet {
    fn from(export: FigmaExport) -> Self {
        Self::new(export)
    }
}
