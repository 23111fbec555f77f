//! Alias resolution.
//!
//! A variable's value may be an alias of another variable, whose value may in
//! turn be an alias. Resolution walks the chain to the first concrete value
//! but reports the *immediate* target's token name, so stylesheets keep the
//! indirection (`var(--color-blue-60)`) while value formatting still sees the
//! final concrete value.

use std::collections::HashSet;

use crate::error::{Error, ResolutionError};
use crate::naming::name_of;
use crate::token::TokenValue;
use crate::variable::{RawValue, Variable, VariableId, VariableSet};

/// Result of resolving one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Concrete value at the end of the alias chain.
    pub value: TokenValue,
    /// Token name of the immediate alias target; `None` for concrete values.
    pub target: Option<String>,
}

/// Resolves variables against a [`VariableSet`].
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    set: &'a VariableSet,
}

impl<'a> Resolver<'a> {
    pub fn new(set: &'a VariableSet) -> Self {
        Self { set }
    }

    /// Resolves a variable to its concrete value and alias target.
    ///
    /// Only the first mode of each variable on the chain is considered.
    ///
    /// # Errors
    ///
    /// - [`ResolutionError::MissingTarget`] if an alias points at an unknown id
    /// - [`ResolutionError::Cycle`] if the chain loops back on itself
    /// - [`ResolutionError::NoValue`] if a variable on the chain has no modes
    /// - [`NamingError`](crate::error::NamingError) if the immediate target's
    ///   path has no usable leaf
    pub fn resolve(&self, variable: &Variable) -> Result<Resolved, Error> {
        let alias = match first_value(variable)? {
            RawValue::Concrete(value) => {
                return Ok(Resolved {
                    value: value.clone(),
                    target: None,
                })
            }
            RawValue::Alias(alias) => alias,
        };

        let target = self.lookup(variable, &alias.id)?;
        let target_name = name_of(&target.name)?;
        let value = self.follow(variable, target)?;

        Ok(Resolved {
            value,
            target: Some(target_name),
        })
    }

    /// Walks the chain starting at `current` until a concrete value.
    fn follow(&self, origin: &Variable, mut current: &'a Variable) -> Result<TokenValue, Error> {
        let mut visited: HashSet<&VariableId> = HashSet::new();
        let mut path = vec![origin.name.clone()];
        visited.insert(&origin.id);

        loop {
            path.push(current.name.clone());
            if !visited.insert(&current.id) {
                return Err(ResolutionError::Cycle { path }.into());
            }

            match first_value(current)? {
                RawValue::Concrete(value) => return Ok(value.clone()),
                RawValue::Alias(alias) => {
                    tracing::trace!(from = %current.name, to = %alias.id, "following alias");
                    current = self.lookup(current, &alias.id)?;
                }
            }
        }
    }

    fn lookup(&self, from: &Variable, id: &VariableId) -> Result<&'a Variable, ResolutionError> {
        self.set
            .get(id)
            .ok_or_else(|| ResolutionError::MissingTarget {
                variable: from.name.clone(),
                target_id: id.clone(),
            })
    }
}

fn first_value(variable: &Variable) -> Result<&RawValue, ResolutionError> {
    variable
        .first_value()
        .ok_or_else(|| ResolutionError::NoValue {
            variable: variable.name.clone(),
        })
}
