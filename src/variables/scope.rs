//! Layered variable scopes
//!
//! Precedence, lowest to highest:
//!
//! 1. inline collection variables
//! 2. persisted collection secrets
//! 3. persisted environment secrets
//!
//! Merging applies layers in that order, so the highest layer that defines
//! a key wins.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use super::template;
use crate::models::RequestModel;

/// Ordered variable map
pub type VariableMap = IndexMap<String, String>;

/// Source of a variable layer; the derived order is the precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    CollectionVariables,
    CollectionSecrets,
    EnvironmentSecrets,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::CollectionVariables => "collection variables",
            LayerKind::CollectionSecrets => "collection secrets",
            LayerKind::EnvironmentSecrets => "environment secrets",
        };
        f.write_str(name)
    }
}

/// One named layer of variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableLayer {
    pub kind: LayerKind,
    pub vars: VariableMap,
}

impl VariableLayer {
    pub fn new(kind: LayerKind, vars: VariableMap) -> Self {
        Self { kind, vars }
    }
}

/// Variable layers kept sorted by precedence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableScope {
    layers: Vec<VariableLayer>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scope from layers given in any order
    pub fn from_layers(layers: impl IntoIterator<Item = VariableLayer>) -> Self {
        let mut scope = Self::new();
        for layer in layers {
            scope.push(layer);
        }
        scope
    }

    /// Add a layer at its precedence position
    ///
    /// A second layer of the same kind is placed after the first and so
    /// overrides it.
    pub fn push(&mut self, layer: VariableLayer) {
        let pos = self.layers.partition_point(|l| l.kind <= layer.kind);
        self.layers.insert(pos, layer);
    }

    pub fn with_layer(mut self, kind: LayerKind, vars: VariableMap) -> Self {
        self.push(VariableLayer::new(kind, vars));
        self
    }

    pub fn layers(&self) -> &[VariableLayer] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.vars.is_empty())
    }

    /// Flatten all layers; later (higher) layers overwrite earlier keys
    pub fn merged(&self) -> HashMap<String, String> {
        let mut merged = HashMap::new();
        for layer in &self.layers {
            for (key, value) in &layer.vars {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Layer that supplies the effective value for `name`
    pub fn source_of(&self, name: &str) -> Option<LayerKind> {
        self.layers
            .iter()
            .rev()
            .find(|l| l.vars.contains_key(name))
            .map(|l| l.kind)
    }

    /// Substitute `{{name}}` placeholders in `text`
    pub fn resolve_text(&self, text: &str) -> String {
        template::substitute(text, &self.merged())
    }

    /// Placeholder names in `text` that no layer defines, deduplicated
    pub fn unresolved<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut missing: Vec<&str> = Vec::new();
        for name in template::placeholders(text) {
            if self.source_of(name).is_none() && !missing.contains(&name) {
                missing.push(name);
            }
        }
        missing
    }

    /// Resolve every substitutable field of a copy of `model`
    ///
    /// File form fields keep their value (a path) untouched; their key is
    /// still resolved.
    pub fn resolve_request(&self, model: &RequestModel) -> RequestModel {
        let vars = self.merged();
        let resolve = |s: &mut String| {
            if template::has_placeholders(s) {
                *s = template::substitute(s, &vars);
            }
        };

        let mut resolved = model.clone();
        resolve(&mut resolved.url);
        for kv in resolved
            .headers
            .iter_mut()
            .chain(resolved.query_params.iter_mut())
            .chain(resolved.path_params.iter_mut())
            .chain(resolved.url_encoded_data.iter_mut())
        {
            resolve(&mut kv.key);
            resolve(&mut kv.value);
        }
        resolve(&mut resolved.body_content);
        for field in resolved.form_data.iter_mut() {
            resolve(&mut field.key);
            if !field.is_file() {
                resolve(&mut field.value);
            }
        }
        resolved
    }
}
