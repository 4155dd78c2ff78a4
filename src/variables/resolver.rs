//! Async variable resolution against a collection and its secret store
//!
//! Loading never fails as a whole: a layer that cannot be loaded is logged
//! and replaced by an empty one, so callers always get a best-effort result.

use std::fmt::Display;

use tracing::{debug, warn};

use super::scope::{LayerKind, VariableMap, VariableScope};
use super::store::{Collection, SecretStore};
use crate::models::RequestModel;

/// Resolves `{{name}}` placeholders using an injected [`SecretStore`]
#[derive(Debug, Clone)]
pub struct VariableResolver<S> {
    store: S,
}

impl<S: SecretStore> VariableResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load all three layers for `collection`
    ///
    /// The two secret lookups run concurrently; the environment lookup is
    /// skipped when the collection has no environment.
    pub async fn load_scope(&self, collection: &Collection) -> VariableScope {
        let collection_secrets = self.store.collection_secrets(&collection.id);
        let environment_secrets = async {
            match collection.environment_id.as_deref() {
                Some(environment_id) => Some(self.store.environment_secrets(environment_id).await),
                None => None,
            }
        };
        let (collection_secrets, environment_secrets) = tokio::join!(collection_secrets, environment_secrets);

        let mut scope = VariableScope::new()
            .with_layer(LayerKind::CollectionVariables, collection.inline_variables())
            .with_layer(
                LayerKind::CollectionSecrets,
                layer_or_empty(LayerKind::CollectionSecrets, &collection.id, collection_secrets),
            );
        if let (Some(result), Some(environment_id)) = (environment_secrets, collection.environment_id.as_deref()) {
            scope = scope.with_layer(
                LayerKind::EnvironmentSecrets,
                layer_or_empty(LayerKind::EnvironmentSecrets, environment_id, result),
            );
        }

        debug!(
            collection = %collection.id,
            layers = scope.layers().len(),
            variables = scope.merged().len(),
            "Loaded variable scope"
        );
        scope
    }

    /// Substitute placeholders in arbitrary text
    pub async fn resolve_text(&self, text: &str, collection: &Collection) -> String {
        self.load_scope(collection).await.resolve_text(text)
    }

    /// Resolve a copy of `model`; the input is never modified
    pub async fn resolve_request(&self, model: &RequestModel, collection: &Collection) -> RequestModel {
        self.load_scope(collection).await.resolve_request(model)
    }
}

fn layer_or_empty<E: Display>(kind: LayerKind, id: &str, result: Result<VariableMap, E>) -> VariableMap {
    match result {
        Ok(vars) => vars,
        Err(e) => {
            warn!(layer = %kind, id = %id, error = %e, "Failed to load variable layer, using empty layer");
            VariableMap::new()
        }
    }
}
