//! Variable substitution
//!
//! Requests may contain `{{name}}` placeholders. Values come from three
//! layers merged under a fixed precedence (see [`scope`]): inline collection
//! variables, persisted collection secrets and persisted environment secrets.
//!
//! ```
//! use curlbridge::variables::{LayerKind, VariableMap, VariableScope};
//!
//! let mut inline = VariableMap::new();
//! inline.insert("base".into(), "https://api.test".into());
//! let mut env = VariableMap::new();
//! env.insert("base".into(), "https://prod.test".into());
//!
//! let scope = VariableScope::new()
//!     .with_layer(LayerKind::CollectionVariables, inline)
//!     .with_layer(LayerKind::EnvironmentSecrets, env);
//! assert_eq!(scope.resolve_text("{{base}}/users"), "https://prod.test/users");
//! ```

pub mod resolver;
pub mod scope;
pub mod store;
pub mod template;

pub use resolver::VariableResolver;
pub use scope::{LayerKind, VariableLayer, VariableMap, VariableScope};
pub use store::{Collection, FileSecretStore, MemorySecretStore, SecretStore, Variable};
pub use template::{has_placeholders, placeholders, substitute};
