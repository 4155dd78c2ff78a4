//! curl command import and generation
//!
//! - **Validation**: cheap structural checks for UI feedback
//! - **Import**: tokenize and parse a curl command into a [`RequestModel`](crate::models::RequestModel)
//! - **Generation**: turn a request model back into a curl command
//!
//! ```
//! use curlbridge::curl::{generate_curl, parse_curl_command, validate};
//!
//! let cmd = "curl -X POST -H 'Content-Type: application/json' -d '{\"name\":\"John\"}' https://api.example.com/users";
//! assert!(validate(cmd).is_empty());
//!
//! let model = parse_curl_command(cmd).unwrap();
//! let again = parse_curl_command(&generate_curl(&model)).unwrap();
//! assert_eq!(model.body_content, again.body_content);
//! ```

pub mod flags;
pub mod generate;
pub mod parser;
pub mod tokenizer;
pub mod validate;

pub use generate::{generate_curl, generate_curl_multiline, shell_quote};
pub use parser::{parse_curl_command, parse_tokens};
pub use tokenizer::tokenize;
pub use validate::{validate, StructuralError};
