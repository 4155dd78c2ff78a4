//! Core data types

pub mod request;

pub use request::{BodyType, FormField, FormFieldType, KeyValue, RequestModel};
