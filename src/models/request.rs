//! Request Model: the structured form of one HTTP request
//!
//! A [`RequestModel`] is a plain value. The parser builds it, the variable
//! resolver clones and rewrites it, and the generators read it. Nothing holds
//! references into it, so `Clone` is a full deep copy.

use serde::{Deserialize, Serialize};

/// HTTP methods recognized by request editors
pub const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

pub const DEFAULT_METHOD: &str = "GET";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const XML_CONTENT_TYPE: &str = "application/xml";

/// A key/value row used by headers, query/path params and url-encoded bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// Kind of a multipart form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    /// `value` holds a file path
    File,
}

/// One multipart form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub field_type: FormFieldType,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FormField {
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            field_type: FormFieldType::Text,
            enabled: true,
        }
    }

    pub fn file(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: path.into(),
            field_type: FormFieldType::File,
            enabled: true,
        }
    }

    pub fn is_file(&self) -> bool {
        self.field_type == FormFieldType::File
    }
}

/// How the request body is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyType {
    #[default]
    None,
    Raw,
    FormData,
    UrlEncoded,
}

/// Structured HTTP request description
///
/// Only the body collection matching `body_type` is populated; the
/// `set_*` helpers keep the other two empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestModel {
    pub method: String,
    pub url: String,
    pub headers: Vec<KeyValue>,
    pub query_params: Vec<KeyValue>,
    pub path_params: Vec<KeyValue>,
    pub body_type: BodyType,
    pub body_content: String,
    pub content_type: String,
    pub form_data: Vec<FormField>,
    pub url_encoded_data: Vec<KeyValue>,
    pub follow_redirects: bool,
    pub timeout_seconds: u64,
}

impl Default for RequestModel {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.to_string(),
            url: String::new(),
            headers: Vec::new(),
            query_params: Vec::new(),
            path_params: Vec::new(),
            body_type: BodyType::None,
            body_content: String::new(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            form_data: Vec::new(),
            url_encoded_data: Vec::new(),
            follow_redirects: true,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl RequestModel {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Replace the body with raw text
    pub fn set_raw_body(&mut self, content: impl Into<String>) {
        self.body_type = BodyType::Raw;
        self.body_content = content.into();
        self.form_data.clear();
        self.url_encoded_data.clear();
    }

    /// Replace the body with url-encoded pairs
    pub fn set_url_encoded_body(&mut self, pairs: Vec<KeyValue>) {
        self.body_type = BodyType::UrlEncoded;
        self.url_encoded_data = pairs;
        self.body_content.clear();
        self.form_data.clear();
    }

    /// Append a multipart field, switching the body to form-data if needed
    pub fn push_form_field(&mut self, field: FormField) {
        if self.body_type != BodyType::FormData {
            self.body_type = BodyType::FormData;
            self.body_content.clear();
            self.url_encoded_data.clear();
        }
        self.form_data.push(field);
    }

    /// First header whose key matches `name` case-insensitively
    pub fn header(&self, name: &str) -> Option<&KeyValue> {
        self.headers.iter().find(|h| h.key.eq_ignore_ascii_case(name))
    }

    pub fn has_body(&self) -> bool {
        match self.body_type {
            BodyType::None => false,
            BodyType::Raw => !self.body_content.is_empty(),
            BodyType::FormData => !self.form_data.is_empty(),
            BodyType::UrlEncoded => !self.url_encoded_data.is_empty(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
