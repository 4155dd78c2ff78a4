//! curl command parsing
//!
//! Maps the token stream from [`tokenize`](super::tokenize) onto a
//! [`RequestModel`].
//!
//! # Example
//!
//! ```
//! use curlbridge::curl::parse_curl_command;
//!
//! let model = parse_curl_command("curl -X POST -d 'a=1&b=2' https://example.com").unwrap();
//! assert_eq!(model.method, "POST");
//! assert_eq!(model.url_encoded_data.len(), 2);
//! ```

use tracing::debug;

use super::flags::{self, Dispatch, FlagAction};
use super::tokenizer::tokenize;
use super::validate::starts_with_keyword;
use crate::errors::{CurlbridgeError, Result};
use crate::models::request::{JSON_CONTENT_TYPE, XML_CONTENT_TYPE};
use crate::models::{BodyType, FormField, KeyValue, RequestModel};

/// Tokenize and parse a curl command string
pub fn parse_curl_command(cmd: &str) -> Result<RequestModel> {
    if !starts_with_keyword(cmd.trim()) {
        return Err(CurlbridgeError::NotCurlCommand);
    }
    parse_tokens(&tokenize(cmd))
}

/// Parse tokens whose first element is the command name
pub fn parse_tokens(tokens: &[String]) -> Result<RequestModel> {
    let mut model = RequestModel::default();
    let mut url: Option<String> = None;
    let mut i = 1;

    while i < tokens.len() {
        let token = &tokens[i];

        if !token.starts_with('-') {
            if url.is_none() {
                model.query_params = extract_query_params(token);
                url = Some(token.clone());
            }
            i += 1;
            continue;
        }

        match flags::lookup(token) {
            Dispatch::Known(action) => {
                let value = if action.arity() == 1 {
                    let value = tokens
                        .get(i + 1)
                        .ok_or_else(|| CurlbridgeError::missing_value(token))?;
                    Some(value.as_str())
                } else {
                    None
                };
                apply_flag(&mut model, action, value);
                i += 1 + action.arity();
            }
            Dispatch::UnknownLong => {
                let takes_value = tokens.get(i + 1).is_some_and(|next| !next.starts_with('-'));
                debug!(flag = %token, with_value = takes_value, "Skipping unknown curl flag");
                i += if takes_value { 2 } else { 1 };
            }
            Dispatch::UnknownShort => {
                debug!(flag = %token, "Skipping unknown curl flag");
                i += 1;
            }
        }
    }

    model.url = url.ok_or(CurlbridgeError::NoUrl)?;

    if model.body_type == BodyType::Raw && !model.body_content.is_empty() {
        if let Some(content_type) = infer_content_type(&model) {
            model.content_type = content_type;
        }
    }

    Ok(model)
}

fn apply_flag(model: &mut RequestModel, action: FlagAction, value: Option<&str>) {
    let value = value.unwrap_or_default();
    match action {
        FlagAction::Method => model.method = value.to_uppercase(),
        FlagAction::Header => match parse_header(value) {
            Some(header) => model.headers.push(header),
            None => debug!(header = %value, "Dropping header without a name"),
        },
        FlagAction::Data => {
            if is_url_encoded(value) {
                model.set_url_encoded_body(parse_url_encoded(value));
            } else {
                model.set_raw_body(value);
            }
        }
        FlagAction::Form => match parse_form_field(value) {
            Some(field) => model.push_form_field(field),
            None => debug!(field = %value, "Dropping form field without a name"),
        },
        FlagAction::MaxTime => {
            if let Some(seconds) = parse_integer(value) {
                model.timeout_seconds = seconds.max(0) as u64;
            }
        }
        FlagAction::MaxRedirects => {
            if let Some(max) = parse_integer(value) {
                model.follow_redirects = max > 0;
            }
        }
        FlagAction::FollowRedirects => model.follow_redirects = true,
        FlagAction::Ignore => {}
    }
}

/// Parse a header string "Name: Value", splitting on the first colon
fn parse_header(header: &str) -> Option<KeyValue> {
    let (name, value) = header.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(KeyValue::new(name, value.trim()))
}

/// Parse a form field "key=value" or "key=@path"; a bare "key" has an
/// empty value
fn parse_form_field(field: &str) -> Option<FormField> {
    let (key, value) = field.split_once('=').unwrap_or((field, ""));
    if key.is_empty() {
        return None;
    }
    Some(match value.strip_prefix('@') {
        Some(path) => FormField::file(key, path),
        None => FormField::text(key, value),
    })
}

/// Heuristic: a body containing both `=` and `&` is treated as url-encoded.
///
/// A raw body that happens to contain both characters is misclassified;
/// callers rely on this exact rule, so it stays as is.
pub fn is_url_encoded(data: &str) -> bool {
    data.contains('=') && data.contains('&')
}

/// Split `a=1&b=2` into decoded pairs; pairs with an empty key are dropped
pub fn parse_url_encoded(data: &str) -> Vec<KeyValue> {
    data.split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(key);
            if key.is_empty() {
                return None;
            }
            Some(KeyValue::new(key, decode_component(value)))
        })
        .collect()
}

/// Query parameters of `url`, in order of appearance
///
/// URLs the `url` crate rejects (templated hosts like `{{base}}/users`,
/// missing scheme) fall back to splitting whatever follows the first `?`.
pub fn extract_query_params(url: &str) -> Vec<KeyValue> {
    match url::Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .map(|(key, value)| KeyValue::new(key, value))
            .collect(),
        Err(e) => {
            debug!(url = %url, error = %e, "URL did not parse, extracting query manually");
            let Some((_, query)) = url.split_once('?') else {
                return Vec::new();
            };
            query
                .split('&')
                .map(|pair| {
                    let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                    KeyValue::new(decode_component(key), decode_component(value))
                })
                .collect()
        }
    }
}

/// Percent-decode with `+` as space; undecodable input is kept verbatim
fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Integer value of a numeric flag; decimals are truncated
fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// Content type for a raw body: explicit header first, then a guess from
/// the body's first character
fn infer_content_type(model: &RequestModel) -> Option<String> {
    if let Some(header) = model.header("content-type") {
        return Some(header.value.clone());
    }
    guess_content_type(&model.body_content).map(str::to_string)
}

/// MIME type suggested by a body's leading character, if any
pub fn guess_content_type(body: &str) -> Option<&'static str> {
    match body.trim_start().chars().next()? {
        '{' | '[' => Some(JSON_CONTENT_TYPE),
        '<' => Some(XML_CONTENT_TYPE),
        _ => None,
    }
}
