//! curl command generation
//!
//! Converts a [`RequestModel`] into a curl command that can be pasted into a
//! POSIX shell and parsed back by [`parse_curl_command`](super::parse_curl_command).

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::models::request::{DEFAULT_METHOD, DEFAULT_TIMEOUT_SECONDS};
use crate::models::{BodyType, RequestModel};

/// Continuation used between lines of a multi-line command
const LINE_CONTINUATION: &str = " \\\n  ";

/// Generate a single-line curl command
pub fn generate_curl(model: &RequestModel) -> String {
    command_groups(model).concat().join(" ")
}

/// Generate a curl command with one option per line
pub fn generate_curl_multiline(model: &RequestModel) -> String {
    command_groups(model)
        .iter()
        .map(|group| group.join(" "))
        .collect::<Vec<_>>()
        .join(LINE_CONTINUATION)
}

/// Arguments grouped per output line: the command and URL first, then one
/// flag (with its value) per group
fn command_groups(model: &RequestModel) -> Vec<Vec<String>> {
    let mut first = vec!["curl".to_string()];
    if !model.method.is_empty() && !model.method.eq_ignore_ascii_case(DEFAULT_METHOD) {
        first.push("-X".to_string());
        first.push(shell_quote(&model.method.to_uppercase()));
    }
    first.push(shell_quote(&model.url));

    let mut groups = vec![first];
    let mut flag = |name: &str, value: &str| {
        groups.push(vec![name.to_string(), shell_quote(value)]);
    };

    for header in model.headers.iter().filter(|h| h.enabled) {
        flag("-H", &format!("{}: {}", header.key, header.value));
    }

    match model.body_type {
        BodyType::None => {}
        BodyType::Raw => {
            if !model.body_content.is_empty() {
                flag("--data-raw", &model.body_content);
            }
        }
        BodyType::UrlEncoded => {
            let pairs: Vec<String> = model
                .url_encoded_data
                .iter()
                .filter(|kv| kv.enabled)
                .map(|kv| format!("{}={}", percent_encode(&kv.key), percent_encode(&kv.value)))
                .collect();
            if !pairs.is_empty() {
                flag("-d", &pairs.join("&"));
            }
        }
        BodyType::FormData => {
            for field in model.form_data.iter().filter(|f| f.enabled) {
                let value = if field.is_file() {
                    format!("{}=@{}", field.key, field.value)
                } else {
                    format!("{}={}", field.key, field.value)
                };
                flag("-F", &value);
            }
        }
    }

    if model.timeout_seconds != DEFAULT_TIMEOUT_SECONDS {
        flag("--max-time", &model.timeout_seconds.to_string());
    }

    if model.follow_redirects {
        groups.push(vec!["-L".to_string()]);
    } else {
        groups.push(vec!["--max-redirs".to_string(), "0".to_string()]);
    }

    groups
}

fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':' | '=' | '@' | ',' | '%' | '+')
}

/// Quote a string for a POSIX shell
///
/// Single quotes and backslashes are written outside the quoted span
/// (`'\''` and `'\\'`), which reads the same to a shell and to the
/// tokenizer.
pub fn shell_quote(s: &str) -> String {
    if !s.is_empty() && s.chars().all(is_shell_safe) {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        match c {
            '\'' => quoted.push_str(r"'\''"),
            '\\' => quoted.push_str(r"'\\'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Percent-encode a string for URL/form data
fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::tokenize;
    use crate::models::{FormField, KeyValue};

    #[test]
    fn test_shell_quote_simple() {
        assert_eq!(shell_quote("hello"), "hello");
        assert_eq!(shell_quote("https://example.com/a"), "https://example.com/a");
        assert_eq!(shell_quote("hello world"), "'hello world'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn test_shell_quote_special_chars() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(r"a\b"), r"'a'\\'b'");
        assert_eq!(shell_quote("$HOME"), "'$HOME'");
        assert_eq!(shell_quote("{{token}}"), "'{{token}}'");
    }

    #[test]
    fn test_shell_quote_tokenizes_back() {
        for value in ["it's", r"C:\path\to", r#"say "hi""#, "a & b", "{{x}}", r"\'"] {
            let tokens = tokenize(&format!("curl {}", shell_quote(value)));
            assert_eq!(tokens, vec!["curl".to_string(), value.to_string()], "value: {value}");
        }
    }

    #[test]
    fn test_simple_get() {
        let model = RequestModel::new("GET", "https://example.com");
        assert_eq!(generate_curl(&model), "curl https://example.com -L");
    }

    #[test]
    fn test_post_json() {
        let mut model = RequestModel::new("post", "https://example.com/users");
        model.headers.push(KeyValue::new("Content-Type", "application/json"));
        model.set_raw_body(r#"{"name":"John"}"#);
        assert_eq!(
            generate_curl(&model),
            r#"curl -X POST https://example.com/users -H 'Content-Type: application/json' --data-raw '{"name":"John"}' -L"#
        );
    }

    #[test]
    fn test_disabled_rows_skipped() {
        let mut model = RequestModel::new("GET", "https://example.com");
        let mut header = KeyValue::new("X-Off", "1");
        header.enabled = false;
        model.headers.push(header);
        assert!(!generate_curl(&model).contains("X-Off"));
    }

    #[test]
    fn test_content_type_field_adds_no_header() {
        let mut model = RequestModel::new("POST", "https://example.com");
        model.set_raw_body("plain text");
        model.content_type = "text/plain".to_string();
        assert_eq!(
            generate_curl(&model),
            "curl -X POST https://example.com --data-raw 'plain text' -L"
        );
    }

    #[test]
    fn test_url_encoded_and_form() {
        let mut model = RequestModel::new("POST", "https://example.com");
        model.set_url_encoded_body(vec![KeyValue::new("a b", "1&2"), KeyValue::new("c", "3")]);
        assert!(generate_curl(&model).contains("-d 'a%20b=1%262&c=3'"));

        let mut model = RequestModel::new("POST", "https://example.com");
        model.push_form_field(FormField::text("name", "John"));
        model.push_form_field(FormField::file("avatar", "/tmp/me.png"));
        let cmd = generate_curl(&model);
        assert!(cmd.contains("-F name=John"));
        assert!(cmd.contains("-F avatar=@/tmp/me.png"));
    }

    #[test]
    fn test_transport_options() {
        let mut model = RequestModel::new("GET", "https://example.com");
        model.timeout_seconds = 5;
        model.follow_redirects = false;
        assert_eq!(generate_curl(&model), "curl https://example.com --max-time 5 --max-redirs 0");
    }

    #[test]
    fn test_multiline() {
        let mut model = RequestModel::new("DELETE", "https://example.com/1");
        model.headers.push(KeyValue::new("Accept", "*/*"));
        assert_eq!(
            generate_curl_multiline(&model),
            "curl -X DELETE https://example.com/1 \\\n  -H 'Accept: */*' \\\n  -L"
        );
    }
}
