//! Cleaning of submitted values according to their declared parameter type.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

/// How a submitted value is cleaned before validation sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamType {
    /// Leave the value untouched.
    Raw,
    /// Decode entities and strip all tags, leaving plain text.
    Text,
    /// Keep a safe subset of HTML.
    CleanHtml,
    /// Parse as an integer; unparseable input becomes 0 and blank input
    /// becomes null.
    Int,
}

impl ParamType {
    /// Apply this type to a submitted value. Non-string scalars pass through
    /// except for `Int`, which coerces them. Arrays are cleaned element-wise.
    pub fn clean(self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|v| self.clean(v)).collect()),
            Value::String(s) => match self {
                ParamType::Raw => value.clone(),
                ParamType::Text => Value::String(strip_tags(s)),
                ParamType::CleanHtml => Value::String(clean_html(s)),
                ParamType::Int if s.trim().is_empty() => Value::Null,
                ParamType::Int => Value::from(parse_int(s)),
            },
            Value::Bool(b) if self == ParamType::Int => Value::from(i64::from(*b)),
            Value::Number(n) if self == ParamType::Int => {
                Value::from(n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64))
            }
            _ => value.clone(),
        }
    }
}

/// Which cleaning applies to the free-text settings (name, description, label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SanitizeMode {
    /// Strip tags entirely.
    PlainText,
    /// Keep safe HTML.
    #[default]
    CleanHtml,
}

impl SanitizeMode {
    pub fn param_type(self) -> ParamType {
        match self {
            SanitizeMode::PlainText => ParamType::Text,
            SanitizeMode::CleanHtml => ParamType::CleanHtml,
        }
    }
}

/// Decode HTML entities and remove every tag.
///
/// Decoding can reveal markup that was entity-encoded, so both steps repeat
/// until the text no longer changes. Each round that changes the text makes
/// it shorter.
pub fn strip_tags(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let decoded = html_escape::decode_html_entities(&current);
        let next = TAG_REGEX.replace_all(&decoded, "").into_owned();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Keep safe markup only: scripts, event handlers and unsafe URLs are removed.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

fn parse_int(input: &str) -> i64 {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().map(|f| f as i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Score", "Score")]
    #[case("<b>Score</b>", "Score")]
    #[case("Tom &amp; Jerry", "Tom & Jerry")]
    #[case("<script>alert(1)</script>x", "alert(1)x")]
    #[case("a <br/>\nb", "a \nb")]
    #[case("&lt;script&gt;alert(1)&lt;/script&gt;", "alert(1)")]
    #[case("&amp;lt;b&amp;gt;x&amp;lt;/b&amp;gt;", "x")]
    fn strip_tags_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_tags(input), expected);
    }

    #[test]
    fn clean_html_keeps_safe_markup() {
        assert_eq!(clean_html("<b>bold</b>"), "<b>bold</b>");
    }

    #[test]
    fn clean_html_removes_scripts_and_handlers() {
        let cleaned = clean_html(r#"<p onclick="x()">hi</p><script>evil()</script>"#);
        assert!(!cleaned.contains("script"));
        assert!(!cleaned.contains("onclick"));
        assert!(cleaned.contains("hi"));
    }

    #[rstest]
    #[case(json!("-1"), json!(-1))]
    #[case(json!(" 2 "), json!(2))]
    #[case(json!("3.7"), json!(3))]
    #[case(json!("abc"), json!(0))]
    #[case(json!(5), json!(5))]
    #[case(json!(true), json!(1))]
    #[case(json!(""), Value::Null)]
    #[case(json!("  "), Value::Null)]
    fn int_coercion(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(ParamType::Int.clean(&input), expected);
    }

    #[test]
    fn arrays_are_cleaned_element_wise() {
        let cleaned = ParamType::Text.clean(&json!(["<i>a</i>", "b"]));
        assert_eq!(cleaned, json!(["a", "b"]));
    }

    #[test]
    fn raw_leaves_values_alone() {
        let value = json!("<i>a</i>");
        assert_eq!(ParamType::Raw.clean(&value), value);
    }

    #[test]
    fn sanitize_mode_defaults_to_clean_html() {
        assert_eq!(SanitizeMode::default(), SanitizeMode::CleanHtml);
        assert_eq!(SanitizeMode::PlainText.param_type(), ParamType::Text);
        assert_eq!(SanitizeMode::CleanHtml.param_type(), ParamType::CleanHtml);
    }
}
