use archwiz_core::{Choice, EntrySource};
use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

/// Error returned when a string names none of a choice type's ids.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {table} '{input}'; expected one of: {expected}")]
pub struct ParseChoiceError {
    table: &'static str,
    input: String,
    expected: String,
}

/// Parses a choice id such as `"best-of-breed"`. Usable as a clap value parser.
pub fn parse_choice<T: Choice>(s: &str) -> Result<T, ParseChoiceError> {
    T::all()
        .iter()
        .copied()
        .find(|choice| choice.id().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| ParseChoiceError {
            table: T::TABLE,
            input: s.to_string(),
            expected: T::all()
                .iter()
                .map(|choice| choice.id())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Like [`parse_choice`], with `"none"` clearing the entry source.
pub fn parse_entry_source(s: &str) -> Result<Option<EntrySource>, ParseChoiceError> {
    if s.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    parse_choice(s).map(Some)
}

/// The most likely reading of a command-line field value.
///
/// JSON is taken as-is (`true`, `42`, `["aws","gcp"]`, `"quoted"`). Numbers
/// with comma thousands separators (`"7,500"`) become plain numbers, and
/// anything else is passed through as a bare string. When the field rejects
/// this reading, try [`fallback_values`] in order.
pub fn parse_value(s: &str) -> Value {
    let trimmed = s.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }
    if trimmed.contains(',') {
        if let Ok(amount) = trimmed.replace(',', "").parse::<Decimal>() {
            return decimal_value(amount);
        }
    }
    Value::String(trimmed.to_string())
}

/// Other readings of `s`: the raw text as a string (so `2024` or `true`
/// can name things), then a comma-separated list (`hipaa,gdpr`).
pub fn fallback_values(s: &str) -> Vec<Value> {
    let trimmed = s.trim();
    let mut values = Vec::with_capacity(2);
    let text = Value::String(trimmed.to_string());
    if parse_value(trimmed) != text {
        values.push(text);
    }
    let items = trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| Value::String(item.to_string()))
        .collect();
    values.push(Value::Array(items));
    values
}

/// Whole amounts become JSON integers so they fit integer fields too;
/// fractional amounts stay strings to keep their exact digits.
fn decimal_value(amount: Decimal) -> Value {
    if amount.fract().is_zero() {
        if let Ok(whole) = i64::try_from(amount.trunc()) {
            return Value::from(whole);
        }
    }
    Value::String(amount.normalize().to_string())
}

/// Formats a field value for display, using "—" for empty values.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "—".to_string(),
        Value::String(s) if s.is_empty() => "—".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => "—".to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archwiz_core::{ComplexityPreference, Provider};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_choice_is_case_insensitive_and_trims() {
        assert_eq!(parse_choice::<Provider>(" GCP "), Ok(Provider::Gcp));
        assert_eq!(
            parse_choice::<ComplexityPreference>("advanced"),
            Ok(ComplexityPreference::Advanced)
        );
    }

    #[test]
    fn parse_choice_error_lists_valid_ids() {
        let err = parse_choice::<Provider>("oracle").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'oracle'"), "{message}");
        assert!(message.contains("aws, azure, gcp"), "{message}");
    }

    #[test]
    fn parse_entry_source_accepts_none() {
        assert_eq!(parse_entry_source("none"), Ok(None));
        assert_eq!(parse_entry_source("idea"), Ok(Some(EntrySource::Idea)));
        assert!(parse_entry_source("spreadsheet").is_err());
    }

    #[test]
    fn parse_value_reads_json() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("4000"), json!(4000));
        assert_eq!(parse_value(r#"["document","object"]"#), json!(["document", "object"]));
        assert_eq!(parse_value(r#""quoted text""#), json!("quoted text"));
    }

    #[test]
    fn parse_value_falls_back_to_bare_string() {
        assert_eq!(parse_value("checkout service"), json!("checkout service"));
        assert_eq!(parse_value("  web-app "), json!("web-app"));
    }

    #[test]
    fn parse_value_accepts_comma_thousands_separator() {
        assert_eq!(parse_value("7,500"), json!(7500));
        assert_eq!(parse_value("1,234.50"), json!("1234.5"));
    }

    #[test]
    fn fallbacks_keep_the_raw_text_then_split_lists() {
        assert_eq!(fallback_values("2024"), vec![json!("2024"), json!(["2024"])]);
        assert_eq!(fallback_values("true"), vec![json!("true"), json!(["true"])]);
        assert_eq!(
            fallback_values("hipaa, gdpr"),
            vec![json!("hipaa, gdpr"), json!(["hipaa", "gdpr"])]
        );
    }

    #[test]
    fn fallbacks_skip_the_primary_reading() {
        assert_eq!(fallback_values(" web-app "), vec![json!(["web-app"])]);
        assert_eq!(fallback_values("rust,,go,"), vec![json!(["rust", "go"])]);
    }

    #[test]
    fn display_value_uses_dash_for_empty() {
        assert_eq!(display_value(&json!("")), "—");
        assert_eq!(display_value(&json!([])), "—");
        assert_eq!(display_value(&json!(["aws", "gcp"])), "aws, gcp");
        assert_eq!(display_value(&json!(false)), "false");
        assert_eq!(display_value(&json!("1500")), "1500");
    }
}
