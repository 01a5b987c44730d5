//! Validation and normalization of untrusted submission bodies.
//!
//! The server re-checks every field independently of the form client. A field
//! of the wrong type is omitted, an oversized string is truncated, and only a
//! missing or too-short `want` rejects the submission.
//!
//! Every length here, the `want` minimum included, counts Unicode scalar
//! values (`char`s), not bytes or UTF-16 code units.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::coerce::{is_truthy, stringify, truncate_chars};
use crate::defaults::{
    BUDGET_MAX, CATEGORY_MAX, DEFAULT_CATEGORY, EMAIL_MAX, NAME_MAX, TAGS_MAX_COUNT, TAG_MAX,
    URGENCY_MAX, WANT_MAX, WANT_MIN, WHY_MAX,
};
use crate::error::{Error, Result};
use crate::models::{NormalizedRecord, RequestMeta};

/// Checks that `body` is an object carrying a usable `want` statement.
///
/// Returns the untrimmed `want` on success.
pub fn validate(body: &Value) -> Result<&str> {
    let want = body
        .as_object()
        .and_then(|obj| obj.get("want"))
        .and_then(Value::as_str)
        .ok_or(Error::InvalidPayload)?;

    if want.trim().chars().count() < WANT_MIN {
        return Err(Error::InvalidPayload);
    }
    Ok(want)
}

/// Builds the server-side record for an accepted submission.
///
/// `submitted_at` and `meta` come from the server and the transport; any
/// client-supplied keys of the same names are ignored.
pub fn normalize(
    body: &Value,
    meta: RequestMeta,
    submitted_at: DateTime<Utc>,
) -> Result<NormalizedRecord> {
    let want = validate(body)?;
    let obj = body.as_object().ok_or(Error::InvalidPayload)?;

    let category = match obj.get("category") {
        Some(value) if is_truthy(value) => truncate_chars(&stringify(value), CATEGORY_MAX),
        _ => DEFAULT_CATEGORY.to_string(),
    };

    Ok(NormalizedRecord {
        name: optional_string(obj, "name", NAME_MAX),
        email: optional_string(obj, "email", EMAIL_MAX),
        category,
        want: truncate_chars(want, WANT_MAX),
        why: optional_string(obj, "why", WHY_MAX),
        urgency: optional_string(obj, "urgency", URGENCY_MAX),
        budget: optional_string(obj, "budget", BUDGET_MAX),
        tags: tags(obj),
        consent: obj.get("consent").map(is_truthy).unwrap_or(false),
        submitted_at,
        user_agent: meta.user_agent,
        referer: meta.referer,
        ip: meta.ip,
    })
}

fn optional_string(obj: &Map<String, Value>, key: &str, max: usize) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| truncate_chars(s, max))
}

fn tags(obj: &Map<String, Value>) -> Option<Vec<String>> {
    let items = obj.get("tags")?.as_array()?;
    if items.len() > TAGS_MAX_COUNT {
        tracing::debug!(
            received = items.len(),
            kept = TAGS_MAX_COUNT,
            "Dropping excess tags"
        );
    }
    Some(
        items
            .iter()
            .take(TAGS_MAX_COUNT)
            .map(|tag| truncate_chars(&stringify(tag), TAG_MAX))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn run(body: Value) -> Result<NormalizedRecord> {
        normalize(&body, RequestMeta::default(), now())
    }

    #[test]
    fn test_minimal_valid_body() {
        let record = run(json!({"want": "a better calendar"})).unwrap();
        assert_eq!(record.want, "a better calendar");
        assert_eq!(record.category, "Other");
        assert!(!record.consent);
        assert_eq!(record.name, None);
        assert_eq!(record.tags, None);
        assert_eq!(record.submitted_at, now());
    }

    #[test]
    fn test_rejects_non_object_bodies() {
        for body in [
            json!(null),
            json!(false),
            json!(0),
            json!("a better calendar"),
            json!(["a better calendar"]),
        ] {
            assert!(matches!(run(body), Err(Error::InvalidPayload)));
        }
    }

    #[test]
    fn test_rejects_missing_or_non_string_want() {
        assert!(matches!(run(json!({})), Err(Error::InvalidPayload)));
        assert!(matches!(
            run(json!({"want": 12345678901_i64})),
            Err(Error::InvalidPayload)
        ));
        assert!(matches!(
            run(json!({"want": ["long enough words"]})),
            Err(Error::InvalidPayload)
        ));
    }

    #[test]
    fn test_want_length_is_measured_after_trimming() {
        assert!(matches!(
            run(json!({"want": "   short   "})),
            Err(Error::InvalidPayload)
        ));
        assert!(matches!(
            run(json!({"want": "1234567"})),
            Err(Error::InvalidPayload)
        ));
        assert!(run(json!({"want": "12345678"})).is_ok());
    }

    #[test]
    fn test_want_minimum_counts_unicode_scalar_values() {
        assert!(matches!(run(json!({"want": "🙂🙂🙂🙂"})), Err(Error::InvalidPayload)));
        assert!(run(json!({"want": "🙂🙂🙂🙂🙂🙂🙂🙂"})).is_ok());
        assert!(run(json!({"want": "ééééééé"})).is_err());
        assert!(run(json!({"want": "éééééééé"})).is_ok());
    }

    #[test]
    fn test_want_is_kept_untrimmed() {
        let record = run(json!({"want": "  padded want  "})).unwrap();
        assert_eq!(record.want, "  padded want  ");
    }

    #[test]
    fn test_oversized_strings_are_truncated() {
        let long = "x".repeat(5000);
        let record = run(json!({
            "want": long,
            "name": long,
            "email": long,
            "category": long,
            "why": long,
            "urgency": long,
            "budget": long,
        }))
        .unwrap();

        assert_eq!(record.want.chars().count(), WANT_MAX);
        assert_eq!(record.name.unwrap().chars().count(), NAME_MAX);
        assert_eq!(record.email.unwrap().chars().count(), EMAIL_MAX);
        assert_eq!(record.category.chars().count(), CATEGORY_MAX);
        assert_eq!(record.why.unwrap().chars().count(), WHY_MAX);
        assert_eq!(record.urgency.unwrap().chars().count(), URGENCY_MAX);
        assert_eq!(record.budget.unwrap().chars().count(), BUDGET_MAX);
    }

    #[test]
    fn test_wrong_typed_optionals_are_omitted() {
        let record = run(json!({
            "want": "a better calendar",
            "name": 42,
            "email": {"address": "a@b.c"},
            "why": ["because"],
            "urgency": true,
            "budget": null,
            "tags": "a,b,c",
        }))
        .unwrap();

        assert_eq!(record.name, None);
        assert_eq!(record.email, None);
        assert_eq!(record.why, None);
        assert_eq!(record.urgency, None);
        assert_eq!(record.budget, None);
        assert_eq!(record.tags, None);
    }

    #[test]
    fn test_category_defaults_when_falsy() {
        for category in [json!(""), json!(null), json!(false), json!(0)] {
            let record = run(json!({"want": "a better calendar", "category": category})).unwrap();
            assert_eq!(record.category, "Other");
        }
    }

    #[test]
    fn test_truthy_non_string_category_is_stringified() {
        let record = run(json!({"want": "a better calendar", "category": 7})).unwrap();
        assert_eq!(record.category, "7");

        let record = run(json!({"want": "a better calendar", "category": {"x": 1}})).unwrap();
        assert_eq!(record.category, "[object Object]");
    }

    #[test]
    fn test_tags_are_capped_in_count_and_length() {
        let tags: Vec<Value> = (0..25).map(|i| json!(format!("tag-{i}"))).collect();
        let record = run(json!({"want": "a better calendar", "tags": tags})).unwrap();
        let tags = record.tags.unwrap();
        assert_eq!(tags.len(), TAGS_MAX_COUNT);
        assert_eq!(tags[0], "tag-0");
        assert_eq!(tags[19], "tag-19");

        let record = run(json!({
            "want": "a better calendar",
            "tags": ["y".repeat(100)],
        }))
        .unwrap();
        assert_eq!(record.tags.unwrap()[0].chars().count(), TAG_MAX);
    }

    #[test]
    fn test_tag_elements_are_stringified() {
        let record = run(json!({
            "want": "a better calendar",
            "tags": ["a", 1, true, null, {"k": "v"}],
        }))
        .unwrap();
        assert_eq!(
            record.tags.unwrap(),
            vec!["a", "1", "true", "null", "[object Object]"]
        );
    }

    #[test]
    fn test_empty_tags_array_is_kept() {
        let record = run(json!({"want": "a better calendar", "tags": []})).unwrap();
        assert_eq!(record.tags, Some(vec![]));
    }

    #[test]
    fn test_consent_is_coerced_by_truthiness() {
        let cases = [
            (json!(true), true),
            (json!("yes"), true),
            (json!("false"), true),
            (json!(1), true),
            (json!(false), false),
            (json!(0), false),
            (json!(""), false),
            (json!(null), false),
        ];
        for (input, expected) in cases {
            let record = run(json!({"want": "a better calendar", "consent": input})).unwrap();
            assert_eq!(record.consent, expected, "consent {input}");
        }
    }

    #[test]
    fn test_client_metadata_is_ignored() {
        let meta = RequestMeta::new(
            Some("Mozilla/5.0".to_string()),
            None,
            Some("203.0.113.7".to_string()),
        );
        let record = normalize(
            &json!({
                "want": "a better calendar",
                "submittedAt": "1999-01-01T00:00:00.000Z",
                "userAgent": "spoofed",
                "referer": "spoofed",
                "ip": "10.0.0.1",
            }),
            meta,
            now(),
        )
        .unwrap();

        assert_eq!(record.submitted_at, now());
        assert_eq!(record.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(record.referer, None);
        assert_eq!(record.ip.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_metadata_is_not_length_limited() {
        let agent = "A".repeat(4000);
        let meta = RequestMeta::new(Some(agent.clone()), None, None);
        let record = normalize(&json!({"want": "a better calendar"}), meta, now()).unwrap();
        assert_eq!(record.user_agent, Some(agent));
    }
}
