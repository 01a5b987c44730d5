//! Wire and record types for survey submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Submission as built by the form client.
///
/// This is the shape a well-behaved client sends. The server never trusts it:
/// the endpoint parses the body as an untyped JSON value and rebuilds a
/// [`NormalizedRecord`] field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub category: String,
    pub want: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub consent: bool,
    /// Client clock at submit time. Ignored by the server.
    pub submitted_at: String,
}

/// Server-authoritative, sanitized submission.
///
/// Built once per accepted request and then only logged and forwarded.
/// Absent optional fields are omitted from the serialized form, not `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub category: String,
    pub want: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub consent: bool,
    /// Server receipt time, ISO-8601 with millisecond precision.
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// Request metadata copied from transport headers.
///
/// Values are taken verbatim and never validated. Empty header values count
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMeta {
    /// `User-Agent` header.
    pub user_agent: Option<String>,
    /// `Referer` header.
    pub referer: Option<String>,
    /// `X-Forwarded-For` header, unparsed.
    pub ip: Option<String>,
}

impl RequestMeta {
    /// Builds metadata, dropping empty values.
    pub fn new(
        user_agent: Option<String>,
        referer: Option<String>,
        ip: Option<String>,
    ) -> Self {
        Self {
            user_agent: user_agent.filter(|v| !v.is_empty()),
            referer: referer.filter(|v| !v.is_empty()),
            ip: ip.filter(|v| !v.is_empty()),
        }
    }
}

/// Body posted to the configured webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: NormalizedRecord,
}

impl WebhookEnvelope {
    /// Wraps a record in a `survey.submission` envelope.
    pub fn submission(record: NormalizedRecord) -> Self {
        Self {
            event_type: defaults::WEBHOOK_EVENT_TYPE.to_string(),
            data: record,
        }
    }
}

/// Success acknowledgement returned by the submit endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    pub ok: bool,
}

impl SubmitAck {
    pub const OK: SubmitAck = SubmitAck { ok: true };
}

/// Error body returned by the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Serde adapter for `2026-10-19T08:30:00.123Z` style timestamps.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
