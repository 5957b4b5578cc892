//! Assurance platform records and the polled sample

use serde::Deserialize;
use serde_json::{Map, Value};

/// Short-lived platform token, refreshed every poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity used for user enrichment lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    NetworkUserId(String),
}

impl Identity {
    /// Value of the `entity_type` header
    pub fn entity_type(&self) -> &'static str {
        match self {
            Identity::NetworkUserId(_) => "network_user_id",
        }
    }

    /// Value of the `entity_value` header
    pub fn entity_value(&self) -> &str {
        match self {
            Identity::NetworkUserId(v) => v,
        }
    }
}

/// One record of the user enrichment response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrichmentRecord {
    #[serde(rename = "userDetails", default)]
    pub user_details: UserDetails,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    /// Hardware address of the host
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub host_type: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl UserDetails {
    /// The platform answers unknown users with an empty `userDetails` object
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.host_type.is_none() && self.other.is_empty()
    }

    pub fn is_wireless(&self) -> bool {
        self.host_type.as_deref() == Some("WIRELESS")
    }
}

/// Raw client-detail response
///
/// Kept loosely typed: field presence is checked when a [`Sample`] is built,
/// so a partial record is a typed failure instead of a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientDetail {
    #[serde(default)]
    pub detail: Option<Value>,
}

/// One polled snapshot of the monitored client
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Overall health score
    pub health_score: i64,
    pub tx_bytes: f64,
    pub rx_bytes: f64,
    pub snr: f64,
    pub data_rate: f64,
    pub location: String,
    pub access_point: String,
    pub ssid: String,
}

impl Sample {
    /// Cumulative transmitted and received bytes
    pub fn total_bytes(&self) -> f64 {
        self.tx_bytes + self.rx_bytes
    }
}

/// Why a client-detail record could not be turned into a sample
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },
}

impl TryFrom<&ClientDetail> for Sample {
    type Error = SampleError;

    fn try_from(record: &ClientDetail) -> Result<Self, Self::Error> {
        let detail = record
            .detail
            .as_ref()
            .and_then(Value::as_object)
            .ok_or(SampleError::MissingField("detail"))?;

        Ok(Sample {
            health_score: overall_health(detail)?,
            tx_bytes: number_field(detail, "txBytes")?,
            rx_bytes: number_field(detail, "rxBytes")?,
            snr: number_field(detail, "snr")?,
            data_rate: number_field(detail, "dataRate")?,
            location: text_field(detail, "location")?,
            access_point: text_field(detail, "clientConnection")?,
            ssid: text_field(detail, "ssid")?,
        })
    }
}

fn overall_health(detail: &Map<String, Value>) -> Result<i64, SampleError> {
    let scores = detail
        .get("healthScore")
        .and_then(Value::as_array)
        .ok_or(SampleError::MissingField("healthScore"))?;

    let overall = scores
        .iter()
        .filter(|s| s.get("healthType").and_then(Value::as_str) == Some("OVERALL"))
        .last()
        .and_then(|s| s.get("score"))
        .ok_or(SampleError::MissingField("healthScore.OVERALL"))?;

    let score = as_f64(overall).ok_or_else(|| SampleError::InvalidField {
        field: "healthScore.OVERALL",
        value: overall.to_string(),
    })?;
    Ok(score as i64)
}

/// Numbers arrive either as JSON numbers or numeric strings
fn number_field(detail: &Map<String, Value>, field: &'static str) -> Result<f64, SampleError> {
    let value = detail
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or(SampleError::MissingField(field))?;

    as_f64(value).ok_or_else(|| SampleError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// NaN and infinities parse from strings but would never breach a threshold
fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Labels must be present; a null label renders as "unknown"
fn text_field(detail: &Map<String, Value>, field: &'static str) -> Result<String, SampleError> {
    match detail.get(field) {
        None => Err(SampleError::MissingField(field)),
        Some(Value::Null) => Ok("unknown".to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(value: Value) -> ClientDetail {
        serde_json::from_value(value).unwrap()
    }

    fn full_detail() -> Value {
        json!({
            "detail": {
                "healthScore": [
                    {"healthType": "ONBOARDED", "score": 4},
                    {"healthType": "OVERALL", "score": 7}
                ],
                "txBytes": "1200.0",
                "rxBytes": 300,
                "snr": "41.0",
                "dataRate": "144.0",
                "location": "Global/SJC/Floor 2",
                "clientConnection": "AP-SJC-2-07",
                "ssid": "corp-wifi"
            }
        })
    }

    #[test]
    fn test_sample_from_full_detail() {
        let sample = Sample::try_from(&detail(full_detail())).unwrap();

        assert_eq!(sample.health_score, 7);
        assert_eq!(sample.total_bytes(), 1500.0);
        assert_eq!(sample.snr, 41.0);
        assert_eq!(sample.data_rate, 144.0);
        assert_eq!(sample.location, "Global/SJC/Floor 2");
        assert_eq!(sample.access_point, "AP-SJC-2-07");
        assert_eq!(sample.ssid, "corp-wifi");
    }

    #[test]
    fn test_missing_detail() {
        let err = Sample::try_from(&detail(json!({}))).unwrap_err();
        assert_eq!(err, SampleError::MissingField("detail"));
    }

    #[test]
    fn test_missing_overall_score() {
        let mut value = full_detail();
        value["detail"]["healthScore"] = json!([{"healthType": "ONBOARDED", "score": 4}]);

        let err = Sample::try_from(&detail(value)).unwrap_err();
        assert_eq!(err, SampleError::MissingField("healthScore.OVERALL"));
    }

    #[test]
    fn test_invalid_snr() {
        let mut value = full_detail();
        value["detail"]["snr"] = json!("n/a");

        let err = Sample::try_from(&detail(value)).unwrap_err();
        assert!(matches!(err, SampleError::InvalidField { field: "snr", .. }));
    }

    #[test]
    fn test_non_finite_numbers_are_invalid() {
        for (field, raw) in [("snr", "NaN"), ("txBytes", "inf"), ("rxBytes", "-infinity")] {
            let mut value = full_detail();
            value["detail"][field] = json!(raw);

            let err = Sample::try_from(&detail(value)).unwrap_err();
            assert_eq!(
                err,
                SampleError::InvalidField {
                    field,
                    value: format!("\"{raw}\""),
                },
                "{field}={raw} accepted"
            );
        }

        let mut value = full_detail();
        value["detail"]["healthScore"] = json!([{"healthType": "OVERALL", "score": "NaN"}]);
        let err = Sample::try_from(&detail(value)).unwrap_err();
        assert!(matches!(err, SampleError::InvalidField { field: "healthScore.OVERALL", .. }));
    }

    #[test]
    fn test_null_location_is_unknown() {
        let mut value = full_detail();
        value["detail"]["location"] = Value::Null;

        let sample = Sample::try_from(&detail(value)).unwrap();
        assert_eq!(sample.location, "unknown");
    }

    #[test]
    fn test_empty_user_details() {
        let record: EnrichmentRecord = serde_json::from_value(json!({"userDetails": {}})).unwrap();
        assert!(record.user_details.is_empty());

        let record: EnrichmentRecord = serde_json::from_value(json!({
            "userDetails": {"id": "aa:bb:cc:dd:ee:ff", "hostType": "WIRELESS", "hostName": "laptop"}
        }))
        .unwrap();
        assert!(!record.user_details.is_empty());
        assert!(record.user_details.is_wireless());
    }
}
