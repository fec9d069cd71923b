use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{HotelSearchError, HotelSearchResult};

/// Request parameter key the search credential is injected under
pub const API_KEY_PARAM: &str = "api_key";

/// Typed hotel search parameters as emitted by the model between the
/// `[HOTELS]` markers.
///
/// Scalar fields accept JSON strings or numbers since the model emits both.
/// Unrecognized keys are ignored; in particular a caller-supplied `api_key`
/// never survives into the outgoing request.
#[derive(Debug, Clone, Deserialize)]
pub struct HotelQuery {
    #[serde(deserialize_with = "scalar")]
    pub q: String,
    #[serde(deserialize_with = "scalar")]
    pub check_in_date: String,
    #[serde(deserialize_with = "scalar")]
    pub check_out_date: String,
    #[serde(deserialize_with = "scalar")]
    pub gl: String,
    #[serde(deserialize_with = "scalar")]
    pub hl: String,
    #[serde(deserialize_with = "scalar")]
    pub currency: String,
    #[serde(deserialize_with = "scalar")]
    pub adults: String,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub children: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub min_price: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub max_price: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub amenities: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub property_types: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub free_cancellation: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub hotel_class: Option<String>,
    #[serde(default, deserialize_with = "opt_scalar")]
    pub sort_by: Option<String>,
}

impl HotelQuery {
    /// Parses and validates a raw tool-call payload.
    ///
    /// Raw JSON syntax errors are logged but not surfaced; structural
    /// problems keep their reason so the model can fix the query.
    pub fn parse(payload: &str) -> HotelSearchResult<Self> {
        let value: Value = serde_json::from_str(payload).map_err(|e| {
            debug!(error = %e, "Tool-call payload is not valid JSON");
            HotelSearchError::InvalidPayload("the payload is not valid JSON".to_string())
        })?;

        if !value.is_object() {
            return Err(HotelSearchError::InvalidPayload(
                "the payload must be a JSON object of search parameters".to_string(),
            ));
        }

        let query: Self = serde_json::from_value(value)
            .map_err(|e| HotelSearchError::InvalidPayload(e.to_string()))?;
        query.validate()?;
        Ok(query)
    }

    /// A single price bound is enough, but one of the two is required
    fn validate(&self) -> HotelSearchResult<()> {
        if self.min_price.is_none() && self.max_price.is_none() {
            return Err(HotelSearchError::InvalidPayload(
                "at least one of `min_price` or `max_price` is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the outgoing request parameters, injecting the search
    /// credential last so it overrides anything the caller supplied.
    pub fn to_params(&self, api_key: &str) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = vec![
            ("q".to_string(), self.q.clone()),
            ("check_in_date".to_string(), self.check_in_date.clone()),
            ("check_out_date".to_string(), self.check_out_date.clone()),
            ("gl".to_string(), self.gl.clone()),
            ("hl".to_string(), self.hl.clone()),
            ("currency".to_string(), self.currency.clone()),
            ("adults".to_string(), self.adults.clone()),
        ];

        let optional = [
            ("children", &self.children),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
            ("amenities", &self.amenities),
            ("property_types", &self.property_types),
            ("free_cancellation", &self.free_cancellation),
            ("hotel_class", &self.hotel_class),
            ("sort_by", &self.sort_by),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                params.push((name.to_string(), value.clone()));
            }
        }

        params.retain(|(name, _)| name != API_KEY_PARAM);
        params.push((API_KEY_PARAM.to_string(), api_key.to_string()));
        params
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(&value).ok_or_else(|| de::Error::custom("expected a string or number"))
}

fn opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_to_string(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a string or number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "q": "Paris Hotels",
        "check_in_date": "2025-01-01",
        "check_out_date": "2025-01-02",
        "gl": "fr",
        "hl": "en",
        "currency": "EUR",
        "adults": "2",
        "min_price": "50",
        "max_price": "300"
    }"#;

    #[test]
    fn parses_the_full_payload() {
        let query = HotelQuery::parse(FULL_PAYLOAD).unwrap();
        assert_eq!(query.q, "Paris Hotels");
        assert_eq!(query.check_in_date, "2025-01-01");
        assert_eq!(query.adults, "2");
        assert_eq!(query.min_price.as_deref(), Some("50"));
        assert!(query.children.is_none());
    }

    #[test]
    fn accepts_numeric_scalars() {
        let query = HotelQuery::parse(
            r#"{"q":"Tokyo Hotels","check_in_date":"2025-03-01","check_out_date":"2025-03-05",
                "gl":"jp","hl":"en","currency":"JPY","adults":2,"children":1,
                "min_price":10000,"hotel_class":3,"free_cancellation":true}"#,
        )
        .unwrap();
        assert_eq!(query.adults, "2");
        assert_eq!(query.children.as_deref(), Some("1"));
        assert_eq!(query.min_price.as_deref(), Some("10000"));
        assert_eq!(query.hotel_class.as_deref(), Some("3"));
        assert_eq!(query.free_cancellation.as_deref(), Some("true"));
    }

    #[test]
    fn garbage_text_is_invalid_with_the_fixed_notice() {
        let err = HotelQuery::parse("not json at all").unwrap_err();
        assert!(matches!(err, HotelSearchError::InvalidPayload(_)));
        assert!(err.to_string().starts_with("Invalid hotel query"));
    }

    #[test]
    fn non_object_payloads_are_invalid() {
        for payload in [r#"["q"]"#, r#""Paris""#, "42", "null"] {
            let err = HotelQuery::parse(payload).unwrap_err();
            assert!(matches!(err, HotelSearchError::InvalidPayload(_)), "{payload}");
        }
    }

    #[test]
    fn missing_required_key_names_the_field() {
        let err = HotelQuery::parse(
            r#"{"check_in_date":"2025-01-01","check_out_date":"2025-01-02","gl":"fr",
                "hl":"en","currency":"EUR","adults":"2","min_price":"50"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing field `q`"));
    }

    #[test]
    fn a_single_price_bound_is_enough() {
        let only_max = FULL_PAYLOAD.replace(r#""min_price": "50","#, "");
        assert!(HotelQuery::parse(&only_max).is_ok());
    }

    #[test]
    fn missing_both_price_bounds_is_invalid() {
        let err = HotelQuery::parse(
            r#"{"q":"Paris Hotels","check_in_date":"2025-01-01","check_out_date":"2025-01-02",
                "gl":"fr","hl":"en","currency":"EUR","adults":"2"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("min_price"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let with_extras = FULL_PAYLOAD.replace(
            r#""q": "Paris Hotels","#,
            r#""q": "Paris Hotels", "engine": "bing", "comment": "ignore me","#,
        );
        let query = HotelQuery::parse(&with_extras).unwrap();
        let params = query.to_params("key");
        assert!(!params.iter().any(|(name, _)| name == "engine"));
    }

    #[test]
    fn credential_is_injected_and_overrides_caller_values() {
        let smuggled = FULL_PAYLOAD.replace(
            r#""q": "Paris Hotels","#,
            r#""q": "Paris Hotels", "api_key": "attacker-key","#,
        );
        let query = HotelQuery::parse(&smuggled).unwrap();
        let params = query.to_params("configured-key");

        let api_keys: Vec<&str> = params
            .iter()
            .filter(|(name, _)| name == API_KEY_PARAM)
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(api_keys, vec!["configured-key"]);
    }

    #[test]
    fn params_carry_only_set_fields() {
        let query = HotelQuery::parse(FULL_PAYLOAD).unwrap();
        let params = query.to_params("k");
        assert!(params.iter().any(|(n, v)| n == "min_price" && v == "50"));
        assert!(!params.iter().any(|(n, _)| n == "children"));
        assert!(!params.iter().any(|(n, _)| n == "sort_by"));
    }
}
