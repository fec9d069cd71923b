use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::SearchTransport;
use crate::errors::{HotelSearchError, HotelSearchResult};
use crate::query::HotelQuery;

/// One normalized hotel entry.
///
/// Exactly the six fields the conversation needs, each nullable since the
/// upstream data is unvalidated; serialized with explicit nulls.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HotelRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub link: Option<String>,
    pub features: Option<Vec<String>>,
}

impl HotelRecord {
    /// Copies the six named fields out of a raw entry, leaving anything
    /// missing or of an unexpected type as null. Total: never fails.
    pub fn from_entry(entry: &Value) -> Self {
        Self {
            title: string_field(entry, "title"),
            price: string_field(entry, "price"),
            rating: entry.get("rating").and_then(Value::as_f64),
            reviews: entry.get("reviews").and_then(Value::as_u64),
            link: string_field(entry, "link"),
            features: entry.get("features").and_then(Value::as_array).map(|list| {
                list.iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            }),
        }
    }
}

/// Strings are taken as-is; numeric values (prices sometimes arrive bare)
/// are rendered to their string form.
fn string_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Outcome of one adapter invocation: a hotel list or an error message,
/// never both.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ToolResult {
    Hotels { hotels: Vec<HotelRecord> },
    Error { error: String },
}

impl ToolResult {
    /// Renders the result as the text fed back into the conversation:
    /// success as its JSON form, failure as an `Error: `-prefixed string.
    pub fn into_reply(self) -> String {
        match &self {
            ToolResult::Hotels { .. } => serde_json::to_string(&self)
                .unwrap_or_else(|e| format!("Error: failed to serialize hotel results: {}", e)),
            ToolResult::Error { error } => format!("Error: {}", error),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolResult::Error { .. })
    }
}

/// Translates tool-call payloads into search requests and normalizes the
/// response envelope.
pub struct HotelSearchAdapter {
    transport: Arc<dyn SearchTransport>,
    api_key: Option<String>,
}

impl HotelSearchAdapter {
    /// The credential is read once from configuration; its absence surfaces
    /// per call as an upstream failure, not at construction.
    pub fn new(transport: Arc<dyn SearchTransport>, api_key: Option<String>) -> Self {
        Self { transport, api_key }
    }

    /// Resolves one tool call. All failures are folded into the tagged
    /// error variant; this never returns an Err and never panics.
    pub async fn run(&self, payload: &str) -> ToolResult {
        info!("Model requested hotel data");
        match self.search(payload).await {
            Ok(hotels) => {
                info!(count = hotels.len(), "Hotel search succeeded");
                ToolResult::Hotels { hotels }
            }
            Err(e) => {
                warn!(error = %e, "Hotel search failed");
                ToolResult::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn search(&self, payload: &str) -> HotelSearchResult<Vec<HotelRecord>> {
        let query = HotelQuery::parse(payload)?;

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            HotelSearchError::Upstream("search API credential is not configured".to_string())
        })?;

        let params = query.to_params(api_key);
        let envelope = self.transport.fetch(&params).await?;
        extract_hotels(&envelope)
    }
}

/// Pulls the hotel list out of the response envelope at its fixed path
/// (`answer_box.hotels`), distinguishing upstream failures from an empty
/// result set.
fn extract_hotels(envelope: &Value) -> HotelSearchResult<Vec<HotelRecord>> {
    let fields = envelope
        .as_object()
        .ok_or_else(|| HotelSearchError::Upstream(envelope.to_string()))?;

    if fields.is_empty() {
        return Err(HotelSearchError::Upstream(envelope.to_string()));
    }
    if fields.contains_key("error") {
        return Err(HotelSearchError::Upstream(envelope.to_string()));
    }

    let hotels = envelope
        .pointer("/answer_box/hotels")
        .and_then(Value::as_array);

    match hotels {
        Some(entries) if !entries.is_empty() => {
            debug!(count = entries.len(), "Extracted hotel entries");
            Ok(entries.iter().map(HotelRecord::from_entry).collect())
        }
        _ => Err(HotelSearchError::NoResults),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transport returning a fixed envelope, recording what it was asked
    struct ScriptedTransport {
        envelope: Value,
        calls: AtomicUsize,
        last_params: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        fn new(envelope: Value) -> Arc<Self> {
            Arc::new(Self {
                envelope,
                calls: AtomicUsize::new(0),
                last_params: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl SearchTransport for ScriptedTransport {
        async fn fetch(&self, params: &[(String, String)]) -> HotelSearchResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_params.lock().unwrap() = params.to_vec();
            Ok(self.envelope.clone())
        }
    }

    const PAYLOAD: &str = r#"{"q":"Paris Hotels","check_in_date":"2025-01-01",
        "check_out_date":"2025-01-02","gl":"fr","hl":"en","currency":"EUR",
        "adults":"2","min_price":"50","max_price":"300"}"#;

    fn one_hotel_envelope() -> Value {
        json!({
            "search_metadata": {"status": "Success"},
            "answer_box": {
                "hotels": [{
                    "title": "Hôtel Le Six",
                    "price": "€210",
                    "rating": 4.5,
                    "reviews": 1322,
                    "link": "https://example.com/le-six",
                    "features": ["Free Wi-Fi", "Spa"],
                    "thumbnail": "https://example.com/thumb.jpg"
                }]
            }
        })
    }

    #[tokio::test]
    async fn happy_path_yields_normalized_hotels() {
        let transport = ScriptedTransport::new(one_hotel_envelope());
        let adapter = HotelSearchAdapter::new(transport.clone(), Some("k".to_string()));

        let result = adapter.run(PAYLOAD).await;
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["hotels"][0]["title"], "Hôtel Le Six");
        assert_eq!(json["hotels"][0]["rating"], 4.5);
        assert_eq!(json["hotels"][0]["reviews"], 1322);
        assert_eq!(json["hotels"][0]["features"][1], "Spa");
        // Only the six named fields survive normalization
        assert!(json["hotels"][0].get("thumbnail").is_none());
        assert_eq!(json["hotels"][0].as_object().unwrap().len(), 6);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_fields_become_nulls() {
        let transport = ScriptedTransport::new(json!({
            "answer_box": {"hotels": [{"title": "Sparse Inn"}]}
        }));
        let adapter = HotelSearchAdapter::new(transport, Some("k".to_string()));

        let json = serde_json::to_value(&adapter.run(PAYLOAD).await).unwrap();
        let hotel = &json["hotels"][0];
        assert_eq!(hotel["title"], "Sparse Inn");
        assert!(hotel["price"].is_null());
        assert!(hotel["rating"].is_null());
        assert!(hotel["reviews"].is_null());
        assert!(hotel["link"].is_null());
        assert!(hotel["features"].is_null());
    }

    #[tokio::test]
    async fn mistyped_fields_become_nulls_instead_of_failing() {
        let transport = ScriptedTransport::new(json!({
            "answer_box": {"hotels": [{
                "title": 42,
                "price": 210,
                "rating": "excellent",
                "reviews": "many",
                "features": "Free Wi-Fi"
            }]}
        }));
        let adapter = HotelSearchAdapter::new(transport, Some("k".to_string()));

        let json = serde_json::to_value(&adapter.run(PAYLOAD).await).unwrap();
        let hotel = &json["hotels"][0];
        // Numbers render to strings for the string fields
        assert_eq!(hotel["title"], "42");
        assert_eq!(hotel["price"], "210");
        assert!(hotel["rating"].is_null());
        assert!(hotel["reviews"].is_null());
        assert!(hotel["features"].is_null());
    }

    #[tokio::test]
    async fn empty_hotel_list_is_no_results_never_empty_success() {
        for envelope in [
            json!({"answer_box": {"hotels": []}}),
            json!({"answer_box": {}}),
            json!({"search_metadata": {"status": "Success"}}),
        ] {
            let adapter =
                HotelSearchAdapter::new(ScriptedTransport::new(envelope), Some("k".to_string()));
            let result = adapter.run(PAYLOAD).await;
            assert!(result.is_error());
            assert_eq!(
                serde_json::to_value(&result).unwrap(),
                json!({"error": "No hotels found for the specified query."})
            );
        }
    }

    #[tokio::test]
    async fn upstream_error_field_is_embedded_in_the_failure() {
        let transport =
            ScriptedTransport::new(json!({"error": "Google Hotels hasn't returned any results"}));
        let adapter = HotelSearchAdapter::new(transport, Some("k".to_string()));

        let reply = adapter.run(PAYLOAD).await.into_reply();
        assert!(reply.starts_with("Error: Error processing the hotel query."));
        assert!(reply.contains("hasn't returned any results"));
    }

    #[tokio::test]
    async fn empty_envelope_is_an_upstream_failure() {
        let adapter =
            HotelSearchAdapter::new(ScriptedTransport::new(json!({})), Some("k".to_string()));
        let result = adapter.run(PAYLOAD).await;
        assert!(result.is_error());
        assert!(result.into_reply().contains("Error processing the hotel query"));
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_transport() {
        let transport = ScriptedTransport::new(one_hotel_envelope());
        let adapter = HotelSearchAdapter::new(transport.clone(), Some("k".to_string()));

        let result = adapter.run("{ not json").await;
        assert!(result.is_error());
        assert!(result
            .into_reply()
            .starts_with("Error: Invalid hotel query"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_is_an_upstream_failure() {
        let transport = ScriptedTransport::new(one_hotel_envelope());
        let adapter = HotelSearchAdapter::new(transport.clone(), None);

        let reply = adapter.run(PAYLOAD).await.into_reply();
        assert!(reply.contains("credential is not configured"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn configured_credential_reaches_the_request() {
        let transport = ScriptedTransport::new(one_hotel_envelope());
        let adapter = HotelSearchAdapter::new(transport.clone(), Some("serp-key".to_string()));

        adapter.run(PAYLOAD).await;
        let params = transport.last_params.lock().unwrap().clone();
        assert!(params
            .iter()
            .any(|(name, value)| name == "api_key" && value == "serp-key"));
    }

    #[test]
    fn success_reply_is_the_json_serialization() {
        let result = ToolResult::Hotels {
            hotels: vec![HotelRecord {
                title: Some("Inn".to_string()),
                price: None,
                rating: Some(4.0),
                reviews: None,
                link: None,
                features: None,
            }],
        };
        let reply = result.into_reply();
        let parsed: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(parsed["hotels"][0]["title"], "Inn");
        assert!(parsed["hotels"][0]["price"].is_null());
    }
}
