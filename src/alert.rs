//! Inbound alert schema: the Azure Monitor common alert payload.
//!
//! Only the parts the bridge renders are modelled. Unknown fields anywhere in
//! the document are ignored during decoding.
//!
//! Reference: <https://learn.microsoft.com/en-us/azure/azure-monitor/alerts/alerts-payload-samples>

use serde::Deserialize;

/// Top-level alert notification.
///
/// `data` and its two sub-objects are decoded as optional so that a payload
/// which is valid JSON but lacks them (e.g. `{}`) still decodes; the
/// transformer rejects it afterwards as an illegal payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertPayload {
    #[serde(default)]
    pub data: Option<AlertData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertData {
    #[serde(default)]
    pub essentials: Option<AlertEssentials>,
    #[serde(default)]
    pub alert_context: Option<AlertContext>,
}

/// Fixed fields every alert carries. All four are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertEssentials {
    pub alert_rule: String,
    pub severity: String,
    pub description: String,
    /// `"Fired"` while active; anything else is treated as resolved.
    pub monitor_condition: String,
}

/// Log-search context of a log alert. Every field is independently optional;
/// a missing key and an explicit JSON `null` both decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlertContext {
    #[serde(rename = "LinkToFilteredSearchResultsUI")]
    pub link_to_filtered_search_results_ui: Option<String>,
    #[serde(rename = "SearchIntervalStartTimeUtc")]
    pub search_interval_start_time_utc: Option<String>,
    #[serde(rename = "SearchIntervalEndtimeUtc")]
    pub search_interval_end_time_utc: Option<String>,
    #[serde(rename = "SearchQuery")]
    pub search_query: Option<String>,
    #[serde(rename = "WorkspaceId")]
    pub workspace_id: Option<String>,
    #[serde(rename = "ResultCount")]
    pub result_count: Option<i32>,
    #[serde(rename = "Threshold")]
    pub threshold: Option<i64>,
    #[serde(rename = "IncludedSearchResults")]
    pub included_search_results: Option<bool>,
}

impl AlertPayload {
    /// Decode a raw request body. A bare `null` decodes to an empty payload,
    /// leaving the transformer to reject it like `{}`.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        Ok(serde_json::from_str::<Option<Self>>(body)?.unwrap_or_default())
    }
}
