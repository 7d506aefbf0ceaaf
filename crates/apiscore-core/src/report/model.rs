//! Typed view of the certification service's validation results.
//!
//! The service evolves independently of this tool, so deserialization
//! is tolerant: unknown fields are ignored, missing ones default to
//! empty. A body that is not the expected JSON array is not an error
//! either; callers fall back to forwarding the raw body.

use serde::{Deserialize, Serialize};

/// Grade plus free-form explanation for one scored dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grade {
    pub grade: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfLink {
    pub href: String,
}

/// One API's scores as returned by `apis/validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationResult {
    pub pipeline_version: String,
    pub api_version: String,
    pub api_product_key: String,
    pub api_name: String,
    pub api_protocol: String,
    pub validation_hash: String,
    pub validation_date_time: String,
    pub validation_executor_id: String,
    pub tag_reference: String,
    pub documentation_grade: Option<Grade>,
    pub linting_grade: Option<Grade>,
    pub security_grade: Option<Grade>,
    pub rating: String,
    pub self_link: Option<SelfLink>,
}

/// Parses a response body into validation results, or `None` when the
/// body is not the expected JSON array.
pub fn parse_results(body: &str) -> Option<Vec<ValidationResult>> {
    serde_json::from_str(body).ok()
}

/// Restricts results to a single API when a name is given.
pub fn filter_results(
    results: Vec<ValidationResult>,
    api_name: Option<&str>,
) -> Vec<ValidationResult> {
    match api_name {
        Some(name) => results
            .into_iter()
            .filter(|result| result.api_name == name)
            .collect(),
        None => results,
    }
}

/// Diagnostics body the service returns on non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServiceDiagnostics {
    description: String,
}

/// Pulls the service's own failure description out of an error body,
/// when there is one.
pub fn parse_error_description(body: &str) -> Option<String> {
    let diagnostics: ServiceDiagnostics = serde_json::from_str(body).ok()?;
    if diagnostics.description.is_empty() {
        None
    } else {
        Some(diagnostics.description)
    }
}
