use crate::config::Config;
use crate::error::PipelineError;
use crate::models::{Action, IntentResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    query: &'a str,
    session_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Option<QueryResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    action: Option<String>,
    #[serde(default)]
    action_incomplete: bool,
    #[serde(default)]
    parameters: HashMap<String, serde_json::Value>,
    fulfillment: Option<Fulfillment>,
}

#[derive(Debug, Deserialize)]
struct Fulfillment {
    #[serde(default)]
    speech: String,
}

/// Classify an English query within the classifier-side session `session_id`.
pub async fn classify(
    client: &reqwest::Client,
    config: &Config,
    query: &str,
    session_id: &str,
) -> Result<IntentResult, PipelineError> {
    let intent = call_intent_api(client, config, query, session_id)
        .await
        .map_err(PipelineError::Classification)?;

    debug!(
        "Classified as '{}' (incomplete: {}, {} parameters)",
        intent.action,
        intent.action_incomplete,
        intent.parameters.len()
    );

    Ok(intent)
}

async fn call_intent_api(
    client: &reqwest::Client,
    config: &Config,
    query: &str,
    session_id: &str,
) -> Result<IntentResult> {
    let response = client
        .post(&config.intent_api_url)
        .query(&[("v", config.intent_api_version.as_str())])
        .bearer_auth(&config.api_ai_key)
        .json(&QueryRequest { query, session_id })
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to send request to api.ai")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
        anyhow::bail!("api.ai error ({}): {}", status, body);
    }

    let query_response: QueryResponse = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse api.ai response")?;

    normalize(query_response)
}

/// Flatten the nested classifier payload into an `IntentResult`.
fn normalize(response: QueryResponse) -> Result<IntentResult> {
    let result = response
        .result
        .context("api.ai response is missing 'result'")?;
    let action = result
        .action
        .context("api.ai response is missing 'result.action'")?;

    let parameters = result
        .parameters
        .into_iter()
        .map(|(name, value)| (name, parameter_to_string(value)))
        .collect();

    Ok(IntentResult {
        action: Action::from_name(&action),
        action_incomplete: result.action_incomplete,
        parameters,
        fulfillment_speech: result.fulfillment.map(|f| f.speech).unwrap_or_default(),
    })
}

fn parameter_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        // Composite entities (e.g. {"amount": 2}) are kept as their JSON text
        other => Some(other.to_string()),
    }
}
