use crate::config::Config;
use crate::error::{PipelineError, ProviderKind};
use crate::models::{BoundingBox, Hotel};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Page size requested from the hotel search
pub const HOTEL_PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
struct SygicResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct PlacesData {
    /// Kept raw so one malformed candidate cannot fail the whole list
    #[serde(default)]
    places: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct HotelsData {
    #[serde(default)]
    hotels: Vec<Hotel>,
}

/// A place resolved by the Sygic Travel places search.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub bounding_box: BoundingBox,
}

/// Search city-level places matching `query`, in provider order.
///
/// Candidates come back unparsed; callers decode only the one they use
/// with [`parse_place`].
pub async fn search_places(
    client: &reqwest::Client,
    config: &Config,
    query: &str,
) -> Result<Vec<serde_json::Value>, PipelineError> {
    let places = call_places_api(client, config, query)
        .await
        .map_err(|e| PipelineError::provider(ProviderKind::Places, e))?;

    debug!("Sygic returned {} places for '{}'", places.len(), query);

    Ok(places)
}

async fn call_places_api(
    client: &reqwest::Client,
    config: &Config,
    query: &str,
) -> Result<Vec<serde_json::Value>> {
    let response = client
        .get(&config.places_api_url)
        .query(&[
            ("api_key", config.sygic_api_key.as_str()),
            ("search", query),
            ("levels", "city"),
        ])
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to send request to Sygic places API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
        anyhow::bail!("Sygic places API error ({}): {}", status, body);
    }

    let places_response: SygicResponse<PlacesData> = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse Sygic places response")?;

    Ok(places_response.data.places)
}

/// Decode one place candidate. A missing or null bounding box is a provider failure.
pub fn parse_place(raw: serde_json::Value) -> Result<Place, PipelineError> {
    serde_json::from_value(raw)
        .context("Sygic place has no usable bounding_box")
        .map_err(|e| PipelineError::provider(ProviderKind::Places, e))
}

/// Search hotels inside `bounds` for the given stay.
///
/// `check_in` and `check_out` are `YYYY-MM-DD`.
pub async fn search_hotels(
    client: &reqwest::Client,
    config: &Config,
    check_in: &str,
    check_out: &str,
    guests: u32,
    bounds: &BoundingBox,
) -> Result<Vec<Hotel>, PipelineError> {
    let hotels = call_hotels_api(client, config, check_in, check_out, guests, bounds)
        .await
        .map_err(|e| PipelineError::provider(ProviderKind::Hotels, e))?;

    debug!(
        "Sygic returned {} hotels in {} for {} -> {}",
        hotels.len(),
        bounds,
        check_in,
        check_out
    );

    Ok(hotels)
}

async fn call_hotels_api(
    client: &reqwest::Client,
    config: &Config,
    check_in: &str,
    check_out: &str,
    guests: u32,
    bounds: &BoundingBox,
) -> Result<Vec<Hotel>> {
    let response = client
        .get(&config.hotels_api_url)
        .query(&[
            ("api_key", config.sygic_api_key.clone()),
            ("adults", guests.to_string()),
            ("bounds", bounds.to_string()),
            ("check_in", check_in.to_string()),
            ("check_out", check_out.to_string()),
            ("limit", HOTEL_PAGE_SIZE.to_string()),
        ])
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to send request to Sygic hotels API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
        anyhow::bail!("Sygic hotels API error ({}): {}", status, body);
    }

    let hotels_response: SygicResponse<HotelsData> = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse Sygic hotels response")?;

    Ok(hotels_response.data.hotels)
}
