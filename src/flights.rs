use crate::config::Config;
use crate::error::{PipelineError, ProviderKind};
use crate::models::Ticket;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Vec<Flight>,
}

/// A flight offer as returned by the Kiwi search API.
#[derive(Debug, Clone, Deserialize)]
pub struct Flight {
    /// Arrival, epoch seconds in the arrival airport's local time
    #[serde(rename = "aTime")]
    pub a_time: i64,
    /// Departure, epoch seconds in the departure airport's local time
    #[serde(rename = "dTime")]
    pub d_time: i64,
    pub booking_token: String,
    #[serde(rename = "cityFrom")]
    pub city_from: String,
    #[serde(rename = "cityTo")]
    pub city_to: String,
    #[serde(rename = "countryFrom")]
    pub country_from: Country,
    #[serde(rename = "countryTo")]
    pub country_to: Country,
    pub price: f64,
    #[serde(default)]
    pub routes: serde_json::Value,
    /// Individual legs of the itinerary
    #[serde(default)]
    pub route: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Country {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Search one-way flights departing on a single day.
pub async fn search_flights(
    client: &reqwest::Client,
    config: &Config,
    origin: &str,
    destination: &str,
    date: NaiveDate,
) -> Result<Vec<Flight>, PipelineError> {
    let flights = call_flights_api(client, config, origin, destination, date)
        .await
        .map_err(|e| PipelineError::provider(ProviderKind::Flights, e))?;

    debug!(
        "Kiwi returned {} flights {} -> {} on {}",
        flights.len(),
        origin,
        destination,
        date
    );

    Ok(flights)
}

async fn call_flights_api(
    client: &reqwest::Client,
    config: &Config,
    origin: &str,
    destination: &str,
    date: NaiveDate,
) -> Result<Vec<Flight>> {
    let date = format_search_date(date);

    let response = client
        .get(&config.flights_api_url)
        .query(&[
            ("flyFrom", origin),
            ("to", destination),
            ("dateFrom", date.as_str()),
            ("dateTo", date.as_str()),
        ])
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to send request to Kiwi API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
        anyhow::bail!("Kiwi API error ({}): {}", status, body);
    }

    let flights_response: FlightsResponse = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse Kiwi response")?;

    Ok(flights_response.data)
}

/// Reduce a provider flight to a `Ticket`.
pub fn to_ticket(flight: &Flight) -> Result<Ticket> {
    Ok(Ticket {
        arrival_time: format_flight_time(flight.a_time)?,
        departure_time: format_flight_time(flight.d_time)?,
        booking_token: flight.booking_token.clone(),
        city_from: flight.city_from.clone(),
        city_to: flight.city_to.clone(),
        country_from: flight.country_from.code.clone(),
        country_to: flight.country_to.code.clone(),
        price: flight.price,
        routes: flight.routes.clone(),
        transfers: flight.route.len().saturating_sub(1) as u32,
    })
}

/// `dd/mm/yyyy`, the date format the Kiwi API accepts
pub fn format_search_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Human-readable date used in user-facing messages, e.g. "Friday, March 15, 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `dd/mm hh:mm`. Kiwi timestamps already encode local time, so no zone shift applies.
fn format_flight_time(epoch_secs: i64) -> Result<String> {
    let time = DateTime::from_timestamp(epoch_secs, 0)
        .with_context(|| format!("Flight timestamp out of range: {}", epoch_secs))?;
    Ok(time.format("%d/%m %H:%M").to_string())
}
