use super::{required, required_date, MAX_RESULTS};
use crate::config::Config;
use crate::error::{PipelineError, ProviderKind};
use crate::flights::{format_long_date, search_flights, to_ticket};
use crate::models::{IntentResult, ResponseEnvelope, Ticket};
use tracing::info;

pub const NO_TICKETS_MESSAGE: &str = "No flight tickets found";

/// Search flights for the requested route and day.
pub async fn find_tickets(
    client: &reqwest::Client,
    config: &Config,
    intent: &IntentResult,
) -> Result<ResponseEnvelope, PipelineError> {
    let origin = required(intent, "origin")?;
    let destination = required(intent, "destination")?;
    let date = required_date(intent, "date")?;

    let flights = search_flights(client, config, origin, destination, date).await?;

    let message = if flights.is_empty() {
        info!("No flights {} -> {} on {}", origin, destination, date);
        NO_TICKETS_MESSAGE.to_string()
    } else {
        format!("{} on {}", intent.fulfillment_speech, format_long_date(date))
    };

    let tickets = flights
        .iter()
        .take(MAX_RESULTS)
        .map(to_ticket)
        .collect::<anyhow::Result<Vec<Ticket>>>()
        .map_err(|e| PipelineError::provider(ProviderKind::Flights, e))?;

    Ok(ResponseEnvelope::tickets(tickets, message))
}

/// There is no ticket store behind this yet; the payload is a fixed sample.
pub fn show_ticket(intent: &IntentResult) -> ResponseEnvelope {
    ResponseEnvelope::ticket(placeholder_ticket(), intent.fulfillment_speech.clone())
}

pub fn placeholder_ticket() -> serde_json::Value {
    serde_json::json!({
        "arrivalTime": "15/03 18:05",
        "departureTime": "15/03 10:30",
        "bookingToken": "placeholder",
        "cityFrom": "Lima",
        "cityTo": "Paris",
        "countryFrom": "PE",
        "countryTo": "FR",
        "price": 812,
        "routes": [["LIM", "CDG"]],
        "transfers": 1
    })
}
