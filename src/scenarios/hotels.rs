use super::{required, required_date, MAX_RESULTS};
use crate::config::Config;
use crate::error::PipelineError;
use crate::models::{IntentResult, ResponseEnvelope};
use crate::places::{parse_place, search_hotels, search_places};
use tracing::{debug, info};

pub const NO_HOTELS_MESSAGE: &str = "No hotels found";

/// Resolve the destination to a place, then search hotels inside its bounding box.
pub async fn find_hotels(
    client: &reqwest::Client,
    config: &Config,
    intent: &IntentResult,
) -> Result<ResponseEnvelope, PipelineError> {
    let destination = required(intent, "destination")?;
    let check_in = required_date(intent, "check_in")?.format("%Y-%m-%d").to_string();
    let check_out = required_date(intent, "check_out")?.format("%Y-%m-%d").to_string();
    let guests = parse_guests(required(intent, "guests")?)?;

    let candidate = search_places(client, config, destination)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::EmptyPlaceLookup {
            destination: destination.to_string(),
        })?;
    let place = parse_place(candidate)?;

    debug!(
        "Resolved '{}' to {} ({})",
        destination,
        place.name.as_deref().unwrap_or("<unnamed>"),
        place.id.as_deref().unwrap_or("<no id>")
    );

    let mut hotels = search_hotels(
        client,
        config,
        &check_in,
        &check_out,
        guests,
        &place.bounding_box,
    )
    .await?;

    let message = if hotels.is_empty() {
        info!("No hotels in {} for {} -> {}", destination, check_in, check_out);
        NO_HOTELS_MESSAGE.to_string()
    } else {
        intent.fulfillment_speech.clone()
    };

    hotels.truncate(MAX_RESULTS);

    Ok(ResponseEnvelope::hotels(hotels, message))
}

fn parse_guests(value: &str) -> Result<u32, PipelineError> {
    match value.trim().parse::<u32>() {
        Ok(guests) if guests > 0 => Ok(guests),
        _ => Err(PipelineError::InvalidParameter {
            name: "guests",
            value: value.to_string(),
        }),
    }
}
