//! Scenario handlers, one per recognized intent.
//!
//! Every handler produces an envelope whose message is still in English;
//! `crate::response` localizes it before it leaves the pipeline.

mod hotels;
mod tickets;

pub use hotels::{find_hotels, NO_HOTELS_MESSAGE};
pub use tickets::{find_tickets, placeholder_ticket, show_ticket, NO_TICKETS_MESSAGE};

use crate::error::PipelineError;
use crate::models::{IntentResult, ResponseEnvelope};
use chrono::NaiveDate;

/// Results shown to the user per scenario
pub const MAX_RESULTS: usize = 5;

/// The classifier understood the words but not the request.
pub fn input_unknown(intent: &IntentResult) -> ResponseEnvelope {
    ResponseEnvelope::follow_up(intent.fulfillment_speech.clone())
}

fn required<'a>(intent: &'a IntentResult, name: &'static str) -> Result<&'a str, PipelineError> {
    intent
        .parameter(name)
        .ok_or(PipelineError::MissingParameter { name })
}

/// Classifier dates are ISO `YYYY-MM-DD`
fn required_date(intent: &IntentResult, name: &'static str) -> Result<NaiveDate, PipelineError> {
    let value = required(intent, name)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| PipelineError::InvalidParameter {
        name,
        value: value.to_string(),
    })
}
