use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Hotels are passed through exactly as the provider returns them.
pub type Hotel = serde_json::Value;

/// The intent recognized by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FindTickets,
    ShowTicket,
    FindHotels,
    InputUnknown,
    /// Any action name this service has no scenario for
    Other(String),
}

impl Action {
    pub fn from_name(name: &str) -> Self {
        match name {
            "find_tickets" => Action::FindTickets,
            "show_ticket" => Action::ShowTicket,
            "find_hotels" => Action::FindHotels,
            "input.unknown" | "input_unknown" => Action::InputUnknown,
            other => Action::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Action::FindTickets => "find_tickets",
            Action::ShowTicket => "show_ticket",
            Action::FindHotels => "find_hotels",
            Action::InputUnknown => "input_unknown",
            Action::Other(name) => name,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized classifier output, produced once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentResult {
    pub action: Action,
    pub action_incomplete: bool,
    /// Absent and `null` parameters are both `None`
    pub parameters: HashMap<String, Option<String>>,
    pub fulfillment_speech: String,
}

impl IntentResult {
    /// Look up a non-empty parameter value.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(name)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Message,
    Ticket,
    Tickets,
    Hotels,
}

/// Payload carried by an envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    Tickets(Vec<Ticket>),
    Hotels(Vec<Hotel>),
    Placeholder(serde_json::Value),
}

/// The single response shape every successful request produces.
/// Outbound only: the untagged `data` cannot be read back unambiguously.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    pub data: Option<EnvelopeData>,
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub message: String,
    #[serde(rename = "isFinal")]
    pub is_final: bool,
}

impl ResponseEnvelope {
    /// A conversational message that expects a follow-up from the user.
    pub fn follow_up(message: impl Into<String>) -> Self {
        Self {
            data: None,
            response_type: ResponseType::Message,
            message: message.into(),
            is_final: false,
        }
    }

    pub fn tickets(tickets: Vec<Ticket>, message: impl Into<String>) -> Self {
        Self {
            data: Some(EnvelopeData::Tickets(tickets)),
            response_type: ResponseType::Tickets,
            message: message.into(),
            is_final: true,
        }
    }

    pub fn ticket(placeholder: serde_json::Value, message: impl Into<String>) -> Self {
        Self {
            data: Some(EnvelopeData::Placeholder(placeholder)),
            response_type: ResponseType::Ticket,
            message: message.into(),
            is_final: true,
        }
    }

    pub fn hotels(hotels: Vec<Hotel>, message: impl Into<String>) -> Self {
        Self {
            data: Some(EnvelopeData::Hotels(hotels)),
            response_type: ResponseType::Hotels,
            message: message.into(),
            is_final: true,
        }
    }
}

/// A flight offer reduced to what the client renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// `dd/mm hh:mm`
    pub arrival_time: String,
    /// `dd/mm hh:mm`
    pub departure_time: String,
    pub booking_token: String,
    pub city_from: String,
    pub city_to: String,
    pub country_from: String,
    pub country_to: String,
    pub price: f64,
    pub routes: serde_json::Value,
    pub transfers: u32,
}

/// Geographic rectangle used to scope a hotel search.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl fmt::Display for BoundingBox {
    /// Renders as `south,west,north,east`, the form the hotel search expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.south, self.west, self.north, self.east)
    }
}
