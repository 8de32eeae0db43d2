//! Request pipeline: translate in, classify, dispatch, translate out.
//!
//! Every step awaits the previous one. Any failure aborts the request and
//! no envelope is produced.

use crate::config::Config;
use crate::error::PipelineError;
use crate::intent::classify;
use crate::models::{Action, ResponseEnvelope};
use crate::response::localize;
use crate::scenarios;
use crate::translation::{translate, WORKING_LANGUAGE};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One user utterance to analyze.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub query: String,
    pub source_language_code: String,
    /// Opaque token the classifier uses to keep conversation context
    pub session_id: String,
}

/// Last pipeline step a request entered. Only recorded for the failure log;
/// control flow is the plain sequence in `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Translating,
    Classifying,
    Incomplete,
    Dispatching,
    Responding,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Translating => "translating",
            Stage::Classifying => "classifying",
            Stage::Incomplete => "incomplete",
            Stage::Dispatching => "dispatching",
            Stage::Responding => "responding",
        };
        f.write_str(name)
    }
}

pub struct Orchestrator {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl Orchestrator {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<ResponseEnvelope, PipelineError> {
        let mut stage = Stage::Translating;
        let result = self.run(request, &mut stage).await;

        match &result {
            Ok(envelope) => info!(
                "Request done: type={:?} final={} lang={}",
                envelope.response_type, envelope.is_final, request.source_language_code
            ),
            Err(e) => warn!("Request failed while {}: {}", stage, e),
        }

        result
    }

    async fn run(
        &self,
        request: &AnalyzeRequest,
        stage: &mut Stage,
    ) -> Result<ResponseEnvelope, PipelineError> {
        let client = &self.client;
        let config = self.config.as_ref();
        let lang = request.source_language_code.as_str();

        debug!("Stage {}: {} -> {}", stage, lang, WORKING_LANGUAGE);
        let query = translate(client, config, &request.query, lang, WORKING_LANGUAGE).await?;

        *stage = Stage::Classifying;
        debug!("Stage {}: session {}", stage, request.session_id);
        let intent = classify(client, config, &query, &request.session_id).await?;

        let envelope = if intent.action_incomplete {
            *stage = Stage::Incomplete;
            info!("Action '{}' incomplete, asking follow-up", intent.action);
            ResponseEnvelope::follow_up(intent.fulfillment_speech)
        } else {
            *stage = Stage::Dispatching;
            info!("Dispatching action '{}'", intent.action);
            match intent.action {
                Action::FindTickets => scenarios::find_tickets(client, config, &intent).await?,
                Action::ShowTicket => scenarios::show_ticket(&intent),
                Action::FindHotels => scenarios::find_hotels(client, config, &intent).await?,
                Action::InputUnknown | Action::Other(_) => scenarios::input_unknown(&intent),
            }
        };

        *stage = Stage::Responding;
        localize(client, config, envelope, lang).await
    }
}
