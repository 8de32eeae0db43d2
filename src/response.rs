use crate::config::Config;
use crate::error::PipelineError;
use crate::models::ResponseEnvelope;
use crate::translation::{translate, WORKING_LANGUAGE};

/// Translate the user-facing text of an English envelope into `target_lang`.
///
/// Only `message` is user-facing; provider payloads in `data` pass through.
pub async fn localize(
    client: &reqwest::Client,
    config: &Config,
    mut envelope: ResponseEnvelope,
    target_lang: &str,
) -> Result<ResponseEnvelope, PipelineError> {
    envelope.message = translate(
        client,
        config,
        &envelope.message,
        WORKING_LANGUAGE,
        target_lang,
    )
    .await?;
    Ok(envelope)
}
