use crate::config::Config;
use crate::error::PipelineError;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Language every downstream step works in
pub const WORKING_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Translate `text` from `source_lang` to `target_lang`.
///
/// Equal language codes return the input untouched without contacting the
/// provider.
pub async fn translate(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Result<String, PipelineError> {
    if source_lang == target_lang {
        return Ok(text.to_string());
    }

    debug!("Translating {} chars {} -> {}", text.len(), source_lang, target_lang);

    call_translate_api(client, config, text, source_lang, target_lang)
        .await
        .map_err(PipelineError::Translation)
}

async fn call_translate_api(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    source_lang: &str,
    target_lang: &str,
) -> Result<String> {
    let response = client
        .post(&config.translate_api_url)
        .query(&[
            ("q", text),
            ("source", source_lang),
            ("target", target_lang),
            ("format", "text"),
            ("key", config.google_translate_key.as_str()),
            ("model", config.translate_model.as_str()),
        ])
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to send request to Google Translate API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e.without_url()));
        anyhow::bail!("Google Translate API error ({}): {}", status, body);
    }

    let translate_response: TranslateResponse = response
        .json()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Failed to parse Google Translate response")?;

    translate_response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .context("Google Translate response contained no translations")
}
