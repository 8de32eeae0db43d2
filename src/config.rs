use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Google Translate
    pub google_translate_key: String,
    pub translate_api_url: String,
    pub translate_model: String,

    // api.ai intent recognition
    pub api_ai_key: String,
    pub intent_api_url: String,
    pub intent_api_version: String,

    // Kiwi flight search
    pub flights_api_url: String,

    // Sygic Travel places and hotels
    pub sygic_api_key: String,
    pub places_api_url: String,
    pub hotels_api_url: String,

    // HTTP server
    pub api_key: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Google Translate
            google_translate_key: std::env::var("GOOGLE_TRANSLATE_KEY")
                .context("GOOGLE_TRANSLATE_KEY not set")?,
            translate_api_url: std::env::var("TRANSLATE_API_URL").unwrap_or_else(|_| {
                "https://translation.googleapis.com/language/translate/v2".to_string()
            }),
            translate_model: std::env::var("TRANSLATE_MODEL")
                .unwrap_or_else(|_| "nmt".to_string()),

            // api.ai
            api_ai_key: std::env::var("API_AI_KEY").context("API_AI_KEY not set")?,
            intent_api_url: std::env::var("INTENT_API_URL")
                .unwrap_or_else(|_| "https://api.api.ai/v1/query".to_string()),
            intent_api_version: std::env::var("INTENT_API_VERSION")
                .unwrap_or_else(|_| "20150910".to_string()),

            // Kiwi
            flights_api_url: std::env::var("FLIGHTS_API_URL")
                .unwrap_or_else(|_| "https://api.skypicker.com/flights".to_string()),

            // Sygic Travel
            sygic_api_key: std::env::var("SYGIC_API_KEY").context("SYGIC_API_KEY not set")?,
            places_api_url: std::env::var("PLACES_API_URL").unwrap_or_else(|_| {
                "https://api.sygictraveldata.com/v2.4/en/places/list".to_string()
            }),
            hotels_api_url: std::env::var("HOTELS_API_URL").unwrap_or_else(|_| {
                "https://api.sygictraveldata.com/v2.4/en/hotels/list".to_string()
            }),

            // HTTP server
            api_key: std::env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: &[&str] = &[
        "GOOGLE_TRANSLATE_KEY",
        "TRANSLATE_API_URL",
        "TRANSLATE_MODEL",
        "API_AI_KEY",
        "INTENT_API_URL",
        "INTENT_API_VERSION",
        "FLIGHTS_API_URL",
        "SYGIC_API_KEY",
        "PLACES_API_URL",
        "HOTELS_API_URL",
        "API_KEY",
        "PORT",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    fn set_required() {
        std::env::set_var("GOOGLE_TRANSLATE_KEY", "google-key");
        std::env::set_var("API_AI_KEY", "apiai-key");
        std::env::set_var("SYGIC_API_KEY", "sygic-key");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().expect("Should load config");

        assert_eq!(config.google_translate_key, "google-key");
        assert_eq!(config.api_ai_key, "apiai-key");
        assert_eq!(config.sygic_api_key, "sygic-key");
        assert_eq!(config.translate_model, "nmt");
        assert_eq!(config.intent_api_version, "20150910");
        assert_eq!(config.flights_api_url, "https://api.skypicker.com/flights");
        assert!(config.places_api_url.ends_with("/places/list"));
        assert!(config.hotels_api_url.ends_with("/hotels/list"));
        assert!(config.api_key.is_none());
        assert_eq!(config.port, 8080);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_translate_key() {
        clear_env();
        std::env::set_var("API_AI_KEY", "apiai-key");
        std::env::set_var("SYGIC_API_KEY", "sygic-key");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GOOGLE_TRANSLATE_KEY not set"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_sygic_key() {
        clear_env();
        std::env::set_var("GOOGLE_TRANSLATE_KEY", "google-key");
        std::env::set_var("API_AI_KEY", "apiai-key");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("SYGIC_API_KEY not set"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_required();
        std::env::set_var("FLIGHTS_API_URL", "http://localhost:9000/flights");
        std::env::set_var("API_KEY", "inbound-secret");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().expect("Should load config");

        assert_eq!(config.flights_api_url, "http://localhost:9000/flights");
        assert_eq!(config.api_key.as_deref(), Some("inbound-secret"));
        assert_eq!(config.port, 3000);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port_falls_back() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("API_KEY", "");

        let config = Config::from_env().expect("Should load config");

        assert_eq!(config.port, 8080);
        assert!(config.api_key.is_none());

        clear_env();
    }
}
