//! Failure taxonomy for a single analyze request.
//!
//! Any of these aborts the request before an envelope is produced. Empty
//! flight or hotel lists are not errors and never show up here.

use std::fmt;

/// Which data provider failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Flights,
    Places,
    Hotels,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Flights => "flights",
            ProviderKind::Places => "places",
            ProviderKind::Hotels => "hotels",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("translation failed: {0:#}")]
    Translation(anyhow::Error),

    #[error("intent classification failed: {0:#}")]
    Classification(anyhow::Error),

    #[error("{which} provider failed: {source:#}")]
    Provider {
        which: ProviderKind,
        source: anyhow::Error,
    },

    #[error("no place found matching '{destination}'")]
    EmptyPlaceLookup { destination: String },

    #[error("missing parameter '{name}'")]
    MissingParameter { name: &'static str },

    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: String },
}

impl PipelineError {
    pub fn provider(which: ProviderKind, source: anyhow::Error) -> Self {
        PipelineError::Provider { which, source }
    }

    /// True when an external service misbehaved, as opposed to the request
    /// itself not carrying enough to proceed.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PipelineError::Translation(_)
                | PipelineError::Classification(_)
                | PipelineError::Provider { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_display() {
        assert_eq!(ProviderKind::Flights.to_string(), "flights");
        assert_eq!(ProviderKind::Places.to_string(), "places");
        assert_eq!(ProviderKind::Hotels.to_string(), "hotels");
    }

    #[test]
    fn test_error_display() {
        let err = PipelineError::Translation(anyhow::anyhow!("quota exceeded"));
        assert_eq!(err.to_string(), "translation failed: quota exceeded");

        let err = PipelineError::provider(ProviderKind::Hotels, anyhow::anyhow!("timeout"));
        assert_eq!(err.to_string(), "hotels provider failed: timeout");

        let err = PipelineError::EmptyPlaceLookup {
            destination: "Atlantis".to_string(),
        };
        assert_eq!(err.to_string(), "no place found matching 'Atlantis'");

        let err = PipelineError::MissingParameter { name: "origin" };
        assert_eq!(err.to_string(), "missing parameter 'origin'");

        let err = PipelineError::InvalidParameter {
            name: "guests",
            value: "many".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value 'many' for parameter 'guests'");
    }

    #[test]
    fn test_error_display_includes_context_chain() {
        let source = anyhow::anyhow!("connection refused").context("Failed to send request");
        let err = PipelineError::Classification(source);
        assert_eq!(
            err.to_string(),
            "intent classification failed: Failed to send request: connection refused"
        );
    }

    #[test]
    fn test_is_upstream() {
        assert!(PipelineError::Translation(anyhow::anyhow!("x")).is_upstream());
        assert!(PipelineError::Classification(anyhow::anyhow!("x")).is_upstream());
        assert!(PipelineError::provider(ProviderKind::Flights, anyhow::anyhow!("x")).is_upstream());
        assert!(!PipelineError::EmptyPlaceLookup {
            destination: "x".to_string()
        }
        .is_upstream());
        assert!(!PipelineError::MissingParameter { name: "date" }.is_upstream());
    }
}
