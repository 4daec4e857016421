//! Client side of the trial-registry bias-analysis contract.

pub mod client;
pub mod session;
pub mod types;

pub use client::RegistryClient;
pub use session::{FetchState, RequestSession, RequestTicket};
pub use types::{
    BiasDimension, BiasFlag, FlagStatus, FlagSummary, MetadataAnalysisResult, RegistryTrial,
    SearchResponse, TrialSummary,
};

/// Failure talking to the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{operation} failed: {status} {reason}")]
    Http {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    #[error("{operation} returned an unreadable body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    /// HTTP status when the service answered with a non-success code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode { .. } => None,
        }
    }
}
