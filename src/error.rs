use thiserror::Error;

/// Failure of a single upstream call. Cloneable so a failed page slot can
/// keep the error around for later surfacing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {detail}")]
    Network { url: String, detail: String },
    #[error("invalid payload from {url}: {detail}")]
    Decode { url: String, detail: String },
}
