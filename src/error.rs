use thiserror::Error;

/// How location acquisition failed. The two cases only differ in the
/// message shown to the user; control flow treats them alike.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Unable to retrieve your location")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum Error {
    /// Network or server failure. Most callers recover via a local
    /// fallback; leave submission surfaces it instead.
    #[error("backend unavailable: {0}")]
    RemoteUnavailable(#[from] reqwest::Error),

    /// Operation requires an identity. Surfaced to callers as a boolean
    /// failure, never shown raw.
    #[error("no active session")]
    NoActiveSession,

    #[error("assistant capability is not configured")]
    CapabilityUnconfigured,

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
