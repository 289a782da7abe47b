// ── Core error types ──
//
// User-facing errors from padron-core. Consumers never see raw
// transport errors -- the `From<padron_api::Error>` impl folds them
// into the normalized message the UI displays.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A store call failed. `message` is already user-presentable.
    #[error("{message}")]
    Api { message: String },

    /// The operation needs a persisted record but the persona carries
    /// no id.
    #[error("persona has no id")]
    MissingId,
}

impl From<padron_api::Error> for CoreError {
    fn from(err: padron_api::Error) -> Self {
        CoreError::Api {
            message: err.user_message(),
        }
    }
}
