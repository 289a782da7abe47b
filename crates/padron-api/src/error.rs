use thiserror::Error;

/// Top-level error type for the `padron-api` crate.
///
/// Covers transport failures, non-2xx API responses, and malformed
/// payloads. `padron-core` maps these into user-facing diagnostics
/// through [`Error::user_message`].
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API ─────────────────────────────────────────────────────────
    /// The server answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Render this failure as the single human-readable line shown to
    /// the user.
    ///
    /// Server responses carry their HTTP status; anything that never
    /// produced a server response is prefixed with a plain `Error:`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, message } => {
                format!("Código de error: {status}, mensaje: {message}")
            }
            other => format!("Error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn api_errors_carry_status_and_message() {
        let err = Error::Api {
            status: 404,
            message: "no existe".into(),
        };
        assert_eq!(
            err.user_message(),
            "Código de error: 404, mensaje: no existe"
        );
    }

    #[test]
    fn non_api_errors_use_plain_prefix() {
        let err = Error::Deserialization {
            message: "expected a list".into(),
            body: "{}".into(),
        };
        assert!(err.user_message().starts_with("Error: "));
    }
}
