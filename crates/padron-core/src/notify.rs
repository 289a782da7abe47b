// ── Notification and confirmation seams ──
//
// The core reports outcomes through these interfaces; the front end
// decides how they look. Keeping the traits here lets directory logic
// run under tests with recording fakes.

use std::time::Duration;

use async_trait::async_trait;

/// Toast severity, mirrored by the front end's colors and icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// How long the toast stays visible; `None` leaves it to the sink.
    pub life: Option<Duration>,
}

impl Toast {
    /// Success toast with the standard summary and a 3 second life.
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            summary: "Éxito".into(),
            detail: detail.into(),
            life: Some(Duration::from_millis(3000)),
        }
    }

    /// Error toast.
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: "Error".into(),
            detail: detail.into(),
            life: Some(Duration::from_millis(3000)),
        }
    }

    /// Informational toast.
    pub fn info(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            summary: "Info".into(),
            detail: detail.into(),
            life: Some(Duration::from_millis(3000)),
        }
    }
}

/// Sink for transient notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// A blocking confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: String,
    pub message: String,
    pub icon: Option<String>,
}

/// Sink for confirmation prompts.
///
/// `confirm` resolves to `true` when the user accepts and `false` when
/// they dismiss; the calling flow stays suspended until then.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool;
}
