//! Notification and confirmation sinks backed by the action channel.
//!
//! The directory reports outcomes through [`Notifier`] and [`Confirmer`];
//! these implementations forward them into the TUI action loop so toasts
//! and confirm dialogs render like any other state change.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use padron_core::{ConfirmPrompt, Confirmer, Notifier, Toast};

use crate::action::Action;

/// Forwards toasts into the action queue.
#[derive(Debug, Clone)]
pub struct ActionNotifier {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ActionNotifier {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

impl Notifier for ActionNotifier {
    fn notify(&self, toast: Toast) {
        let _ = self.action_tx.send(Action::Notify(toast));
    }
}

/// Routes confirmation prompts through the TUI as a modal dialog.
///
/// The calling directory flow suspends on a oneshot until the user
/// answers. A dropped reply (dialog dismissed without an answer, or the
/// app shutting down) counts as a refusal.
#[derive(Debug, Clone)]
pub struct ActionConfirmer {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl ActionConfirmer {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self { action_tx }
    }
}

#[async_trait]
impl Confirmer for ActionConfirmer {
    async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .action_tx
            .send(Action::RequestConfirm {
                prompt,
                reply: reply_tx,
            })
            .is_err()
        {
            return false;
        }
        reply_rx.await.unwrap_or(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use padron_core::Severity;
    use pretty_assertions::assert_eq;

    use super::*;

    fn prompt() -> ConfirmPrompt {
        ConfirmPrompt {
            header: "Confirmar".into(),
            message: "¿Seguro?".into(),
            icon: None,
        }
    }

    #[tokio::test]
    async fn notifier_forwards_toast() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = ActionNotifier::new(tx);

        notifier.notify(Toast::success("Persona Creada"));

        match rx.recv().await.unwrap() {
            Action::Notify(toast) => {
                assert_eq!(toast.severity, Severity::Success);
                assert_eq!(toast.detail, "Persona Creada");
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirm_resolves_to_user_answer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let confirmer = ActionConfirmer::new(tx);

        let pending = tokio::spawn(async move { confirmer.confirm(prompt()).await });

        match rx.recv().await.unwrap() {
            Action::RequestConfirm { reply, .. } => reply.send(true).unwrap(),
            other => panic!("unexpected action: {other:?}"),
        }

        assert!(pending.await.unwrap());
    }

    #[tokio::test]
    async fn dropped_reply_counts_as_refusal() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let confirmer = ActionConfirmer::new(tx);

        let pending = tokio::spawn(async move { confirmer.confirm(prompt()).await });

        match rx.recv().await.unwrap() {
            Action::RequestConfirm { reply, .. } => drop(reply),
            other => panic!("unexpected action: {other:?}"),
        }

        assert!(!pending.await.unwrap());
    }

    #[tokio::test]
    async fn closed_channel_counts_as_refusal() {
        let (tx, rx) = mpsc::unbounded_channel();
        let confirmer = ActionConfirmer::new(tx);
        drop(rx);

        assert!(!confirmer.confirm(prompt()).await);
    }
}
