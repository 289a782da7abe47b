//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use tokio::sync::oneshot;

use padron_core::{ConfirmPrompt, DialogState, Persona, Toast};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Data Events (from padron-core watch channels) ──────────────
    PersonasUpdated(Arc<Vec<Persona>>),
    DialogUpdated(DialogState),
    SelectionUpdated(Arc<Vec<Persona>>),

    // ── Directory Commands ─────────────────────────────────────────
    Reload,
    NewPersona,
    EditPersona(Persona),
    SaveDraft(Persona),
    CloseDialog,
    ToggleSelection(Persona),
    DeletePersona(Persona),
    DeleteSelection,

    // ── Confirm Dialog ─────────────────────────────────────────────
    /// A directory flow is waiting on the user; `reply` resolves its
    /// pending [`Confirmer`](padron_core::Confirmer) call.
    RequestConfirm {
        prompt: ConfirmPrompt,
        reply: oneshot::Sender<bool>,
    },
    ConfirmYes,
    ConfirmNo,

    // ── Search ─────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchInput(String),
    SearchSubmit,

    // ── Help ───────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ──────────────────────────────────────────────
    Notify(Toast),
    DismissNotification,
}
