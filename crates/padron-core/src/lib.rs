//! View-model layer between `padron-api` and the terminal front end.
//!
//! This crate owns the mutable application state and the rules for
//! changing it:
//!
//! - **[`Directory`]** — central facade holding the persona list, the
//!   edit-dialog state, and the row selection behind `watch` channels,
//!   with one method per user action.
//! - **[`PersonaStore`]** — the persistence seam. The production
//!   implementation ([`HttpPersonaStore`]) delegates to
//!   [`padron_api::PersonaClient`]; tests substitute in-memory fakes.
//! - **[`Notifier`] / [`Confirmer`]** — capability interfaces for toast
//!   notifications and blocking confirmation prompts, implemented by
//!   the front end.

pub mod directory;
pub mod error;
pub mod model;
pub mod notify;
pub mod store;

pub use directory::{DialogState, Directory};
pub use error::CoreError;
pub use model::{Persona, matches_global};
pub use notify::{ConfirmPrompt, Confirmer, Notifier, Severity, Toast};
pub use store::{HttpPersonaStore, PersonaStore};
