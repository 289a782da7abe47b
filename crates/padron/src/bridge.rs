//! Directory bridge — forwards reactive state changes into TUI actions.
//!
//! Runs as a background task: subscribes to the directory's watch
//! channels and forwards every change as an [`Action`] through the TUI's
//! action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use padron_core::Directory;

use crate::action::Action;

/// Run the bridge connecting [`Directory`] watch channels to the TUI.
///
/// Sends initial snapshots so the roster has data before the first
/// change, then forwards every update until cancelled.
pub async fn run_directory_bridge(
    directory: Directory,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut personas = directory.watch_personas();
    let mut dialog = directory.watch_dialog();
    let mut selection = directory.watch_selection();

    // Push initial snapshots so the roster renders immediately
    let _ = action_tx.send(Action::PersonasUpdated(
        personas.borrow_and_update().clone(),
    ));
    let _ = action_tx.send(Action::DialogUpdated(dialog.borrow_and_update().clone()));
    let _ = action_tx.send(Action::SelectionUpdated(
        selection.borrow_and_update().clone(),
    ));

    // Stream loop — forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = personas.changed() => {
                let list = personas.borrow_and_update().clone();
                let _ = action_tx.send(Action::PersonasUpdated(list));
            }
            Ok(()) = dialog.changed() => {
                let state = dialog.borrow_and_update().clone();
                let _ = action_tx.send(Action::DialogUpdated(state));
            }
            Ok(()) = selection.changed() => {
                let marked = selection.borrow_and_update().clone();
                let _ = action_tx.send(Action::SelectionUpdated(marked));
            }
        }
    }

    debug!("directory bridge shut down");
}
