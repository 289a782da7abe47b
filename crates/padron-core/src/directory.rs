// ── Directory controller ──
//
// Holds the persona list, edit-dialog state, and row selection behind
// watch channels, and owns every state transition. Mutation happens
// only inside these methods; the front end observes through the
// receivers and calls back in here on user input.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::Persona;
use crate::notify::{ConfirmPrompt, Confirmer, Notifier, Toast};
use crate::store::PersonaStore;

// ── Dialog state ─────────────────────────────────────────────────────

/// Edit-dialog state machine: `Closed -> Open -> Closed`.
///
/// `Open` holds the working draft. A draft with an id edits an existing
/// record; without one it creates. `submitted` flips on every save
/// attempt and gates whether the view surfaces validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    Open { draft: Persona, submitted: bool },
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

// ── Directory ────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<DirectoryInner>`. Every user action is a
/// method here; outcomes surface through the injected [`Notifier`] and
/// the watch channels.
#[derive(Clone)]
pub struct Directory {
    inner: Arc<DirectoryInner>,
}

struct DirectoryInner {
    store: Arc<dyn PersonaStore>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    personas: watch::Sender<Arc<Vec<Persona>>>,
    dialog: watch::Sender<DialogState>,
    selection: watch::Sender<Arc<Vec<Persona>>>,
}

impl Directory {
    pub fn new(
        store: Arc<dyn PersonaStore>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let (personas, _) = watch::channel(Arc::new(Vec::new()));
        let (dialog, _) = watch::channel(DialogState::Closed);
        let (selection, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            inner: Arc::new(DirectoryInner {
                store,
                notifier,
                confirmer,
                personas,
                dialog,
                selection,
            }),
        }
    }

    // ── Snapshots & subscriptions ────────────────────────────────────

    /// Current persona list (cheap `Arc` clone).
    pub fn personas(&self) -> Arc<Vec<Persona>> {
        self.inner.personas.borrow().clone()
    }

    pub fn dialog(&self) -> DialogState {
        self.inner.dialog.borrow().clone()
    }

    pub fn selection(&self) -> Arc<Vec<Persona>> {
        self.inner.selection.borrow().clone()
    }

    pub fn watch_personas(&self) -> watch::Receiver<Arc<Vec<Persona>>> {
        self.inner.personas.subscribe()
    }

    pub fn watch_dialog(&self) -> watch::Receiver<DialogState> {
        self.inner.dialog.subscribe()
    }

    pub fn watch_selection(&self) -> watch::Receiver<Arc<Vec<Persona>>> {
        self.inner.selection.subscribe()
    }

    // ── Dialog transitions ───────────────────────────────────────────

    /// Open the dialog with a blank draft (create flow).
    pub fn open_new(&self) {
        self.inner.dialog.send_replace(DialogState::Open {
            draft: Persona::default(),
            submitted: false,
        });
    }

    /// Open the dialog with a copy of `persona` (edit flow). The list
    /// entry stays untouched until the draft is saved.
    pub fn edit_persona(&self, persona: &Persona) {
        self.inner.dialog.send_replace(DialogState::Open {
            draft: persona.clone(),
            submitted: false,
        });
    }

    /// Close the dialog, discarding the draft.
    pub fn hide_dialog(&self) {
        self.inner.dialog.send_replace(DialogState::Closed);
    }

    /// Replace the open dialog's draft with the view's edit buffer.
    /// No-op while the dialog is closed.
    pub fn set_draft(&self, draft: Persona) {
        self.inner.dialog.send_if_modified(|state| match state {
            DialogState::Open { draft: current, .. } => {
                *current = draft;
                true
            }
            DialogState::Closed => false,
        });
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Toggle `persona` in the row selection, matched by id.
    pub fn toggle_selection(&self, persona: &Persona) {
        self.inner.selection.send_modify(|sel| {
            let list = Arc::make_mut(sel);
            if let Some(pos) = list.iter().position(|p| p.id == persona.id) {
                list.remove(pos);
            } else {
                list.push(persona.clone());
            }
        });
    }

    // ── Server operations ────────────────────────────────────────────

    /// Replace the list with a fresh server snapshot.
    ///
    /// On failure the current list is kept and one error notification
    /// fires.
    pub async fn load_personas(&self) -> Result<(), CoreError> {
        match self.inner.store.list().await {
            Ok(list) => {
                debug!(count = list.len(), "persona list replaced");
                self.inner.personas.send_replace(Arc::new(list));
                Ok(())
            }
            Err(e) => {
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Validate and persist the open draft.
    ///
    /// A blank (trimmed) nombre sends nothing and keeps the dialog open
    /// with `submitted` set so the view can show the validation message.
    /// On success the dialog closes and one success notification fires;
    /// on failure the dialog stays open and one error notification
    /// fires.
    pub async fn save_persona(&self) -> Result<(), CoreError> {
        let mut snapshot = None;
        self.inner.dialog.send_if_modified(|state| match state {
            DialogState::Open { draft, submitted } => {
                *submitted = true;
                snapshot = Some(draft.clone());
                true
            }
            DialogState::Closed => false,
        });
        let Some(draft) = snapshot else {
            return Ok(());
        };

        if draft.nombre.trim().is_empty() {
            return Ok(());
        }

        let outcome = if let Some(id) = draft.id.clone() {
            self.update_existing(&id, &draft).await
        } else {
            self.create_new(&draft).await
        };

        match outcome {
            Ok(detail) => {
                self.inner.dialog.send_replace(DialogState::Closed);
                self.inner.notifier.notify(Toast::success(detail));
                Ok(())
            }
            Err(e) => {
                self.notify_error(&e);
                Err(e)
            }
        }
    }

    /// Delete one persona after user confirmation.
    ///
    /// Resolves without touching anything when the user dismisses the
    /// prompt or the persona has no id.
    pub async fn delete_persona(&self, persona: &Persona) -> Result<(), CoreError> {
        let Some(id) = persona.id.clone() else {
            return Err(CoreError::MissingId);
        };

        let prompt = ConfirmPrompt {
            header: "Confirmar".into(),
            message: format!(
                "¿Estás seguro de que deseas eliminar a {}?",
                persona.nombre
            ),
            icon: Some("⚠".into()),
        };
        if !self.inner.confirmer.confirm(prompt).await {
            debug!("single delete dismissed");
            return Ok(());
        }

        if let Err(e) = self.inner.store.delete(&id).await {
            self.notify_error(&e);
            return Err(e);
        }

        self.remove_ids(&[id]);
        self.inner
            .notifier
            .notify(Toast::success("Persona Eliminada"));
        Ok(())
    }

    /// Delete every selected persona after one confirmation.
    ///
    /// All deletes run concurrently and are joined; if any fails the
    /// list and the selection stay untouched and a single error
    /// notification fires. No-op on an empty selection.
    pub async fn delete_selected(&self) -> Result<(), CoreError> {
        let selected = self.selection();
        if selected.is_empty() {
            return Ok(());
        }

        let prompt = ConfirmPrompt {
            header: "Confirmar".into(),
            message: "¿Estás seguro de que deseas eliminar las personas seleccionados?".into(),
            icon: Some("⚠".into()),
        };
        if !self.inner.confirmer.confirm(prompt).await {
            debug!("bulk delete dismissed");
            return Ok(());
        }

        let ids: Vec<String> = selected.iter().filter_map(|p| p.id.clone()).collect();

        let results = join_all(ids.iter().map(|id| self.inner.store.delete(id))).await;
        if let Some(err) = results.into_iter().find_map(Result::err) {
            self.notify_error(&err);
            return Err(err);
        }

        self.remove_ids(&ids);
        self.inner.selection.send_replace(Arc::new(Vec::new()));
        self.inner
            .notifier
            .notify(Toast::success("Personas Eliminadas"));
        Ok(())
    }

    // ── Private helpers ──────────────────────────────────────────────

    async fn update_existing(&self, id: &str, draft: &Persona) -> Result<&'static str, CoreError> {
        let updated = self.inner.store.update(id, draft).await?;
        self.inner.personas.send_modify(|list| {
            let list = Arc::make_mut(list);
            if let Some(idx) = list.iter().position(|p| p.id.as_deref() == Some(id)) {
                // The server's copy is authoritative over the draft.
                list[idx] = updated;
            } else {
                warn!(%id, "updated persona no longer in list");
            }
        });
        Ok("Persona Actualizada")
    }

    async fn create_new(&self, draft: &Persona) -> Result<&'static str, CoreError> {
        let created = self.inner.store.create(draft).await?;
        self.inner.personas.send_modify(|list| {
            Arc::make_mut(list).push(created);
        });
        Ok("Persona Creada")
    }

    /// Drop every persona whose id is in `ids` from the list and the
    /// selection.
    fn remove_ids(&self, ids: &[String]) {
        self.inner.personas.send_modify(|list| {
            Arc::make_mut(list).retain(|p| p.id.as_ref().is_none_or(|id| !ids.contains(id)));
        });
        self.inner.selection.send_modify(|sel| {
            Arc::make_mut(sel).retain(|p| p.id.as_ref().is_none_or(|id| !ids.contains(id)));
        });
    }

    fn notify_error(&self, err: &CoreError) {
        self.inner.notifier.notify(Toast::error(err.to_string()));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::notify::Severity;

    // ── Fakes ────────────────────────────────────────────────────────

    #[derive(Default)]
    struct FakeStore {
        list_response: Mutex<Vec<Persona>>,
        /// When set, `update` returns this instead of echoing the draft.
        update_response: Mutex<Option<Persona>>,
        /// Ids whose delete call fails.
        fail_delete_ids: Mutex<Vec<String>>,
        /// Makes the next list/create/update call fail.
        fail_next: AtomicBool,
        creates: Mutex<u32>,
        updates: Mutex<Vec<String>>,
        deletes: Mutex<Vec<String>>,
    }

    fn boom() -> CoreError {
        CoreError::Api {
            message: "Error: boom".into(),
        }
    }

    #[async_trait]
    impl PersonaStore for FakeStore {
        async fn list(&self) -> Result<Vec<Persona>, CoreError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(boom());
            }
            Ok(self.list_response.lock().unwrap().clone())
        }

        async fn create(&self, draft: &Persona) -> Result<Persona, CoreError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(boom());
            }
            let mut n = self.creates.lock().unwrap();
            *n += 1;
            Ok(Persona {
                id: Some(format!("srv-{n}")),
                ..draft.clone()
            })
        }

        async fn update(&self, id: &str, persona: &Persona) -> Result<Persona, CoreError> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(boom());
            }
            self.updates.lock().unwrap().push(id.to_owned());
            let scripted = self.update_response.lock().unwrap().clone();
            Ok(scripted.unwrap_or_else(|| persona.clone()))
        }

        async fn delete(&self, id: &str) -> Result<(), CoreError> {
            self.deletes.lock().unwrap().push(id.to_owned());
            if self.fail_delete_ids.lock().unwrap().iter().any(|f| f == id) {
                return Err(boom());
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: Mutex<Vec<Toast>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.toasts.lock().unwrap().push(toast);
        }
    }

    struct ScriptedConfirmer {
        accept: bool,
        prompts: Mutex<Vec<ConfirmPrompt>>,
    }

    #[async_trait]
    impl Confirmer for ScriptedConfirmer {
        async fn confirm(&self, prompt: ConfirmPrompt) -> bool {
            self.prompts.lock().unwrap().push(prompt);
            self.accept
        }
    }

    // ── Harness ──────────────────────────────────────────────────────

    struct Harness {
        dir: Directory,
        store: Arc<FakeStore>,
        notifier: Arc<RecordingNotifier>,
        confirmer: Arc<ScriptedConfirmer>,
    }

    fn harness(accept: bool) -> Harness {
        let store = Arc::new(FakeStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let confirmer = Arc::new(ScriptedConfirmer {
            accept,
            prompts: Mutex::new(Vec::new()),
        });
        let dir = Directory::new(store.clone(), notifier.clone(), confirmer.clone());
        Harness {
            dir,
            store,
            notifier,
            confirmer,
        }
    }

    impl Harness {
        /// Seed the server list and load it through the directory.
        async fn seed(&self, personas: Vec<Persona>) {
            *self.store.list_response.lock().unwrap() = personas;
            self.dir.load_personas().await.unwrap();
        }

        fn toasts(&self) -> Vec<Toast> {
            self.notifier.toasts.lock().unwrap().clone()
        }

        fn prompts(&self) -> Vec<ConfirmPrompt> {
            self.confirmer.prompts.lock().unwrap().clone()
        }
    }

    fn persona(id: &str, nombre: &str) -> Persona {
        Persona {
            id: Some(id.into()),
            nombre: nombre.into(),
            direccion: format!("Calle {nombre}"),
            telefono: "555-0100".into(),
        }
    }

    // ── Dialog tests ─────────────────────────────────────────────────

    #[tokio::test]
    async fn edit_clones_the_list_entry() {
        let h = harness(true);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;

        h.dir.edit_persona(&ana);

        let DialogState::Open { draft, submitted } = h.dir.dialog() else {
            panic!("dialog should be open");
        };
        assert_eq!(draft, ana);
        assert!(!submitted);

        // Mutating the draft must not reach the list until save.
        let mut changed = draft;
        changed.nombre = "Ana María".into();
        h.dir.set_draft(changed);
        assert_eq!(h.dir.personas()[0].nombre, "Ana");
    }

    #[tokio::test]
    async fn hide_dialog_discards_the_draft() {
        let h = harness(true);
        h.dir.open_new();
        assert!(h.dir.dialog().is_open());

        h.dir.hide_dialog();
        assert_eq!(h.dir.dialog(), DialogState::Closed);
    }

    #[tokio::test]
    async fn set_draft_is_a_noop_when_closed() {
        let h = harness(true);
        h.dir.set_draft(persona("1", "Ana"));
        assert_eq!(h.dir.dialog(), DialogState::Closed);
    }

    // ── Save tests ───────────────────────────────────────────────────

    #[tokio::test]
    async fn save_with_blank_nombre_sends_nothing() {
        let h = harness(true);
        h.dir.open_new();
        h.dir.set_draft(Persona {
            nombre: "   ".into(),
            ..Persona::default()
        });

        h.dir.save_persona().await.unwrap();

        let DialogState::Open { submitted, .. } = h.dir.dialog() else {
            panic!("dialog should stay open");
        };
        assert!(submitted);
        assert_eq!(*h.store.creates.lock().unwrap(), 0);
        assert!(h.store.updates.lock().unwrap().is_empty());
        assert!(h.toasts().is_empty());
    }

    #[tokio::test]
    async fn save_without_dialog_is_a_noop() {
        let h = harness(true);
        h.dir.save_persona().await.unwrap();
        assert_eq!(*h.store.creates.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn create_appends_the_server_record() {
        let h = harness(true);
        h.seed(vec![persona("1", "Ana")]).await;

        h.dir.open_new();
        h.dir.set_draft(Persona {
            nombre: "Bruno".into(),
            direccion: "Av. Sur 12".into(),
            telefono: "555-0102".into(),
            ..Persona::default()
        });
        h.dir.save_persona().await.unwrap();

        let personas = h.dir.personas();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[1].id.as_deref(), Some("srv-1"));
        assert_eq!(
            personas
                .iter()
                .filter(|p| p.id.as_deref() == Some("srv-1"))
                .count(),
            1
        );
        assert_eq!(h.dir.dialog(), DialogState::Closed);

        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Success);
        assert_eq!(toasts[0].summary, "Éxito");
        assert_eq!(toasts[0].detail, "Persona Creada");
    }

    #[tokio::test]
    async fn update_replaces_at_the_original_index() {
        let h = harness(true);
        h.seed(vec![persona("1", "Ana"), persona("2", "Bruno")]).await;

        // The server answers with its own copy, which wins over the draft.
        let server_copy = Persona {
            nombre: "ANA".into(),
            ..persona("1", "Ana")
        };
        *h.store.update_response.lock().unwrap() = Some(server_copy.clone());

        h.dir.edit_persona(&persona("1", "Ana"));
        h.dir.set_draft(Persona {
            nombre: "Ana Torres".into(),
            ..persona("1", "Ana")
        });
        h.dir.save_persona().await.unwrap();

        let personas = h.dir.personas();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[0], server_copy);
        assert_eq!(personas[1].nombre, "Bruno");
        assert_eq!(h.dir.dialog(), DialogState::Closed);
        assert_eq!(h.toasts()[0].detail, "Persona Actualizada");
    }

    #[tokio::test]
    async fn update_failure_keeps_the_dialog_open() {
        let h = harness(true);
        h.seed(vec![persona("1", "Ana")]).await;

        h.dir.edit_persona(&persona("1", "Ana"));
        h.dir.set_draft(Persona {
            nombre: "Ana María".into(),
            ..persona("1", "Ana")
        });
        h.store.fail_next.store(true, Ordering::SeqCst);

        let result = h.dir.save_persona().await;
        assert!(result.is_err());

        assert!(h.dir.dialog().is_open());
        assert_eq!(h.dir.personas()[0].nombre, "Ana");

        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
        assert_eq!(toasts[0].detail, "Error: boom");
    }

    #[tokio::test]
    async fn update_with_vanished_id_still_succeeds() {
        let h = harness(true);
        h.seed(vec![persona("2", "Bruno")]).await;

        // Draft points at an id that is no longer listed.
        h.dir.edit_persona(&persona("9", "Ana"));
        h.dir.save_persona().await.unwrap();

        assert_eq!(h.dir.personas().len(), 1);
        assert_eq!(h.dir.dialog(), DialogState::Closed);
        assert_eq!(h.toasts()[0].detail, "Persona Actualizada");
    }

    // ── Delete tests ─────────────────────────────────────────────────

    #[tokio::test]
    async fn delete_removes_by_id_and_notifies() {
        let h = harness(true);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;

        h.dir.delete_persona(&ana).await.unwrap();

        assert_eq!(*h.store.deletes.lock().unwrap(), vec!["1".to_owned()]);
        assert!(h.dir.personas().is_empty());

        let prompts = h.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].header, "Confirmar");
        assert_eq!(
            prompts[0].message,
            "¿Estás seguro de que deseas eliminar a Ana?"
        );

        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].detail, "Persona Eliminada");
    }

    #[tokio::test]
    async fn delete_dismissed_leaves_everything() {
        let h = harness(false);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;

        h.dir.delete_persona(&ana).await.unwrap();

        assert!(h.store.deletes.lock().unwrap().is_empty());
        assert_eq!(h.dir.personas().len(), 1);
        assert!(h.toasts().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_keeps_the_list() {
        let h = harness(true);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;
        h.store.fail_delete_ids.lock().unwrap().push("1".into());

        let result = h.dir.delete_persona(&ana).await;
        assert!(result.is_err());

        assert_eq!(h.dir.personas().len(), 1);
        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn delete_without_id_is_rejected_before_the_prompt() {
        let h = harness(true);
        let draft = Persona {
            nombre: "Ana".into(),
            ..Persona::default()
        };

        let result = h.dir.delete_persona(&draft).await;

        assert!(matches!(result, Err(CoreError::MissingId)));
        assert!(h.prompts().is_empty());
    }

    #[tokio::test]
    async fn delete_prunes_the_selection() {
        let h = harness(true);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone(), persona("2", "Bruno")]).await;
        h.dir.toggle_selection(&ana);

        h.dir.delete_persona(&ana).await.unwrap();

        assert!(h.dir.selection().is_empty());
        assert_eq!(h.dir.personas().len(), 1);
    }

    // ── Bulk delete tests ────────────────────────────────────────────

    #[tokio::test]
    async fn bulk_delete_removes_all_and_clears_selection() {
        let h = harness(true);
        let (a, b, c) = (persona("1", "Ana"), persona("2", "Bruno"), persona("3", "Carla"));
        h.seed(vec![a.clone(), b.clone(), c.clone()]).await;
        h.dir.toggle_selection(&a);
        h.dir.toggle_selection(&b);

        h.dir.delete_selected().await.unwrap();

        let personas = h.dir.personas();
        assert_eq!(personas.len(), 1);
        assert_eq!(personas[0].nombre, "Carla");
        assert!(h.dir.selection().is_empty());
        assert_eq!(h.store.deletes.lock().unwrap().len(), 2);

        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].detail, "Personas Eliminadas");
    }

    #[tokio::test]
    async fn bulk_delete_partial_failure_removes_nothing() {
        let h = harness(true);
        let (a, b, c) = (persona("1", "Ana"), persona("2", "Bruno"), persona("3", "Carla"));
        h.seed(vec![a.clone(), b.clone(), c.clone()]).await;
        h.dir.toggle_selection(&a);
        h.dir.toggle_selection(&b);
        h.dir.toggle_selection(&c);
        h.store.fail_delete_ids.lock().unwrap().push("2".into());

        let result = h.dir.delete_selected().await;
        assert!(result.is_err());

        // All three stay listed and selected; exactly one error toast.
        assert_eq!(h.dir.personas().len(), 3);
        assert_eq!(h.dir.selection().len(), 3);
        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
        assert_eq!(h.store.deletes.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn bulk_delete_with_empty_selection_is_a_noop() {
        let h = harness(true);
        h.seed(vec![persona("1", "Ana")]).await;

        h.dir.delete_selected().await.unwrap();

        assert!(h.prompts().is_empty());
        assert!(h.store.deletes.lock().unwrap().is_empty());
        assert_eq!(h.dir.personas().len(), 1);
    }

    #[tokio::test]
    async fn bulk_delete_dismissed_keeps_the_selection() {
        let h = harness(false);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;
        h.dir.toggle_selection(&ana);

        h.dir.delete_selected().await.unwrap();

        assert_eq!(
            h.prompts()[0].message,
            "¿Estás seguro de que deseas eliminar las personas seleccionados?"
        );
        assert!(h.store.deletes.lock().unwrap().is_empty());
        assert_eq!(h.dir.selection().len(), 1);
        assert!(h.toasts().is_empty());
    }

    // ── Load & selection tests ───────────────────────────────────────

    #[tokio::test]
    async fn load_failure_keeps_the_current_list() {
        let h = harness(true);
        h.seed(vec![persona("1", "Ana")]).await;

        h.store.fail_next.store(true, Ordering::SeqCst);
        let result = h.dir.load_personas().await;
        assert!(result.is_err());

        assert_eq!(h.dir.personas().len(), 1);
        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn toggle_selection_adds_and_removes() {
        let h = harness(true);
        let ana = persona("1", "Ana");
        h.seed(vec![ana.clone()]).await;

        h.dir.toggle_selection(&ana);
        assert_eq!(h.dir.selection().len(), 1);

        h.dir.toggle_selection(&ana);
        assert!(h.dir.selection().is_empty());
    }
}
