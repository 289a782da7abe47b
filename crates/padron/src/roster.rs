//! Roster screen — the persona table, its edit dialog, and row marking.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use padron_core::{DialogState, Persona, matches_global};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

/// Fields of the edit form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum FormField {
    #[default]
    Nombre,
    Direccion,
    Telefono,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Nombre => Self::Direccion,
            Self::Direccion => Self::Telefono,
            Self::Telefono => Self::Nombre,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Nombre => Self::Telefono,
            Self::Direccion => Self::Nombre,
            Self::Telefono => Self::Direccion,
        }
    }
}

/// Local edit buffer for the persona dialog.
///
/// Keystrokes mutate this buffer only; the directory's draft is synced
/// when the user submits. `submitted` mirrors the dialog state so the
/// required-name message survives a failed save.
#[derive(Debug, Default)]
struct PersonaForm {
    id: Option<String>,
    nombre: String,
    direccion: String,
    telefono: String,
    field: FormField,
    submitted: bool,
}

impl PersonaForm {
    fn from_draft(draft: &Persona, submitted: bool) -> Self {
        Self {
            id: draft.id.clone(),
            nombre: draft.nombre.clone(),
            direccion: draft.direccion.clone(),
            telefono: draft.telefono.clone(),
            field: FormField::default(),
            submitted,
        }
    }

    fn to_persona(&self) -> Persona {
        Persona {
            id: self.id.clone(),
            nombre: self.nombre.clone(),
            direccion: self.direccion.clone(),
            telefono: self.telefono.clone(),
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Nombre => &mut self.nombre,
            FormField::Direccion => &mut self.direccion,
            FormField::Telefono => &mut self.telefono,
        }
    }

    fn title(&self) -> &'static str {
        if self.id.is_some() {
            "Editar Persona"
        } else {
            "Nueva Persona"
        }
    }

    fn missing_nombre(&self) -> bool {
        self.submitted && self.nombre.trim().is_empty()
    }
}

/// One labelled input row; the active field shows a block cursor.
fn input_line<'a>(label: &str, value: &'a str, active: bool) -> Line<'a> {
    let cursor = if active { "█" } else { "" };
    Line::from(vec![
        Span::styled(format!("  {label:<10}  "), theme::key_hint()),
        Span::styled(value, Style::default().fg(theme::CREAM)),
        Span::styled(cursor, Style::default().fg(theme::SAFFRON)),
    ])
}

pub struct RosterScreen {
    focused: bool,
    personas: Arc<Vec<Persona>>,
    selection: Arc<Vec<Persona>>,
    filter: String,
    table_state: TableState,
    cached_filtered: Vec<Persona>,
    form: Option<PersonaForm>,
}

impl RosterScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            personas: Arc::new(Vec::new()),
            selection: Arc::new(Vec::new()),
            filter: String::new(),
            table_state: TableState::default(),
            cached_filtered: Vec::new(),
            form: None,
        }
    }

    /// Whether the edit dialog currently captures keyboard input.
    pub fn dialog_open(&self) -> bool {
        self.form.is_some()
    }

    fn recompute_filtered(&mut self) {
        self.cached_filtered = self
            .personas
            .iter()
            .filter(|p| matches_global(p, &self.filter))
            .cloned()
            .collect();
        let len = self.cached_filtered.len();
        if len == 0 {
            self.table_state.select(None);
        } else if self.selected_index() >= len || self.table_state.selected().is_none() {
            self.select(self.selected_index().min(len - 1));
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn select(&mut self, idx: usize) {
        let len = self.cached_filtered.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    #[allow(clippy::cast_sign_loss, clippy::as_conversions)]
    fn move_selection(&mut self, delta: isize) {
        let len = self.cached_filtered.len();
        if len == 0 {
            return;
        }
        #[allow(clippy::cast_possible_wrap)]
        let current = self.selected_index() as isize;
        #[allow(clippy::cast_possible_wrap)]
        let next = (current + delta).clamp(0, len as isize - 1);
        self.select(next as usize);
    }

    fn current_persona(&self) -> Option<&Persona> {
        self.cached_filtered.get(self.selected_index())
    }

    fn is_marked(&self, persona: &Persona) -> bool {
        persona.id.is_some() && self.selection.iter().any(|p| p.id == persona.id)
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let Some(form) = &mut self.form else {
            return Ok(None);
        };
        match key.code {
            KeyCode::Esc => Ok(Some(Action::CloseDialog)),
            KeyCode::Enter => Ok(Some(Action::SaveDraft(form.to_persona()))),
            KeyCode::Tab | KeyCode::Down => {
                form.field = form.field.next();
                Ok(None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.field = form.field.prev();
                Ok(None)
            }
            KeyCode::Backspace => {
                form.active_mut().pop();
                Ok(None)
            }
            KeyCode::Char(c) => {
                form.active_mut().push(c);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        if self.cached_filtered.is_empty() {
            let msg = if self.personas.is_empty() {
                "Sin personas. Pulsa n para crear una o r para recargar."
            } else {
                "Sin coincidencias para el filtro."
            };
            let line = Line::from(Span::styled(format!("  {msg}"), theme::key_hint()));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("").style(theme::table_header()),
            Cell::from("Nombre").style(theme::table_header()),
            Cell::from("Dirección").style(theme::table_header()),
            Cell::from("Teléfono").style(theme::table_header()),
        ]);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = self
            .cached_filtered
            .iter()
            .enumerate()
            .map(|(i, persona)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸" } else { " " };
                let mark = if self.is_marked(persona) { "◉" } else { " " };

                let row_style = if is_selected {
                    theme::table_selected()
                } else if self.is_marked(persona) {
                    theme::table_marked()
                } else {
                    theme::table_row()
                };

                Row::new(vec![
                    Cell::from(format!("{prefix}{mark}")).style(Style::default().fg(theme::OLIVE)),
                    Cell::from(persona.nombre.clone()),
                    Cell::from(persona.direccion.clone()),
                    Cell::from(persona.telefono.clone()),
                ])
                .style(row_style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Fill(2),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let marked = self.selection.len();
        let mut spans = vec![
            Span::styled("  n ", theme::key_hint_key()),
            Span::styled("nueva  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("editar  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("eliminar  ", theme::key_hint()),
            Span::styled("espacio ", theme::key_hint_key()),
            Span::styled("marcar  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("recargar", theme::key_hint()),
        ];
        if marked > 0 {
            spans.push(Span::styled("  │  ", theme::key_hint()));
            spans.push(Span::styled("D ", theme::key_hint_key()));
            spans.push(Span::styled(
                format!("eliminar {marked} marcadas"),
                Style::default().fg(theme::OLIVE),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_dialog(&self, frame: &mut Frame, area: Rect) {
        let Some(form) = &self.form else {
            return;
        };

        let width = 54u16.min(area.width.saturating_sub(4));
        let height = 12u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        // Opaque backdrop so the table doesn't bleed through
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(format!(" {} ", form.title()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines = vec![
            Line::from(""),
            input_line("Nombre", &form.nombre, form.field == FormField::Nombre),
        ];
        if form.missing_nombre() {
            lines.push(Line::from(Span::styled(
                "              El nombre es obligatorio.",
                theme::validation_error(),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.extend([
            input_line(
                "Dirección",
                &form.direccion,
                form.field == FormField::Direccion,
            ),
            Line::from(""),
            input_line(
                "Teléfono",
                &form.telefono,
                form.field == FormField::Telefono,
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("campo  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("guardar  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancelar", theme::key_hint()),
            ]),
        ]);

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Default for RosterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RosterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                Ok(None)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                Ok(None)
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                Ok(None)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                Ok(None)
            }
            KeyCode::Char('g') => {
                self.select(0);
                Ok(None)
            }
            KeyCode::Char('G') => {
                let len = self.cached_filtered.len();
                if len > 0 {
                    self.select(len - 1);
                }
                Ok(None)
            }
            // Rows without an id can't be matched server-side, so they
            // can't be marked either.
            KeyCode::Char(' ') => Ok(self
                .current_persona()
                .filter(|p| p.id.is_some())
                .cloned()
                .map(Action::ToggleSelection)),
            KeyCode::Char('n') => Ok(Some(Action::NewPersona)),
            KeyCode::Char('e') | KeyCode::Enter => {
                Ok(self.current_persona().cloned().map(Action::EditPersona))
            }
            KeyCode::Char('d') => Ok(self.current_persona().cloned().map(Action::DeletePersona)),
            KeyCode::Char('D') => Ok(Some(Action::DeleteSelection)),
            KeyCode::Char('r') => Ok(Some(Action::Reload)),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PersonasUpdated(personas) => {
                self.personas = Arc::clone(personas);
                self.recompute_filtered();
            }
            Action::SelectionUpdated(selection) => {
                self.selection = Arc::clone(selection);
            }
            Action::DialogUpdated(state) => match state {
                DialogState::Open { draft, submitted } => {
                    // Keep the local buffer while the dialog stays open;
                    // only a fresh open seeds it from the draft.
                    if let Some(form) = &mut self.form {
                        form.submitted = *submitted;
                    } else {
                        self.form = Some(PersonaForm::from_draft(draft, *submitted));
                    }
                }
                DialogState::Closed => {
                    self.form = None;
                }
            },
            Action::SearchInput(query) => {
                self.filter.clone_from(query);
                self.recompute_filtered();
                self.table_state.select(Some(0));
            }
            Action::CloseSearch => {
                self.filter.clear();
                self.recompute_filtered();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let total = self.personas.len();
        let shown = self.cached_filtered.len();

        let title = if self.filter.is_empty() {
            format!(" Personas ({shown}/{total}) ")
        } else {
            format!(" Personas ({shown}/{total}) [\"{}\"] ", self.filter)
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_table(frame, layout[0]);
        self.render_hints(frame, layout[1]);

        self.render_dialog(frame, area);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "Personas"
    }
}
