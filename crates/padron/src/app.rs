//! Application orchestrator: owns the event loop, routes keys and
//! actions, and draws the overlay chrome around the roster screen.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use padron_core::{ConfirmPrompt, Directory, Toast};

use crate::action::Action;
use crate::bridge;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::roster::RosterScreen;
use crate::theme;
use crate::tui::Tui;

pub struct App {
    /// The single screen; tables, dialog, and marks live there.
    roster: RosterScreen,
    /// Main loop runs while this is true.
    running: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Whether the status bar is in filter-input mode.
    search_active: bool,
    /// Filter text under edit, echoed to the roster per keystroke.
    search_query: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    directory: Directory,
    /// Stops the watch-forwarding bridge task on shutdown.
    bridge_cancel: CancellationToken,
    /// Prompt on screen and the channel that resolves its flow.
    pending_confirm: Option<(ConfirmPrompt, oneshot::Sender<bool>)>,
    /// Current toast and when it appeared.
    notification: Option<(Toast, Instant)>,
}

impl App {
    /// The channel is created by the caller because the directory's
    /// notification and confirmation sinks need the sender before the
    /// app exists.
    pub fn new(
        directory: Directory,
        action_tx: mpsc::UnboundedSender<Action>,
        action_rx: mpsc::UnboundedReceiver<Action>,
    ) -> Self {
        Self {
            roster: RosterScreen::new(),
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            directory,
            bridge_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.roster.init(self.action_tx.clone())?;
        self.roster.set_focused(true);

        tokio::spawn(bridge::run_directory_bridge(
            self.directory.clone(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));

        // Initial fetch so the table isn't empty on startup
        self.action_tx.send(Action::Reload)?;

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        info!("TUI event loop started");

        while self.running {
            if let Some(event) = events.next().await {
                match event {
                    Event::Key(key) => self.handle_key_event(key)?,
                    Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                    Event::Tick => self.action_tx.send(Action::Tick)?,
                    Event::Render => self.action_tx.send(Action::Render)?,
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        events.stop();
        tui.exit()?;
        info!("TUI shut down cleanly");
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Ctrl+C always quits, whatever is focused
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        // A confirmation prompt captures the keyboard until answered
        if self.pending_confirm.is_some() {
            match key.code {
                KeyCode::Char('s' | 'S' | 'y' | 'Y') => self.action_tx.send(Action::ConfirmYes)?,
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.action_tx.send(Action::ConfirmNo)?,
                _ => {}
            }
            return Ok(());
        }

        // So does the edit dialog while it is open
        if self.roster.dialog_open() {
            if let Some(action) = self.roster.handle_key_event(key)? {
                self.action_tx.send(action)?;
            }
            return Ok(());
        }

        if self.search_active {
            match key.code {
                KeyCode::Esc => self.action_tx.send(Action::CloseSearch)?,
                KeyCode::Enter => self.action_tx.send(Action::SearchSubmit)?,
                KeyCode::Backspace => {
                    self.search_query.pop();
                    self.action_tx
                        .send(Action::SearchInput(self.search_query.clone()))?;
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    self.action_tx
                        .send(Action::SearchInput(self.search_query.clone()))?;
                }
                _ => {}
            }
            return Ok(());
        }

        if self.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.action_tx.send(Action::ToggleHelp)?;
            }
            return Ok(());
        }

        // Globals match on the code alone; terminals disagree on the
        // SHIFT modifier for characters like '?'.
        match key.code {
            KeyCode::Char('q') => self.action_tx.send(Action::Quit)?,
            KeyCode::Char('?') => self.action_tx.send(Action::ToggleHelp)?,
            KeyCode::Char('/') => self.action_tx.send(Action::OpenSearch)?,
            KeyCode::Esc if self.notification.is_some() => {
                self.action_tx.send(Action::DismissNotification)?;
            }
            _ => {
                if let Some(action) = self.roster.handle_key_event(key)? {
                    self.action_tx.send(action)?;
                }
            }
        }
        Ok(())
    }

    fn process_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                info!("quit requested");
                self.running = false;
            }
            Action::Resize(w, h) => debug!("terminal resized to {w}x{h}"),
            Action::Render => {}
            Action::Tick => {
                if let Some((toast, shown_at)) = &self.notification {
                    let life = toast.life.unwrap_or(Duration::from_secs(3));
                    if shown_at.elapsed() > life {
                        self.notification = None;
                    }
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
            }
            Action::CloseSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.forward(&Action::CloseSearch)?;
            }
            Action::SearchSubmit => self.search_active = false,
            Action::Reload => {
                let directory = self.directory.clone();
                tokio::spawn(async move {
                    if let Err(e) = directory.load_personas().await {
                        warn!(error = %e, "failed to load personas");
                    }
                });
            }
            Action::SaveDraft(draft) => {
                let directory = self.directory.clone();
                tokio::spawn(async move {
                    directory.set_draft(draft);
                    if let Err(e) = directory.save_persona().await {
                        warn!(error = %e, "failed to save persona");
                    }
                });
            }
            Action::DeletePersona(persona) => {
                let directory = self.directory.clone();
                tokio::spawn(async move {
                    if let Err(e) = directory.delete_persona(&persona).await {
                        warn!(error = %e, "failed to delete persona");
                    }
                });
            }
            Action::DeleteSelection => {
                let directory = self.directory.clone();
                tokio::spawn(async move {
                    if let Err(e) = directory.delete_selected().await {
                        warn!(error = %e, "failed to delete marked personas");
                    }
                });
            }
            Action::NewPersona => self.directory.open_new(),
            Action::EditPersona(persona) => self.directory.edit_persona(&persona),
            Action::CloseDialog => self.directory.hide_dialog(),
            Action::ToggleSelection(persona) => self.directory.toggle_selection(&persona),
            Action::RequestConfirm { prompt, reply } => {
                if self.pending_confirm.is_some() {
                    // A prompt is already on screen; refuse the newcomer
                    // so its flow resolves instead of hanging.
                    let _ = reply.send(false);
                } else {
                    self.pending_confirm = Some((prompt, reply));
                }
            }
            Action::ConfirmYes => {
                if let Some((_, reply)) = self.pending_confirm.take() {
                    let _ = reply.send(true);
                }
            }
            Action::ConfirmNo => {
                if let Some((_, reply)) = self.pending_confirm.take() {
                    let _ = reply.send(false);
                }
            }
            Action::Notify(toast) => self.notification = Some((toast, Instant::now())),
            Action::DismissNotification => self.notification = None,
            other => self.forward(&other)?,
        }
        Ok(())
    }

    /// Hand an action to the roster and queue whatever it returns.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.roster.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::vertical([
            Constraint::Min(1),    // roster
            Constraint::Length(1), // status bar
        ])
        .split(area);

        self.roster.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        // Overlays last so they sit above the screen; help topmost
        if self.notification.is_some() {
            self.render_notification(frame, area);
        }
        if self.pending_confirm.is_some() {
            self.render_confirm_dialog(frame, area);
        }
        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if self.search_active {
            Line::from(vec![
                Span::styled(
                    " / ",
                    Style::default()
                        .fg(theme::TERRACOTTA)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(self.search_query.clone(), Style::default().fg(theme::CREAM)),
                Span::styled("█", Style::default().fg(theme::SAFFRON)),
                Span::styled("  Esc cancelar  Enter aceptar", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" / ", theme::key_hint_key()),
                Span::styled("filtrar  ", theme::key_hint()),
                Span::styled("? ", theme::key_hint_key()),
                Span::styled("ayuda  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("salir", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_confirm_dialog(&self, frame: &mut Frame, area: Rect) {
        let Some((prompt, _)) = &self.pending_confirm else {
            return;
        };

        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 6u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(format!(" {} ", prompt.header))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::SAFFRON));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let message = match &prompt.icon {
            Some(icon) => format!("  {icon} {}", prompt.message),
            None => format!("  {}", prompt.message),
        };

        let layout = Layout::vertical([
            Constraint::Min(1),    // message, wrapped
            Constraint::Length(1), // key hints
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(theme::CREAM))
                .wrap(Wrap { trim: false }),
            layout[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("  s ", theme::key_hint_key()),
                Span::styled("sí    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("no", theme::key_hint()),
            ])),
            layout[1],
        );
    }

    fn render_notification(&self, frame: &mut Frame, area: Rect) {
        let Some((toast, _)) = &self.notification else {
            return;
        };

        let longest = toast
            .summary
            .chars()
            .count()
            .max(toast.detail.chars().count());
        let width = ((longest + 6) as u16).clamp(20, 60).min(area.width);
        let height = 4u16.min(area.height);
        let x = area.width.saturating_sub(width + 2);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let color = theme::severity_color(toast.severity);
        let icon = theme::severity_icon(toast.severity);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let lines = vec![
            Line::from(Span::styled(
                format!(" {icon} {}", toast.summary),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("   {}", toast.detail),
                Style::default().fg(theme::CREAM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 22u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Atajos de teclado ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let row = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("   {key:<12}"), theme::key_hint_key()),
                Span::styled(desc, Style::default().fg(theme::CREAM)),
            ])
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  Navegación", theme::table_header())),
            row("j / ↓", "bajar"),
            row("k / ↑", "subir"),
            row("g / G", "primera / última fila"),
            row("Ctrl+d / u", "media página"),
            Line::from(""),
            Line::from(Span::styled("  Personas", theme::table_header())),
            row("n", "nueva persona"),
            row("e / Enter", "editar la fila actual"),
            row("espacio", "marcar / desmarcar"),
            row("d", "eliminar la fila actual"),
            row("D", "eliminar las marcadas"),
            row("r", "recargar del servidor"),
            Line::from(""),
            Line::from(Span::styled("  General", theme::table_header())),
            row("/", "filtrar"),
            row("q", "salir"),
            Line::from(""),
            Line::from(Span::styled("  Esc o ? para cerrar", theme::key_hint())),
        ];

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
