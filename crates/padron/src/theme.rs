//! Azulejo palette and semantic styling for the TUI.

use padron_core::Severity;
use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const COBALT: Color = Color::Rgb(72, 133, 199); // #4885c7
pub const SAFFRON: Color = Color::Rgb(244, 196, 48); // #f4c430
pub const TERRACOTTA: Color = Color::Rgb(226, 114, 91); // #e2725b
pub const OLIVE: Color = Color::Rgb(142, 166, 92); // #8ea65c
pub const BRICK_RED: Color = Color::Rgb(217, 87, 87); // #d95757

// ── Extended Palette ──────────────────────────────────────────────────

pub const CREAM: Color = Color::Rgb(235, 229, 213); // #ebe5d5
pub const SLATE: Color = Color::Rgb(116, 125, 140); // #747d8c
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 44, 55); // #2a2c37
pub const BG_DARK: Color = Color::Rgb(27, 29, 37); // #1b1d25

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(SAFFRON).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(COBALT)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(SLATE)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(COBALT)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(CREAM)
}

/// Row under the cursor.
pub fn table_selected() -> Style {
    Style::default()
        .fg(TERRACOTTA)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Rows marked for a bulk operation.
pub fn table_marked() -> Style {
    Style::default().fg(OLIVE)
}

/// Key hint text (e.g., "q salir  ? ayuda").
pub fn key_hint() -> Style {
    Style::default().fg(SLATE)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SAFFRON).add_modifier(Modifier::BOLD)
}

/// Validation message inside the edit dialog.
pub fn validation_error() -> Style {
    Style::default().fg(BRICK_RED)
}

/// Border and icon color for a toast of the given severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => COBALT,
        Severity::Success => OLIVE,
        Severity::Error => BRICK_RED,
    }
}

/// Icon glyph for a toast of the given severity.
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "·",
        Severity::Success => "✓",
        Severity::Error => "✗",
    }
}
