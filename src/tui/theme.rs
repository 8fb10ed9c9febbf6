// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

/// Terminal styling. `NERON_NO_COLOR` (any non-empty value) falls back to
/// modifier-only styles for monochrome terminals.
#[derive(Debug, Clone)]
pub(crate) struct TuiTheme {
    colors: bool,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self { colors: true }
    }
}

impl TuiTheme {
    pub(crate) fn from_env() -> Self {
        let no_color = env::var("NERON_NO_COLOR").map(|v| !v.is_empty()).unwrap_or(false);
        Self { colors: !no_color }
    }

    fn fg(&self, color: Color, fallback: Modifier) -> Style {
        if self.colors {
            Style::default().fg(color)
        } else {
            Style::default().add_modifier(fallback)
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.fg(Color::LightGreen, Modifier::BOLD)
        } else {
            Style::default()
        }
    }

    pub(crate) fn cursor_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn highlight_style(&self) -> Style {
        self.fg(Color::Yellow, Modifier::BOLD)
    }

    pub(crate) fn hover_style(&self) -> Style {
        self.fg(Color::Cyan, Modifier::UNDERLINED)
    }

    pub(crate) fn locked_style(&self) -> Style {
        self.fg(Color::LightMagenta, Modifier::BOLD)
    }

    pub(crate) fn notification_style(&self) -> Style {
        self.fg(Color::DarkGray, Modifier::DIM)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.fg(Color::Red, Modifier::BOLD)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.fg(Color::Cyan, Modifier::BOLD)
    }
}
