//! Console color palette and color utilities.

use crate::forms::RuleState;
use crate::notifications::NotificationLevel;
use idm_select::TriState;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ConsoleTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl ConsoleTheme {
    pub fn midnight() -> Self {
        Self {
            bg: Color::Rgb(14, 17, 23),
            bg_secondary: Color::Rgb(24, 29, 38),
            bg_highlight: Color::Rgb(38, 46, 60),
            primary: Color::Rgb(88, 166, 255),
            primary_dim: Color::Rgb(44, 92, 150),
            secondary: Color::Rgb(163, 113, 247),
            tertiary: Color::Rgb(210, 153, 34),
            success: Color::Rgb(63, 185, 80),
            warning: Color::Rgb(210, 153, 34),
            error: Color::Rgb(248, 81, 73),
            info: Color::Rgb(88, 166, 255),
            text: Color::Rgb(230, 237, 243),
            text_dim: Color::Rgb(139, 148, 158),
            text_muted: Color::Rgb(72, 79, 88),
            border: Color::Rgb(48, 54, 61),
            border_focus: Color::Rgb(88, 166, 255),
        }
    }
}

pub fn tri_state_color(state: TriState, theme: &ConsoleTheme) -> Color {
    match state {
        TriState::Checked => theme.primary,
        TriState::Indeterminate => theme.tertiary,
        TriState::Unchecked => theme.text_dim,
    }
}

pub fn rule_state_color(state: RuleState, theme: &ConsoleTheme) -> Color {
    match state {
        RuleState::Indeterminate => theme.text_dim,
        RuleState::Success => theme.success,
        RuleState::Error => theme.error,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &ConsoleTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Success => theme.success,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}
