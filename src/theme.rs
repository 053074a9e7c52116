use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const YEAR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const MONTH_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = Style::new().fg(Color::Gray);

/// Patched over the label of a day that is out of bounds or disabled
pub(crate) const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Used for the selected day when no decorator supplied a selection visual
pub(crate) const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) mod moon {
    use super::*;

    pub(crate) const FULL_MOON_COLOR: Color = Color::LightYellow;

    pub(crate) const NEW_MOON_COLOR: Color = Color::LightBlue;

    pub(crate) const FULL_MOON_SPAN: Style = Style::new().add_modifier(Modifier::BOLD);
}

pub(crate) const WEEKEND_COLOR: Color = Color::Gray;
