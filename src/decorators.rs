use crate::calendar::DayDecorator;
use crate::decoration::{DecorationError, DecorationState};
use crate::theme::{moon, WEEKEND_COLOR};
use ratatui::style::{Color, Modifier, Style};
use std::collections::BTreeMap;
use time::{Date, Weekday};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
enum Phase {
    Normal,
    Full,
    New,
}

impl Phase {
    fn for_date(date: Date) -> Phase {
        // Will give wrong results pre-1900
        let year = date.year().abs_diff(1900);
        let goldn = (year % 19) + 1;
        let mut epact = (11 * goldn + 18) % 30;
        if (epact == 25 && goldn > 11) || epact == 24 {
            epact += 1;
        }
        let ordinal0 = u32::from(date.ordinal()) - 1;
        match (((((ordinal0 + epact) * 6) + 11) % 177) / 22) & 7 {
            0 => Phase::New,
            4 => Phase::Full,
            _ => Phase::Normal,
        }
    }
}

/// Highlights NetHack's full moons (bold light yellow) and new moons (light
/// blue)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MoonPhases;

impl DayDecorator for MoonPhases {
    fn should_decorate(&self, date: Date) -> bool {
        Phase::for_date(date) != Phase::Normal
    }

    fn decorate(&self, date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
        match Phase::for_date(date) {
            Phase::Full => {
                state.set_text_color(moon::FULL_MOON_COLOR);
                state.add_span(moon::FULL_MOON_SPAN);
            }
            Phase::New => state.set_text_color(moon::NEW_MOON_COLOR),
            Phase::Normal => (),
        }
        Ok(())
    }
}

/// Greys out Saturdays and Sundays, optionally disabling them too
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Weekends {
    pub(crate) disabled: bool,
}

impl DayDecorator for Weekends {
    fn should_decorate(&self, date: Date) -> bool {
        matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
    }

    fn decorate(&self, _date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
        state.set_text_color(WEEKEND_COLOR);
        if self.disabled {
            state.set_days_disabled(true);
        }
        Ok(())
    }
}

/// Decoration requested for one specific date
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Highlight {
    pub(crate) color: Option<Color>,
    pub(crate) background: Option<Color>,
    pub(crate) bold: bool,
    pub(crate) disabled: Option<bool>,
    pub(crate) selectable: Option<bool>,
}

/// Applies a fixed [`Highlight`] to each of a set of dates
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Highlights(BTreeMap<Date, Highlight>);

impl Highlights {
    pub(crate) fn new() -> Self {
        Highlights::default()
    }

    /// Later highlights for the same date replace earlier ones
    pub(crate) fn insert(&mut self, date: Date, highlight: Highlight) {
        self.0.insert(date, highlight);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl DayDecorator for Highlights {
    fn should_decorate(&self, date: Date) -> bool {
        self.0.contains_key(&date)
    }

    fn decorate(&self, date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
        let Some(hl) = self.0.get(&date) else {
            return Ok(());
        };
        if let Some(color) = hl.color {
            state.set_text_color(color);
        }
        if let Some(bg) = hl.background {
            state.set_background(Style::new().bg(bg))?;
        }
        if hl.bold {
            state.add_span(Style::new().add_modifier(Modifier::BOLD));
        }
        if let Some(disabled) = hl.disabled {
            state.set_days_disabled(disabled);
        }
        if let Some(selectable) = hl.selectable {
            state.set_selectable(selectable);
        }
        Ok(())
    }
}

/// Gives every day the same selection appearance
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SelectionTheme(pub(crate) Style);

impl DayDecorator for SelectionTheme {
    fn should_decorate(&self, _date: Date) -> bool {
        true
    }

    fn decorate(&self, _date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
        state.set_selection_visual(self.0)
    }
}
