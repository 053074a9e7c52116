use crate::decoration::DecorationState;
use crate::theme::{CURSOR_MODIFIER, DISABLED_STYLE, SELECTED_STYLE};
use ratatui::style::Style;
use std::iter::successors;
use time::{Date, Weekday};

pub(super) const DAYS_IN_WEEK: usize = 7;

pub(super) trait WeekdayExt {
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

/// The days of one Sunday-to-Saturday week.  Slots are `None` only at the
/// edges of the representable date range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: At least one element of the array is Some
pub(super) struct Week([Option<Date>; DAYS_IN_WEEK]);

impl Week {
    pub(super) fn containing(date: Date) -> Week {
        let mut days = [None; DAYS_IN_WEEK];
        let i = date.weekday().index0();
        days[i] = Some(date);
        for (j, d) in (0..i).rev().zip(iter_days_before(date)) {
            days[j] = Some(d);
        }
        for (j, d) in (i + 1..DAYS_IN_WEEK).zip(iter_days_after(date)) {
            days[j] = Some(d);
        }
        Week(days)
    }

    /// Yields each day of the week along with its column
    pub(super) fn days(&self) -> impl Iterator<Item = (usize, Date)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i, d)))
    }

    pub(super) fn first(&self) -> Date {
        self.0
            .iter()
            .flatten()
            .copied()
            .next()
            .expect("Week should contain at least one Some")
    }

    pub(super) fn last(&self) -> Date {
        self.0
            .iter()
            .flatten()
            .copied()
            .last()
            .expect("Week should contain at least one Some")
    }

    pub(super) fn contains(&self, date: Date) -> bool {
        self.0.contains(&Some(date))
    }

    /// The first day of a month falling in this week, if any
    pub(super) fn month_start(&self) -> Option<Date> {
        self.days().map(|(_, d)| d).find(|d| d.day() == 1)
    }

    pub(super) fn before(&self) -> Option<Week> {
        self.first().previous_day().map(Week::containing)
    }

    pub(super) fn after(&self) -> Option<Week> {
        self.last().next_day().map(Week::containing)
    }
}

/// How a day relates to the calendar's bounds, selection and cursor at
/// render time
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct DayStatus {
    pub(super) enabled: bool,
    pub(super) selected: bool,
    pub(super) cursor: bool,
}

/// Turn a finished day cell into the style its label is drawn with.
///
/// An untouched cell contributes nothing.  Otherwise the text color comes
/// first, then the background, then each span in the order it was added.
pub(super) fn cell_style(cell: &DecorationState, status: DayStatus) -> Style {
    let mut style = Style::new();
    if cell.is_touched() {
        if let Some(color) = cell.text_color() {
            style = style.fg(color);
        }
        if let Some(&background) = cell.background_visual() {
            style = style.patch(background);
        }
        for span in cell.spans() {
            style = style.patch(*span.span());
        }
    }
    if !status.enabled {
        style = style.patch(DISABLED_STYLE);
    } else if status.selected {
        style = style.patch(cell.selection_visual().copied().unwrap_or(SELECTED_STYLE));
    }
    if status.cursor {
        style = style.add_modifier(CURSOR_MODIFIER);
    }
    style
}

pub(super) fn day_label(date: Date, is_today: bool) -> String {
    if is_today {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    }
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier, Stylize};
    use time::macros::date;

    const ENABLED: DayStatus = DayStatus {
        enabled: true,
        selected: false,
        cursor: false,
    };

    #[test]
    fn test_containing_midweek() {
        let week = Week::containing(date!(2023 - 11 - 16));
        let days = week.days().collect::<Vec<_>>();
        assert_eq!(
            days,
            [
                (0, date!(2023 - 11 - 12)),
                (1, date!(2023 - 11 - 13)),
                (2, date!(2023 - 11 - 14)),
                (3, date!(2023 - 11 - 15)),
                (4, date!(2023 - 11 - 16)),
                (5, date!(2023 - 11 - 17)),
                (6, date!(2023 - 11 - 18)),
            ]
        );
    }

    #[test]
    fn test_containing_from_edges() {
        let from_sunday = Week::containing(date!(2023 - 11 - 12));
        let from_saturday = Week::containing(date!(2023 - 11 - 18));
        assert_eq!(from_sunday, from_saturday);
        assert_eq!(from_sunday.first(), date!(2023 - 11 - 12));
        assert_eq!(from_sunday.last(), date!(2023 - 11 - 18));
    }

    #[test]
    fn test_week_at_end_of_time() {
        let week = Week::containing(Date::MAX);
        assert_eq!(week.last(), Date::MAX);
        assert!(week.after().is_none());
        assert!(week.before().is_some());
    }

    #[test]
    fn test_neighbors() {
        let week = Week::containing(date!(2025 - 01 - 01));
        assert_eq!(week.month_start(), Some(date!(2025 - 01 - 01)));
        let next = week.after().unwrap();
        assert_eq!(next.first(), date!(2025 - 01 - 05));
        assert_eq!(next.month_start(), None);
        assert_eq!(next.before(), Some(week));
    }

    #[test]
    fn test_untouched_cell_is_plain() {
        let mut cell = DecorationState::new(true);
        cell.reset(true);
        assert_eq!(cell_style(&cell, ENABLED), Style::new());
    }

    #[test]
    fn test_spans_layer_over_color() {
        let mut cell = DecorationState::new(true);
        cell.set_text_color(Color::Red);
        cell.add_span(Style::new().bold());
        cell.add_span(Style::new().fg(Color::Blue));
        assert_eq!(
            cell_style(&cell, ENABLED),
            Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD)
        );
    }

    #[test]
    fn test_background_applied() {
        let mut cell = DecorationState::new(true);
        cell.set_background(Style::new().on_blue()).unwrap();
        assert_eq!(cell_style(&cell, ENABLED), Style::new().on_blue());
    }

    #[test]
    fn test_disabled_is_dimmed_and_not_selected() {
        let mut cell = DecorationState::new(true);
        cell.set_selection_visual(Style::new().on_magenta()).unwrap();
        let status = DayStatus {
            enabled: false,
            selected: true,
            cursor: false,
        };
        assert_eq!(cell_style(&cell, status), Style::new().patch(DISABLED_STYLE));
    }

    #[test]
    fn test_selection_visual_or_default() {
        let status = DayStatus {
            enabled: true,
            selected: true,
            cursor: true,
        };
        let plain = DecorationState::new(true);
        assert_eq!(
            cell_style(&plain, status),
            SELECTED_STYLE.add_modifier(CURSOR_MODIFIER)
        );
        let mut themed = DecorationState::new(true);
        themed.set_selection_visual(Style::new().on_magenta()).unwrap();
        assert_eq!(
            cell_style(&themed, status),
            Style::new().on_magenta().add_modifier(CURSOR_MODIFIER)
        );
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(date!(2025 - 01 - 05), false), "  5 ");
        assert_eq!(day_label(date!(2025 - 01 - 22), true), "[22]");
    }
}
