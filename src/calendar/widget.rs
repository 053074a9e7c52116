use super::util::{cell_style, day_label, DayStatus, Week};
use super::weeks::WeekWindow;
use crate::theme::{MONTH_STYLE, STATUS_STYLE, WEEKDAY_STYLE, YEAR_STYLE};
use ratatui::prelude::*;
use time::Month;

static HEADER: &str = " Su     Mo     Tu     We     Th     Fr     Sa ";

/// Columns taken up by the days themselves, not counting the year and month
/// margins
const MAIN_WIDTH: u16 = 46;

/// Left margin, where years are written
const LEFT_MARGIN: u16 = 6;

/// Right margin, where months are written: a two-column gutter plus room for
/// "September"
const RIGHT_MARGIN: u16 = 11;

const MONTH_COLUMN: u16 = LEFT_MARGIN + MAIN_WIDTH + 2;

pub(super) const TOTAL_WIDTH: u16 = LEFT_MARGIN + MAIN_WIDTH + RIGHT_MARGIN;

/// Header text plus the rule beneath it
const HEADER_LINES: u16 = 2;

/// Each week is a row of days followed by a blank spacer line
const WEEK_LINES: u16 = 2;

const DAY_WIDTH: u16 = 7;

const RULE: char = '─';

/// Draws a [`WeekWindow`], running its decorators over the visible days
/// first.  A decorator failure is stored in the window for the caller to
/// collect with [`WeekWindow::take_decoration_error`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl Calendar {
    fn weeks_for_lines(lines: u16) -> usize {
        // ceil((lines - HEADER_LINES)/2)
        (lines.saturating_sub(HEADER_LINES).saturating_add(1) / WEEK_LINES).into()
    }
}

impl StatefulWidget for Calendar {
    type State = WeekWindow;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [grid_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        let [grid_area] = Layout::horizontal([TOTAL_WIDTH])
            .flex(layout::Flex::Center)
            .areas(grid_area);
        let weeks = state.ensure_weeks(Self::weeks_for_lines(grid_area.height));
        state.decorate_or_record(&weeks);
        let mut grid = Grid { area: grid_area, buf };
        grid.put(0, LEFT_MARGIN, HEADER, WEEKDAY_STYLE);
        grid.put(1, LEFT_MARGIN, RULE.to_string().repeat(MAIN_WIDTH.into()), Style::new());
        for (row, week) in std::iter::zip(0u16.., &weeks) {
            grid.draw_margins(row, week);
            for (col, date) in week.days() {
                let Some(cell) = state.cell(row.into(), col) else {
                    continue;
                };
                let status = DayStatus {
                    enabled: state.is_enabled(date, cell),
                    selected: state.selected() == Some(date),
                    cursor: state.cursor() == date,
                };
                let x = LEFT_MARGIN + DAY_WIDTH * u16::try_from(col).unwrap_or(0);
                grid.put(
                    week_line(row),
                    x,
                    day_label(date, date == state.today),
                    cell_style(cell, status),
                );
            }
        }
        status_line(state).render(status_area, buf);
    }
}

fn week_line(row: u16) -> u16 {
    HEADER_LINES + row * WEEK_LINES
}

fn status_line(state: &WeekWindow) -> Line<'static> {
    let selected = state
        .selected()
        .map_or_else(|| String::from("none"), |d| d.to_string());
    let selectable = if state.are_all_days_selectable() {
        "on"
    } else {
        "off"
    };
    Line::styled(
        format!(
            " Cursor {}   Selected {}   All days selectable: {}",
            state.cursor(),
            selected,
            selectable
        ),
        STATUS_STYLE,
    )
}

#[derive(Debug)]
struct Grid<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Grid<'_> {
    // The year goes beside the top row and beside any row holding January
    // 1st; the month goes beside the top row and beside any row in which a
    // month starts.
    fn draw_margins(&mut self, row: u16, week: &Week) {
        let month_start = week.month_start();
        let new_year = month_start.filter(|d| d.month() == Month::January);
        if let Some(d) = new_year.or_else(|| (row == 0).then_some(week.first())) {
            self.put(week_line(row), 0, d.year().to_string(), YEAR_STYLE);
        }
        if let Some(d) = month_start.or_else(|| (row == 0).then_some(week.last())) {
            self.put(week_line(row), MONTH_COLUMN, d.month().to_string(), MONTH_STYLE);
        }
    }

    // Writes `s` at the given offset into the grid, clipped to the grid's
    // area.
    fn put<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let span = Span::styled(s.as_ref(), style);
            let width = u16::try_from(span.width())
                .unwrap_or(u16::MAX)
                .min(self.area.width - x);
            span.render(
                Rect {
                    x: self.area.x + x,
                    y: self.area.y + y,
                    width,
                    height: 1,
                },
                self.buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DateBounds, DayDecorator, DecoratorSet};
    use crate::decoration::{DecorationError, DecorationState};
    use time::macros::date;
    use time::Date;

    #[derive(Debug)]
    struct PaintDay(Date, Color);

    impl DayDecorator for PaintDay {
        fn should_decorate(&self, date: Date) -> bool {
            date == self.0
        }

        fn decorate(&self, _date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
            state.set_text_color(self.1);
            state.add_span(Style::new().add_modifier(Modifier::ITALIC));
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BlankBackground;

    impl DayDecorator for BlankBackground {
        fn should_decorate(&self, _date: Date) -> bool {
            true
        }

        fn decorate(&self, _date: Date, state: &mut DecorationState) -> Result<(), DecorationError> {
            state.set_background(Style::new())
        }
    }

    // 63 columns wide, so no centering; 3 weeks and the status line
    fn render(state: &mut WeekWindow) -> Buffer {
        let area = Rect::new(0, 0, TOTAL_WIDTH, 9);
        let mut buffer = Buffer::empty(area);
        Calendar.render(area, &mut buffer, state);
        buffer
    }

    #[test]
    fn test_layout() {
        let mut state = WeekWindow::new(date!(2025 - 01 - 22), DecoratorSet::new());
        let buffer = render(&mut state);
        let row = |y: u16| {
            (0..TOTAL_WIDTH)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert_eq!(
            row(0),
            "       Su     Mo     Tu     We     Th     Fr     Sa            "
        );
        assert_eq!(
            row(2),
            "2025   12     13     14     15     16     17     18   January  "
        );
        assert_eq!(
            row(4),
            "       19     20     21    [22]    23     24     25            "
        );
        assert_eq!(
            row(6),
            "       26     27     28     29     30     31      1   February "
        );
        assert!(row(8).starts_with(" Cursor 2025-01-22   Selected none"));
    }

    #[test]
    fn test_decorated_day_is_painted() {
        let mut state = WeekWindow::new(
            date!(2025 - 01 - 22),
            DecoratorSet::new().with(PaintDay(date!(2025 - 01 - 20), Color::Red)),
        );
        let buffer = render(&mut state);
        // " 20 " for Monday the 20th starts in column 13
        let cell = &buffer[(14, 4)];
        assert_eq!(cell.symbol(), "2");
        assert_eq!(cell.fg, Color::Red);
        assert!(cell.modifier.contains(Modifier::ITALIC));
        // The cursor sits on today
        assert!(buffer[(28, 4)].modifier.contains(Modifier::UNDERLINED));
        assert!(!buffer[(21, 4)].modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn test_out_of_bounds_day_is_dimmed() {
        let mut state = WeekWindow::new(date!(2025 - 01 - 22), DecoratorSet::new())
            .bounds(DateBounds {
                min: None,
                max: Some(date!(2025 - 01 - 30)),
            });
        let buffer = render(&mut state);
        // Friday the 31st
        assert_eq!(buffer[(42, 6)].symbol(), "3");
        assert_eq!(buffer[(42, 6)].fg, Color::DarkGray);
        assert_ne!(buffer[(36, 6)].fg, Color::DarkGray);
    }

    #[test]
    fn test_decorator_failure_is_recorded() {
        let mut state =
            WeekWindow::new(date!(2025 - 01 - 22), DecoratorSet::new().with(BlankBackground));
        render(&mut state);
        assert_eq!(
            state.take_decoration_error(),
            Some(DecorationError::InvalidArgument { what: "background" })
        );
        assert_eq!(state.take_decoration_error(), None);
    }
}
