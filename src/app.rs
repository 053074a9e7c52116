use crate::calendar::{Calendar, WeekWindow};
use crate::decoration::DecorationError;
use crate::help::Help;
use crate::theme::BASE_STYLE;
use anyhow::Context;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App {
    weeks: WeekWindow,
    state: AppState,
}

impl App {
    pub(crate) fn new(weeks: WeekWindow) -> App {
        App {
            weeks,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.quitting() {
            terminal
                .draw(|frame| frame.render_widget(&mut self, frame.area()))
                .context("failed to draw calendar")?;
            if let Some(e) = self.weeks.take_decoration_error() {
                return Err(e).context("failed to decorate calendar");
            }
            self.handle_input()?;
        }
        Ok(())
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read().context("failed to read input")?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers)
                || !self
                    .handle_key(code)
                    .context("failed to decorate calendar")?
            {
                self.beep().context("failed to ring bell")?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `Ok(false)` if the user pressed an invalid key or the key's
    // action could not be carried out
    fn handle_key(&mut self, key: KeyCode) -> Result<bool, DecorationError> {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => Ok(self.weeks.one_week_forwards().is_ok()),
                KeyCode::Char('k') | KeyCode::Up => Ok(self.weeks.one_week_backwards().is_ok()),
                KeyCode::Char('z') | KeyCode::PageDown => {
                    Ok(self.weeks.one_page_forwards().is_ok())
                }
                KeyCode::Char('w') | KeyCode::PageUp => {
                    Ok(self.weeks.one_page_backwards().is_ok())
                }
                KeyCode::Char('h') | KeyCode::Left => Ok(self.weeks.move_cursor(-1).is_ok()),
                KeyCode::Char('l') | KeyCode::Right => Ok(self.weeks.move_cursor(1).is_ok()),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.weeks.jump_to_today();
                    Ok(true)
                }
                KeyCode::Char(' ') | KeyCode::Enter => self.weeks.toggle_selection(),
                KeyCode::Char('a') => {
                    self.weeks.toggle_all_days_selectable();
                    Ok(true)
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    Ok(true)
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    Ok(true)
                }
                _ => Ok(false),
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                Ok(true)
            }
            AppState::Quitting => Ok(false),
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        Calendar.render(area, buf, &mut self.weeks);
        if self.state == AppState::Helping {
            Help.render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{DateBounds, DecoratorSet};
    use crate::decorators::Weekends;
    use time::macros::date;

    fn app() -> App {
        let weeks = WeekWindow::new(
            date!(2025 - 01 - 22),
            DecoratorSet::new().with(Weekends { disabled: true }),
        )
        .bounds(DateBounds {
            min: None,
            max: Some(date!(2025 - 01 - 23)),
        });
        App::new(weeks)
    }

    fn screen(app: &mut App) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_select_and_move() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char(' ')), Ok(true));
        assert_eq!(app.weeks.selected(), Some(date!(2025 - 01 - 22)));
        assert_eq!(app.handle_key(KeyCode::Right), Ok(true));
        assert_eq!(app.handle_key(KeyCode::Enter), Ok(true));
        assert_eq!(app.weeks.selected(), Some(date!(2025 - 01 - 23)));
        // Past max_date
        assert_eq!(app.handle_key(KeyCode::Char('l')), Ok(true));
        assert_eq!(app.handle_key(KeyCode::Enter), Ok(false));
        assert_eq!(app.weeks.selected(), Some(date!(2025 - 01 - 23)));
    }

    #[test]
    fn test_weekend_cannot_be_selected() {
        let mut app = app();
        for _ in 0..3 {
            assert_eq!(app.handle_key(KeyCode::Left), Ok(true));
        }
        // Sunday the 19th
        assert_eq!(app.weeks.cursor(), date!(2025 - 01 - 19));
        assert_eq!(app.handle_key(KeyCode::Enter), Ok(false));
        assert_eq!(app.weeks.selected(), None);
    }

    #[test]
    fn test_toggle_all_days_selectable() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('a')), Ok(true));
        assert!(!app.weeks.are_all_days_selectable());
        assert_eq!(app.handle_key(KeyCode::Enter), Ok(false));
        let rows = screen(&mut app);
        assert!(rows[23].contains("All days selectable: off"));
    }

    #[test]
    fn test_home_returns_to_today() {
        let mut app = app();
        screen(&mut app);
        assert_eq!(app.handle_key(KeyCode::Char('z')), Ok(true));
        assert_ne!(app.weeks.cursor(), date!(2025 - 01 - 22));
        assert_eq!(app.handle_key(KeyCode::Home), Ok(true));
        assert_eq!(app.weeks.cursor(), date!(2025 - 01 - 22));
    }

    #[test]
    fn test_help() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('?')), Ok(true));
        let rows = screen(&mut app);
        assert!(rows.iter().any(|r| r.contains(" Commands ")));
        assert!(rows.iter().any(|r| r.contains("Select or unselect the day")));
        assert_eq!(app.handle_key(KeyCode::Char('x')), Ok(true));
        assert_eq!(app.state, AppState::Calendar);
        let rows = screen(&mut app);
        assert!(!rows.iter().any(|r| r.contains(" Commands ")));
    }

    #[test]
    fn test_quit_and_invalid_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(KeyCode::Char('x')), Ok(false));
        assert_eq!(app.handle_key(KeyCode::Char('q')), Ok(true));
        assert!(app.quitting());
    }
}
