use super::decorate::DecoratorSet;
use super::util::{Week, DAYS_IN_WEEK};
use super::DateBounds;
use crate::decoration::{DecorationError, DecorationState};
use std::iter::successors;
use thiserror::Error;
use time::{Date, Duration};

/// The weeks currently on screen, the cursor and selection within them, and
/// one persistent decoration cell per visible day.
#[derive(Debug)]
pub(crate) struct WeekWindow {
    pub(super) today: Date,
    start_date: Date,
    // Week at the top of the window; `None` until the first render sizes the
    // window
    top: Option<Week>,
    week_qty: usize,
    cursor: Date,
    selected: Option<Date>,
    bounds: DateBounds,
    all_days_selectable: bool,
    decorators: DecoratorSet,
    // Row-major, `DAYS_IN_WEEK` cells per visible week
    cells: Vec<DecorationState>,
    decoration_error: Option<DecorationError>,
}

impl WeekWindow {
    pub(crate) fn new(today: Date, decorators: DecoratorSet) -> Self {
        WeekWindow {
            today,
            start_date: today,
            top: None,
            week_qty: 0,
            cursor: today,
            selected: None,
            bounds: DateBounds::default(),
            all_days_selectable: true,
            decorators,
            cells: Vec::new(),
            decoration_error: None,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.start_date = date;
        self.cursor = date;
        self
    }

    pub(crate) fn bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub(crate) fn all_days_selectable(mut self, flag: bool) -> Self {
        self.all_days_selectable = flag;
        self
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn selected(&self) -> Option<Date> {
        self.selected
    }

    pub(crate) fn are_all_days_selectable(&self) -> bool {
        self.all_days_selectable
    }

    pub(crate) fn toggle_all_days_selectable(&mut self) {
        self.all_days_selectable = !self.all_days_selectable;
        tracing::debug!(target: "calendar", all_days_selectable = self.all_days_selectable, "toggled");
    }

    /// Size the window to `week_qty` weeks, positioning it around the start
    /// date on first use, and return the visible weeks.
    pub(super) fn ensure_weeks(&mut self, week_qty: usize) -> Vec<Week> {
        let week_qty = week_qty.max(1);
        self.week_qty = week_qty;
        let top = *self
            .top
            .get_or_insert_with(|| centered_top(self.start_date, week_qty));
        let mut weeks = weeks_from(top, week_qty);
        if weeks.len() < week_qty {
            // We are near the end of time, so pull the window back until it
            // is full.
            let mut top = top;
            while weeks.len() < week_qty {
                let Some(w) = top.before() else {
                    break;
                };
                top = w;
                weeks.insert(0, w);
            }
            self.top = Some(top);
        }
        weeks
    }

    /// Run the decorators over every visible day, storing the results in the
    /// window's persistent cells.
    pub(super) fn decorate(&mut self, weeks: &[Week]) -> Result<(), DecorationError> {
        let cell_qty = weeks.len() * DAYS_IN_WEEK;
        if self.cells.len() < cell_qty {
            self.cells
                .resize_with(cell_qty, || DecorationState::new(self.all_days_selectable));
        }
        self.cells.truncate(cell_qty);
        // Cells that a failed pass never reaches must not keep the previous
        // pass's decorations.
        for cell in &mut self.cells {
            cell.reset(self.all_days_selectable);
        }
        for (row, week) in weeks.iter().enumerate() {
            for (col, date) in week.days() {
                let cell = &mut self.cells[row * DAYS_IN_WEEK + col];
                self.decorators
                    .decorate_day(date, self.all_days_selectable, cell)?;
            }
        }
        tracing::trace!(target: "calendar", cells = cell_qty, "decoration pass complete");
        Ok(())
    }

    /// Like [`decorate`](Self::decorate), but records a failure for the
    /// event loop to pick up instead of returning it, for use while
    /// rendering.
    pub(super) fn decorate_or_record(&mut self, weeks: &[Week]) {
        if let Err(e) = self.decorate(weeks) {
            self.decoration_error = Some(e);
        }
    }

    pub(crate) fn take_decoration_error(&mut self) -> Option<DecorationError> {
        self.decoration_error.take()
    }

    pub(super) fn cell(&self, row: usize, col: usize) -> Option<&DecorationState> {
        self.cells.get(row * DAYS_IN_WEEK + col)
    }

    /// Whether `date` can be interacted with at all given the calendar's
    /// bounds and the decorators' verdict in `cell`
    pub(super) fn is_enabled(&self, date: Date, cell: &DecorationState) -> bool {
        self.bounds.contains(date) && !cell.are_days_disabled()
    }

    /// Select the day under the cursor, or clear the selection if it is
    /// already selected.  Returns `Ok(false)` if the day cannot be selected.
    pub(crate) fn toggle_selection(&mut self) -> Result<bool, DecorationError> {
        if self.selected == Some(self.cursor) {
            self.selected = None;
            return Ok(true);
        }
        let mut cell = DecorationState::new(self.all_days_selectable);
        self.decorators
            .decorate_day(self.cursor, self.all_days_selectable, &mut cell)?;
        if self.is_enabled(self.cursor, &cell) && cell.is_selectable() {
            tracing::debug!(target: "calendar", date = %self.cursor, "selected");
            self.selected = Some(self.cursor);
            Ok(true)
        } else {
            tracing::debug!(target: "calendar", date = %self.cursor, "day cannot be selected");
            Ok(false)
        }
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.jump_to_date(self.today);
    }

    pub(crate) fn jump_to_date(&mut self, date: Date) {
        self.cursor = date;
        if self.top.is_some() {
            self.top = Some(centered_top(date, self.week_qty));
        } else {
            self.start_date = date;
        }
    }

    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let cursor = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        self.cursor = cursor;
        if let Some(top) = self.top {
            if cursor < top.first() {
                self.top = Some(Week::containing(cursor));
            } else if weeks_from(top, self.week_qty)
                .last()
                .is_some_and(|w| w.last() < cursor)
            {
                let bottom = Week::containing(cursor);
                let top = successors(Some(bottom), Week::before)
                    .take(self.week_qty)
                    .last()
                    .unwrap_or(bottom);
                self.top = Some(top);
            }
        }
        Ok(())
    }

    pub(crate) fn one_week_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.scroll_forwards(1)
    }

    pub(crate) fn one_week_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.scroll_backwards(1)
    }

    pub(crate) fn one_page_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.scroll_forwards(self.week_qty)
    }

    pub(crate) fn one_page_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.scroll_backwards(self.week_qty)
    }

    // Scrolling drags the cursor along by the same number of weeks, clamped
    // to the visible window when the end of time gets in the way.
    fn scroll_forwards(&mut self, qty: usize) -> Result<(), OutOfTimeError> {
        let Some(top) = self.top else {
            return Ok(());
        };
        let mut new_top = top;
        for _ in 0..qty {
            // Stop once the last week there is has come into view
            let more_below = weeks_from(new_top, self.week_qty)
                .last()
                .and_then(Week::after)
                .is_some();
            match new_top.after() {
                Some(w) if more_below => new_top = w,
                _ => break,
            }
        }
        self.scroll_to(new_top, top)
    }

    fn scroll_backwards(&mut self, qty: usize) -> Result<(), OutOfTimeError> {
        let Some(top) = self.top else {
            return Ok(());
        };
        let new_top = successors(Some(top), Week::before)
            .take(qty + 1)
            .last()
            .unwrap_or(top);
        self.scroll_to(new_top, top)
    }

    fn scroll_to(&mut self, new_top: Week, old_top: Week) -> Result<(), OutOfTimeError> {
        if new_top == old_top {
            return Err(OutOfTimeError);
        }
        self.top = Some(new_top);
        self.drag_cursor(new_top, old_top);
        Ok(())
    }

    fn drag_cursor(&mut self, new_top: Week, old_top: Week) {
        let shift = new_top.first() - old_top.first();
        let visible = weeks_from(new_top, self.week_qty);
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            return;
        };
        let moved = self.cursor.checked_add(shift).unwrap_or(self.cursor);
        self.cursor = moved.clamp(first.first(), last.last());
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// Returns up to `qty` consecutive weeks starting with `top`
fn weeks_from(top: Week, qty: usize) -> Vec<Week> {
    successors(Some(top), Week::after)
        .take(qty)
        .collect()
}

/// The top week of a `qty`-week window with `date` in its middle row
fn centered_top(date: Date, qty: usize) -> Week {
    successors(Some(Week::containing(date)), Week::before)
        .take(qty.saturating_sub(1) / 2 + 1)
        .last()
        .unwrap_or_else(|| Week::containing(date))
}
