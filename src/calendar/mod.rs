mod decorate;
mod util;
mod weeks;
mod widget;
pub(crate) use self::decorate::DecoratorSet;
pub(crate) use self::weeks::WeekWindow;
pub(crate) use self::widget::Calendar;
use crate::decoration::{DecorationError, DecorationState};
use std::fmt;
use time::Date;

/// Something that paints a subset of the calendar's days.
pub(crate) trait DayDecorator: fmt::Debug {
    fn should_decorate(&self, date: Date) -> bool;

    /// Write this decorator's modifications for `date` into `state`.  Only
    /// called when [`should_decorate`](Self::should_decorate) returned
    /// `true`.
    fn decorate(&self, date: Date, state: &mut DecorationState) -> Result<(), DecorationError>;
}

/// Inclusive range of dates that may be enabled at all.  Decorators can
/// disable days inside the range but never enable days outside it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateBounds {
    pub(crate) min: Option<Date>,
    pub(crate) max: Option<Date>,
}

impl DateBounds {
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.min.is_none_or(|min| min <= date) && self.max.is_none_or(|max| date <= max)
    }
}
