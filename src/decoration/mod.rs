mod pool;
mod span;
mod state;
pub(crate) use self::pool::{DecorationPool, SlotId};
pub(crate) use self::span::SpanWrapper;
pub(crate) use self::state::{DecorationError, DecorationState};
use ratatui::style::Style;

/// A paintable resource handed to a day cell as its background or selection
/// appearance.  The core never looks inside a visual beyond asking whether it
/// paints anything at all.
pub(crate) trait Visual {
    /// A blank visual paints nothing and is refused by the mutators that take
    /// a visual.
    fn is_blank(&self) -> bool;
}

impl Visual for Style {
    fn is_blank(&self) -> bool {
        *self == Style::new()
    }
}

