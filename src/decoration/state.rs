use super::{SpanWrapper, Visual};
use ratatui::style::{Color, Style};
use thiserror::Error;

/// The visual modifications requested for a single day cell during one
/// decoration pass.
///
/// Decorators write into a state through its mutators; the rendering side
/// reads it back through the accessors once every decorator has run.  A
/// state is reused across passes and must be [reset](Self::reset) before
/// each new cell.
#[derive(Clone, Debug)]
pub(crate) struct DecorationState<V = Style, P = Style> {
    touched: bool,
    text_color: Option<Color>,
    background: Option<V>,
    selection: Option<V>,
    spans: Vec<SpanWrapper<P>>,
    days_disabled: bool,
    selectable: bool,
}

impl<V, P> DecorationState<V, P> {
    pub(crate) fn new(all_days_selectable: bool) -> Self {
        DecorationState {
            touched: false,
            text_color: None,
            background: None,
            selection: None,
            spans: Vec::new(),
            days_disabled: false,
            selectable: all_days_selectable,
        }
    }

    /// Return the state to its empty form.  `all_days_selectable` is the
    /// widget-wide default in effect at the time of the call.
    pub(crate) fn reset(&mut self, all_days_selectable: bool) {
        self.touched = false;
        self.text_color = None;
        self.background = None;
        self.selection = None;
        self.spans.clear();
        self.days_disabled = false;
        self.selectable = all_days_selectable;
    }

    pub(crate) fn set_text_color(&mut self, color: Color) {
        self.text_color = Some(color);
        self.touched = true;
    }

    /// Append a text decoration after any already present.
    pub(crate) fn add_span(&mut self, span: P) {
        self.spans.push(SpanWrapper::new(span));
        self.touched = true;
    }

    /// Disable (or explicitly re-enable) the day.
    ///
    /// This only toggles availability inside the calendar's allowed date
    /// range; passing `false` does not make an out-of-range day available.
    pub(crate) fn set_days_disabled(&mut self, disabled: bool) {
        self.days_disabled = disabled;
        self.touched = true;
    }

    // Selectability is behavioral, so it does not count as a paint override.
    pub(crate) fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    pub(crate) fn is_touched(&self) -> bool {
        self.touched
    }

    pub(crate) fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub(crate) fn text_color(&self) -> Option<Color> {
        self.text_color
    }

    pub(crate) fn background_visual(&self) -> Option<&V> {
        self.background.as_ref()
    }

    pub(crate) fn selection_visual(&self) -> Option<&V> {
        self.selection.as_ref()
    }

    pub(crate) fn spans(&self) -> &[SpanWrapper<P>] {
        &self.spans
    }

    pub(crate) fn are_days_disabled(&self) -> bool {
        self.days_disabled
    }

    fn paint_background(&mut self, visual: V) {
        self.background = Some(visual);
        self.touched = true;
    }

    fn paint_selection(&mut self, visual: V) {
        self.selection = Some(visual);
        self.touched = true;
    }
}

impl<V: Visual, P> DecorationState<V, P> {
    /// Set the visual drawn behind the day's label, replacing any earlier
    /// one.  A blank visual is refused and leaves the state untouched.
    pub(crate) fn set_background(&mut self, visual: V) -> Result<(), DecorationError> {
        check_visual(&visual, "background")?;
        self.paint_background(visual);
        Ok(())
    }

    /// Set the visual used when the day is selected, replacing any earlier
    /// one.  A blank visual is refused and leaves the state untouched.
    pub(crate) fn set_selection_visual(&mut self, visual: V) -> Result<(), DecorationError> {
        check_visual(&visual, "selection")?;
        self.paint_selection(visual);
        Ok(())
    }
}

impl<V: Clone, P: Clone> DecorationState<V, P> {
    /// Fold this state into `other`.
    ///
    /// Present colors and visuals replace the destination's, absent ones
    /// leave it alone.  Spans are appended after the destination's own.
    /// `selectable` and `days_disabled` always have a value and are copied
    /// over unconditionally.
    pub(crate) fn apply_to(&self, other: &mut DecorationState<V, P>) {
        if let Some(color) = self.text_color {
            other.text_color = Some(color);
        }
        if let Some(visual) = &self.selection {
            other.paint_selection(visual.clone());
        }
        if let Some(visual) = &self.background {
            other.paint_background(visual.clone());
        }
        other.spans.extend_from_slice(&self.spans);
        other.touched |= self.touched;
        other.selectable = self.selectable;
        other.days_disabled = self.days_disabled;
    }
}

fn check_visual<V: Visual>(visual: &V, what: &'static str) -> Result<(), DecorationError> {
    if visual.is_blank() {
        tracing::debug!(target: "decoration", what, "rejected blank visual");
        Err(DecorationError::InvalidArgument { what })
    } else {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum DecorationError {
    #[error("invalid argument: {what} visual cannot be blank")]
    InvalidArgument { what: &'static str },
}
