/// A text decoration attached to a day's label.
///
/// The payload belongs to whoever renders the label; it is carried through
/// merges untouched and is never compared or deduplicated.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpanWrapper<P> {
    span: P,
}

impl<P> SpanWrapper<P> {
    pub(crate) fn new(span: P) -> Self {
        SpanWrapper { span }
    }

    pub(crate) fn span(&self) -> &P {
        &self.span
    }
}
