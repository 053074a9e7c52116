use super::DayDecorator;
use crate::decoration::{DecorationError, DecorationPool, DecorationState, SlotId};
use time::Date;

/// The decorators of a calendar, in the order they run, together with the
/// pool of scratch states they write into.
#[derive(Debug, Default)]
pub(crate) struct DecoratorSet {
    decorators: Vec<Box<dyn DayDecorator>>,
    pool: DecorationPool,
}

impl DecoratorSet {
    pub(crate) fn new() -> Self {
        DecoratorSet::default()
    }

    pub(crate) fn push<D: DayDecorator + 'static>(&mut self, decorator: D) {
        tracing::debug!(target: "calendar", ?decorator, "registered decorator");
        self.decorators.push(Box::new(decorator));
    }

    pub(crate) fn with<D: DayDecorator + 'static>(mut self, decorator: D) -> Self {
        self.push(decorator);
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Recompute `cell`, the persistent state of the cell showing `date`.
    ///
    /// The cell is reset, every interested decorator writes into a pooled
    /// scratch state in registration order, and the scratch state is then
    /// merged into the cell.  If a decorator fails, the cell is left reset
    /// and the error is returned.
    pub(crate) fn decorate_day(
        &mut self,
        date: Date,
        all_days_selectable: bool,
        cell: &mut DecorationState,
    ) -> Result<(), DecorationError> {
        cell.reset(all_days_selectable);
        let slot = self.pool.checkout(all_days_selectable);
        let r = self.run_decorators(date, slot);
        if r.is_ok() {
            self.pool.get(slot).apply_to(cell);
        }
        self.pool.release(slot);
        r
    }

    fn run_decorators(&mut self, date: Date, slot: SlotId) -> Result<(), DecorationError> {
        let state = self.pool.get_mut(slot);
        for decorator in self.decorators.iter().filter(|d| d.should_decorate(date)) {
            decorator.decorate(date, state).inspect_err(|e| {
                tracing::error!(target: "calendar", %date, ?decorator, error = %e, "decorator failed");
            })?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn pool(&self) -> &DecorationPool {
        &self.pool
    }
}
