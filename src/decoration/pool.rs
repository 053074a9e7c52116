use super::DecorationState;
use ratatui::style::Style;

/// Handle to a checked-out slot of a [`DecorationPool`].
///
/// The generation ties the handle to one checkout; once the slot is
/// released, the handle goes stale.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SlotId {
    idx: usize,
    generation: u32,
}

/// An arena of reusable [`DecorationState`]s.
///
/// A decoration pass checks out one state per day cell, lets the decorators
/// write into it, merges it into the cell, and releases it again, so a grid
/// that is redrawn on every keypress allocates its states only once.
#[derive(Clone, Debug)]
pub(crate) struct DecorationPool<V = Style, P = Style> {
    slots: Vec<DecorationState<V, P>>,
    generation: Vec<u32>,
    in_use: Vec<bool>,
    free_list: Vec<usize>,
}

impl<V, P> DecorationPool<V, P> {
    pub(crate) fn new() -> Self {
        DecorationPool {
            slots: Vec::new(),
            generation: Vec::new(),
            in_use: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of slots currently checked out
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Number of slots ever allocated, free or not
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Hand out a freshly reset state.  Freed slots are reused before the
    /// arena grows.
    pub(crate) fn checkout(&mut self, all_days_selectable: bool) -> SlotId {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx].reset(all_days_selectable);
            idx
        } else {
            self.slots.push(DecorationState::new(all_days_selectable));
            self.generation.push(0);
            self.in_use.push(false);
            self.slots.len() - 1
        };
        self.in_use[idx] = true;
        tracing::trace!(target: "decoration", idx, capacity = self.capacity(), "slot checked out");
        SlotId {
            idx,
            generation: self.generation[idx],
        }
    }

    /// # Panics
    ///
    /// Panics if `id` has already been released.
    pub(crate) fn get(&self, id: SlotId) -> &DecorationState<V, P> {
        self.validate(id);
        &self.slots[id.idx]
    }

    /// # Panics
    ///
    /// Panics if `id` has already been released.
    pub(crate) fn get_mut(&mut self, id: SlotId) -> &mut DecorationState<V, P> {
        self.validate(id);
        &mut self.slots[id.idx]
    }

    /// Return a slot to the pool.  Its contents are left in place until the
    /// next checkout resets them.
    ///
    /// # Panics
    ///
    /// Panics if `id` has already been released.
    pub(crate) fn release(&mut self, id: SlotId) {
        self.validate(id);
        self.in_use[id.idx] = false;
        self.generation[id.idx] = self.generation[id.idx].wrapping_add(1);
        self.free_list.push(id.idx);
        tracing::trace!(target: "decoration", idx = id.idx, in_use = self.len(), "slot released");
    }

    fn validate(&self, id: SlotId) {
        assert!(
            id.idx < self.slots.len()
                && self.in_use[id.idx]
                && self.generation[id.idx] == id.generation,
            "stale decoration slot {id:?}"
        );
    }
}

impl<V, P> Default for DecorationPool<V, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    type TestPool = DecorationPool<Style, &'static str>;

    #[test]
    fn test_checkout_grows_then_reuses() {
        let mut pool = TestPool::new();
        let a = pool.checkout(true);
        let b = pool.checkout(true);
        assert_ne!(a, b);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.capacity(), 2);
        pool.release(a);
        assert_eq!(pool.len(), 1);
        let c = pool.checkout(true);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(pool.len(), 2);
        assert_ne!(a, c);
    }

    #[test]
    fn test_reused_slot_is_reset() {
        let mut pool = TestPool::new();
        let a = pool.checkout(true);
        {
            let state = pool.get_mut(a);
            state.set_text_color(Color::Red);
            state.add_span("leftover");
            state.set_days_disabled(true);
        }
        pool.release(a);
        let b = pool.checkout(false);
        let state = pool.get(b);
        assert!(!state.is_touched());
        assert!(!state.is_selectable());
        assert!(!state.are_days_disabled());
        assert_eq!(state.text_color(), None);
        assert!(state.spans().is_empty());
    }

    #[test]
    #[should_panic(expected = "stale decoration slot")]
    fn test_released_handle_is_stale() {
        let mut pool = TestPool::new();
        let a = pool.checkout(true);
        pool.release(a);
        let _ = pool.checkout(true);
        pool.get_mut(a).add_span("oops");
    }

    #[test]
    #[should_panic(expected = "stale decoration slot")]
    fn test_double_release_panics() {
        let mut pool = TestPool::new();
        let a = pool.checkout(true);
        pool.release(a);
        pool.release(a);
    }
}
