/// Generation-counted debouncing for the search box
///
/// Every `schedule` hands out a new ticket and supersedes the previous one.
/// The timer that owns a ticket calls `settle` when the quiet interval
/// elapses; only the latest ticket yields the pending value.
#[derive(Debug, Clone, Default)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Debouncer {
            generation: 0,
            pending: None,
        }
    }

    pub fn schedule(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    /// Take the pending value if `ticket` has not been superseded
    pub fn settle(&mut self, ticket: u64) -> Option<T> {
        if ticket == self.generation {
            self.pending.take()
        } else {
            None
        }
    }
}
