/// History store: owns the current `HistoryState` and applies actions.
///
/// The store is independent of rendering and storage. Side effects such as
/// persistence are attached by the caller as observers via `subscribe`.
use crate::ids::{IdGenerator, SequenceIds};
use crate::reducer::{is_noop, reduce};
use crate::song::{Action, HistoryState, Song};

/// Callback invoked with the new state after every changing transition.
pub type Observer = Box<dyn FnMut(&HistoryState)>;

/// Handle returned by [`HistoryStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Undo/redo store for a single playlist.
pub struct HistoryStore {
    state: HistoryState,
    ids: Box<dyn IdGenerator>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("past_len", &self.state.past.len())
            .field("present_len", &self.state.present.len())
            .field("future_len", &self.state.future.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(Box::new(SequenceIds::new()))
    }
}

impl HistoryStore {
    /// Creates an empty store that draws song ids from `ids`.
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            state: HistoryState::default(),
            ids,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current state (past, present, future).
    pub fn state(&self) -> &HistoryState {
        &self.state
    }

    /// The list the user currently sees.
    pub fn present(&self) -> &[Song] {
        &self.state.present
    }

    pub fn can_undo(&self) -> bool {
        !self.state.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.future.is_empty()
    }

    /// Applies `action` and notifies observers.
    ///
    /// Returns `false` without notifying when the action is a no-op
    /// (undo with nothing to undo, redo with nothing to redo).
    pub fn dispatch(&mut self, action: Action) -> bool {
        if is_noop(&self.state, &action) {
            tracing::trace!(action = action.kind(), "Ignoring no-op playlist action");
            return false;
        }

        let kind = action.kind();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action, self.ids.as_mut());
        tracing::debug!(
            action = kind,
            present = self.state.present.len(),
            past = self.state.past.len(),
            future = self.state.future.len(),
            "Applied playlist action"
        );

        self.notify();
        true
    }

    /// Drops all history and the present list without notifying observers.
    pub fn reset(&mut self) {
        self.state = HistoryState::default();
    }

    /// Registers `observer` to run after every changing transition.
    pub fn subscribe(&mut self, observer: impl FnMut(&HistoryState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, observer) in &mut self.observers {
            observer(state);
        }
    }
}
