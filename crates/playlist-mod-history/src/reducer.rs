/// The playlist reducer: `(state, action) -> state`.
///
/// Every action except `Undo`/`Redo` pushes the old present onto `past`
/// and drops the redo branch. Undo/redo on an empty stack hands the state
/// back untouched.
use crate::ids::IdGenerator;
use crate::song::{Action, HistoryState, Song};

/// Applies `action` to `state` and returns the next state.
///
/// `ids` is only consulted for `Action::Add`.
pub fn reduce(state: HistoryState, action: Action, ids: &mut dyn IdGenerator) -> HistoryState {
    let HistoryState {
        mut past,
        present,
        mut future,
    } = state;

    match action {
        Action::Add { title } => {
            let mut next = Vec::with_capacity(present.len() + 1);
            next.extend(present.iter().cloned());
            next.push(Song::new(ids.next_id(), title));
            past.push(present);
            HistoryState {
                past,
                present: next,
                future: Default::default(),
            }
        }
        Action::Remove { id } => {
            let next = present.iter().filter(|s| s.id() != id).cloned().collect();
            past.push(present);
            HistoryState {
                past,
                present: next,
                future: Default::default(),
            }
        }
        Action::Clear => {
            past.push(present);
            HistoryState {
                past,
                present: Vec::new(),
                future: Default::default(),
            }
        }
        Action::Undo => match past.pop() {
            Some(previous) => {
                future.push_front(present);
                HistoryState {
                    past,
                    present: previous,
                    future,
                }
            }
            None => HistoryState {
                past,
                present,
                future,
            },
        },
        Action::Redo => match future.pop_front() {
            Some(next) => {
                past.push(present);
                HistoryState {
                    past,
                    present: next,
                    future,
                }
            }
            None => HistoryState {
                past,
                present,
                future,
            },
        },
    }
}

/// Whether `action` would leave `state` unchanged.
///
/// Only undo with no past and redo with no future are no-ops; a remove of an
/// unknown id still records a history step.
pub fn is_noop(state: &HistoryState, action: &Action) -> bool {
    match action {
        Action::Undo => state.past.is_empty(),
        Action::Redo => state.future.is_empty(),
        Action::Add { .. } | Action::Remove { .. } | Action::Clear => false,
    }
}
