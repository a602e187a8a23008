use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::deps::SameValue;
use crate::runtime::current_store;
use crate::slots::{HookKind, SlotStore};

/// A request to change a state slot.
pub enum StateUpdate<T> {
    /// Replace the value, unless it is the same value that was captured.
    SetValue(T),
    /// Replace the value with `f(captured)`, unconditionally.
    SetFromPrevious(Box<dyn FnOnce(&T) -> T>),
}

impl<T: fmt::Debug> fmt::Debug for StateUpdate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateUpdate::SetValue(v) => f.debug_tuple("SetValue").field(v).finish(),
            StateUpdate::SetFromPrevious(_) => f.write_str("SetFromPrevious(..)"),
        }
    }
}

/// Updater bound to one state slot and to the value read by the render that
/// created it.
///
/// Setting state never re-renders; call [`Runtime::render`](crate::Runtime::render)
/// again to observe the new value.
pub struct SetState<T> {
    index: usize,
    captured: T,
    store: Weak<RefCell<SlotStore>>,
}

impl<T: Clone> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            captured: self.captured.clone(),
            store: self.store.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState")
            .field("index", &self.index)
            .field("captured", &self.captured)
            .finish()
    }
}

impl<T: SameValue + Clone> SetState<T> {
    /// Slot index this setter writes to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value of the slot at the time the owning hook was called.
    pub fn captured(&self) -> &T {
        &self.captured
    }

    pub fn set(&self, value: T) {
        self.apply(StateUpdate::SetValue(value));
    }

    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.apply(StateUpdate::SetFromPrevious(Box::new(f)));
    }

    pub fn apply(&self, update: StateUpdate<T>) {
        let next = match update {
            StateUpdate::SetValue(v) => {
                if v.same_value(&self.captured) {
                    log::trace!("use_state: slot {} unchanged", self.index);
                    return;
                }
                v
            }
            // runs before the store is borrowed so `f` may read other state
            StateUpdate::SetFromPrevious(f) => f(&self.captured),
        };

        match self.store.upgrade() {
            Some(store) => store.borrow_mut().write_state(self.index, next),
            None => log::warn!(
                "use_state: setter for slot {} outlived its runtime; update dropped",
                self.index
            ),
        }
    }
}

/// Declares a piece of state persisted across renders.
///
/// The Nth `use_state` call of a render always addresses the Nth state slot;
/// `initial` is only used the first time that slot is reached.
///
/// # Panics
///
/// Panics when called outside of [`Runtime::render`](crate::Runtime::render).
pub fn use_state<T: SameValue + Clone>(initial: T) -> (T, SetState<T>) {
    let store = current_store("use_state");
    let (index, value) = {
        let mut s = store.borrow_mut();
        let index = s.claim(HookKind::State);
        (index, s.state_or_init(index, initial))
    };

    let setter = SetState {
        index,
        captured: value.clone(),
        store: Rc::downgrade(&store),
    };
    (value, setter)
}
