use std::any::Any;
use std::fmt;

use crate::deps::Deps;

/// The three kinds of hook, each with its own slot array and cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HookKind {
    State,
    Effect,
    Memo,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::State => "use_state",
            HookKind::Effect => "use_effect",
            HookKind::Memo => "use_memo",
        })
    }
}

/// A per-kind triple of counters. Used for cursors, per-render hook counts and
/// slot array lengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HookCounts {
    pub state: usize,
    pub effect: usize,
    pub memo: usize,
}

impl HookCounts {
    pub fn get(&self, kind: HookKind) -> usize {
        match kind {
            HookKind::State => self.state,
            HookKind::Effect => self.effect,
            HookKind::Memo => self.memo,
        }
    }

    fn get_mut(&mut self, kind: HookKind) -> &mut usize {
        match kind {
            HookKind::State => &mut self.state,
            HookKind::Effect => &mut self.effect,
            HookKind::Memo => &mut self.memo,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == HookCounts::default()
    }

    /// First kind whose count differs from `other`, with (self, other) values.
    pub fn first_difference(&self, other: &HookCounts) -> Option<(HookKind, usize, usize)> {
        [HookKind::State, HookKind::Effect, HookKind::Memo]
            .into_iter()
            .find(|k| self.get(*k) != other.get(*k))
            .map(|k| (k, self.get(k), other.get(k)))
    }
}

pub(crate) struct MemoSlot {
    pub(crate) deps: Deps,
    pub(crate) value: Box<dyn Any>,
}

/// Per-instance storage for every hook slot plus the three cursors.
///
/// Slots are only ever appended; an index handed out once stays valid for the
/// lifetime of the store.
#[derive(Default)]
pub struct SlotStore {
    states: Vec<Box<dyn Any>>,
    effects: Vec<Option<Deps>>,
    memos: Vec<Option<MemoSlot>>,
    cursors: HookCounts,
    effects_fired: usize,
    memos_computed: usize,
}

impl SlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the slot index at the cursor for `kind` and advances the cursor.
    pub(crate) fn claim(&mut self, kind: HookKind) -> usize {
        let cursor = self.cursors.get_mut(kind);
        let index = *cursor;
        *cursor += 1;
        index
    }

    pub fn cursors(&self) -> HookCounts {
        self.cursors
    }

    pub(crate) fn reset_cursors(&mut self) {
        self.cursors = HookCounts::default();
        self.effects_fired = 0;
        self.memos_computed = 0;
    }

    pub fn slot_counts(&self) -> HookCounts {
        HookCounts {
            state: self.states.len(),
            effect: self.effects.len(),
            memo: self.memos.len(),
        }
    }

    pub(crate) fn effects_fired(&self) -> usize {
        self.effects_fired
    }

    pub(crate) fn memos_computed(&self) -> usize {
        self.memos_computed
    }

    /// Reads state slot `index`, allocating it with `initial` if unset.
    pub(crate) fn state_or_init<T: Clone + 'static>(&mut self, index: usize, initial: T) -> T {
        if index >= self.states.len() {
            debug_assert_eq!(index, self.states.len(), "state slots allocated out of order");
            log::trace!("use_state: allocating slot {index}");
            self.states.push(Box::new(initial.clone()));
            return initial;
        }

        if let Some(v) = self.states[index].downcast_ref::<T>() {
            v.clone()
        } else {
            log::warn!(
                "use_state: slot {} type changed; replacing. \
                 Hooks must be called unconditionally and in the same order every render.",
                index
            );
            self.states[index] = Box::new(initial.clone());
            initial
        }
    }

    pub(crate) fn write_state<T: 'static>(&mut self, index: usize, value: T) {
        match self.states.get_mut(index) {
            Some(slot) => {
                log::trace!("use_state: writing slot {index}");
                *slot = Box::new(value);
            }
            None => log::warn!("use_state: write to unallocated slot {index} ignored"),
        }
    }

    pub(crate) fn effect_deps(&self, index: usize) -> Option<&Deps> {
        self.effects.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn write_effect_deps(&mut self, index: usize, deps: Deps) {
        if index >= self.effects.len() {
            self.effects.resize_with(index + 1, || None);
        }
        self.effects[index] = Some(deps);
        self.effects_fired += 1;
    }

    pub(crate) fn memo(&self, index: usize) -> Option<&MemoSlot> {
        self.memos.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn write_memo(&mut self, index: usize, deps: Deps, value: Box<dyn Any>) {
        if index >= self.memos.len() {
            self.memos.resize_with(index + 1, || None);
        }
        self.memos[index] = Some(MemoSlot { deps, value });
        self.memos_computed += 1;
    }
}

impl fmt::Debug for SlotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotStore")
            .field("slots", &self.slot_counts())
            .field("cursors", &self.cursors)
            .finish()
    }
}
