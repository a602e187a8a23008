use crate::deps::{Deps, DepsChange};
use crate::runtime::current_store;
use crate::slots::HookKind;

/// Caches the result of `callback` until `deps` change.
///
/// An unchanged list returns a clone of the cached value. Wrap the value in an
/// `Rc` when downstream dependencies should see the same reference.
/// `callback` must not call hooks; it is skipped whenever `deps` are unchanged.
///
/// # Panics
///
/// Panics when called outside of [`Runtime::render`](crate::Runtime::render).
pub fn use_memo<T: Clone + 'static>(callback: impl FnOnce() -> T, deps: Deps) -> T {
    let store = current_store("use_memo");
    let (index, change, cached) = {
        let mut s = store.borrow_mut();
        let index = s.claim(HookKind::Memo);
        let slot = s.memo(index);
        let change = DepsChange::between(slot.map(|m| &m.deps), &deps);
        let cached = if change.is_changed() {
            None
        } else {
            slot.and_then(|m| m.value.downcast_ref::<T>()).cloned()
        };
        (index, change, cached)
    };

    match (change, cached) {
        (DepsChange::Unchanged, Some(value)) => return value,
        (DepsChange::Unchanged, None) => log::warn!(
            "use_memo: slot {index} value type changed; recomputing. \
             Hooks must be called unconditionally and in the same order every render."
        ),
        (DepsChange::LengthChanged { from, to }, _) => log::warn!(
            "use_memo: slot {index} dependency list changed length ({from} -> {to}); \
             treating as changed"
        ),
        _ => {}
    }

    log::debug!("use_memo: slot {index} recomputing ({change:?})");
    let value = callback();
    store
        .borrow_mut()
        .write_memo(index, deps, Box::new(value.clone()));
    value
}
