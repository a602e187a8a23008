use crate::deps::{Deps, DepsChange};
use crate::runtime::current_store;
use crate::slots::HookKind;

/// Runs `callback` in-line when `deps` differ from the list recorded by this
/// call site's previous firing.
///
/// The first render always fires. `deps![]` fires on the first render only.
/// `callback` must not call hooks.
///
/// # Panics
///
/// Panics when called outside of [`Runtime::render`](crate::Runtime::render).
pub fn use_effect(callback: impl FnOnce(), deps: Deps) {
    let store = current_store("use_effect");
    let (index, change) = {
        let mut s = store.borrow_mut();
        let index = s.claim(HookKind::Effect);
        (index, DepsChange::between(s.effect_deps(index), &deps))
    };

    match change {
        DepsChange::Unchanged => return,
        DepsChange::LengthChanged { from, to } => log::warn!(
            "use_effect: slot {index} dependency list changed length ({from} -> {to}); \
             treating as changed"
        ),
        _ => {}
    }

    log::debug!("use_effect: slot {index} firing ({change:?})");
    callback();
    store.borrow_mut().write_effect_deps(index, deps);
}
