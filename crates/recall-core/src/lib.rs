//! # State, Effects, and Memos
//!
//! Recall lets a plain function keep state between calls without owning any
//! mutable fields. The function is a *component*; every call of it through
//! [`Runtime::render`] is a *render pass*. Inside a render the component calls
//! three hooks:
//!
//! - `use_state`: a value persisted across renders plus a setter.
//! - `use_effect`: a side effect that runs when its dependencies change.
//! - `use_memo`: a cached value recomputed when its dependencies change.
//!
//! ## Slots
//!
//! Hooks are order-based: the Nth `use_state` call of a render always refers to
//! the Nth state slot, and likewise for effects and memos. Each kind has its own
//! cursor, advanced by every call and reset to zero once the render finishes.
//! Hooks must therefore be called unconditionally and in the same order on every
//! render, and never from inside an effect or memo callback: those callbacks are
//! skipped on renders where nothing changed, so a hook inside one is effectively
//! conditional. With the default [`RuntimeConfig`] a debug build reports a changed hook
//! count as [`RenderError::HookCountMismatch`].
//!
//! ## A counter
//!
//! ```rust
//! use recall_core::*;
//!
//! struct Counter {
//!     count: i32,
//!     set_count: SetState<i32>,
//! }
//!
//! impl Instance for Counter {
//!     fn render(&self) {
//!         println!("count = {}", self.count);
//!     }
//! }
//!
//! impl Counter {
//!     fn click(&self) {
//!         self.set_count.set(self.count + 1);
//!     }
//! }
//!
//! fn counter() -> Counter {
//!     let (count, set_count) = use_state(0);
//!     use_effect(|| log::info!("count is now {count}"), deps![count]);
//!     Counter { count, set_count }
//! }
//!
//! let mut rt = Runtime::new();
//! let app = rt.render(counter).unwrap();
//! app.click();
//! let app = rt.render(counter).unwrap();
//! assert_eq!(app.count, 1);
//! ```
//!
//! Setters never re-render by themselves; the driver decides when to render
//! again.
//!
//! ## Dependencies
//!
//! Effects and memos take a [`Deps`] list built with [`deps!`]. Entries are
//! compared positionally with [`SameValue`]: numbers and strings by value (NaN
//! equals NaN, `0.0` differs from `-0.0`), `Rc`/`Arc` by pointer. A list whose
//! length changes between renders counts as changed.

pub mod deps;
pub mod effects;
pub mod error;
pub mod memo;
pub mod prelude;
pub mod runtime;
pub mod slots;
pub mod state;
mod tests;

pub use deps::*;
pub use effects::*;
pub use error::*;
pub use memo::*;
pub use runtime::*;
pub use slots::*;
pub use state::*;
