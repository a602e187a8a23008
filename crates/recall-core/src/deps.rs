//! # Dependency lists
//!
//! Effects and memos recompute when their dependency list changes. A list is
//! compared position by position with [`SameValue`], a strict identity check:
//!
//! - integers, `bool`, `char` and strings compare by value;
//! - floats compare bitwise except that every NaN equals every other NaN, so
//!   `0.0` and `-0.0` are different dependencies;
//! - `Rc` / `Arc` compare by pointer, never by contents.
//!
//! ```rust
//! use recall_core::*;
//!
//! let count = 3;
//! let label = String::from("total");
//! let d = deps![count, label.clone()];
//! assert_eq!(d.len(), 2);
//! ```

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

/// Strict same-value equality used for change detection.
pub trait SameValue: 'static {
    fn same_value(&self, other: &Self) -> bool;
}

macro_rules! same_value_by_eq {
    ($($t:ty),* $(,)?) => {
        $(
            impl SameValue for $t {
                #[inline]
                fn same_value(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

same_value_by_eq!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    bool,
    char,
    (),
    String,
    &'static str,
);

macro_rules! same_value_float {
    ($($t:ty),*) => {
        $(
            impl SameValue for $t {
                #[inline]
                fn same_value(&self, other: &Self) -> bool {
                    (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
                }
            }
        )*
    };
}

same_value_float!(f32, f64);

impl<T: ?Sized + 'static> SameValue for Rc<T> {
    fn same_value(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl<T: ?Sized + 'static> SameValue for Arc<T> {
    fn same_value(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: SameValue> SameValue for Option<T> {
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: SameValue, B: SameValue> SameValue for (A, B) {
    fn same_value(&self, other: &Self) -> bool {
        self.0.same_value(&other.0) && self.1.same_value(&other.1)
    }
}

impl<A: SameValue, B: SameValue, C: SameValue> SameValue for (A, B, C) {
    fn same_value(&self, other: &Self) -> bool {
        self.0.same_value(&other.0) && self.1.same_value(&other.1) && self.2.same_value(&other.2)
    }
}

/// One type-erased entry of a dependency list.
pub struct Dep {
    value: Box<dyn Any>,
    same: fn(&dyn Any, &dyn Any) -> bool,
    type_name: &'static str,
}

fn same_as<T: SameValue>(a: &dyn Any, b: &dyn Any) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a.same_value(b),
        // a dependency that changed type is a changed dependency
        _ => false,
    }
}

impl Dep {
    pub fn new<T: SameValue>(value: T) -> Self {
        Self {
            value: Box::new(value),
            same: same_as::<T>,
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn same_value(&self, other: &Dep) -> bool {
        (self.same)(self.value.as_ref(), other.value.as_ref())
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dep<{}>", self.type_name)
    }
}

/// Ordered dependency list passed to [`use_effect`](crate::use_effect) and
/// [`use_memo`](crate::use_memo). Build one with the [`deps!`](crate::deps) macro.
#[derive(Debug, Default)]
pub struct Deps(SmallVec<[Dep; 4]>);

impl Deps {
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    pub fn push(&mut self, dep: Dep) {
        self.0.push(dep);
    }

    pub fn with<T: SameValue>(mut self, value: T) -> Self {
        self.push(Dep::new(value));
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dep> {
        self.0.iter()
    }
}

impl FromIterator<Dep> for Deps {
    fn from_iter<I: IntoIterator<Item = Dep>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds a [`Deps`] list; each element must implement [`SameValue`].
///
/// `deps![]` is the empty list: the hook runs on the first render only.
#[macro_export]
macro_rules! deps {
    () => {
        $crate::deps::Deps::new()
    };
    ($($dep:expr),+ $(,)?) => {{
        let mut d = $crate::deps::Deps::new();
        $( d.push($crate::deps::Dep::new($dep)); )+
        d
    }};
}

/// Outcome of comparing a hook's new dependencies with the recorded ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepsChange {
    /// Nothing recorded yet: first call at this slot.
    Initial,
    /// Same length, at least one position differs.
    Changed,
    /// Length differs from the recorded list; always counts as changed.
    LengthChanged { from: usize, to: usize },
    Unchanged,
}

impl DepsChange {
    /// Shared change detection for effects and memos.
    pub fn between(previous: Option<&Deps>, next: &Deps) -> Self {
        let Some(previous) = previous else {
            return DepsChange::Initial;
        };
        if previous.len() != next.len() {
            return DepsChange::LengthChanged {
                from: previous.len(),
                to: next.len(),
            };
        }
        if next
            .iter()
            .zip(previous.iter())
            .any(|(n, p)| !n.same_value(p))
        {
            DepsChange::Changed
        } else {
            DepsChange::Unchanged
        }
    }

    pub fn is_changed(self) -> bool {
        !matches!(self, DepsChange::Unchanged)
    }
}
