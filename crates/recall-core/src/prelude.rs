pub use crate::deps;
pub use crate::deps::{Deps, SameValue};
pub use crate::effects::use_effect;
pub use crate::error::RenderError;
pub use crate::memo::use_memo;
pub use crate::runtime::{HookCountCheck, Instance, RenderStats, Runtime, RuntimeConfig};
pub use crate::state::{SetState, StateUpdate, use_state};
