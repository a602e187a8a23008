use std::cell::RefCell;
use std::rc::Rc;

use crate::error::RenderError;
use crate::slots::{HookCounts, SlotStore};

thread_local! {
    static CURRENT_STORE: RefCell<Option<Rc<RefCell<SlotStore>>>> = const { RefCell::new(None) };
}

/// What a component function returns: something that can display itself.
///
/// Event handlers live as ordinary methods on the implementing type and call the
/// setters captured during the render.
pub trait Instance {
    fn render(&self);
}

impl Instance for () {
    fn render(&self) {}
}

/// How [`Runtime::render`] reacts when a render calls a different number of hooks
/// of some kind than the previous render did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HookCountCheck {
    Off,
    Warn,
    Error,
}

impl Default for HookCountCheck {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            HookCountCheck::Error
        } else {
            HookCountCheck::Warn
        }
    }
}

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Label used in log lines and errors.
    pub name: String,
    pub hook_count_check: HookCountCheck,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            name: "component".to_string(),
            hook_count_check: HookCountCheck::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn hook_count_check(mut self, check: HookCountCheck) -> Self {
        self.hook_count_check = check;
        self
    }
}

/// What happened during one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderStats {
    /// 1-based ordinal of the render.
    pub render: u64,
    pub hooks: HookCounts,
    pub effects_fired: usize,
    pub memos_computed: usize,
    pub slots: HookCounts,
}

/// Publishes a store as the target of hook calls for the duration of a render.
///
/// Dropping the guard resets the cursors and unpublishes the store, also when the
/// component panics.
pub(crate) struct RenderGuard {
    store: Rc<RefCell<SlotStore>>,
}

impl RenderGuard {
    pub(crate) fn begin(
        store: &Rc<RefCell<SlotStore>>,
        component: &str,
    ) -> Result<Self, RenderError> {
        CURRENT_STORE.with(|c| {
            let mut c = c.borrow_mut();
            if c.is_some() {
                return Err(RenderError::NestedRender {
                    component: component.to_string(),
                });
            }
            *c = Some(store.clone());
            Ok(RenderGuard {
                store: store.clone(),
            })
        })
    }
}

impl Drop for RenderGuard {
    fn drop(&mut self) {
        self.store.borrow_mut().reset_cursors();
        CURRENT_STORE.with(|c| {
            *c.borrow_mut() = None;
        });
    }
}

/// Store of the render in progress on this thread.
///
/// # Panics
///
/// Panics when no render is in progress: hooks may only be called from a
/// component function invoked by [`Runtime::render`].
pub(crate) fn current_store(hook: &str) -> Rc<RefCell<SlotStore>> {
    let store = CURRENT_STORE.with(|c| c.borrow().clone());
    match store {
        Some(store) => store,
        None => panic!("{hook} called outside of a render pass"),
    }
}

/// Whether a render is in progress on this thread.
pub fn is_rendering() -> bool {
    CURRENT_STORE.with(|c| c.borrow().is_some())
}

/// Render driver: owns one component instance's slot store.
///
/// Rendering is only possible through [`Runtime::render`]; the guard that
/// publishes a store to the hooks is internal:
///
/// ```compile_fail
/// use recall_core::runtime::RenderGuard;
/// ```
pub struct Runtime {
    store: Rc<RefCell<SlotStore>>,
    config: RuntimeConfig,
    renders: u64,
    last_hooks: Option<HookCounts>,
    last_stats: Option<RenderStats>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            store: Rc::new(RefCell::new(SlotStore::new())),
            config,
            renders: 0,
            last_hooks: None,
            last_stats: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Runs one render pass: the component body, then `instance.render()`, then
    /// the cursor reset.
    pub fn render<I, F>(&mut self, component: F) -> Result<I, RenderError>
    where
        I: Instance,
        F: FnOnce() -> I,
    {
        let guard = RenderGuard::begin(&self.store, &self.config.name)?;

        let instance = component();
        let hooks = self.store.borrow().cursors();
        self.check_hook_counts(hooks)?;

        instance.render();

        self.renders += 1;
        let stats = {
            let s = self.store.borrow();
            RenderStats {
                render: self.renders,
                hooks,
                effects_fired: s.effects_fired(),
                memos_computed: s.memos_computed(),
                slots: s.slot_counts(),
            }
        };
        drop(guard);

        log::debug!(
            "{}: render {} done ({} effects fired, {} memos recomputed)",
            self.config.name,
            stats.render,
            stats.effects_fired,
            stats.memos_computed
        );
        self.last_hooks = Some(hooks);
        self.last_stats = Some(stats);
        Ok(instance)
    }

    fn check_hook_counts(&self, hooks: HookCounts) -> Result<(), RenderError> {
        let Some(previous) = self.last_hooks else {
            return Ok(());
        };
        let Some((kind, found, expected)) = hooks.first_difference(&previous) else {
            return Ok(());
        };
        match self.config.hook_count_check {
            HookCountCheck::Off => Ok(()),
            HookCountCheck::Warn => {
                log::warn!(
                    "{}: {} called {} times, previous render called it {} times",
                    self.config.name,
                    kind,
                    found,
                    expected
                );
                Ok(())
            }
            HookCountCheck::Error => Err(RenderError::HookCountMismatch {
                component: self.config.name.clone(),
                kind,
                expected,
                found,
            }),
        }
    }

    /// Cursor values; zero whenever no render of this runtime is in progress.
    pub fn cursors(&self) -> HookCounts {
        self.store.borrow().cursors()
    }

    pub fn slot_counts(&self) -> HookCounts {
        self.store.borrow().slot_counts()
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }
}
