use crate::slots::HookKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render of `{component}` started while another render is in progress on this thread")]
    NestedRender { component: String },

    #[error(
        "`{component}` called {kind} {found} times, previous render called it {expected} times; \
         hooks must be called unconditionally and in the same order"
    )]
    HookCountMismatch {
        component: String,
        kind: HookKind,
        expected: usize,
        found: usize,
    },
}
