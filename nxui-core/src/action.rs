use std::fmt;
use std::rc::Rc;

use crate::context::AppContext;
use crate::input::ActionType;

type ActionFn = dyn Fn(&mut dyn AppContext, bool);

/// A button binding: trigger type, hint text and the closure to run.
///
/// The closure receives `true` for press and held events and `false` for
/// release events. Clones share the closure, so a binding can be copied
/// from one widget's table into another's.
#[derive(Clone)]
pub struct Action {
    hint: String,
    kind: ActionType,
    hidden: bool,
    func: Rc<ActionFn>,
}

impl Action {
    /// Press-triggered action that ignores the press/release flag.
    pub fn new(
        hint: impl Into<String>,
        func: impl Fn(&mut dyn AppContext) + 'static,
    ) -> Self {
        Self::with_type(ActionType::DOWN, hint, move |ctx, _| func(ctx))
    }

    pub fn with_type(
        kind: ActionType,
        hint: impl Into<String>,
        func: impl Fn(&mut dyn AppContext, bool) + 'static,
    ) -> Self {
        Self {
            hint: hint.into(),
            kind,
            hidden: false,
            func: Rc::new(func),
        }
    }

    /// Keep the binding active but leave it out of the button-hint bar.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn kind(&self) -> ActionType {
        self.kind
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn invoke(&self, ctx: &mut dyn AppContext, press: bool) {
        (self.func)(ctx, press);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("hint", &self.hint)
            .field("kind", &self.kind)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
