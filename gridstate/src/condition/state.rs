//! Tri-state visibility of condition panels.

use std::cell::Cell;
use std::fmt;

use log::debug;

use crate::event::{Subscription, Value};

/// How much of a condition panel is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConditionState {
    /// Not shown.
    #[default]
    Hidden,
    /// The basic condition input only.
    Simple,
    /// The full condition editor.
    Advanced,
}

impl ConditionState {
    /// Every state, in cycling order.
    pub const ALL: [ConditionState; 3] = [Self::Hidden, Self::Simple, Self::Advanced];

    /// The state after this one: hidden, simple, advanced, then hidden.
    pub fn next(self) -> Self {
        match self {
            Self::Hidden => Self::Simple,
            Self::Simple => Self::Advanced,
            Self::Advanced => Self::Hidden,
        }
    }
}

impl fmt::Display for ConditionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::Simple => write!(f, "simple"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// A single condition state with three boolean toggles over it.
///
/// The enum value is the only stored state. Each toggle reads as true
/// exactly when the state equals its member, so exactly one toggle is true
/// at any time. Setting a toggle true sets the state; setting a toggle
/// false does nothing.
///
/// Clones share the same state.
///
/// # Example
///
/// ```
/// use gridstate::condition::{ConditionState, ConditionStateMachine};
///
/// let machine = ConditionStateMachine::new(ConditionState::Hidden);
/// machine.advanced().set(true);
///
/// assert_eq!(machine.get(), ConditionState::Advanced);
/// assert!(!machine.hidden().get());
/// ```
#[derive(Debug, Clone)]
pub struct ConditionStateMachine {
    state: Value<ConditionState>,
}

impl Default for ConditionStateMachine {
    fn default() -> Self {
        Self::new(ConditionState::default())
    }
}

impl ConditionStateMachine {
    /// Create a machine in the given state.
    pub fn new(initial: ConditionState) -> Self {
        Self {
            state: Value::new(initial),
        }
    }

    /// The observable state.
    pub fn state(&self) -> &Value<ConditionState> {
        &self.state
    }

    /// Current state.
    pub fn get(&self) -> ConditionState {
        self.state.get()
    }

    /// Change the state, returning true if it changed.
    pub fn set(&self, state: ConditionState) -> bool {
        let changed = self.state.set(state);
        if changed {
            debug!("Condition state changed to {}", state);
        }
        changed
    }

    /// Move to the next state in cycling order and return it.
    pub fn advance(&self) -> ConditionState {
        let next = self.get().next();
        self.set(next);
        next
    }

    /// The toggle for one member state.
    pub fn toggle(&self, member: ConditionState) -> ConditionToggle {
        ConditionToggle {
            state: self.state.clone(),
            member,
        }
    }

    /// The hidden toggle.
    pub fn hidden(&self) -> ConditionToggle {
        self.toggle(ConditionState::Hidden)
    }

    /// The simple toggle.
    pub fn simple(&self) -> ConditionToggle {
        self.toggle(ConditionState::Simple)
    }

    /// The advanced toggle.
    pub fn advanced(&self) -> ConditionToggle {
        self.toggle(ConditionState::Advanced)
    }
}

/// Boolean view of one member of a [`ConditionStateMachine`].
#[derive(Debug, Clone)]
pub struct ConditionToggle {
    state: Value<ConditionState>,
    member: ConditionState,
}

impl ConditionToggle {
    /// The state this toggle stands for.
    pub fn member(&self) -> ConditionState {
        self.member
    }

    /// Whether the machine is in this toggle's state.
    pub fn get(&self) -> bool {
        self.state.is_equal_to(&self.member)
    }

    /// Turn the toggle on or off, returning true if the state changed.
    ///
    /// Turning on switches the machine to this member and the other toggles
    /// off. Turning off is a no-op.
    pub fn set(&self, on: bool) -> bool {
        if on {
            let changed = self.state.set(self.member);
            if changed {
                debug!("Condition state changed to {}", self.member);
            }
            changed
        } else {
            if self.get() {
                debug!("Ignoring attempt to turn off active {} toggle", self.member);
            }
            false
        }
    }

    /// Subscribe to this toggle flipping.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        let member = self.member;
        let last = Cell::new(self.get());
        self.state.subscribe(move |state| {
            let on = *state == member;
            if on != last.get() {
                last.set(on);
                listener(on);
            }
        })
    }
}
