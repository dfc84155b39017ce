//! Condition panel visibility: hidden, simple or advanced.

mod group;
mod state;

pub use group::ConditionPanelGroup;
pub use state::{ConditionState, ConditionStateMachine, ConditionToggle};
