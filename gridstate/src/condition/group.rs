//! A group of per-column condition panels sharing a group state.

use std::collections::HashMap;

use crate::error::{Result, TableError};
use crate::event::Subscription;
use crate::source::ColumnId;

use super::state::{ConditionState, ConditionStateMachine};

/// One state machine per column plus one for the group.
///
/// Setting the group state sets every column panel to the same state.
/// Column panels can still be changed individually afterwards.
#[derive(Debug)]
pub struct ConditionPanelGroup<C> {
    group: ConditionStateMachine,
    panels: Vec<(C, ConditionStateMachine)>,
    index: HashMap<C, usize>,
    _propagation: Subscription,
}

impl<C: ColumnId> ConditionPanelGroup<C> {
    /// Create a group with a panel for each column, all in `initial`.
    ///
    /// Fails if two columns share an identifier.
    pub fn new(columns: impl IntoIterator<Item = C>, initial: ConditionState) -> Result<Self> {
        let mut panels = Vec::new();
        let mut index = HashMap::new();
        for identifier in columns {
            if index.contains_key(&identifier) {
                return Err(TableError::DuplicateColumn(format!("{identifier:?}")));
            }
            index.insert(identifier.clone(), panels.len());
            panels.push((identifier, ConditionStateMachine::new(initial)));
        }

        let group = ConditionStateMachine::new(initial);
        let targets: Vec<ConditionStateMachine> =
            panels.iter().map(|(_, panel)| panel.clone()).collect();
        let propagation = group.state().subscribe(move |state| {
            for panel in &targets {
                panel.set(*state);
            }
        });

        Ok(Self {
            group,
            panels,
            index,
            _propagation: propagation,
        })
    }

    /// The group state machine.
    pub fn group(&self) -> &ConditionStateMachine {
        &self.group
    }

    /// Current group state.
    pub fn state(&self) -> ConditionState {
        self.group.get()
    }

    /// Set the group state and every panel with it.
    pub fn set_state(&self, state: ConditionState) -> bool {
        self.group.set(state)
    }

    /// Cycle the group to its next state.
    pub fn advance(&self) -> ConditionState {
        self.group.advance()
    }

    /// The panel of one column.
    pub fn panel(&self, identifier: &C) -> Result<&ConditionStateMachine> {
        self.index
            .get(identifier)
            .map(|&i| &self.panels[i].1)
            .ok_or_else(|| TableError::column_not_found(identifier))
    }

    /// Every panel, in column order.
    pub fn panels(&self) -> impl Iterator<Item = (&C, &ConditionStateMachine)> + '_ {
        self.panels.iter().map(|(identifier, panel)| (identifier, panel))
    }
}
