//! Append-only state arena

use super::types::*;
use crate::error::{Result, SamError};
use std::ops::{Index, IndexMut};

/// Growable table of states; slot 0 is always the root
#[derive(Debug, Clone)]
pub struct StateTable {
    states: Vec<State>,
    max_states: usize,
}

impl StateTable {
    /// Create a table holding only the root state
    pub fn new(config: &SamConfig) -> Self {
        let mut states = Vec::with_capacity(config.state_capacity.max(1));
        states.push(State::new(0));
        Self {
            states,
            max_states: config.max_states.clamp(1, MAX_STATE_IDS),
        }
    }

    /// Append a state and return its id
    pub fn push(&mut self, state: State) -> Result<StateId> {
        if self.states.len() >= self.max_states {
            return Err(SamError::StateLimitExceeded {
                limit: self.max_states,
            });
        }
        let id = StateId::from_index(self.states.len());
        self.states.push(state);
        Ok(id)
    }

    /// Shortest substring length represented by `id`
    #[inline]
    pub fn min_len(&self, id: StateId) -> usize {
        match self[id].link {
            Some(link) => self[link].len + 1,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId::from_index(i), s))
    }
}

impl Index<StateId> for StateTable {
    type Output = State;

    #[inline]
    fn index(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }
}

impl IndexMut<StateId> for StateTable {
    #[inline]
    fn index_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.index()]
    }
}
