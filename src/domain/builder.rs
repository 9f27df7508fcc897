//! Phased tree construction driven by a replaceable current state.
//!
//! Transitions:
//!
//! | state     | on `handle`                                      |
//! |-----------|--------------------------------------------------|
//! | Splitting | stays Splitting (Stopping with `split_advances`) |
//! | Stopping  | Pruning                                          |
//! | Pruning   | Terminated                                       |
//!
//! Terminated is the absence of a state; `build` then fails until a new state is set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::Node;

/// Phase of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
    Splitting,
    Stopping,
    Pruning,
}

impl BuildState {
    /// Performs this phase's action on `node` and moves the builder on.
    #[instrument(level = "debug", skip(builder, node), fields(node = node.name()))]
    pub fn handle(self, builder: &mut TreeBuilder, node: &Node) {
        match self {
            BuildState::Splitting => {
                info!(node = node.name(), "Splitting node");
                if builder.split_advances {
                    builder.change_state(Some(BuildState::Stopping));
                }
            }
            BuildState::Stopping => {
                info!(node = node.name(), "Stopping criterion satisfied");
                builder.change_state(Some(BuildState::Pruning));
            }
            BuildState::Pruning => {
                info!(node = node.name(), "Pruning node");
                builder.change_state(None);
            }
        }
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildState::Splitting => "splitting",
            BuildState::Stopping => "stopping",
            BuildState::Pruning => "pruning",
        };
        f.write_str(name)
    }
}

impl FromStr for BuildState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "splitting" => Ok(BuildState::Splitting),
            "stopping" => Ok(BuildState::Stopping),
            "pruning" => Ok(BuildState::Pruning),
            other => Err(format!(
                "unknown build state '{other}' (expected splitting, stopping or pruning)"
            )),
        }
    }
}

/// Process object delegating each build step to its current state.
#[derive(Debug)]
pub struct TreeBuilder {
    state: Option<BuildState>,
    split_advances: bool,
    steps: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::with_state(BuildState::Splitting)
    }

    pub fn with_state(initial: BuildState) -> Self {
        Self {
            state: Some(initial),
            split_advances: false,
            steps: 0,
        }
    }

    /// Lets Splitting move on to Stopping instead of looping on itself.
    pub fn split_advances(mut self, advances: bool) -> Self {
        self.split_advances = advances;
        self
    }

    /// Current state, None once terminated.
    pub fn state(&self) -> Option<BuildState> {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_none()
    }

    /// Number of handled steps since the last reset.
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[instrument(level = "debug", skip(self))]
    pub fn change_state(&mut self, new_state: Option<BuildState>) {
        debug!(from = ?self.state, to = ?new_state, "Changing state");
        self.state = new_state;
    }

    /// Runs one step of the current state on `node`.
    #[instrument(level = "debug", skip(self, node), fields(node = node.name()))]
    pub fn build(&mut self, node: &Node) -> DomainResult<()> {
        let state = self
            .state
            .ok_or_else(|| DomainError::IllegalState(node.name().to_string()))?;
        state.handle(self, node);
        self.steps += 1;
        Ok(())
    }

    /// Starts a fresh build invocation in `initial`.
    pub fn reset(&mut self, initial: BuildState) {
        self.state = Some(initial);
        self.steps = 0;
    }
}
