use std::fmt;

/// Orchestrator state for a single launcher run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Locating,
    Fetching,
    Extracting,
    Overlaying,
    Launching,
    Running,
    Done,
    Aborted,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::Idle => "idle",
            RunStage::Locating => "locating",
            RunStage::Fetching => "fetching",
            RunStage::Extracting => "extracting",
            RunStage::Overlaying => "overlaying",
            RunStage::Launching => "launching",
            RunStage::Running => "running",
            RunStage::Done => "done",
            RunStage::Aborted => "aborted",
        }
    }

    /// Stage that follows on success, `None` for terminal stages.
    pub fn next(&self) -> Option<RunStage> {
        match self {
            RunStage::Idle => Some(RunStage::Locating),
            RunStage::Locating => Some(RunStage::Fetching),
            RunStage::Fetching => Some(RunStage::Extracting),
            RunStage::Extracting => Some(RunStage::Overlaying),
            RunStage::Overlaying => Some(RunStage::Launching),
            RunStage::Launching => Some(RunStage::Running),
            RunStage::Running => Some(RunStage::Done),
            RunStage::Done | RunStage::Aborted => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }

    /// Whether moving from `self` to `to` follows the run state machine.
    ///
    /// Any non-terminal stage may abort.
    pub fn can_transition_to(&self, to: RunStage) -> bool {
        match to {
            RunStage::Aborted => !self.is_terminal(),
            _ => self.next() == Some(to),
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
