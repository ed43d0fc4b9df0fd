//! Child process launch port definition.

use crate::domain::{LaunchRequest, SupervisedProcess};

/// Port for starting the package entry point.
pub trait ProcessLauncher {
    /// Start the child described by `request`.
    ///
    /// Never fails synchronously: a child that cannot be started is reported as
    /// `ProcessState::Failed` through the returned handle.
    fn launch(&self, request: LaunchRequest) -> SupervisedProcess;
}
