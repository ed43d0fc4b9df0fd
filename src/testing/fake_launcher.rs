use std::sync::{Arc, Mutex};

use crate::domain::{ExitOutcome, LaunchRequest, SupervisedProcess};
use crate::ports::ProcessLauncher;

/// Launcher that records requests and reports a scripted outcome.
#[derive(Clone)]
pub struct FakeLauncher {
    outcome: Result<i32, String>,
    pub launched: Arc<Mutex<Vec<LaunchRequest>>>,
}

impl FakeLauncher {
    pub fn exiting_with(code: i32) -> Self {
        Self { outcome: Ok(code), launched: Arc::new(Mutex::new(vec![])) }
    }

    pub fn failing_to_start(reason: impl Into<String>) -> Self {
        Self { outcome: Err(reason.into()), launched: Arc::new(Mutex::new(vec![])) }
    }

    pub fn launched_requests(&self) -> Vec<LaunchRequest> {
        self.launched.lock().unwrap().clone()
    }
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, request: LaunchRequest) -> SupervisedProcess {
        let (notifier, process) = SupervisedProcess::channel(request.command_line());
        self.launched.lock().unwrap().push(request);
        match &self.outcome {
            Ok(code) => {
                notifier.started(4242);
                notifier.exited(ExitOutcome::from_code(*code));
            }
            Err(reason) => notifier.failed(reason.clone()),
        }
        process
    }
}
