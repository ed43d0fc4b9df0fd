//! Process supervisor backed by `std::process::Command`.

use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::domain::{ExitOutcome, LaunchRequest, SupervisedProcess, TerminationNotifier};
use crate::ports::ProcessLauncher;

/// Launches the entry point as an OS child process with inherited stdio.
///
/// Spawning and waiting happen on a dedicated watcher thread; the caller gets
/// the handle back immediately and observes the outcome through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for CommandLauncher {
    fn launch(&self, request: LaunchRequest) -> SupervisedProcess {
        let (notifier, process) = SupervisedProcess::channel(request.command_line());

        let spawned = thread::Builder::new()
            .name("launchpad-supervisor".to_string())
            .spawn(move || supervise(request, notifier));
        if let Err(err) = spawned {
            // The notifier went down with the closure; the handle reports the loss.
            warn!("Failed to start supervisor thread: {}", err);
        }

        process
    }
}

fn supervise(request: LaunchRequest, notifier: TerminationNotifier) {
    if !request.entry_dir.is_dir() {
        notifier
            .failed(format!("package directory not found: {}", request.entry_dir.display()));
        return;
    }
    let entry_path = request.entry_dir.join(&request.entry_file);
    if !entry_path.is_file() {
        notifier.failed(format!("entry point not found: {}", entry_path.display()));
        return;
    }

    let mut command = Command::new(&request.interpreter);
    command
        .args(&request.interpreter_args)
        .arg(&request.entry_file)
        .current_dir(&request.entry_dir)
        .envs(&request.env)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(err) => {
            notifier.failed(format!("{}: {}", request.interpreter, err));
            return;
        }
    };

    let pid = child.id();
    debug!(pid, "Child process started");
    notifier.started(pid);

    match child.wait() {
        Ok(status) => notifier.exited(exit_outcome(status)),
        Err(err) => notifier.failed(format!("failed to wait for child {}: {}", pid, err)),
    }
}

fn exit_outcome(status: ExitStatus) -> ExitOutcome {
    ExitOutcome { code: status.code(), signal: exit_signal(&status) }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}
