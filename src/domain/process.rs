//! Supervised child process lifecycle.
//!
//! The launcher side holds a [`SupervisedProcess`]; whoever spawns the child
//! holds the matching [`TerminationNotifier`]. The notifier is consumed by its
//! terminal call, so at most one terminal notification exists per launch.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvError, Sender, TryRecvError};

/// Everything needed to start the package entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Working directory for the child (the extracted package folder).
    pub entry_dir: PathBuf,
    /// Entry file, relative to `entry_dir`.
    pub entry_file: String,
    pub interpreter: String,
    pub interpreter_args: Vec<String>,
    /// Overrides applied on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl LaunchRequest {
    /// Full command line as it will be executed.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.interpreter.clone()];
        parts.extend(self.interpreter_args.iter().cloned());
        parts.push(self.entry_file.clone());
        parts.join(" ")
    }
}

/// How a child that did start came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// Exit code, absent when the child was killed by a signal.
    pub code: Option<i32>,
    /// Terminating signal on unix.
    pub signal: Option<i32>,
}

impl ExitOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code), signal: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Status the launcher should exit with to mirror the child.
    pub fn mirrored_status(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.signal) {
            (Some(code), _) => write!(f, "exit code {}", code),
            (None, Some(signal)) => write!(f, "signal {}", signal),
            (None, None) => write!(f, "unknown status"),
        }
    }
}

/// Lifecycle notification sent by the spawning side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started { pid: u32 },
    Exited(ExitOutcome),
    Failed(String),
}

/// Observed state of the supervised child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessState {
    NotStarted,
    Running { pid: u32 },
    Terminated(ExitOutcome),
    Failed(String),
}

impl ProcessState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessState::Terminated(_) | ProcessState::Failed(_))
    }

    /// Next state for an event, or `None` when the transition is illegal.
    ///
    /// Terminal states accept nothing further.
    pub fn advance(&self, event: ProcessEvent) -> Option<ProcessState> {
        match (self, event) {
            (ProcessState::NotStarted, ProcessEvent::Started { pid }) => {
                Some(ProcessState::Running { pid })
            }
            (ProcessState::NotStarted | ProcessState::Running { .. }, event) => match event {
                ProcessEvent::Exited(outcome) => Some(ProcessState::Terminated(outcome)),
                ProcessEvent::Failed(reason) => Some(ProcessState::Failed(reason)),
                ProcessEvent::Started { .. } => None,
            },
            _ => None,
        }
    }
}

/// Spawning-side half of a supervised launch.
#[derive(Debug)]
pub struct TerminationNotifier {
    sender: Sender<ProcessEvent>,
}

impl TerminationNotifier {
    pub fn started(&self, pid: u32) {
        // The receiver may already be gone; nobody is left to observe the child then.
        let _ = self.sender.send(ProcessEvent::Started { pid });
    }

    pub fn exited(self, outcome: ExitOutcome) {
        let _ = self.sender.send(ProcessEvent::Exited(outcome));
    }

    pub fn failed<S: Into<String>>(self, reason: S) {
        let _ = self.sender.send(ProcessEvent::Failed(reason.into()));
    }
}

/// Handle to the launched child, carrying its termination state.
#[derive(Debug)]
pub struct SupervisedProcess {
    program: String,
    state: ProcessState,
    events: Receiver<ProcessEvent>,
}

impl SupervisedProcess {
    /// Create a handle in `NotStarted` together with its notifier.
    pub fn channel<S: Into<String>>(program: S) -> (TerminationNotifier, SupervisedProcess) {
        let (sender, events) = mpsc::channel();
        let process =
            SupervisedProcess { program: program.into(), state: ProcessState::NotStarted, events };
        (TerminationNotifier { sender }, process)
    }

    /// Command line this handle supervises.
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    /// Drain pending notifications without blocking.
    pub fn poll(&mut self) -> &ProcessState {
        while !self.state.is_terminal() {
            match self.events.try_recv() {
                Ok(event) => self.apply(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.lost_notifier(),
            }
        }
        &self.state
    }

    /// Block until the child is running or has already reached a terminal state.
    pub fn wait_for_start(&mut self) -> &ProcessState {
        while self.state == ProcessState::NotStarted {
            match self.events.recv() {
                Ok(event) => self.apply(event),
                Err(RecvError) => self.lost_notifier(),
            }
        }
        &self.state
    }

    /// Block until the child reaches a terminal state.
    pub fn wait(&mut self) -> &ProcessState {
        while !self.state.is_terminal() {
            match self.events.recv() {
                Ok(event) => self.apply(event),
                Err(RecvError) => self.lost_notifier(),
            }
        }
        &self.state
    }

    fn apply(&mut self, event: ProcessEvent) {
        if let Some(next) = self.state.advance(event) {
            self.state = next;
        }
    }

    fn lost_notifier(&mut self) {
        self.state =
            ProcessState::Failed("supervisor stopped without reporting a termination".to_string());
    }
}
