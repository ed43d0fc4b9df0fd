//! Fetch, extract, overlay and launch orchestration.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::app::AppContext;
use crate::domain::{
    AppError, CacheLocation, ExitOutcome, ExtractedLayout, LaunchRequest, LauncherConfig,
    ProcessState, RunStage, SupervisedProcess,
};
use crate::ports::{PackageSource, ProcessLauncher};
use crate::services::{self, CacheState, OverlayOutcome, cache_directory};

/// Sequences a single launcher run and owns its cache directory.
///
/// `start` drives every stage up to a running child and hands the process
/// handle back; `finish` observes the child's termination. Any fatal failure
/// moves the run to [`RunStage::Aborted`] and is returned to the caller, which
/// decides how the program exits.
pub struct Orchestrator<'a, S: PackageSource, L: ProcessLauncher> {
    ctx: &'a AppContext<S, L>,
    config: &'a LauncherConfig,
    base_dir: PathBuf,
    stage: RunStage,
    history: Vec<RunStage>,
    overlay: Option<Result<OverlayOutcome, String>>,
}

impl<'a, S: PackageSource, L: ProcessLauncher> Orchestrator<'a, S, L> {
    pub fn new(ctx: &'a AppContext<S, L>, config: &'a LauncherConfig, base_dir: &Path) -> Self {
        Self {
            ctx,
            config,
            base_dir: base_dir.to_path_buf(),
            stage: RunStage::Idle,
            history: vec![RunStage::Idle],
            overlay: None,
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Every stage the run has entered, in order.
    pub fn history(&self) -> &[RunStage] {
        &self.history
    }

    /// Outcome of the overlay stage; the error text when it failed.
    pub fn overlay_outcome(&self) -> Option<&Result<OverlayOutcome, String>> {
        self.overlay.as_ref()
    }

    /// Run every stage through `Running` and return the child handle.
    pub fn start(&mut self) -> Result<SupervisedProcess, AppError> {
        let result = self.run_stages();
        if let Err(err) = &result {
            self.abort(err);
        }
        result
    }

    /// Wait for the child and record how the run ended.
    pub fn finish(&mut self, process: &mut SupervisedProcess) -> Result<ExitOutcome, AppError> {
        if let ProcessState::Terminated(outcome) = process.wait() {
            let outcome = *outcome;
            if outcome.success() {
                info!("Package process exited with {}", outcome);
            } else {
                warn!("Package process exited with {}", outcome);
            }
            self.enter(RunStage::Done);
            return Ok(outcome);
        }

        let err = start_error(process);
        self.abort(&err);
        Err(err)
    }

    /// `start` followed by `finish`.
    pub fn run(&mut self) -> Result<ExitOutcome, AppError> {
        let mut process = self.start()?;
        self.finish(&mut process)
    }

    fn run_stages(&mut self) -> Result<SupervisedProcess, AppError> {
        self.enter(RunStage::Locating);
        let location = CacheLocation::for_base(&self.base_dir);
        info!("Using cache directory {}", location);
        if cache_directory::prepare(&location)? == CacheState::ClearedStale {
            info!("Cleaned previous cache");
        }

        self.enter(RunStage::Fetching);
        let archive_path = location.archive_path(&self.config.package.archive_name);
        self.fetch(&location, &archive_path)?;

        self.enter(RunStage::Extracting);
        let layout = services::extract(
            &archive_path,
            self.config.package.format,
            location.path(),
            &self.config.package.dir,
            &self.config.package.entry,
        )?;
        info!("Package extracted to {}", layout.package_dir().display());
        if !layout.entry_point_present() {
            warn!(
                "Entry point {} not found in extracted package",
                layout.entry_point().display()
            );
        }

        self.enter(RunStage::Overlaying);
        self.apply_overlay(&layout);

        self.enter(RunStage::Launching);
        self.launch(&layout)
    }

    fn fetch(&self, location: &CacheLocation, archive_path: &Path) -> Result<(), AppError> {
        let url = &self.config.package.url;
        info!("Downloading package from {}", url);

        match services::fetch(self.ctx.source(), url, archive_path) {
            Ok(bytes) => {
                info!("Download complete ({} bytes), extracting", bytes);
                Ok(())
            }
            Err(err) => {
                if let Err(cleanup) = cache_directory::discard(location) {
                    warn!("Failed to remove cache after download failure: {}", cleanup);
                }
                Err(err)
            }
        }
    }

    fn apply_overlay(&mut self, layout: &ExtractedLayout) {
        let source = self.base_dir.join(&self.config.settings.source);
        let target = layout.resolve(&self.config.settings.target);

        let outcome = match services::apply_overlay(&source, &target) {
            Ok(OverlayOutcome::NoLocalSettings) => {
                info!("No local settings at {}, using package defaults", source.display());
                Ok(OverlayOutcome::NoLocalSettings)
            }
            Ok(applied @ OverlayOutcome::Applied { .. }) => {
                info!("Local settings applied to {}", target.display());
                Ok(applied)
            }
            Err(err) => {
                debug_assert!(!err.is_fatal());
                warn!("{}; continuing with packaged settings", err);
                Err(err.to_string())
            }
        };
        self.overlay = Some(outcome);
    }

    fn launch(&mut self, layout: &ExtractedLayout) -> Result<SupervisedProcess, AppError> {
        let launch = &self.config.launch;
        let request = LaunchRequest {
            entry_dir: layout.package_dir().to_path_buf(),
            entry_file: self.config.package.entry.clone(),
            interpreter: launch.interpreter.clone(),
            interpreter_args: launch.args.clone(),
            env: launch.env.clone(),
        };
        info!("Starting {}", request.command_line());

        let mut process = self.ctx.launcher().launch(request);
        let started = matches!(
            process.wait_for_start(),
            ProcessState::Running { .. } | ProcessState::Terminated(_)
        );
        if !started {
            return Err(start_error(&process));
        }
        if let ProcessState::Running { pid } = process.state() {
            debug!(pid = *pid, "Package process running");
        }
        self.enter(RunStage::Running);
        Ok(process)
    }

    fn enter(&mut self, next: RunStage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "illegal transition {} -> {}",
            self.stage,
            next
        );
        debug!(from = %self.stage, to = %next, "Stage transition");
        self.stage = next;
        self.history.push(next);
    }

    fn abort(&mut self, err: &AppError) {
        error!("Run aborted while {}: {}", self.stage, err);
        self.enter(RunStage::Aborted);
    }
}

fn start_error(process: &SupervisedProcess) -> AppError {
    let details = match process.state() {
        ProcessState::Failed(reason) => reason.clone(),
        other => format!("unexpected process state {:?}", other),
    };
    AppError::ProcessStart { program: process.program().to_string(), details }
}
