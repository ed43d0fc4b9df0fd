use crate::ports::{PackageSource, ProcessLauncher};

/// Application context holding the collaborators a launcher run depends on.
pub struct AppContext<S: PackageSource, L: ProcessLauncher> {
    source: S,
    launcher: L,
}

impl<S: PackageSource, L: ProcessLauncher> AppContext<S, L> {
    /// Create a new application context.
    pub fn new(source: S, launcher: L) -> Self {
        Self { source, launcher }
    }

    /// Get a reference to the package source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the process launcher.
    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}
