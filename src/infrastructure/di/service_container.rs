//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::VersionService;
use crate::config::Settings;
use crate::infrastructure::traits::{
    Clock, CommandRunner, NonInteractivePrompter, Prompter, RealCommandRunner, SystemClock,
    TerminalPrompter,
};

/// Container holding the boundary implementations every command can reach.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Command runner abstraction
    pub cmd: Arc<dyn CommandRunner>,

    /// Operator prompts
    pub prompter: Arc<dyn Prompter>,

    /// Wall-clock source for the time heuristics
    pub clock: Arc<dyn Clock>,

    /// Directory holding the local config file (default: cwd)
    pub project_dir: PathBuf,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    ///
    /// `interactive` selects the terminal prompter; otherwise every prompt
    /// accepts its default.
    pub fn new(settings: Settings, interactive: bool) -> Self {
        let prompter: Arc<dyn Prompter> = if interactive {
            Arc::new(TerminalPrompter)
        } else {
            Arc::new(NonInteractivePrompter)
        };
        Self::with_deps(
            settings,
            Arc::new(RealCommandRunner),
            prompter,
            Arc::new(SystemClock),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        cmd: Arc<dyn CommandRunner>,
        prompter: Arc<dyn Prompter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = Arc::new(settings);
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            settings,
            cmd,
            prompter,
            clock,
            project_dir,
        }
    }

    /// Use `dir` instead of the current directory for local config.
    pub fn with_project_dir(mut self, dir: PathBuf) -> Self {
        self.project_dir = dir;
        self
    }

    /// Git-backed version queries for the configured repository.
    pub fn version_service(&self) -> VersionService {
        VersionService::new(Arc::clone(&self.cmd), self.settings.repo_dir.clone())
    }
}
