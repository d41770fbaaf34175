pub mod components;
pub mod http_backend;
pub mod mock_backend;
pub mod pages;
pub mod routes;

use std::path::PathBuf;
use std::sync::OnceLock;

use datacore_ui::PollIntervals;

/// Startup options resolved in `main` and read by the root component.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    /// `None` runs with in-memory settings.
    pub settings_path: Option<PathBuf>,
    pub initial_theme: Option<String>,
    pub reduced_motion: bool,
    /// `None` uses the seeded in-memory back-end.
    pub api_base_url: Option<String>,
    pub intervals: PollIntervals,
}

pub static LAUNCH: OnceLock<LaunchOptions> = OnceLock::new();

pub fn launch_options() -> LaunchOptions {
    LAUNCH.get().cloned().unwrap_or_default()
}
