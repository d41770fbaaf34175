//! Entry point for the Datacore desktop app.

use std::path::PathBuf;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use datacore::components::app::RootApp;
use datacore::{LAUNCH, LaunchOptions};
use datacore_core::DatacoreConfig;
use datacore_core::palette::color_scheme_css;
use datacore_ui::PollIntervals;

#[derive(Parser, Debug)]
#[command(name = "datacore", about = "Datacore life hub")]
struct Args {
    /// Data directory (config.json, settings.json)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep settings in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Initial theme: standard, classic-console, or modern-console
    #[arg(long)]
    theme: Option<String>,

    /// Disable the boot sequence and other motion
    #[arg(long)]
    reduced_motion: bool,
}

fn main() {
    let args = Args::parse();

    // Logging isn't up yet, so config errors go to stderr.
    let config = match DatacoreConfig::load(args.data_dir.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}; using defaults", e);
            DatacoreConfig::default()
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting Datacore (data dir {})", config.data_dir.display());

    let options = LaunchOptions {
        settings_path: (!args.ephemeral).then(|| config.settings_path()),
        initial_theme: args.theme.clone(),
        reduced_motion: args.reduced_motion,
        api_base_url: config.api_base_url.clone(),
        intervals: PollIntervals {
            notifications: config.notification_poll(),
            summary: config.summary_poll(),
            printer: config.printer_poll(),
        },
    };
    if LAUNCH.set(options).is_err() {
        tracing::warn!("Launch options already set");
    }

    let window = WindowBuilder::new()
        .with_title("Datacore")
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        .with_maximized(config.window.maximized);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(window).with_custom_head(format!(
                "<style>{}</style>\n<style>{}</style>",
                datacore_ui::STANDARD_CSS,
                color_scheme_css(),
            )),
        )
        .launch(RootApp);
}
