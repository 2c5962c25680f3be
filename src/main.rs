//! snapcrop CLI - capture a photo, store it and crop it to a square.
//!
//! Provides both human-friendly and robot (JSON) output.
#![forbid(unsafe_code)]

use std::io;

use clap::{CommandFactory, Parser};

use snapcrop::cli::{CaptureArgs, Cli, Commands, CompletionsArgs, ConfigArgs};
use snapcrop::config::{AppConfig, default_config_path, load_config};
use snapcrop::controller::{CaptureController, run_workflow};
use snapcrop::error::{CaptureError, Result};
use snapcrop::host::DesktopHost;
use snapcrop::logging::init_logging;
use snapcrop::output::{OutputMode, VersionInfo};
use snapcrop::state::WorkflowState;
use snapcrop::storage::{ImageStore, StorageRoot};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        OutputMode::from_cli(&cli).into_output().error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Capture(args) => cmd_capture(cli, args),
        Commands::History => cmd_history(cli),
        Commands::Config(args) => cmd_config(cli, args),
        Commands::Version => cmd_version(cli),
        Commands::Completions(args) => cmd_completions(args),
    }
}

fn image_store(config: &AppConfig) -> ImageStore {
    let root = config
        .storage_root_or_default()
        .map_or_else(StorageRoot::unmounted, StorageRoot::new);
    ImageStore::new(root, config.app_id.clone())
}

// === Commands ===

fn cmd_capture(cli: &Cli, args: &CaptureArgs) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?.config;
    if let Some(source) = &args.source {
        config.camera_source = Some(source.clone());
    }
    if let Some(preview) = &args.preview {
        config.preview_path = Some(preview.clone());
    }
    if let Some(root) = &args.storage_root {
        config.storage_root = Some(root.clone());
    }

    let mut host = DesktopHost::new(&config, OutputMode::from_cli(cli).into_output());
    if args.yes {
        host = host.assume_yes();
    }

    let mut controller = CaptureController::new(host, image_store(&config));
    run_workflow(&mut controller);

    let outcome = controller.outcome();
    controller.host().output().outcome(&outcome);

    match (&outcome.state, outcome.denied) {
        (WorkflowState::Displayed, _) => Ok(()),
        (WorkflowState::Finished, Some(capability)) => {
            Err(CaptureError::PermissionDenied { capability })
        }
        (state, _) => Err(CaptureError::WorkflowIncomplete {
            state: state.name().to_string(),
        }),
    }
}

fn cmd_history(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?.config;
    let files = image_store(&config).list()?;
    OutputMode::from_cli(cli).into_output().history(&files);
    Ok(())
}

fn cmd_config(cli: &Cli, args: &ConfigArgs) -> Result<()> {
    let loaded = load_config(cli.config.as_deref())?;
    if args.path {
        let path = loaded.path.or_else(default_config_path).ok_or_else(|| {
            CaptureError::ConfigInvalid("Could not determine config directory".to_string())
        })?;
        println!("{}", path.display());
        return Ok(());
    }
    OutputMode::from_cli(cli)
        .into_output()
        .config(&loaded.config, loaded.path.as_deref());
    Ok(())
}

#[allow(clippy::unnecessary_wraps)] // Consistent return type with other commands
fn cmd_version(cli: &Cli) -> Result<()> {
    let info = VersionInfo {
        version: build_info::VERSION,
        git_sha: build_info::git_sha(),
        build_timestamp: build_info::build_timestamp(),
        rustc: build_info::rustc_semver(),
        target: build_info::target(),
    };
    OutputMode::from_cli(cli).into_output().version_info(&info);
    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(args.shell, &mut Cli::command(), "snapcrop", &mut io::stdout());
    Ok(())
}
