use stream_cam_settings::{
    cli::{CliArgs, Command},
    commands,
    config::Config,
    logging,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse command-line arguments
    let cli_args = CliArgs::parse();

    // Setup logging
    stream_cam_settings::initialize(cli_args.debug, cli_args.log_file.as_deref())?;

    // Load configuration
    let config = Config::load(&cli_args)?;
    logging::log_app_config(&config);

    match &cli_args.command {
        Command::Create { overrides, name, .. } => {
            let settings =
                commands::create_settings(&config, overrides.as_deref(), name.as_deref())
                    .context("Failed to create settings")?;
            println!("{}", commands::render(&settings, &config)?);
        }
        Command::Validate { kind, files } => {
            let checked = commands::validate_files(*kind, files)?;
            info!("All {} document(s) are valid {}", checked, kind);
        }
    }

    Ok(())
}
