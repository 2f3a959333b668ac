//! Command line interface.

mod args;
mod check;
mod pull;

pub use args::{Cli, Command, Kind};

use crate::config::FolioConfig;
use crate::debug;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Check { ref paths } => check::run(paths),
        Command::Pull { kind, ref uid, raw } => {
            let config = FolioConfig::load(&cli.config)?;
            match &config.config_path {
                Some(path) => debug!("config"; "using {}", path.display()),
                None => debug!("config"; "no config file, using defaults"),
            }
            pull::run(&config, kind, uid.as_deref(), raw).await
        }
    }
}
