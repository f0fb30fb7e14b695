use anyhow::Result;

use super::config::cmd_config;
use super::env::CliArgs;
use super::gen_user::cmd_gen_user;
use super::probe::cmd_probe;
use crate::cli::commands::Commands;
use crate::config::LoadedConfig;

pub async fn dispatch(cli: &CliArgs, loaded: &LoadedConfig) -> Result<()> {
    match cli.command.clone() {
        Commands::Config(args) => cmd_config(args, loaded).await,
        Commands::GenUser(args) => cmd_gen_user(args).await,
        Commands::Probe(args) => cmd_probe(args, &loaded.config).await,
    }
}
