use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::LoadedConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the resolved configuration
    Show,

    /// Print the config file path that was consulted
    Path,
}

pub async fn cmd_config(args: ConfigArgs, loaded: &LoadedConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let source = if loaded.path.exists() {
                loaded.path.display().to_string()
            } else {
                "defaults".to_string()
            };
            println!("Current configuration ({}):", source);
            println!("{}", serde_yaml::to_string(&loaded.config)?);
        }
        ConfigAction::Path => {
            println!("{}", loaded.path.display());
        }
    }
    Ok(())
}
