use clap::Subcommand;

use super::config::ConfigArgs;
use super::gen_user::GenUserArgs;
use super::probe::ProbeArgs;

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Inspect the resolved suite configuration
    Config(ConfigArgs),

    /// Print generated account data as JSON
    GenUser(GenUserArgs),

    /// Resolve a locator chain against a live page
    Probe(ProbeArgs),
}
