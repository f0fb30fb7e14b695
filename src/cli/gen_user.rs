use anyhow::{bail, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::{AccountInfo, TestDataGenerator};

#[derive(Args, Clone, Debug)]
pub struct GenUserArgs {
    /// Number of users to generate
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

pub async fn cmd_gen_user(args: GenUserArgs) -> Result<()> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }

    let users: Vec<AccountInfo> = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..args.count)
                .map(|_| TestDataGenerator::user_with(&mut rng))
                .collect()
        }
        None => (0..args.count).map(|_| TestDataGenerator::user()).collect(),
    };

    let output = if users.len() == 1 {
        serde_json::to_string_pretty(&users[0])?
    } else {
        serde_json::to_string_pretty(&users)?
    };
    println!("{}", output);
    Ok(())
}
