use clap::{Args, ValueEnum};
use eisenmatrix_core::{MatrixAggregate, PolicyKind};
use std::path::Path;

use super::{load_config, TaskInput};

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Live,
    Analytics,
}

impl From<PolicyArg> for PolicyKind {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Live => PolicyKind::Live,
            PolicyArg::Analytics => PolicyKind::Analytics,
        }
    }
}

#[derive(Args)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: TaskInput,
    /// Classification policy (defaults to the configured one)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,
    /// Print only per-quadrant counters
    #[arg(long)]
    pub stats: bool,
}

pub fn run(args: MatrixArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let now = args.input.now()?;
    let tasks = args.input.load(&config)?;

    let policy = match args.policy {
        Some(kind) => config.policy_for(kind.into()),
        None => config.policy(),
    };
    let state = MatrixAggregate::with_policy(policy).rebuild(&tasks, now)?;

    if args.stats {
        println!("{}", serde_json::to_string_pretty(&state.stats())?);
    } else {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}
