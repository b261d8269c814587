use clap::Args;
use eisenmatrix_core::{Classifier, CoordinateEngine};
use std::path::Path;

use super::{load_config, TaskInput};

#[derive(Args)]
pub struct PlaceArgs {
    #[command(flatten)]
    pub input: TaskInput,
}

pub fn run(args: PlaceArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let now = args.input.now()?;
    let tasks = args.input.load(&config)?;

    let engine = CoordinateEngine::with_classifier(config.frame()?, Classifier::new(config.policy()));
    let placements = engine.evaluate_all(&tasks, now)?;
    println!("{}", serde_json::to_string_pretty(&placements)?);
    Ok(())
}
