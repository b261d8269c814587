use clap::Args;
use eisenmatrix_core::{CoordinateEngine, Placement, Point, Quadrant};
use std::path::Path;

use super::load_config;

#[derive(Args)]
pub struct DefaultsArgs {
    /// Canvas x of the click
    #[arg(long, requires = "y", conflicts_with = "quadrant")]
    pub x: Option<f64>,
    /// Canvas y of the click
    #[arg(long, requires = "x")]
    pub y: Option<f64>,
    /// Quadrant (q1..q4) when no precise point is known
    #[arg(long)]
    pub quadrant: Option<Quadrant>,
}

pub fn run(args: DefaultsArgs, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let engine = CoordinateEngine::new(config.frame()?);

    let placement = match (args.x, args.y, args.quadrant) {
        (Some(x), Some(y), _) => Placement::At(Point::new(x, y)),
        (_, _, Some(quadrant)) => Placement::InQuadrant(quadrant),
        _ => return Err("either --x/--y or --quadrant is required".into()),
    };

    let defaults = engine.compute_defaults_from_position(placement);
    println!("{}", serde_json::to_string_pretty(&defaults)?);
    Ok(())
}
