pub mod config;
pub mod defaults;
pub mod matrix;
pub mod place;
pub mod ticks;

use chrono::{DateTime, TimeZone, Utc};
use clap::Args;
use eisenmatrix_core::{Config, Task};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Arguments shared by commands that read a task list.
#[derive(Args)]
pub struct TaskInput {
    /// JSON file with an array of tasks ("-" for stdin)
    pub tasks: PathBuf,
    /// Evaluate at this instant (epoch milliseconds) instead of the current time
    #[arg(long)]
    pub now: Option<i64>,
}

impl TaskInput {
    /// Capture the evaluation instant once for the whole command.
    pub fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
        match self.now {
            Some(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| format!("invalid --now timestamp: {ms}").into()),
            None => Ok(Utc::now()),
        }
    }

    /// Read tasks and convert importance to the canonical scale.
    pub fn load(&self, config: &Config) -> Result<Vec<Task>, Box<dyn std::error::Error>> {
        let content = if self.tasks.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.tasks)
                .map_err(|e| format!("cannot read {}: {e}", self.tasks.display()))?
        };

        let mut tasks: Vec<Task> = serde_json::from_str(&content)?;
        for task in &mut tasks {
            task.normalize_importance(config.importance_scale);
        }
        tracing::debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }
}

/// Load the config from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match path {
        Some(p) => Config::load_from(p)?,
        None => Config::load()?,
    };
    Ok(config)
}
