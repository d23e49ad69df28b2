//! Scripted design session.
//!
//! Runs studio commands from a script file and/or `--step` flags against a
//! fresh session, then prints the final state. Rejected commands are reported
//! and the session carries on.

use crate::cli::common::{format_price, load_catalog, load_config, print_json, CliError, CliResult};
use crate::services::{parse_script, DesignStudio, StudioCommand, StudioSnapshot};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Run design commands through a fresh studio session
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Script with one command per line (`#` starts a comment)
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Command to run after the script, e.g. `--step "garment hoodie"` (repeatable)
    #[arg(long = "step", value_name = "CMD")]
    pub steps: Vec<String>,

    /// Catalog file to read instead of the configured one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct StepReport {
    /// Script line, absent for `--step` commands
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    command: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<String>,
    total: u32,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    steps: Vec<StepReport>,
    snapshot: StudioSnapshot,
}

impl SessionArgs {
    /// Execute the session command
    pub fn execute(&self) -> CliResult<()> {
        let commands = self.collect_commands()?;

        let config = load_config()?;
        let catalog = load_catalog(&config, self.catalog.as_deref())?;
        let mut studio = config
            .open_studio(catalog)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let steps: Vec<StepReport> = commands
            .iter()
            .map(|(line, command)| run_step(&mut studio, *line, command))
            .collect();

        if self.json {
            return print_json(&SessionResponse {
                steps,
                snapshot: studio.snapshot(),
            });
        }

        for step in &steps {
            let prefix = step
                .line
                .map_or_else(String::new, |line| format!("{line:>3}: "));
            match (&step.action, &step.notice) {
                (Some(action), _) => {
                    println!("{prefix}{action}  [{}]", format_price(step.total));
                }
                (None, Some(notice)) => println!("{prefix}notice: {notice}"),
                (None, None) => {}
            }
        }
        if !steps.is_empty() {
            println!();
        }
        print_snapshot(&studio);

        Ok(())
    }

    /// Script commands first, then `--step` commands in order.
    fn collect_commands(&self) -> CliResult<Vec<(Option<usize>, StudioCommand)>> {
        let mut commands = Vec::new();

        if let Some(path) = &self.script {
            let script = fs::read_to_string(path).map_err(|e| {
                CliError::io(format!("Failed to read script {}: {e}", path.display()))
            })?;
            let parsed = parse_script(&script)
                .map_err(|e| CliError::validation(format!("Invalid script: {e:#}")))?;
            commands.extend(parsed.into_iter().map(|(line, cmd)| (Some(line), cmd)));
        }

        for step in &self.steps {
            let command = step
                .parse::<StudioCommand>()
                .map_err(|e| CliError::validation(format!("Invalid step '{step}': {e}")))?;
            commands.push((None, command));
        }

        Ok(commands)
    }
}

fn run_step(studio: &mut DesignStudio, line: Option<usize>, command: &StudioCommand) -> StepReport {
    let (action, notice) = match studio.apply(command) {
        Ok(entry) => (Some(entry.action), None),
        Err(err) => {
            warn!(%command, "{err}");
            (None, Some(err.to_string()))
        }
    };

    StepReport {
        line,
        command: command.to_string(),
        ok: action.is_some(),
        action,
        notice,
        total: studio.total_price(),
    }
}

fn print_snapshot(studio: &DesignStudio) {
    let selection = studio.selection();
    let catalog = studio.catalog();
    let garment_name = catalog
        .garment(&selection.garment_id)
        .map_or(selection.garment_id.as_str(), |g| g.name.as_str());
    let fabric_name = catalog
        .fabric(&selection.fabric_id)
        .map_or(selection.fabric_id.as_str(), |f| f.name.as_str());

    println!("Design:");
    println!("  Garment:    {garment_name}");
    println!("  Fabric:     {fabric_name}");
    println!("  Region:     {}", selection.region_id);
    if let Some(color) = &selection.color {
        println!("  Color:      {color}");
    }
    for (region, pattern) in &selection.region_patterns {
        println!("  Pattern:    {pattern} on {region}");
    }
    for placement in &selection.placements {
        println!("  Placed:     {} on {}", placement.reference, placement.region);
    }
    println!("  Complexity: {:.2}", selection.complexity_score);
    println!("  Total:      {}", format_price(studio.total_price()));
    println!();

    let history = studio.history();
    println!("History ({} entries):", history.len());
    for (idx, entry) in history.entries().iter().enumerate() {
        let marker = if history.cursor() == Some(idx) { '>' } else { ' ' };
        println!("  {marker} {}", entry.action);
    }
}
