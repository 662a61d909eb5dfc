//! Read and inspect save files from the file repository
//!
//! Deserializes save_{nonce}.bin files and displays their contents.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use saga_runtime::{FileStateRepository, SaveGame, StateRepository};

use crate::dirs;

/// Read and inspect save files
#[derive(Parser)]
pub struct ReadState {
    /// Nonce of the save to read (e.g., 0, 12, 40)
    /// If not provided, reads the most recent save
    #[arg(value_name = "NONCE")]
    nonce: Option<u64>,

    /// Custom save directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// List available nonces instead of reading a save
    #[arg(short, long)]
    list: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Summary view (day, region, resources, open event)
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl ReadState {
    pub fn execute(self) -> Result<()> {
        let dir = self.dir.unwrap_or_else(dirs::save_dir);
        if !dir.exists() {
            anyhow::bail!("Save directory not found: {}", dir.display());
        }
        let repo = FileStateRepository::new(&dir)
            .with_context(|| format!("Failed to open save directory: {}", dir.display()))?;

        if self.list {
            let nonces = repo.list_nonces()?;
            println!(
                "{} {} ({} saves)",
                style("Save Directory:").bold().cyan(),
                dir.display(),
                nonces.len()
            );
            for nonce in nonces {
                println!("  {}", nonce);
            }
            return Ok(());
        }

        let save = match self.nonce {
            Some(nonce) => repo.load(nonce)?.with_context(|| {
                format!(
                    "Save {} not found\n\nHint: run with --list to see saves in {}",
                    nonce,
                    dir.display()
                )
            })?,
            None => repo
                .load_latest()?
                .with_context(|| format!("No saves found in {}", dir.display()))?,
        };

        let path = repo.save_path(save.nonce());
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        // Print header
        println!("{} {}", style("Save File:").bold().cyan(), path.display());
        println!(
            "{} {}",
            style("File Size:").bold().cyan(),
            format_bytes(size)
        );
        println!("{} {}", style("Nonce:").bold().cyan(), save.nonce());
        println!();

        // Output based on format
        match self.format {
            OutputFormat::Summary => print_summary(&save),
            OutputFormat::Json => print_json(&save)?,
            OutputFormat::Debug => println!("{:#?}", save),
        }

        Ok(())
    }
}

fn print_summary(save: &SaveGame) {
    let state = &save.state;
    println!("{}", style("=== Campaign Summary ===").bold().green());
    println!();

    println!("{}", style("Clock:").bold().yellow());
    println!("  Seed: {}", state.seed);
    println!("  Day: {}", state.day());
    println!("  Region: {}", state.world.current_region);
    println!("  Pressure: {}", state.world.pressure.value);
    println!("  Resonance: {}", state.world.resonance);
    println!();

    println!("{}", style("Hero:").bold().yellow());
    println!("  Hero: {}", state.player.hero);
    println!("  Balance: {}", state.player.balance);
    for (resource, amount) in state.player.resources.iter() {
        println!("  {}: {}", resource, amount);
    }
    println!("  Cards: {}", state.player.cards.live_count());
    if !state.player.curses.is_empty() {
        let curses: Vec<_> = state.player.curses.iter().map(String::as_str).collect();
        println!("  Curses: {}", curses.join(", "));
    }
    println!();

    println!("{}", style("Narrative:").bold().yellow());
    if let Some(event) = &state.events.active_event {
        println!("  Open Event: {}", event);
    }
    if let Some(challenge) = &state.events.active_challenge {
        println!(
            "  Open Challenge: {} ({}, {})",
            challenge.event, challenge.kind, challenge.phase
        );
    }
    if let Some(combat) = &save.combat {
        println!("  In Combat: {}", combat.enemy);
    }
    println!("  Completed Events: {}", state.events.completed.len());
    for (quest, progress) in &state.quests.quests {
        println!("  Quest {}: {}", quest, progress.status);
    }
    println!();

    match &state.ending {
        Some(ending) => println!(
            "{} {} on day {} ({})",
            style("Ended:").bold().red(),
            ending.kind,
            ending.day,
            ending.reason
        ),
        None => println!("{}", style("Campaign in progress").bold().green()),
    }
}

fn print_json(save: &SaveGame) -> Result<()> {
    let json = serde_json::to_string_pretty(save).context("Failed to serialize save to JSON")?;
    println!("{}", json);
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
