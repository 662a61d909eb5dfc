//! Run a campaign headless against a content pack
//!
//! Plays either a scripted list of actions (JSON) or a simple autopilot and
//! prints every committed outcome. Stops at the first rejected action.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use console::style;

use saga_content::{ContentFactory, ContentPack};
use saga_core::{
    ActionOutcome, CombatCommand, CombatSnapshot, ConflictOutcome, ContentOracle, GameAction,
    GameRuntimeState,
};
use saga_runtime::{ActionProvider, Runtime, RuntimeConfig, ScriptedActionProvider};

/// Run a campaign headless
#[derive(Parser)]
pub struct Simulate {
    /// Content pack directory (defaults to the bundled Crossroads pack)
    #[arg(short, long, value_name = "DIR")]
    pack: Option<PathBuf>,

    /// Campaign seed (random if not provided)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with an array of actions to play (autopilot if not provided)
    #[arg(short, long, value_name = "FILE")]
    actions: Option<PathBuf>,

    /// Maximum number of steps to run
    #[arg(long, default_value_t = 50)]
    steps: u64,

    /// Persist save games to this directory
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per committed action
    Summary,
    /// One JSON outcome per line
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start tokio runtime")?;
        rt.block_on(self.run())
    }

    async fn run(self) -> Result<()> {
        let factory = match &self.pack {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let pack = Arc::new(
            factory
                .load_pack()
                .with_context(|| format!("Failed to load pack {}", factory.data_dir().display()))?,
        );

        let config = RuntimeConfig {
            seed: self.seed,
            save_dir: self.save_dir.clone(),
            ..RuntimeConfig::default()
        };
        let builder = Runtime::builder().config(config).content(pack.clone());
        let builder = match &self.actions {
            Some(path) => builder.provider(load_script(path)?),
            None => builder.provider(Autopilot::new(pack)),
        };
        let mut runtime = builder.build()?;

        let mut committed = 0;
        while committed < self.steps {
            match runtime.step().await {
                Ok(Some(outcome)) => {
                    committed += 1;
                    self.print_outcome(&outcome)?;
                }
                Ok(None) => break,
                Err(e) if e.is_rejection() => {
                    println!("{} {}", style("Rejected:").bold().red(), e);
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        let state = runtime.handle().query_state().await?;
        runtime.shutdown().await?;

        if matches!(self.format, OutputFormat::Summary) {
            println!();
            println!(
                "{} {} actions, day {}, region {}",
                style("Done:").bold().green(),
                committed,
                state.day(),
                state.world.current_region
            );
            if let Some(ending) = &state.ending {
                println!(
                    "{} {} ({})",
                    style("Ending:").bold().yellow(),
                    ending.kind,
                    ending.reason
                );
            }
        }
        Ok(())
    }

    fn print_outcome(&self, outcome: &ActionOutcome) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(outcome)?);
            }
            OutputFormat::Summary => {
                let mut line = format!(
                    "{} day {:>3} {:?} ({} changes)",
                    style(format!("#{:<4}", outcome.nonce)).cyan(),
                    outcome.delta.day,
                    outcome.delta.action,
                    outcome.delta.changes.len()
                );
                if let Some(event) = &outcome.event {
                    line.push_str(&format!(" event={}", event));
                }
                if let Some(challenge) = &outcome.challenge {
                    line.push_str(&format!(" challenge={:?}", challenge));
                }
                if let Some(result) = &outcome.combat_result {
                    line.push_str(&format!(" combat={}", result.outcome));
                }
                if let Some(ending) = &outcome.ending {
                    line.push_str(&format!(" ending={}", ending.kind));
                }
                println!("{}", line);
            }
        }
        Ok(())
    }
}

fn load_script(path: &PathBuf) -> Result<ScriptedActionProvider> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read actions file: {}", path.display()))?;
    let actions: Vec<GameAction> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse actions file: {}", path.display()))?;
    Ok(ScriptedActionProvider::new(actions))
}

/// Naive player: fights, answers parked challenges, takes the first option
/// and otherwise alternates exploring with travelling.
struct Autopilot {
    pack: Arc<ContentPack>,
}

impl Autopilot {
    fn new(pack: Arc<ContentPack>) -> Self {
        Self { pack }
    }

    fn next_region(&self, state: &GameRuntimeState) -> Option<String> {
        let region = self.pack.content.region(&state.world.current_region)?;
        let known: Vec<_> = region
            .neighbors
            .iter()
            .filter(|id| {
                state
                    .world
                    .regions
                    .get(id.as_str())
                    .is_some_and(|r| r.discovered)
            })
            .collect();
        if known.is_empty() {
            return None;
        }
        let index = (state.nonce / 2) as usize % known.len();
        Some(known[index].clone())
    }
}

#[async_trait]
impl ActionProvider for Autopilot {
    async fn provide_action(
        &self,
        state: &GameRuntimeState,
        combat: Option<&CombatSnapshot>,
    ) -> saga_runtime::Result<Option<GameAction>> {
        if combat.is_some() {
            return Ok(Some(GameAction::Combat(CombatCommand::Strike { card: None })));
        }
        if state.events.active_challenge.is_some() {
            return Ok(Some(GameAction::ResolveChallenge(ConflictOutcome::Partial)));
        }
        if state.events.active_event.is_some() {
            return Ok(Some(GameAction::ChooseEventOption { choice: 0 }));
        }
        if state.player.health() <= self.pack.config.world.rest_heal {
            return Ok(Some(GameAction::Rest));
        }

        let action = match self.next_region(state) {
            Some(region) if state.nonce % 2 == 1 => GameAction::Travel { region },
            _ => GameAction::Explore,
        };
        Ok(Some(action))
    }
}
