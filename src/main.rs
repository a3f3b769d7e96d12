use anyhow::Context;
use clap::{Parser, Subcommand};
use fitting_room::gesture::SystemClock;
use fitting_room::input::{load_trace, HandTrackingSource, JsonLinesSource, ReplaySource};
use fitting_room::{FittingRoomConfig, FittingRoomSession, SessionEvent};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fitting-room", version, about = "Dwell-click clothing buttons with a tracked hand")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a recorded hand trace (JSON array of samples) on logical time
    Replay {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        trace: PathBuf,
        /// Print events and summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read hand samples as JSON lines from stdin and click in real time
    Live {
        #[arg(short, long)]
        config: PathBuf,
        /// Play a recorded trace at its own pace instead of reading stdin
        #[arg(short, long)]
        trace: Option<PathBuf>,
    },
    /// Print a default configuration
    DefaultConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fitting_room::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            config,
            trace,
            json,
        } => {
            let config = FittingRoomConfig::load(&config)
                .with_context(|| format!("Failed to load config {:?}", config))?;
            let samples = load_trace(&trace)
                .with_context(|| format!("Failed to read trace {:?}", trace))?;

            let outcome = FittingRoomSession::replay(config, &samples)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                for event in &outcome.events {
                    print_event(event);
                }
                println!(
                    "{} clicks, wearing: {}",
                    outcome.summary.clicks,
                    outcome.summary.chosen.join(", ")
                );
            }
        }
        Command::Live { config, trace } => {
            let config = FittingRoomConfig::load(&config)
                .with_context(|| format!("Failed to load config {:?}", config))?;
            let mut session = FittingRoomSession::new(config, Arc::new(SystemClock::new()))?;
            let mut source: Box<dyn HandTrackingSource> = match trace {
                Some(trace) => Box::new(ReplaySource::new(
                    load_trace(&trace).with_context(|| format!("Failed to read trace {:?}", trace))?,
                )),
                None => Box::new(JsonLinesSource::new(tokio::io::BufReader::new(tokio::io::stdin()))),
            };

            tokio::select! {
                result = session.run(source.as_mut(), print_event) => {
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                }
            }

            session.shutdown();
            let summary = session.summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&FittingRoomConfig::default())?);
        }
    }

    Ok(())
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::Clicked {
            region,
            item,
            position,
            newly_chosen,
        } => {
            let note = if *newly_chosen { "" } else { " (already worn)" };
            println!(
                "click  {} at ({:.0}, {:.0}) -> {}{}",
                region, position.x, position.y, item, note
            );
        }
        SessionEvent::Unclicked { region } => println!("unclick {}", region),
    }
}
