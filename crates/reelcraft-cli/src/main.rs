//! CLI binary for composing short-video timelines from media analyses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use reelcraft_artifacts::AnalysisInput;
use reelcraft_gen::{DynGenerator, OpenAiGenerator};
use reelcraft_pipeline::{covered_duration, Orchestrator, RunEvent, RunInput};

#[derive(Parser)]
#[command(
    name = "reelcraft",
    version,
    about = "Generative short-video composer over analyzed media"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a timeline from an analysis JSON file
    Run {
        /// Path to the analysis JSON file
        analysis: PathBuf,

        /// Target duration in seconds
        #[arg(short, long)]
        duration: u32,

        /// Editorial instruction steering the story (audience, emphasis)
        #[arg(short, long, default_value = "")]
        instruction: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Model name (default: gpt-4o)
        #[arg(long)]
        model: Option<String>,

        /// API base URL override
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show information about an analysis JSON file
    Inspect {
        /// Path to the analysis JSON file
        analysis: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            analysis,
            duration,
            instruction,
            output,
            model,
            base_url,
        } => {
            cmd_run(
                &analysis,
                duration,
                instruction,
                output.as_deref(),
                model,
                base_url,
            )
            .await?;
        }
        Commands::Inspect { analysis } => {
            cmd_inspect(&analysis)?;
        }
    }

    Ok(())
}

fn load_analysis(path: &std::path::Path) -> anyhow::Result<AnalysisInput> {
    let source = std::fs::read_to_string(path)?;
    let analysis: AnalysisInput = serde_json::from_str(&source)?;
    Ok(analysis)
}

fn cmd_inspect(path: &std::path::Path) -> anyhow::Result<()> {
    let analysis = load_analysis(path)?;

    println!("Images:   {}", analysis.images.len());
    println!("Audio:    {}", analysis.audio.len());
    println!("Segments: {}", analysis.segments.len());

    if let Some(image) = analysis.first_image() {
        println!("First image: {image}");
    }
    if let Some(audio) = analysis.first_audio() {
        println!("First audio: {audio}");
    }
    if !analysis.extra.is_empty() {
        let mut keys: Vec<_> = analysis.extra.keys().cloned().collect();
        keys.sort();
        println!("Extra keys: {}", keys.join(", "));
    }

    Ok(())
}

async fn cmd_run(
    path: &std::path::Path,
    duration: u32,
    instruction: String,
    output: Option<&std::path::Path>,
    model: Option<String>,
    base_url: Option<String>,
) -> anyhow::Result<()> {
    let analysis = load_analysis(path)?;
    tracing::debug!(
        images = analysis.images.len(),
        audio = analysis.audio.len(),
        segments = analysis.segments.len(),
        "analysis loaded"
    );

    let mut generator = OpenAiGenerator::from_env()?;
    if let Some(model) = model {
        generator = generator.with_model(model);
    }
    if let Some(url) = base_url {
        generator = generator.with_base_url(url);
    }

    let orchestrator = Orchestrator::new(DynGenerator::new(generator));

    // Mirror run progress to the console while the run executes.
    let mut events = orchestrator.events().subscribe();
    let progress = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                RunEvent::StageCompleted { stage, duration_ms } => {
                    println!("  {stage} done ({duration_ms} ms)");
                }
                RunEvent::GateChecked {
                    accepted,
                    overall_score,
                    verdict,
                } => {
                    let outcome = if accepted { "accepted" } else { "rejected" };
                    println!("  quality gate: {outcome} (score {overall_score}, {verdict})");
                }
                RunEvent::TimelineRepaired { action } => {
                    println!("  repair applied: {action}");
                }
                RunEvent::RunCompleted { duration_ms, .. } => {
                    println!("Run completed in {duration_ms} ms");
                    break;
                }
                RunEvent::RunFailed { error, .. } => {
                    eprintln!("Run failed: {error}");
                    break;
                }
                _ => {}
            }
        }
    });

    println!("Composing {duration}s timeline from {}", path.display());
    let result = orchestrator
        .run(&RunInput {
            analysis,
            duration,
            instruction,
        })
        .await;
    let _ = progress.await;
    let run = result?;

    println!("Story: {}", run.timeline.story_summary);
    println!(
        "Items: {} covering {:.1}s",
        run.timeline.timeline.len(),
        covered_duration(&run.timeline)
    );

    let json = serde_json::to_string_pretty(&run)?;
    match output {
        Some(out) => {
            std::fs::write(out, json)?;
            println!("Output written to {}", out.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
