//! studyplan — syllabus extraction and adaptive study-plan generation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studyplan_core::PlannerConfig;
use studyplan_ingest::{load_text, sample_outline, OutlineExtractor, DISCIPLINES};
use studyplan_runtime::Planner;

mod input;

use input::PlanInput;

fn print_usage() {
    println!("studyplan — adaptive study-plan generator");
    println!();
    println!("Usage: studyplan <command> [args]");
    println!();
    println!("Commands:");
    println!("  extract <file> [discipline]   Print the syllabus outline as JSON");
    println!("  plan <input.json>             Generate a study plan");
    println!("  sample                        Print the built-in sample outline");
    println!("  disciplines                   List known exam disciplines");
    println!("  help                          Show this help message");
    println!();
    println!("Environment:");
    println!("  STUDYPLAN_CONFIG              Planner config file (JSON)");
    println!("  STUDYPLAN_*                   Per-field config overrides");
    println!("  RUST_LOG                      Log filter (default: info)");
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config() -> anyhow::Result<PlannerConfig> {
    let path = std::env::var("STUDYPLAN_CONFIG").ok().map(PathBuf::from);
    Ok(PlannerConfig::load(path.as_deref())?)
}

fn run_extract(file: &Path, discipline: &str, config: &PlannerConfig) -> anyhow::Result<()> {
    let text = load_text(file)?;
    let outline = OutlineExtractor::new(discipline)
        .with_min_subtopic_chars(config.min_subtopic_chars)
        .extract(&text);
    print_json(&outline)
}

fn run_plan(input_path: &Path, config: PlannerConfig) -> anyhow::Result<()> {
    let input = PlanInput::load(input_path)?;
    let base_dir = input_path.parent().unwrap_or_else(|| Path::new("."));

    let planner = Planner::new(config);
    let inventory = input.inventory(&planner, base_dir)?;
    let generated = planner
        .generate(
            &input.user_id,
            &input.request,
            &input.preferences,
            &inventory,
            &input.history,
        )
        .context("Plan generation failed")?;

    if generated.is_truncated() {
        info!(
            "{} of {} topics did not fit the window",
            generated.unscheduled_topics.len(),
            generated.allocations.len()
        );
    }
    print_json(&generated)
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries JSON only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "extract" => {
            if args.len() < 3 {
                eprintln!("Usage: studyplan extract <file> [discipline]");
                std::process::exit(1);
            }
            let discipline = args.get(3).map(String::as_str).unwrap_or("");
            run_extract(Path::new(&args[2]), discipline, &load_config()?)
        }
        "plan" => {
            if args.len() < 3 {
                eprintln!("Usage: studyplan plan <input.json>");
                std::process::exit(1);
            }
            run_plan(Path::new(&args[2]), load_config()?)
        }
        "sample" => print_json(&sample_outline()),
        "disciplines" => {
            for discipline in DISCIPLINES {
                println!("{}", discipline);
            }
            Ok(())
        }
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}. Use 'studyplan help' for usage.", args[1]);
            std::process::exit(1);
        }
    }
}
