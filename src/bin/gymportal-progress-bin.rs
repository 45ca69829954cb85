use gymportal_progress_rs::data_backend::{
    diet_parser::current_plan_from_body, parse_body, progress_parser::entries_from_body,
    trend::TrendPolicy,
};
use gymportal_progress_rs::data_types::Metric;
use gymportal_progress_rs::report::{build_plan_msg, build_progress_msg};

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Renders a member's diet plan and progress summary from saved portal
/// responses (`/diet-plans/my`, `/progress/my`).
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON body of the progress list response
    #[arg(short, long, env = "PORTAL_PROGRESS_FILE")]
    progress: Option<PathBuf>,
    /// JSON body of the diet plan list response
    #[arg(short, long, env = "PORTAL_DIET_FILE")]
    diet: Option<PathBuf>,
    /// Member height, enables the BMI line
    #[arg(long, env = "PORTAL_HEIGHT_CM")]
    height_cm: Option<f64>,
    /// Metrics where a decrease counts as improvement{n}Example: weight,waist,hip,body-fat
    #[arg(long, env = "PORTAL_LOWER_IS_BETTER", value_delimiter = ',')]
    lower_is_better: Option<Vec<Metric>>,
    /// Enable verbose logging{n}[SETS env: RUST_LOG=debug]
    #[arg(short, long)]
    verbose: bool,
}

fn read_body(path: &Path) -> Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_body(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env::set_var("RUST_LOG", "debug");
    }

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module(
            "gymportal_progress_rs",
            if env::var(pretty_env_logger::env_logger::DEFAULT_FILTER_ENV).unwrap_or_default()
                == "debug"
            {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        )
        .init();

    if args.progress.is_none() && args.diet.is_none() {
        bail!("nothing to render, pass --progress and/or --diet");
    }

    let policy = match args.lower_is_better {
        Some(metrics) => TrendPolicy::with_lower_is_better(metrics),
        None => TrendPolicy::default(),
    };
    log::debug!("Trend policy: {:?}", policy);

    let mut out = Vec::new();

    if let Some(path) = args.diet.as_ref() {
        let plan = current_plan_from_body(read_body(path)?);
        log::info!("Current diet plan: {:?}", plan.as_ref().and_then(|p| p.title.as_deref()));
        out.push(build_plan_msg(plan.as_ref()));
    }

    if let Some(path) = args.progress.as_ref() {
        let entries = entries_from_body(read_body(path)?);
        log::info!("Loaded {} progress entries", entries.len());
        out.push(build_progress_msg(&entries, &policy, args.height_cm));
    }

    println!("{}", out.join("\n"));
    Ok(())
}
