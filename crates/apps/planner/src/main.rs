use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use foundation::ids::PlaceId;
use foundation::math::Vec2;
use itinerary::{
    CatalogRecommendationSource, Completion, Recommendation, RecommendationError,
    RecommendationSource, TravelPreferences,
};
use planner::{Command, Planner, PlannerConfig, replay};
use tokio::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive trip planner core")]
struct Args {
    /// JSON config file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run a scripted session with a simulated recommendation generator
    Demo {
        /// Trip length requested from the generator
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Apply a JSON array of commands and print the resulting report
    Replay {
        script: PathBuf,

        /// Stop at the first rejected command
        #[arg(long)]
        strict: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Serves the sample plan after a fixed delay, like a remote generator would.
struct DelayedSource {
    inner: CatalogRecommendationSource,
    delay: Duration,
}

impl RecommendationSource for DelayedSource {
    fn generate(
        &self,
        preferences: &TravelPreferences,
    ) -> impl Future<Output = Result<Recommendation, RecommendationError>> + Send {
        let plan = self.inner.plan_for(preferences);
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            Ok(plan)
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => PlannerConfig::from_path(path).map_err(|e| e.to_string())?,
        None => PlannerConfig::default(),
    };

    match args.command {
        Cmd::Demo { days } => cmd_demo(config, days).await,
        Cmd::Replay { script, strict } => cmd_replay(config, &script, strict),
        Cmd::Config => print_json(&config),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_replay(config: PlannerConfig, script: &Path, strict: bool) -> Result<(), String> {
    let raw = std::fs::read_to_string(script).map_err(|e| format!("read {script:?}: {e}"))?;
    let commands: Vec<Command> =
        serde_json::from_str(&raw).map_err(|e| format!("parse {script:?}: {e}"))?;
    let mut planner = Planner::new(config).map_err(|e| e.to_string())?;
    let report = replay(&mut planner, commands, strict);
    print_json(&report)?;
    if strict && !report.rejected.is_empty() {
        return Err(format!("{} command(s) rejected", report.rejected.len()));
    }
    Ok(())
}

async fn cmd_demo(config: PlannerConfig, days: u32) -> Result<(), String> {
    let source = DelayedSource {
        inner: CatalogRecommendationSource::default(),
        delay: Duration::from_millis(config.recommendation_delay_ms),
    };
    let tick = Duration::from_millis(config.camera.auto_rotate_interval_ms);
    let mut planner = Planner::new(config).map_err(|e| e.to_string())?;
    planner.subscribe(|event| info!(?event, "planner event"));

    let err = |e: foundation::error::PlannerError| e.to_string();
    planner.toggle_rotate().map_err(err)?;
    planner.begin_pointer_drag(Vec2::new(150.0, 150.0));
    planner.update_pointer_drag(Vec2::new(190.0, 130.0));
    planner.end_pointer_drag();
    planner.select_location(&PlaceId::new("3")).map_err(err)?;
    planner.add_selected_to_itinerary().map_err(err)?;

    planner.open_ai_planner();
    let preferences = TravelPreferences {
        duration_days: days,
        ..TravelPreferences::default()
    };
    let ticket = planner
        .submit_preferences(preferences.clone())
        .map_err(err)?;

    // The session keeps animating while the generator runs.
    let generation = source.generate(&preferences);
    tokio::pin!(generation);
    let mut ticker = tokio::time::interval(tick);
    let mut last = Instant::now();
    let result = loop {
        tokio::select! {
            result = &mut generation => break result,
            _ = ticker.tick() => {
                let now = Instant::now();
                planner.advance(now - last);
                last = now;
            }
        }
    };

    match planner.deliver_recommendation(ticket, result) {
        Completion::Applied => {
            let summary = planner.import_ready_recommendation().map_err(err)?;
            info!(added = summary.added.len(), "sample plan imported");
        }
        other => info!(?other, "recommendation not applied"),
    }

    planner.shutdown();
    print_json(&planner.snapshot())
}
