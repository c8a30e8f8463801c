//! Villager demo: a frightened villager, a relieved one, and a village
//! that takes sides.
//!
//! ```text
//! affect-demo [path/to/affect.toml]
//! RUST_LOG=affect_core=trace affect-demo
//! ```

use std::path::Path;
use std::time::Duration;

use affect_host::config::HostConfig;
use affect_host::scheduler::{self, DecayScheduler};
use affect_host::{hooks, report, systems};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::from_file(Path::new(&path))?,
        None => HostConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.affect.general.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).compact().init();

    info!(version = env!("CARGO_PKG_VERSION"), "affect-demo starting");
    let use_gain = config.host.use_gain_in_reports;
    let mut engine = config.build_engine()?;

    // -- A lone villager hears about the dragon ------------------------------
    engine.create_agent("villager")?;
    engine.create_goal_for_agent("villager", "village destroyed", -0.9, false)?;

    engine.appraise_belief(0.6, Some("villager"), &["village destroyed"], &[1.0], false)?;
    print_report(&engine, use_gain);

    engine.appraise_belief(1.0, Some("villager"), &["village destroyed"], &[-1.0], false)?;
    print_report(&engine, use_gain);

    // -- The village takes sides ---------------------------------------------
    engine.create_agent("mayor")?;
    engine.create_agent("thief")?;
    engine.create_goal_for_agent("villager", "harvest saved", 0.8, false)?;
    engine.create_relation("mayor", "villager", 0.8)?;
    engine.create_relation("thief", "villager", -0.6)?;
    engine.create_relation("mayor", "thief", 0.4)?;

    systems::observe_event(&mut engine, &hooks::on_harm("thief", "villager", "harvest saved", 0.3))?;
    systems::observe_event(&mut engine, &hooks::on_help("mayor", "villager", "harvest saved", 0.5))?;
    print_report(&engine, use_gain);

    // -- Let it all fade -------------------------------------------------------
    let period = Duration::from_millis(config.host.scheduler_period_ms);
    let shared = scheduler::shared(engine);
    let decay = DecayScheduler::start(std::sync::Arc::clone(&shared), period);
    tokio::time::sleep(period * 3).await;
    let ticks = decay.stop().await;
    info!(ticks, "Decay finished");

    let engine = shared.lock();
    print_report(&engine, use_gain);
    println!("{}", report::snapshot_json(&engine)?);
    Ok(())
}

fn print_report(engine: &affect_core::AppraisalEngine, use_gain: bool) {
    for line in report::engine_report(engine, use_gain) {
        println!("{line}");
    }
    println!();
}
