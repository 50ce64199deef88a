//! Example: the dangerous property
//!
//! Runs the announcer lesson twice: on a real background pool, where the
//! second announcement may name either Taylor Swift or Kanye West, and on a
//! stepped executor, where the interleaving is fixed.
//!
//! ```text
//! RUST_LOG=idiomkit=debug cargo run --example dangerous_property
//! ```

use std::sync::Arc;

use idiomkit::announcer::StdoutSink;
use idiomkit::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AnnouncerConfig::default();

    println!("On a background pool:");
    let pool = Arc::new(BackgroundPool::new(&config)?);
    let lines = run_lesson(pool, &config)?;
    print_lines(&lines);

    println!("\nOn a stepped executor:");
    let lines = run_lesson(SteppedExecutor::new(), &config)?;
    print_lines(&lines);

    println!("\nWith a snapshot taken at announce time:");
    let executor = SteppedExecutor::new();
    let signal = Arc::new(CompletionSignal::new());
    let mut announcer = SnapshotAnnouncer::new(
        executor.clone(),
        Arc::clone(&signal),
        Arc::new(StdoutSink),
        &config,
    );
    announcer.set_announcer("Taylor Swift");
    announcer.announce();
    announcer.set_announcer("Kanye West");
    executor.run_until_stalled();
    signal.wait_timeout(config.signal_timeout)?;

    Ok(())
}

fn run_lesson<S: Spawner>(spawner: S, config: &AnnouncerConfig) -> Result<Vec<String>> {
    let sink = RecordingSink::new();
    let announcer = SharedAnnouncer::new(
        spawner,
        Arc::new(CompletionSignal::new()),
        Arc::new(TeeSink::new(sink.clone())),
        config,
    );
    let mut driver = ScenarioDriver::new(announcer, sink, config);
    Ok(driver.run(&canonical::dangerous_property_lesson())?.lines)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("   {line}");
    }
}
