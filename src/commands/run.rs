//! Status agent entry point: configuration, setup and the main loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::{Config, SinkKind};
use crate::core::status::sources::{BatterySource, ClockSource, LayoutSource, RamSource};
use crate::core::status::{BoxedSource, Compositor, PublishSink, Scheduler, LAYOUT_DIRTY};
use crate::platform::{
    block_notifications_during, handshake, install_layout_handler, NanoSleeper, SetxkbmapQuery,
    StdoutSink, XRootSink,
};

/// Execute the status agent
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;

    if matches.get_flag("print-config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    // Before the handshake: the peer may answer right away.
    install_layout_handler().context("Failed to install layout notification handler")?;

    if let Some(peer) = &config.peer {
        handshake(peer).with_context(|| format!("Failed to register with {}", peer))?;
    }

    let sources = build_sources(&config)?;
    let mut compositor = Compositor::new(sources, config.capacity);
    log::info!("Status sources: {}", compositor.source_names().join(", "));

    let mut sink = build_sink(config.sink);

    if matches.get_flag("once") {
        sink.publish(compositor.compose())
            .context("Failed to publish status line")?;
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    // The Ctrl+C watcher thread must not swallow layout notifications.
    block_notifications_during(|| {
        ctrlc::set_handler(move || {
            shutdown_clone.store(true, Ordering::Relaxed);
        })
    })
    .context("Failed to mask layout notifications")?
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let mut scheduler = Scheduler::new(config.period(), config.drift_correction, NanoSleeper);
    log::info!(
        "Publishing every {:?} (drift correction {})",
        scheduler.period(),
        if config.drift_correction { "on" } else { "off" }
    );

    scheduler.run(&mut compositor, &mut sink, &shutdown);

    Ok(())
}

/// Config file (explicit `--config` or the default location) plus CLI
/// overrides, validated.
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    apply_overrides(&mut config, matches);
    config.validate()?;

    Ok(config)
}

pub fn apply_overrides(config: &mut Config, matches: &ArgMatches) {
    if let Some(&period) = matches.get_one::<u64>("period") {
        config.period_ms = period;
    }
    if let Some(&capacity) = matches.get_one::<usize>("capacity") {
        config.capacity = capacity;
    }
    if let Some(&sink) = matches.get_one::<SinkKind>("sink") {
        config.sink = sink;
    }
    if let Some(peer) = matches.get_one::<String>("peer") {
        config.peer = Some(peer.clone());
    }
    if matches.get_flag("no-layout") {
        config.layout = false;
    }
    if matches.get_flag("no-drift-correction") {
        config.drift_correction = false;
    }
}

/// Open every source in display order. Failures here are fatal.
pub fn build_sources(config: &Config) -> Result<Vec<BoxedSource>> {
    let mut sources: Vec<BoxedSource> = Vec::with_capacity(4);

    let ram = RamSource::open(&config.meminfo_path)
        .with_context(|| format!("Failed to set up RAM source from {:?}", config.meminfo_path))?;
    sources.push(Box::new(ram));

    let battery = BatterySource::open(&config.battery_capacity_path, &config.battery_status_path)
        .context("Failed to set up battery source")?;
    sources.push(Box::new(battery));

    if config.layout {
        let layout = LayoutSource::new(Box::new(SetxkbmapQuery::new()), &LAYOUT_DIRTY)
            .context("Failed to query initial keyboard layout")?;
        sources.push(Box::new(layout));
    }

    sources.push(Box::new(ClockSource::new()));

    Ok(sources)
}

pub fn build_sink(kind: SinkKind) -> Box<dyn PublishSink> {
    match kind {
        SinkKind::Xroot => Box::new(XRootSink::new()),
        SinkKind::Stdout => Box::new(StdoutSink::new()),
    }
}
