use std::path::PathBuf;

use anyhow::Context;
use gridselect::config::types::Config;
use gridselect::replay::{run_trace, Trace};

const USAGE: &str = "usage: gridselect [--config PATH] [--print-default-config] TRACE.json";

fn main() {
    // Handle --print-default-config before any other initialization
    if std::env::args().any(|a| a == "--print-default-config") {
        print!("{}", Config::print_default());
        return;
    }

    env_logger::init();

    if let Err(e) = run() {
        log::error!("Replay failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let mut config_path: Option<PathBuf> = None;
    let mut trace_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if trace_path.is_none() => trace_path = Some(PathBuf::from(arg)),
            _ => anyhow::bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }
    let trace_path = trace_path.context(USAGE)?;

    let config = match &config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    log::info!(
        "Edge threshold: {}px, max speed: {}px/frame, promotion distance: {}px",
        config.auto_scroll.edge_threshold,
        config.auto_scroll.max_speed,
        config.gesture.promotion_distance
    );

    let trace = Trace::load(&trace_path)
        .with_context(|| format!("reading trace {}", trace_path.display()))?;
    let report = run_trace(&trace, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
