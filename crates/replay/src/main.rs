mod script;

use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use log::info;
use plotpage_core::{PageBehaviorController, PageConfig, SimulatedHost};
use plotpage_protocol::Viewport;

use crate::script::ReplayStep;

const INITIAL_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    scroll_y: 0.0,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: plotpage-replay <charts.json> [events.json] [config.json]");
        std::process::exit(1);
    }

    let charts = std::fs::read(&args[1]).with_context(|| format!("reading {}", args[1]))?;
    let bindings = script::load_charts(&charts)?;

    let steps = match args.get(2) {
        Some(path) => {
            let data = std::fs::read(path).with_context(|| format!("reading {path}"))?;
            script::parse_steps(&data)?
        }
        None => vec![ReplayStep::Load],
    };

    let config = match args.get(3) {
        Some(path) => {
            let data = std::fs::read(path).with_context(|| format!("reading {path}"))?;
            PageConfig::from_json(&data)?
        }
        None => PageConfig::default(),
    };

    info!("replaying {} step(s) over {} chart(s)", steps.len(), bindings.len());

    let mut controller = PageBehaviorController::new(config, bindings);
    let mut host = SimulatedHost::new(INITIAL_VIEWPORT);
    let mut out = BufWriter::new(std::io::stdout().lock());

    for step in steps {
        let event = step.apply(&mut host);
        controller
            .handle(event, &mut host)
            .with_context(|| format!("handling {step:?}"))?;
        for command in host.take_log() {
            serde_json::to_writer(&mut out, &command)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
