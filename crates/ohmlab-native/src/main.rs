//! OhmLab command-line front-end.
//!
//! Evaluates the circuit for the given inputs, logs the readouts and writes
//! the SVG diagram to a file or stdout.

use anyhow::{Context, Result};
use clap::Parser;
use ohmlab_core::diagram::render_svg;
use ohmlab_core::{
    Calibration, CapabilityProbe, CircuitInputs, DeviceCapabilities, PerformanceMode, Readouts,
    Settings, Simulator, StaticProbe, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE,
};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ohmlab-native")]
#[command(author, version, about = "Evaluate an Ohm's law circuit and export its diagram", long_about = None)]
struct Cli {
    /// Battery voltage in volts (0 to 24)
    #[arg(short, long, default_value_t = DEFAULT_VOLTAGE)]
    voltage: f64,

    /// Resistance in ohms (1 to 100)
    #[arg(short, long, default_value_t = DEFAULT_RESISTANCE)]
    resistance: f64,

    /// Performance mode: auto, low or high
    #[arg(long, default_value = "auto")]
    mode: PerformanceMode,

    /// Logical cores reported for `auto` mode
    #[arg(long)]
    cores: Option<u32>,

    /// Device memory in GB reported for `auto` mode
    #[arg(long)]
    memory_gb: Option<f64>,

    /// User agent string reported for `auto` mode
    #[arg(long, default_value = "")]
    user_agent: String,

    /// Disable the smoke plume
    #[arg(long)]
    no_smoke: bool,

    /// Disable bloom
    #[arg(long)]
    no_bloom: bool,

    /// Use separate power scales for heat, smoke and bloom
    #[arg(long)]
    per_view_calibration: bool,

    /// Reject out-of-range inputs instead of clamping them
    #[arg(long)]
    strict: bool,

    /// Write the SVG here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,
}

fn build_simulator(cli: &Cli) -> Result<Simulator> {
    let inputs = if cli.strict {
        CircuitInputs::try_new(cli.voltage, cli.resistance).context("invalid circuit inputs")?
    } else {
        CircuitInputs::new(cli.voltage, cli.resistance)
    };

    let probe = StaticProbe(DeviceCapabilities {
        hardware_concurrency: cli.cores,
        device_memory_gb: cli.memory_gb,
        user_agent: cli.user_agent.clone(),
    });
    let auto_low = probe.capabilities().is_constrained();

    let settings = Settings {
        mode: cli.mode,
        smoke: !cli.no_smoke,
        bloom: !cli.no_bloom,
        calibration: if cli.per_view_calibration {
            Calibration::per_view()
        } else {
            Calibration::default()
        },
    };
    let mut sim = Simulator::new(settings, auto_low);
    sim.set_inputs(inputs);
    Ok(sim)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let sim = build_simulator(&cli)?;
    let snap = sim.snapshot();
    if snap.inputs.voltage != cli.voltage || snap.inputs.resistance != cli.resistance {
        log::warn!(
            "inputs adjusted to {} V, {} Ω",
            snap.inputs.voltage,
            snap.inputs.resistance
        );
    }

    let r = Readouts::new(&snap.inputs, &snap.outputs);
    log::info!("voltage    {}", r.voltage);
    log::info!("resistance {}", r.resistance);
    log::info!("current    {} ({})", r.current, r.milliamps);
    log::info!("power      {}", r.power);
    log::info!(
        "tier {:?}, smoke {}, bloom {:.2}",
        snap.tier,
        if snap.smoke_visible { "on" } else { "off" },
        if snap.bloom_active {
            snap.visuals.bloom_intensity
        } else {
            0.0
        }
    );

    let svg = render_svg(&snap);
    match &cli.out {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
