//! duotone - terminal control surface for the dual-tone engine
//!
//! Run with: cargo run -- [--device <name>] [--list-devices]
//!
//! Logs go to `duotone.log` in the temp dir; set `RUST_LOG=debug` for channel
//! lifecycle events.

mod app;
mod ui;

use std::fs::File;

use app::ControlSurface;
use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use duotone::{io::list_output_devices, EngineConfig, StereoEngine};

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output device name (defaults to the host's default output)
    #[arg(long)]
    device: Option<String>,

    /// Print the available output devices and exit
    #[arg(long)]
    list_devices: bool,
}

fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("duotone.log");
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let args = Args::parse();

    if args.list_devices {
        for device in list_output_devices().wrap_err("failed to list output devices")? {
            let marker = if device.is_default { " (default)" } else { "" };
            println!("{}{}", device.name, marker);
        }
        return Ok(());
    }

    let mut config = EngineConfig::default();
    if let Some(name) = args.device {
        config = config.output_device(name);
    }
    let engine = StereoEngine::open(&config).wrap_err("failed to open stereo output")?;

    let terminal = ratatui::init();
    let res = ControlSurface::new(engine).run(terminal);
    ratatui::restore();
    res
}
