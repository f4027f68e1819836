/// Plays two tones on the default output without a UI
/// Left 220 Hz, right 330 Hz, then a retune, a volume fade, and a clean teardown
use std::{thread, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use duotone::{EngineConfig, StereoEngine};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let mut engine = StereoEngine::open(&EngineConfig::default().default_volume(0.3))
        .wrap_err("failed to open stereo output")?;

    println!("=== Headless Demo ===\n");

    engine.set_left_frequency(220.0);
    engine.set_right_frequency(330.0);
    engine.start_both();
    println!("Playing L=220 Hz, R=330 Hz");
    thread::sleep(Duration::from_secs(2));

    println!("Retuning left to 275 Hz while it plays");
    engine.set_left_frequency(275.0);
    thread::sleep(Duration::from_secs(2));

    println!("Fading out");
    for step in (0..=10).rev() {
        engine.set_volumes(0.03 * step as f32);
        thread::sleep(Duration::from_millis(100));
    }

    if engine.is_faulted() {
        println!("Output device reported an error during playback");
    }

    engine.end_session();
    println!("\nSession ended");
    Ok(())
}
