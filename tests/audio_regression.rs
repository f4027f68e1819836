use duotone::{
    dsp::amplify::peak, engine::ChannelState, Channel, EngineConfig, StereoEngine, StereoRenderer,
};

const SAMPLE_RATE: f32 = 48_000.0;
const BLOCK: usize = 512;

fn session(volume: f32) -> (StereoEngine, StereoRenderer) {
    StereoEngine::offline(&EngineConfig::default().default_volume(volume), SAMPLE_RATE)
}

/// Render one planar block and return (left, right).
fn render(renderer: &mut StereoRenderer) -> (Vec<f32>, Vec<f32>) {
    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];
    renderer.render_block(&mut left, &mut right);
    (left, right)
}

/// Count upward zero crossings, a rough frequency estimate for a clean sine.
fn rising_crossings(signal: &[f32]) -> usize {
    signal
        .windows(2)
        .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
        .count()
}

#[test]
fn start_reports_requested_frequency_across_range() {
    let (mut engine, mut renderer) = session(0.5);

    for f in [0.0, 20.0, 440.0, 12_345.5, 25_000.0] {
        engine.set_left_frequency(f);
        engine.start_left();
        render(&mut renderer);

        assert_eq!(engine.left().effective_frequency(), Some(f));
        assert_eq!(renderer.left().source_frequency(), Some(f));
    }
}

#[test]
fn left_only_session() {
    let (mut engine, mut renderer) = session(1.0);
    engine.set_left_frequency(440.0);
    engine.start_left();

    assert_eq!(engine.left().state(), ChannelState::Running);
    assert_eq!(engine.left().effective_frequency(), Some(440.0));
    assert_eq!(engine.right().state(), ChannelState::Idle);

    let (left, right) = render(&mut renderer);
    assert!(peak(&left) > 0.9);
    assert!(right.iter().all(|&s| s == 0.0));
}

#[test]
fn start_and_stop_both() {
    let (mut engine, mut renderer) = session(1.0);
    engine.set_left_frequency(220.0);
    engine.set_right_frequency(330.0);
    engine.start_both();

    assert_eq!(engine.left().effective_frequency(), Some(220.0));
    assert_eq!(engine.right().effective_frequency(), Some(330.0));

    // One second of audio: crossings approximate frequency
    let mut left = vec![0.0f32; SAMPLE_RATE as usize];
    let mut right = vec![0.0f32; SAMPLE_RATE as usize];
    renderer.render_block(&mut left, &mut right);
    assert!((rising_crossings(&left) as i64 - 220).abs() <= 1);
    assert!((rising_crossings(&right) as i64 - 330).abs() <= 1);

    engine.stop_both();
    assert_eq!(engine.left().state(), ChannelState::Idle);
    assert_eq!(engine.right().state(), ChannelState::Idle);

    let (left, right) = render(&mut renderer);
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
    assert_eq!(renderer.left().live_sources(), 0);
    assert_eq!(renderer.right().live_sources(), 0);
}

#[test]
fn retune_while_running_does_not_restart() {
    let (mut engine, mut renderer) = session(1.0);
    engine.start_left();
    let (before, _) = render(&mut renderer);

    engine.set_left_frequency(880.0);
    let (after, _) = render(&mut renderer);

    assert!(engine.left().is_running());
    assert_eq!(engine.left().starts(), 1);
    assert_eq!(engine.left().effective_frequency(), Some(880.0));
    assert_eq!(renderer.left().source_frequency(), Some(880.0));

    // No reset to phase zero and no step larger than one 880 Hz sample
    let max_step = std::f32::consts::TAU * 880.0 / SAMPLE_RATE;
    assert!((after[0] - before[BLOCK - 1]).abs() <= max_step + 1e-4);
}

#[test]
fn double_start_keeps_a_single_source() {
    let (mut engine, mut renderer) = session(1.0);
    engine.start_left();
    render(&mut renderer);
    engine.start_left();
    let (left, _) = render(&mut renderer);

    assert_eq!(renderer.left().live_sources(), 1);
    assert!(peak(&left) <= 1.0 + 1e-6, "two stacked tones would exceed unity");
}

#[test]
fn double_stop_is_a_no_op() {
    let (mut engine, mut renderer) = session(1.0);
    engine.stop_right();
    engine.stop_right();
    assert_eq!(engine.right().state(), ChannelState::Idle);

    engine.start_right();
    render(&mut renderer);
    engine.stop_right();
    engine.stop_right();
    let (_, right) = render(&mut renderer);
    assert!(right.iter().all(|&s| s == 0.0));
}

#[test]
fn zero_volume_silences_both_channels() {
    let (mut engine, mut renderer) = session(1.0);
    engine.set_volumes(0.0);
    engine.start_both();

    // First block ramps down from the previous gain
    render(&mut renderer);
    let (left, right) = render(&mut renderer);
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));

    engine.set_volumes(1.0);
    render(&mut renderer);
    let (left, right) = render(&mut renderer);
    assert!(peak(&left) > 0.99);
    assert!(peak(&right) > 0.99);
}

#[test]
fn volume_set_while_idle_applies_to_next_start() {
    let (mut engine, mut renderer) = session(1.0);
    engine.set_volumes(0.0);
    render(&mut renderer);

    engine.start_both();
    let (left, right) = render(&mut renderer);
    assert!(left.iter().chain(right.iter()).all(|&s| s == 0.0));
}

#[test]
fn out_of_range_volume_is_clamped() {
    let (mut engine, _renderer) = session(0.5);

    engine.set_volumes(-0.5);
    assert_eq!(engine.volume(), 0.0);
    assert_eq!(engine.left().volume(), 0.0);
    assert_eq!(engine.right().volume(), 0.0);

    engine.set_volumes(1.5);
    assert_eq!(engine.volume(), 1.0);
    assert_eq!(engine.channel(Channel::Left).volume(), 1.0);
    assert_eq!(engine.channel(Channel::Right).volume(), 1.0);
}

#[test]
fn interleaved_output_keeps_fixed_slots() {
    let (mut engine, mut renderer) = session(1.0);
    engine.start_right();

    let mut data = vec![0.0f32; BLOCK * 2];
    renderer.render_interleaved(&mut data);

    let left_slot = data.iter().step_by(2);
    let right_slot: Vec<f32> = data.iter().skip(1).step_by(2).copied().collect();
    assert!(left_slot.into_iter().all(|&s| s == 0.0));
    assert!(peak(&right_slot) > 0.9);
}
