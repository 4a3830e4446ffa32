//! End-to-end scenarios for the talk-box engine driven like a host would.

use std::f32::consts::PI;

use talkbox::audio::{Diagnostic, InterleavedHost};
use talkbox::{EngineConfig, TalkBox};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 256;

fn engine() -> TalkBox {
    TalkBox::new(EngineConfig::new(SAMPLE_RATE as f64, 10, BLOCK)).unwrap()
}

fn sine(freq: f32, n: usize, amplitude: f32) -> Vec<f32> {
    (0..n)
        .map(|i| amplitude * (2.0 * PI * freq * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

fn interleave(carrier: f32, voice: &[f32]) -> Vec<f32> {
    voice.iter().flat_map(|&v| [carrier, v]).collect()
}

#[test]
fn test_sine_voice_through_host() {
    let mut host = InterleavedHost::new(engine());
    let mut buffer = interleave(1.0, &sine(200.0, BLOCK * 10, 0.5));

    let frames = host.process_interleaved(&mut buffer);
    let output: Vec<f32> = buffer.iter().step_by(2).copied().collect();

    assert_eq!(frames, BLOCK * 10);
    assert_eq!(host.blocks_analyzed(), 10);
    assert_eq!(host.talkbox().overrun_count(), 0);

    // No model exists until the first block has been analyzed
    assert!(output[..BLOCK].iter().all(|&y| y == 0.0));
    assert!(output[BLOCK..].iter().any(|&y| y != 0.0));
    assert!(output.iter().all(|y| y.is_finite()));

    let talkbox = host.talkbox();
    assert!(talkbox.error_gain() > 0.0);
    assert!(talkbox.voice_gain() > 0.0 && talkbox.voice_gain() <= 1.0);
    assert!(talkbox.coefficients().iter().all(|c| c.is_finite()));
}

#[test]
fn test_missed_update_is_an_overrun() {
    let mut talkbox = engine();
    let mut diagnostics = talkbox.take_diagnostics().unwrap();

    for &v in &sine(200.0, BLOCK * 2, 0.5) {
        let mut frame = [1.0, v];
        talkbox.process(&mut frame);
        assert!(frame[0].is_finite());
    }

    assert_eq!(talkbox.overrun_count(), 1);
    assert_eq!(diagnostics.drain(), vec![Diagnostic::Overrun { total: 1 }]);

    // Processing carries on with the newest block
    assert!(talkbox.update_coefficients());
    assert!(!talkbox.update_coefficients());
}

#[test]
fn test_full_gate_silences_output() {
    let mut talkbox = engine();
    talkbox.set_gate_level(1.0);
    let mut host = InterleavedHost::new(talkbox);
    let mut buffer = interleave(1.0, &sine(200.0, BLOCK * 8, 0.2));

    host.process_interleaved(&mut buffer);

    assert!(buffer.iter().step_by(2).all(|&y| y == 0.0));
    assert_eq!(host.talkbox().error_gain(), 0.0);
    assert_eq!(host.talkbox().voice_gain(), 0.0);
    assert_eq!(host.talkbox().coefficients(), vec![0.0; 10]);
}

#[test]
fn test_reset_matches_fresh_engine() {
    let mut host = InterleavedHost::new(engine());
    let mut buffer = interleave(1.0, &sine(440.0, BLOCK * 6, 0.6));
    host.process_interleaved(&mut buffer);
    let mut used = host.into_inner();
    used.reset_states();

    let mut fresh = engine();
    assert_eq!(used.smoothed_acf(), fresh.smoothed_acf());
    assert!(used.smoothed_acf().iter().all(|&r| r == 0.0));

    let silence = vec![0.0f32; BLOCK];
    for talkbox in [&mut used, &mut fresh] {
        for &v in &silence {
            talkbox.process_sample(1.0, v);
        }
        assert!(talkbox.update_coefficients());
    }

    assert_eq!(used.error_gain(), 0.0);
    assert_eq!(used.voice_gain(), 0.0);
    assert_eq!(used.smoothed_acf(), fresh.smoothed_acf());
    assert!(used.smoothed_acf()[1..].iter().all(|&r| r == 0.0));
    assert_eq!(used.filter_memory(), fresh.filter_memory());
    assert_eq!(used.overrun_count(), 0);
}

#[test]
fn test_reset_after_use_keeps_processing() {
    let mut host = InterleavedHost::new(engine());
    let mut buffer = interleave(1.0, &sine(300.0, BLOCK * 4, 0.5));
    host.process_interleaved(&mut buffer);

    host.talkbox_mut().reset_states();

    assert!(!host.talkbox().is_block_ready());
    assert_eq!(host.talkbox().error_gain(), 0.0);
    assert!(host.talkbox().filter_memory().iter().all(|&m| m == 0.0));

    let mut buffer = interleave(1.0, &sine(300.0, BLOCK * 4, 0.5));
    host.process_interleaved(&mut buffer);
    assert!(buffer.iter().step_by(2).all(|y| y.is_finite()));
    assert_eq!(host.blocks_analyzed(), 8);
}

#[test]
fn test_coefficient_reader_from_another_thread() {
    let mut host = InterleavedHost::new(engine());
    let reader = host.talkbox().coefficient_reader();

    let handle = std::thread::spawn(move || {
        let mut snapshot = vec![0.0f32; 10];
        for _ in 0..100 {
            reader.copy_into(&mut snapshot);
            assert!(snapshot.iter().all(|c| c.is_finite()));
        }
    });

    let mut buffer = interleave(1.0, &sine(200.0, BLOCK * 16, 0.5));
    host.process_interleaved(&mut buffer);

    handle.join().unwrap();
}
