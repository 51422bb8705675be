//! Pipeline Tests
//!
//! Drives the full CLI path: WAV files in, JSON script through the
//! dispatcher, WAV files out.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use splicer::cli::commands;
use splicer::wave;

fn write_ramp_wav(path: &Path, frames: usize, base: f32, sample_rate: u32) {
    let samples: Vec<f32> = (0..frames * 2).map(|i| base + i as f32).collect();
    wave::export_wav(path, &samples, sample_rate).unwrap();
}

#[test]
fn test_apply_cut_and_swap_through_files() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.wav");
    let b_path = dir.path().join("b.wav");
    let script_path = dir.path().join("edits.json");
    let out_a = dir.path().join("out_a.wav");
    let out_b = dir.path().join("out_b.wav");

    write_ramp_wav(&a_path, 8, 0.0, 44100);
    write_ramp_wav(&b_path, 8, 100.0, 44100);
    fs::write(
        &script_path,
        r#"[
            { "op": "swap", "start": 0, "end": 4 },
            { "op": "cut", "target": "a", "start": 6, "end": 8 }
        ]"#,
    )
    .unwrap();

    commands::apply(&a_path, &b_path, &script_path, Some(out_a.as_path()), Some(out_b.as_path())).unwrap();

    let a = wave::import_wav(&out_a).unwrap();
    let b = wave::import_wav(&out_b).unwrap();

    // swap put B's first four frames into A, then the cut zeroed A's tail
    assert_eq!(&a.samples[0..8], &(0..8).map(|i| 100.0 + i as f32).collect::<Vec<_>>()[..]);
    assert_eq!(&a.samples[8..12], &[8.0, 9.0, 10.0, 11.0]);
    assert_eq!(&a.samples[12..16], &[0.0; 4]);
    assert_eq!(&b.samples[0..8], &(0..8).map(|i| i as f32).collect::<Vec<_>>()[..]);
    assert_eq!(&b.samples[8..16], &(8..16).map(|i| 100.0 + i as f32).collect::<Vec<_>>()[..]);

    // inputs were not rewritten
    let a_in = wave::import_wav(&a_path).unwrap();
    assert_eq!(a_in.samples[0], 0.0);
}

#[test]
fn test_apply_keeps_going_past_bad_ops() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.wav");
    let b_path = dir.path().join("b.wav");
    let script_path = dir.path().join("edits.json");
    let out_a = dir.path().join("out_a.wav");
    let out_b = dir.path().join("out_b.wav");

    write_ramp_wav(&a_path, 4, 1.0, 48000);
    write_ramp_wav(&b_path, 4, 9.0, 48000);
    fs::write(
        &script_path,
        r#"[
            { "op": "swap", "start": 2, "end": 99 },
            { "op": "cut", "target": "b", "start": 0, "end": 4 }
        ]"#,
    )
    .unwrap();

    commands::apply(&a_path, &b_path, &script_path, Some(out_a.as_path()), Some(out_b.as_path())).unwrap();

    let a = wave::import_wav(&out_a).unwrap();
    let b = wave::import_wav(&out_b).unwrap();
    assert_eq!(a.samples[0], 1.0, "failed swap must not have touched A");
    assert_eq!(b.samples, vec![0.0; 8], "cut after the failure still ran");
    assert_eq!(a.sample_rate, 48000, "source rate is preserved");
}

#[test]
fn test_info_command_resolves_pair() {
    let dir = tempdir().unwrap();
    let a_path = dir.path().join("a.wav");
    let b_path = dir.path().join("b.wav");
    write_ramp_wav(&a_path, 32, 0.0, 44100);
    write_ramp_wav(&b_path, 16, 0.0, 22050);

    commands::print_info(&a_path, &b_path).unwrap();
}
