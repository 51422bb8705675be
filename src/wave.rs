//! WAV import/export for host arrays
//!
//! Bridges files and the paired-slot convention of host arrays: every
//! frame is two consecutive float slots. Stereo files map directly
//! (left, right per frame); mono files duplicate each sample into both
//! slots. No resampling happens here, arrays keep their source rate
//! and the host reports it.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;

use crate::error::{Result, SpliceError};
use crate::host::SLOTS_PER_FRAME;

/// Decoded audio ready to become a host array.
#[derive(Debug, Clone)]
pub struct ImportedWave {
    /// Paired-slot sample data
    pub samples: Vec<f32>,
    /// Source sample rate in Hz
    pub sample_rate: u32,
}

impl ImportedWave {
    /// Frame count under the paired-slot convention
    pub fn frames(&self) -> usize {
        self.samples.len() / SLOTS_PER_FRAME
    }
}

/// Import a WAV file into paired-slot form.
///
/// Supports mono and stereo, integer and float sample formats. More
/// than two channels is rejected.
pub fn import_wav(path: &Path) -> Result<ImportedWave> {
    let reader = WavReader::open(path).map_err(|e| SpliceError::InvalidAudio {
        reason: format!("failed to open WAV file: {}", e),
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 || channels > 2 {
        return Err(SpliceError::UnsupportedFormat {
            format: format!("{}-channel audio (only mono/stereo supported)", channels),
        });
    }

    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;

    let samples = match channels {
        1 => {
            let mut paired = Vec::with_capacity(interleaved.len() * SLOTS_PER_FRAME);
            for &s in &interleaved {
                paired.push(s);
                paired.push(s);
            }
            paired
        }
        _ => interleaved,
    };

    debug!(
        "imported {}: {} frames at {} Hz",
        path.display(),
        samples.len() / SLOTS_PER_FRAME,
        spec.sample_rate
    );

    Ok(ImportedWave {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Export paired-slot samples as a 32-bit float stereo WAV file.
pub fn export_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| SpliceError::InvalidAudio {
        reason: format!("failed to create WAV file: {}", e),
    })?;

    for frame in samples.chunks_exact(SLOTS_PER_FRAME) {
        for &slot in frame {
            writer
                .write_sample(slot)
                .map_err(|e| SpliceError::InvalidAudio {
                    reason: format!("failed to write sample: {}", e),
                })?;
        }
    }

    writer.finalize().map_err(|e| SpliceError::InvalidAudio {
        reason: format!("failed to finalize WAV file: {}", e),
    })?;

    debug!(
        "exported {}: {} frames at {} Hz",
        path.display(),
        samples.len() / SLOTS_PER_FRAME,
        sample_rate
    );
    Ok(())
}

/// Decode all samples to f32 regardless of on-disk format.
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let samples: std::result::Result<Vec<f32>, hound::Error> = match sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect(),
        SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect()
        }
    };

    samples.map_err(|e| SpliceError::InvalidAudio {
        reason: format!("failed to decode samples: {}", e),
    })
}
