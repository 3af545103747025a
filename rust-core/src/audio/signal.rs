//! Audio signal container and WAV loading
//!
//! Audio is loaded at its native sample rate. Integer PCM is normalized to
//! [-1.0, 1.0] by 2^(bits-1); float PCM is taken as is. Multi-channel files
//! are averaged down to mono.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, Axis};
use tracing::{info, warn};

use crate::error::{Result, SpectraError};

/// Mono audio samples paired with their sample rate
#[derive(Debug, Clone)]
pub struct Signal {
    samples: Array1<f64>,
    sample_rate: u32,
}

impl Signal {
    /// Create a signal from samples and a sample rate in Hz
    ///
    /// # Errors
    /// `InvalidParameter` if the sample rate is zero.
    pub fn new(samples: Array1<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SpectraError::InvalidParameter(
                "sample rate must be positive".to_string(),
            ));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn from_slice(samples: &[f64], sample_rate: u32) -> Result<Self> {
        Self::new(Array1::from_vec(samples.to_vec()), sample_rate)
    }

    /// Load a WAV file
    ///
    /// # Errors
    /// - `Read` if the path cannot be opened
    /// - `Decode` / `UnsupportedFormat` if the contents are not usable WAV audio
    /// - `EmptySignal` if the file holds no sample frames
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SpectraError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let signal = Self::from_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            sample_rate = signal.sample_rate,
            samples = signal.len(),
            duration_s = signal.duration(),
            "loaded audio"
        );

        Ok(signal)
    }

    /// Decode WAV data from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = hound::WavReader::new(reader).map_err(SpectraError::from_wav)?;
        let spec = reader.spec();

        let interleaved: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from))
                .collect::<std::result::Result<_, _>>()
                .map_err(SpectraError::from_wav)?,
            hound::SampleFormat::Int => {
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| f64::from(v) / scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(SpectraError::from_wav)?
            }
        };

        let samples = downmix(interleaved, spec.channels)?;
        if samples.is_empty() {
            return Err(SpectraError::EmptySignal);
        }

        Self::new(samples, spec.sample_rate)
    }

    pub fn samples(&self) -> ArrayView1<'_, f64> {
        self.samples.view()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Average interleaved channels into a single mono channel
fn downmix(mut interleaved: Vec<f64>, channels: u16) -> Result<Array1<f64>> {
    let channels = usize::from(channels);
    match channels {
        0 => Err(SpectraError::UnsupportedFormat(
            "WAV header declares zero channels".to_string(),
        )),
        1 => Ok(Array1::from_vec(interleaved)),
        _ => {
            warn!(channels, "averaging multi-channel audio to mono");

            // Drop a trailing partial frame, if any
            let frames = interleaved.len() / channels;
            interleaved.truncate(frames * channels);

            let frames = Array2::from_shape_vec((frames, channels), interleaved)
                .map_err(|e| SpectraError::UnsupportedFormat(e.to_string()))?;

            Ok(frames
                .mean_axis(Axis(1))
                .unwrap_or_else(|| Array1::zeros(0)))
        }
    }
}
