//! Rendering of the two curves
//!
//! Renderers receive final normalized dB curves and only clip them to the
//! fixed display range: y in [-100, 0] dB, x in [0, sample_rate/2].

use std::io::Write;

use crate::error::Result;
use crate::spectrum::curve::SpectralCurve;

/// Bottom of the display range in dB
pub const DB_FLOOR: f64 = -100.0;

/// Top of the display range in dB
pub const DB_CEILING: f64 = 0.0;

/// Envelope peaks below this level are not listed
pub const PEAK_LISTING_FLOOR_DB: f64 = -60.0;

const MAX_LISTED_PEAKS: usize = 8;

/// Consumer of a finished analysis
pub trait CurveRenderer {
    /// Draw the FFT spectrum and the LPC envelope as two panels
    fn render(
        &mut self,
        spectrum: &SpectralCurve,
        envelope: &SpectralCurve,
        sample_rate: u32,
    ) -> Result<()>;
}

/// Plots both curves as character panels on a terminal (or any writer)
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> TerminalRenderer<W> {
    /// # Arguments
    /// * `out` - Destination
    /// * `width` - Plot columns per panel (at least 2)
    /// * `height` - Plot rows per panel (at least 2)
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(2),
            height: height.max(2),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Highest clipped dB level per column, `None` where no point falls
    fn column_levels(&self, curve: &SpectralCurve, nyquist: f64) -> Vec<Option<f64>> {
        let mut levels: Vec<Option<f64>> = vec![None; self.width];

        for (freq, db) in curve.points() {
            if !(0.0..=nyquist).contains(&freq) || db.is_nan() {
                continue;
            }
            let col = ((freq / nyquist) * self.width as f64) as usize;
            let col = col.min(self.width - 1);
            let db = db.clamp(DB_FLOOR, DB_CEILING);
            levels[col] = Some(levels[col].map_or(db, |l: f64| l.max(db)));
        }

        levels
    }

    /// Row index (0 = top) at which `db` is drawn
    fn row_for(&self, db: f64) -> usize {
        let frac = (DB_CEILING - db) / (DB_CEILING - DB_FLOOR);
        ((frac * (self.height - 1) as f64).round() as usize).min(self.height - 1)
    }

    fn panel(&mut self, title: &str, curve: &SpectralCurve, nyquist: f64) -> Result<()> {
        let levels = self.column_levels(curve, nyquist);
        let rows: Vec<Option<usize>> = levels
            .iter()
            .map(|l| l.map(|db| self.row_for(db)))
            .collect();

        writeln!(self.out, "{title}")?;
        for r in 0..self.height {
            let label = if r == 0 {
                format!("{DB_CEILING:>5.0}")
            } else if r == self.height - 1 {
                format!("{DB_FLOOR:>5.0}")
            } else if r == (self.height - 1) / 2 {
                format!("{:>5.0}", (DB_CEILING + DB_FLOOR) / 2.0)
            } else {
                " ".repeat(5)
            };

            let line: String = rows
                .iter()
                .map(|row| match row {
                    Some(row) if *row == r => '*',
                    Some(row) if *row < r => ':',
                    _ => ' ',
                })
                .collect();
            writeln!(self.out, "{label} |{}", line.trim_end())?;
        }

        writeln!(self.out, "{} +{}", " ".repeat(5), "-".repeat(self.width))?;
        let right = format!("{nyquist:.0} Hz");
        let gap = (self.width + 1).saturating_sub(4 + right.len());
        writeln!(self.out, "{} 0 Hz{}{right}", " ".repeat(5), " ".repeat(gap))?;
        Ok(())
    }
}

impl<W: Write> CurveRenderer for TerminalRenderer<W> {
    fn render(
        &mut self,
        spectrum: &SpectralCurve,
        envelope: &SpectralCurve,
        sample_rate: u32,
    ) -> Result<()> {
        let nyquist = f64::from(sample_rate) / 2.0;

        self.panel("FFT dB", spectrum, nyquist)?;
        writeln!(self.out)?;
        self.panel("LPC dB", envelope, nyquist)?;
        writeln!(self.out)?;

        if let Some((freq, _)) = spectrum.peak() {
            writeln!(self.out, "FFT peak: {freq:.1} Hz")?;
        }

        let peaks = envelope.local_peaks(PEAK_LISTING_FLOOR_DB);
        let listed: Vec<String> = peaks
            .iter()
            .take(MAX_LISTED_PEAKS)
            .map(|(freq, db)| format!("{freq:.1} Hz ({db:.1} dB)"))
            .collect();
        if listed.is_empty() {
            writeln!(self.out, "LPC envelope peaks: none above {PEAK_LISTING_FLOOR_DB:.0} dB")?;
        } else {
            writeln!(self.out, "LPC envelope peaks: {}", listed.join(", "))?;
        }

        self.out.flush()?;
        Ok(())
    }
}
