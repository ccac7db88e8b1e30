use anyhow::*;
use tracing::trace;

use crate::ms::spectrum::{ObservedSpectrum, Peak};

/// Width of the m/z windows the observed spectrum is split into.
pub const WINDOW_WIDTH: f64 = 100.0;

/// Number of most intense peaks kept per window (the deepest peak depth).
pub const MAX_PEAK_DEPTH: usize = 10;

/// The observed spectrum cut into consecutive 100 m/z windows.
///
/// Each window holds its most intense peaks (at most [`MAX_PEAK_DEPTH`]) in
/// descending intensity order, so that a peak depth `d` selects the first `d`
/// peaks of every window.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumWindows {
    lower_bound: f64,
    windows: Vec<Vec<Peak>>,
}

impl SpectrumWindows {
    pub fn new(spectrum: &mut ObservedSpectrum) -> Result<SpectrumWindows> {
        if spectrum.is_empty() {
            bail!("can't split an empty spectrum into windows")
        }

        if !spectrum.is_sorted() {
            spectrum.sort_by_mz();
        }

        // safe because the spectrum is not empty
        let min_mz = spectrum.first().map(|p| p.mz).unwrap_or_default();
        let max_mz = spectrum.last().map(|p| p.mz).unwrap_or_default();

        let lower_bound = (min_mz / WINDOW_WIDTH).floor() * WINDOW_WIDTH;
        let upper_bound = (max_mz / WINDOW_WIDTH).ceil() * WINDOW_WIDTH;

        // a spectrum whose peaks all sit on one window boundary still gets a window
        let n_windows = (((upper_bound - lower_bound) / WINDOW_WIDTH).ceil() as usize).max(1);

        let mut windows = Vec::with_capacity(n_windows);
        let mut peak_iter = spectrum.peaks.iter().peekable();
        let mut window_upper_bound = lower_bound + WINDOW_WIDTH;

        for _ in 0..n_windows {
            let mut window: Vec<Peak> = Vec::new();
            while let Some(peak) = peak_iter.next_if(|p| p.mz <= window_upper_bound) {
                window.push(*peak);
            }

            // stable, equally intense peaks keep their m/z order
            window.sort_by(|a, b| b.intensity.total_cmp(&a.intensity));
            window.truncate(MAX_PEAK_DEPTH);
            windows.push(window);

            window_upper_bound += WINDOW_WIDTH;
        }

        trace!("split {} peaks into {} windows starting at m/z {}", spectrum.len(), n_windows, lower_bound);

        Ok(SpectrumWindows { lower_bound, windows })
    }

    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Peak]> {
        self.windows.iter().map(|w| w.as_slice())
    }

    pub fn get(&self, index: usize) -> Option<&[Peak]> {
        self.windows.get(index).map(|w| w.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_spectrum_is_rejected() {
        let mut spectrum = ObservedSpectrum::default();
        assert!(SpectrumWindows::new(&mut spectrum).is_err());
    }

    #[test]
    fn test_window_bounds() {
        let mut spectrum = ObservedSpectrum::new(vec![
            Peak::new(450.0, 10.0),
            Peak::new(123.4, 1.0),
            Peak::new(200.0, 2.0),
            Peak::new(200.5, 3.0),
        ]);
        let windows = SpectrumWindows::new(&mut spectrum).unwrap();

        // sorted in place
        assert!(spectrum.is_sorted());

        // 100..500
        assert_eq!(windows.lower_bound(), 100.0);
        assert_eq!(windows.len(), 4);

        // upper bounds are inclusive: 200.0 lands in the first window
        let first: Vec<f64> = windows.get(0).unwrap().iter().map(|p| p.mz).collect();
        assert_eq!(first, vec![200.0, 123.4]);
        assert_eq!(windows.get(1).unwrap().len(), 1);
        assert!(windows.get(2).unwrap().is_empty());
        assert_eq!(windows.get(3).unwrap()[0].mz, 450.0);
    }

    #[test]
    fn test_top_ten_by_intensity() {
        let peaks = (0..25).map(|i| Peak::new(300.0 + i as f64, i as f32)).collect();
        let mut spectrum = ObservedSpectrum::new(peaks);
        let windows = SpectrumWindows::new(&mut spectrum).unwrap();

        assert_eq!(windows.len(), 1);
        let window = windows.get(0).unwrap();
        assert_eq!(window.len(), MAX_PEAK_DEPTH);
        let intensities: Vec<f32> = window.iter().map(|p| p.intensity).collect();
        assert_eq!(intensities, (15..25).rev().map(|i| i as f32).collect::<Vec<f32>>());
    }

    #[test]
    fn test_single_peak_on_boundary() {
        let mut spectrum = ObservedSpectrum::new(vec![Peak::new(500.0, 1.0)]);
        let windows = SpectrumWindows::new(&mut spectrum).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows.get(0).unwrap().len(), 1);
    }
}
