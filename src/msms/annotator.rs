use crate::ms::spectrum::Peak;
use crate::ms::utils::MzTolerance;
use crate::ms::windows::SpectrumWindows;
use crate::msms::model::TheoreticalSpectrum;

/// Counts the peaks among the `depth` most intense ones of a window that match a theoretical ion.
///
/// Each observed peak is compared to its nearest theoretical ion only. The
/// window must be ordered by descending intensity.
pub fn number_of_matched_ions(theoretical: &TheoreticalSpectrum, window: &[Peak], depth: usize, mz_tolerance: &MzTolerance) -> usize {
    window.iter().take(depth).filter(|peak| {
        theoretical.find_nearest_mz(peak.mz)
            .map(|theo_mz| mz_tolerance.is_match(theo_mz, peak.mz))
            .unwrap_or(false)
    }).count()
}

/// Sum of [`number_of_matched_ions`] over all windows.
pub fn matched_ions_in_windows(theoretical: &TheoreticalSpectrum, windows: &SpectrumWindows, depth: usize, mz_tolerance: &MzTolerance) -> usize {
    windows.iter().map(|window| number_of_matched_ions(theoretical, window, depth, mz_tolerance)).sum()
}
