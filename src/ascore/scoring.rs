use tracing::{trace, warn};

use crate::ascore::probability::{compute_cumulative_score, probability_to_score};
use crate::ms::utils::MzTolerance;
use crate::ms::windows::{SpectrumWindows, MAX_PEAK_DEPTH};
use crate::msms::annotator::matched_ions_in_windows;
use crate::msms::model::TheoreticalSpectrum;

/// One score per peak depth, from depth 1 to depth 10.
pub type PeakDepthScores = [f64; MAX_PEAK_DEPTH];

/// Weights of the peak depths in the peptide score.
pub const PEAK_DEPTH_WEIGHTS: PeakDepthScores = [0.5, 0.75, 1.0, 1.0, 1.0, 1.0, 0.75, 0.5, 0.25, 0.25];

/// Chance of a random match per retained peak at a given depth.
pub fn peak_depth_probability(depth: usize) -> f64 {
    depth as f64 / 100.0
}

/// Number of ions of `theoretical` matched by the `depth` most intense peaks of every window.
///
/// Several observed peaks may match the same theoretical ion, the count is
/// capped to the number of theoretical ions to keep the binomial model valid.
pub fn count_matched_ions(theoretical: &TheoreticalSpectrum, windows: &SpectrumWindows, depth: usize, mz_tolerance: &MzTolerance) -> usize {
    let n_trials = theoretical.len();
    let n_matched = matched_ions_in_windows(theoretical, windows, depth, mz_tolerance);

    if n_matched > n_trials {
        warn!(
            "{} peaks matched only {} theoretical ions of {} at depth {}, capping",
            n_matched, n_trials, theoretical.name, depth
        );
        n_trials
    } else {
        n_matched
    }
}

/// Score of the theoretical ions against the observed windows at one peak depth.
pub fn score_at_depth(theoretical: &TheoreticalSpectrum, windows: &SpectrumWindows, depth: usize, mz_tolerance: &MzTolerance) -> f64 {
    // the number of theoretical peaks correspond to the number of trials N
    let n_trials = theoretical.len();
    let n_matched = count_matched_ions(theoretical, windows, depth, mz_tolerance);

    let cumulative_score = compute_cumulative_score(n_trials, n_matched, peak_depth_probability(depth));

    probability_to_score(cumulative_score)
}

pub fn calculate_peak_depth_scores(theoretical: &TheoreticalSpectrum, windows: &SpectrumWindows, mz_tolerance: &MzTolerance) -> PeakDepthScores {
    let mut scores = [0.0; MAX_PEAK_DEPTH];
    for (i, score) in scores.iter_mut().enumerate() {
        *score = score_at_depth(theoretical, windows, i + 1, mz_tolerance);
    }

    trace!("{} peak depth scores: {:?}", theoretical.name, scores);

    scores
}

/// Peak depth scores of every phosphosite assignment, in the order of the given spectra.
pub fn calculate_permutation_scores<'a, I>(spectra: I, windows: &SpectrumWindows, mz_tolerance: &MzTolerance) -> Vec<PeakDepthScores>
where I: IntoIterator<Item = &'a TheoreticalSpectrum> {
    spectra.into_iter()
        .map(|spectrum| calculate_peak_depth_scores(spectrum, windows, mz_tolerance))
        .collect()
}

/// Weighted average of the peak depth scores, middle depths weight the most.
pub fn peptide_score(scores: &PeakDepthScores) -> f64 {
    scores.iter()
        .zip(PEAK_DEPTH_WEIGHTS.iter())
        .map(|(score, weight)| score * weight)
        .sum::<f64>() / 10.0
}
