use tracing::debug;

use crate::ascore::ranking::ProbablePhosphoSite;
use crate::ascore::scoring::score_at_depth;
use crate::ascore::theoretical::PhosphoIsoform;
use crate::ms::utils::MzTolerance;
use crate::ms::windows::SpectrumWindows;
use crate::msms::model::{TheoreticalFragmentIon, TheoreticalSpectrum};

/// Two ions closer than this are the same ion.
pub const ION_IDENTITY_TOLERANCE: f64 = 1e-4;

/// Ions telling two phosphosite assignments apart.
#[derive(Clone, Debug)]
pub struct SiteDeterminingIons {
    /// Ions of the best assignment absent from the competing one
    pub first: TheoreticalSpectrum,
    /// Ions of the competing assignment absent from the best one
    pub second: TheoreticalSpectrum,
}

// --- ions of `first` not found in `second`, both sorted by m/z --- //
fn spectrum_difference(first: &[TheoreticalFragmentIon], second: &[TheoreticalFragmentIon]) -> Vec<TheoreticalFragmentIon> {
    let mut difference = Vec::with_capacity(first.len());
    let mut j = 0;

    for ion in first {
        while j < second.len() && second[j].mz < ion.mz - ION_IDENTITY_TOLERANCE {
            j += 1;
        }

        if j < second.len() && (second[j].mz - ion.mz).abs() < ION_IDENTITY_TOLERANCE {
            // each ion of second cancels a single ion of first
            j += 1;
        } else {
            difference.push(*ion);
        }
    }

    difference
}

pub fn compute_site_determining_ions(first: &TheoreticalSpectrum, second: &TheoreticalSpectrum) -> SiteDeterminingIons {
    let first_diff = spectrum_difference(first.ions(), second.ions());
    let second_diff = spectrum_difference(second.ions(), first.ions());

    SiteDeterminingIons {
        first: TheoreticalSpectrum::new(format!("{} without {}", first.name, second.name), first_diff),
        second: TheoreticalSpectrum::new(format!("{} without {}", second.name, first.name), second_diff),
    }
}

/// Score difference between the best assignment and its competitor, restricted
/// to their site-determining ions at the peak depth chosen for the site.
pub fn compute_ascore(
    phospho_site: &ProbablePhosphoSite,
    isoforms: &[PhosphoIsoform],
    windows: &SpectrumWindows,
    mz_tolerance: &MzTolerance,
) -> f64 {
    let site_determining_ions = compute_site_determining_ions(
        &isoforms[phospho_site.best_permutation].spectrum,
        &isoforms[phospho_site.competing_permutation].spectrum,
    );

    let depth = phospho_site.peak_depth;
    let score_first = score_at_depth(&site_determining_ions.first, windows, depth, mz_tolerance);
    let score_second = score_at_depth(&site_determining_ions.second, windows, depth, mz_tolerance);

    debug!(
        "site {} vs {}: {} and {} site-determining ions, depth {}, scores {:.3} and {:.3}",
        phospho_site.site, phospho_site.alternative_site,
        site_determining_ions.first.len(), site_determining_ions.second.len(),
        depth, score_first, score_second
    );

    score_first - score_second
}
