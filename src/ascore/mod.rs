//! Phosphosite localization scoring (AScore).
//!
//! Every way of placing the phosphorylations of a peptide hit on its S/T/Y
//! residues is scored against the observed spectrum with a cumulative
//! binomial model of random fragment ion matches, at peak depths 1 to 10 of
//! 100 m/z windows. The best assignment replaces the hit sequence and each of
//! its sites gets an AScore: the score difference, restricted to the
//! site-determining ions, between the best assignment and the best one moving
//! this site elsewhere.
//!
//! # References
//! Beausoleil, S. A., Villén, J., Gerber, S. A., Rush, J., & Gygi, S. P. (2006).
//! A probability-based approach for high-throughput protein phosphorylation
//! analysis and site localization. Nature Biotechnology, 24(10), 1285–1292.
//! <https://doi.org/10.1038/nbt1240>

pub mod probability;
pub mod ranking;
pub mod scoring;
pub mod site_determining;
pub mod sites;
pub mod theoretical;

use anyhow::*;
use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::ident::PeptideHit;
use crate::ms::spectrum::ObservedSpectrum;
use crate::ms::utils::{MassTolUnit, MzTolerance};
use crate::ms::windows::SpectrumWindows;
use crate::msms::fragmentation::{PeakGenerator, SimplePeakGenerator};

use self::ranking::{determine_highest_scoring_permutations, Ranking};
use self::scoring::calculate_permutation_scores;
use self::site_determining::compute_ascore;
use self::sites::*;
use self::theoretical::synthesize_all;

/// Metadata key holding the sequence reported by the search engine.
pub const SEARCH_ENGINE_SEQUENCE_KEY: &str = "Search_engine_sequence";

/// Metadata key of the AScore of the `rank`-th site (starting at 1).
pub fn ascore_key(rank: usize) -> String {
    format!("AScore_{}", rank)
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AScoreParameters {
    pub fragment_mass_tolerance: f64,
    /// Interpret the tolerance in ppm of the theoretical m/z instead of Th
    pub fragment_mass_unit_ppm: bool,
}

impl Default for AScoreParameters {
    fn default() -> AScoreParameters {
        AScoreParameters {
            fragment_mass_tolerance: 0.5,
            fragment_mass_unit_ppm: false,
        }
    }
}

impl AScoreParameters {
    pub fn mz_tolerance(&self) -> MzTolerance {
        let unit = if self.fragment_mass_unit_ppm { MassTolUnit::ppm } else { MassTolUnit::Da };
        MzTolerance::new(self.fragment_mass_tolerance, unit)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AScore<G: PeakGenerator = SimplePeakGenerator> {
    params: AScoreParameters,
    generator: G,
}

impl AScore<SimplePeakGenerator> {
    pub fn new(params: AScoreParameters) -> AScore<SimplePeakGenerator> {
        AScore { params, generator: SimplePeakGenerator::default() }
    }
}

impl<G: PeakGenerator> AScore<G> {
    pub fn with_generator(params: AScoreParameters, generator: G) -> AScore<G> {
        AScore { params, generator }
    }

    pub fn params(&self) -> &AScoreParameters {
        &self.params
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Rescores `hit` against `spectrum`, which gets sorted by m/z if needed.
    ///
    /// The returned hit carries the best phosphosite assignment and its
    /// weighted score, the original sequence under [`SEARCH_ENGINE_SEQUENCE_KEY`]
    /// and, when the sites are ambiguous, one AScore per site under
    /// [`ascore_key`]. An empty spectrum gives back the hit with a zero score.
    pub fn compute(&self, hit: &PeptideHit, spectrum: &mut ObservedSpectrum) -> Result<PeptideHit> {
        let mut phospho = hit.clone();
        phospho.score = 0.0;

        let mut n_phospho_events = count_phospho_events(&hit.sequence);
        let seq_without_phospho = remove_phosphosites(&hit.sequence);

        let sites = get_sites(&seq_without_phospho);
        let n_sites = sites.len();

        if n_sites < n_phospho_events {
            n_phospho_events = n_sites;
        }

        if spectrum.is_empty() {
            debug!("empty spectrum for {}, skipping", hit.sequence);
            return Ok(phospho);
        }

        let permutations = compute_permutations(&sites, n_phospho_events);
        let isoforms = synthesize_all(&self.generator, &seq_without_phospho, &permutations)
            .with_context(|| format!("can't compute theoretical spectra of {}", seq_without_phospho))?;

        debug!(
            "{}: {} phospho events, {} sites, {} permutations",
            hit.sequence, n_phospho_events, n_sites, isoforms.len()
        );

        let windows = SpectrumWindows::new(spectrum)?;
        let mz_tolerance = self.params.mz_tolerance();

        // --- peptide score of every phosphosite assignment, ranked by weighted score --- //
        let peptide_site_scores = calculate_permutation_scores(
            isoforms.iter().map(|isoform| &isoform.spectrum), &windows, &mz_tolerance
        );
        let ranking = Ranking::new(&peptide_site_scores);
        let best = *ranking.best().ok_or_else(|| anyhow!("no permutation to rank for {}", hit.sequence))?;

        phospho.score = best.weighted_score;
        phospho.sequence = isoforms[best.id].peptide.clone();
        phospho.set_meta_value(SEARCH_ENGINE_SEQUENCE_KEY, hit.sequence.to_string());

        debug!("best assignment {} with weighted score {:.4}", phospho.sequence, best.weighted_score);

        if n_phospho_events == 0 || n_sites == 0 || n_sites == n_phospho_events {
            return Ok(phospho);
        }

        let phospho_sites = determine_highest_scoring_permutations(&peptide_site_scores, &permutations, &ranking)?;

        for (i, phospho_site) in phospho_sites.iter().enumerate() {
            let ascore = compute_ascore(phospho_site, &isoforms, &windows, &mz_tolerance);
            phospho.set_meta_value(&ascore_key(i + 1), ascore);
        }

        Ok(phospho)
    }
}
