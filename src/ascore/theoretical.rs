use anyhow::*;

use crate::chemistry::model::{Peptide, Ptm};
use crate::msms::fragmentation::PeakGenerator;
use crate::msms::model::{FragmentIonSeries, TheoreticalSpectrum};

/// Fragments are always generated singly charged.
pub const FRAGMENT_CHARGE: i8 = 1;

/// One phosphosite assignment together with its theoretical spectrum.
#[derive(Clone, Debug)]
pub struct PhosphoIsoform {
    pub sites: Vec<usize>,
    pub peptide: Peptide,
    pub spectrum: TheoreticalSpectrum,
}

pub fn synthesize<G: PeakGenerator + ?Sized>(generator: &G, seq_without_phospho: &Peptide, sites: &[usize]) -> Result<PhosphoIsoform> {
    let peptide = seq_without_phospho.with_modification_at(sites, Ptm::Phospho)?;

    let mut ions = generator.generate(&peptide, FragmentIonSeries::b, FRAGMENT_CHARGE)?;
    ions.extend(generator.generate(&peptide, FragmentIonSeries::y, FRAGMENT_CHARGE)?);

    let spectrum = TheoreticalSpectrum::new(peptide.to_string(), ions);

    Ok(PhosphoIsoform { sites: sites.to_vec(), peptide, spectrum })
}

pub fn synthesize_unmodified<G: PeakGenerator + ?Sized>(generator: &G, seq_without_phospho: &Peptide) -> Result<PhosphoIsoform> {
    synthesize(generator, seq_without_phospho, &[])
}

pub fn synthesize_all<G: PeakGenerator + ?Sized>(generator: &G, seq_without_phospho: &Peptide, permutations: &[Vec<usize>]) -> Result<Vec<PhosphoIsoform>> {
    if permutations.is_empty() {
        return Ok(vec![synthesize_unmodified(generator, seq_without_phospho)?]);
    }

    permutations.iter()
        .map(|sites| synthesize(generator, seq_without_phospho, sites))
        .collect()
}
