use anyhow::*;

use crate::chemistry::constants::WATER_MONO_MASS;
use crate::chemistry::mass_calc::calc_residues_mono_mass;
use crate::chemistry::model::{ModifiedResidue, Peptide};
use crate::chemistry::table::{AminoAcidTable, STANDARD_AMINO_ACID_TABLE};
use crate::ms::utils::mass_to_mz;
use crate::msms::model::*;

/// Produces the theoretical fragment ions of a (modified) peptide.
pub trait PeakGenerator {
    fn generate(&self, peptide: &Peptide, ion_type: FragmentIonSeries, charge: i8) -> Result<Vec<TheoreticalFragmentIon>>;
}

/// Backbone fragment ions without neutral losses, computed from an amino acid table.
#[derive(Clone, Copy, Debug)]
pub struct SimplePeakGenerator {
    aa_table: &'static AminoAcidTable,
}

impl SimplePeakGenerator {
    pub fn new(aa_table: &'static AminoAcidTable) -> SimplePeakGenerator {
        SimplePeakGenerator { aa_table }
    }
}

impl Default for SimplePeakGenerator {
    fn default() -> SimplePeakGenerator {
        SimplePeakGenerator::new(&STANDARD_AMINO_ACID_TABLE)
    }
}

impl PeakGenerator for SimplePeakGenerator {
    fn generate(&self, peptide: &Peptide, ion_type: FragmentIonSeries, charge: i8) -> Result<Vec<TheoreticalFragmentIon>> {
        let mz_values = compute_frag_series_mz_values(peptide.residues(), ion_type, charge, self.aa_table)?;

        let ions = mz_values.into_iter().enumerate().map(|(i, mz)| {
            TheoreticalFragmentIon { ion_series: ion_type, position: i + 1, charge, mz }
        }).collect();

        Ok(ions)
    }
}

// --- Compute m/z values of a fragment ion series, ordered by fragment length --- //
pub fn compute_frag_series_mz_values(residues: &[ModifiedResidue], ion_type: FragmentIonSeries, charge: i8, aa_table: &AminoAcidTable) -> Result<Vec<f64>> {

    if charge == 0 { bail!("fragment ion charge can't be zero") }

    let seq_len = residues.len();
    let mut frag_series_mz_values = Vec::with_capacity(seq_len.saturating_sub(1));

    use FragmentIonSeriesDirection::*;
    match get_ion_series_direction(ion_type) {
        FORWARD => {
            // starts at one because the prefix range will be between 0 and i-1
            for i in 1..seq_len {
                frag_series_mz_values.push(_calc_ion_mz(&residues[0..i], aa_table, ion_type, charge)?);
            }
        },
        REVERSE => {
            for i in (1..seq_len).rev() {
                frag_series_mz_values.push(_calc_ion_mz(&residues[i..seq_len], aa_table, ion_type, charge)?);
            }
        },
    }

    Ok(frag_series_mz_values)
}

// --- Calculate m/z value of a fragment depending on ion type and charge state --- //
fn _calc_ion_mz(residues: &[ModifiedResidue], aa_table: &AminoAcidTable, ion_type: FragmentIonSeries, charge: i8) -> Result<f64> {
    let fragment_mass = calc_residues_mono_mass(residues, aa_table)? + WATER_MONO_MASS;
    let ion_mass = fragment_mass + get_ion_mono_mass_shift(ion_type);

    Ok(mass_to_mz(ion_mass, charge as i32))
}
