use anyhow::*;

use crate::chemistry::model::ModifiedResidue;
use crate::chemistry::table::AminoAcidTable;

/// Mono mass of a residue including its modification, if any.
pub fn calc_residue_mono_mass(residue: &ModifiedResidue, aa_table: &AminoAcidTable) -> Result<f64> {
    let aa_mass = aa_table.get_mono_mass(residue.code1)?;
    let ptm_mass = residue.ptm.map(|ptm| ptm.mono_mass()).unwrap_or(0.0);

    Ok(aa_mass + ptm_mass)
}

/// Sum of the residue mono masses, without terminal groups.
pub fn calc_residues_mono_mass(residues: &[ModifiedResidue], aa_table: &AminoAcidTable) -> Result<f64> {
    let mut mass: f64 = 0.0;
    for residue in residues {
        mass += calc_residue_mono_mass(residue, aa_table)?;
    }

    Ok(mass)
}
