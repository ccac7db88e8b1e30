use crate::chemistry::model::AminoAcidResidue;

use anyhow::*;
use lazy_static::lazy_static;
use std::collections::HashMap;

#[derive(Clone, Default, PartialEq, Debug)]
pub struct AminoAcidTable {
    pub amino_acids: Vec<AminoAcidResidue>,
    pub aa_by_code1: HashMap<char, AminoAcidResidue>
}

impl AminoAcidTable {
    pub fn new(
        amino_acids: Vec<AminoAcidResidue>,
    ) -> Result<AminoAcidTable> {

        if amino_acids.is_empty() { bail!("amino_acids is empty") }

        let n_aas = amino_acids.len();
        let mut aa_by_code1 = HashMap::with_capacity(n_aas);
        for amino_acid in amino_acids.to_owned() {
            aa_by_code1.insert(amino_acid.code1, amino_acid);
        }

        if aa_by_code1.len() != n_aas {
            bail!("amino_acids contains duplicated entries")
        }

        Ok(AminoAcidTable {
            amino_acids: amino_acids,
            aa_by_code1: aa_by_code1,
        })
    }

    pub fn get_mono_mass(&self, code1: char) -> Result<f64> {
        let aa = self.aa_by_code1.get(&code1).ok_or_else(
            || anyhow!("can't find amino acid '{}' in the provided table", code1)
        )?;

        Ok(aa.mono_mass)
    }
}

// Sources :
// - http://en.wikipedia.org/wiki/Proteinogenic_amino_acid
// - https://proteomicsresource.washington.edu/tools/masses.php
// - http://www.matrixscience.com/help/aa_help.html
const STANDARD_RESIDUES: [(char, f64); 21] = [
    ('A', 71.03711381), // Alanine
    ('R', 156.1011111), // Arginine
    ('N', 114.0429275), // Asparagine
    ('D', 115.0269431), // Aspartic acid
    ('C', 103.0091845), // Cysteine
    ('E', 129.0425931), // Glutamic acid
    ('Q', 128.0585775), // Glutamine
    ('G', 57.02146374), // Glycine
    ('H', 137.0589119), // Histidine
    ('I', 113.084064), // Isoleucine
    ('L', 113.084064), // Leucine
    ('K', 128.0949631), // Lysine
    ('M', 131.0404846), // Methionine
    ('F', 147.0684139), // Phenylalanine
    ('P', 97.05276388), // Proline
    ('U', 150.9536353), // Selenocysteine
    ('S', 87.03202844), // Serine
    ('T', 101.0476785), // Threonine
    ('W', 186.079313), // Tryptophan
    ('Y', 163.0633286), // Tyrosine
    ('V', 99.06841395), // Valine
];

lazy_static! {
    pub static ref STANDARD_AMINO_ACID_TABLE: AminoAcidTable = AminoAcidTable::new(
        STANDARD_RESIDUES.iter().map(|(code1, mono_mass)| {
            AminoAcidResidue::new(*code1, *mono_mass).unwrap()
        }).collect()
    ).unwrap();
}
