use anyhow::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::chemistry::constants::*;

#[derive(Clone, Default, PartialEq, Debug)]
pub struct AminoAcidResidue {
    pub code1: char,
    pub mono_mass: f64,
}

impl AminoAcidResidue {
    pub fn new(code1: char, mono_mass: f64) -> anyhow::Result<AminoAcidResidue> {
        if !code1.is_ascii_uppercase() { bail!("code1 must be an upper case letter") }
        if mono_mass <= 0.0 { bail!("mono_mass must be a strictly positive number") }

        Ok(AminoAcidResidue { code1, mono_mass })
    }
}

/// Residue modifications understood by the sequence notation.
///
/// Only `Phospho` is localized; the others are carried along so that their
/// mass shifts end up in the theoretical fragment ions.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Ptm {
    Phospho,
    Oxidation,
    Carbamidomethyl,
    Acetyl,
}

impl Ptm {
    pub fn new(name: &str) -> Option<Ptm> {
        match name {
            "Phospho"         => Some(Ptm::Phospho),
            "Oxidation"       => Some(Ptm::Oxidation),
            "Carbamidomethyl" => Some(Ptm::Carbamidomethyl),
            "Acetyl"          => Some(Ptm::Acetyl),
            _                 => None
        }
    }

    pub fn mono_mass(&self) -> f64 {
        match self {
            Ptm::Phospho         => PHOSPHO_MONO_MASS,
            Ptm::Oxidation       => OXIDATION_MONO_MASS,
            Ptm::Carbamidomethyl => CARBAMIDOMETHYL_MONO_MASS,
            Ptm::Acetyl          => ACETYL_MONO_MASS,
        }
    }
}

impl std::fmt::Display for Ptm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct ModifiedResidue {
    pub code1: char,
    pub ptm: Option<Ptm>,
}

impl ModifiedResidue {
    pub fn unmodified(code1: char) -> ModifiedResidue {
        ModifiedResidue { code1, ptm: None }
    }

    pub fn is_phospho_acceptor(&self) -> bool {
        aa::PHOSPHO_ACCEPTORS.contains(&self.code1)
    }
}

impl std::fmt::Display for ModifiedResidue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ptm {
            Some(ptm) => write!(f, "{}({})", self.code1, ptm),
            None => write!(f, "{}", self.code1),
        }
    }
}

lazy_static! {
    static ref MODIFIED_SEQUENCE_REGEX: Regex = Regex::new(r"^(?:[A-Z](?:\([A-Za-z]+\))?)+$").unwrap();
    static ref MODIFIED_RESIDUE_REGEX: Regex = Regex::new(r"([A-Z])(?:\(([A-Za-z]+)\))?").unwrap();
}

/// A peptide as an ordered list of residues, each carrying at most one modification.
///
/// Renders to and parses from the `PEPS(Phospho)TIDE` notation.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Peptide {
    residues: Vec<ModifiedResidue>,
}

impl Peptide {
    pub fn new(residues: Vec<ModifiedResidue>) -> anyhow::Result<Peptide> {
        if residues.is_empty() { bail!("sequence is empty") }
        if let Some(residue) = residues.iter().find(|r| !r.code1.is_ascii_uppercase()) {
            bail!("invalid residue '{}'", residue.code1)
        }

        Ok(Peptide { residues })
    }

    pub fn from_unmodified(sequence: &str) -> anyhow::Result<Peptide> {
        Peptide::new(sequence.chars().map(ModifiedResidue::unmodified).collect())
    }

    pub fn residues(&self) -> &[ModifiedResidue] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn to_unmodified_string(&self) -> String {
        self.residues.iter().map(|r| r.code1).collect()
    }

    pub fn count_modifications(&self, ptm: Ptm) -> usize {
        self.residues.iter().filter(|r| r.ptm == Some(ptm)).count()
    }

    /// Copy of the peptide with every `ptm` tag removed, other tags kept.
    pub fn without_modification(&self, ptm: Ptm) -> Peptide {
        let residues = self.residues.iter().map(|r| {
            if r.ptm == Some(ptm) { ModifiedResidue::unmodified(r.code1) } else { *r }
        }).collect();

        Peptide { residues }
    }

    /// Copy of the peptide with `ptm` set on each of the given positions.
    ///
    /// Fails if one of the residues already carries another modification.
    pub fn with_modification_at(&self, positions: &[usize], ptm: Ptm) -> anyhow::Result<Peptide> {
        let mut residues = self.residues.clone();
        for &pos in positions {
            let residue = residues.get_mut(pos).ok_or_else(
                || anyhow!("position {} is out of range for sequence {}", pos, self)
            )?;
            if let Some(other) = residue.ptm.filter(|other| *other != ptm) {
                bail!("can't set {} at position {} of {}, already modified by {}", ptm, pos, self, other)
            }
            residue.ptm = Some(ptm);
        }

        Ok(Peptide { residues })
    }
}

impl std::fmt::Display for Peptide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for residue in &self.residues {
            write!(f, "{}", residue)?;
        }
        std::result::Result::Ok(())
    }
}

impl std::str::FromStr for Peptide {
    type Err = anyhow::Error;

    fn from_str(sequence: &str) -> anyhow::Result<Peptide> {
        let sequence = sequence.trim();
        if !MODIFIED_SEQUENCE_REGEX.is_match(sequence) {
            bail!("can't parse peptide sequence '{}'", sequence)
        }

        let mut residues = Vec::with_capacity(sequence.len());
        for caps in MODIFIED_RESIDUE_REGEX.captures_iter(sequence) {
            let code1 = caps[1].chars().next().ok_or_else(|| anyhow!("missing residue"))?;
            let ptm = match caps.get(2) {
                Some(name) => Some(Ptm::new(name.as_str()).ok_or_else(
                    || anyhow!("unsupported modification '{}' in '{}'", name.as_str(), sequence)
                )?),
                None => None,
            };
            residues.push(ModifiedResidue { code1, ptm });
        }

        Peptide::new(residues)
    }
}

impl TryFrom<String> for Peptide {
    type Error = anyhow::Error;

    fn try_from(sequence: String) -> anyhow::Result<Peptide> {
        sequence.parse()
    }
}

impl From<Peptide> for String {
    fn from(peptide: Peptide) -> String {
        peptide.to_string()
    }
}
