use itertools::Itertools;

use crate::chemistry::model::{Peptide, Ptm};

pub fn count_phospho_events(peptide: &Peptide) -> usize {
    peptide.count_modifications(Ptm::Phospho)
}

pub fn remove_phosphosites(peptide: &Peptide) -> Peptide {
    peptide.without_modification(Ptm::Phospho)
}

/// Positions of the residues able to carry a phosphorylation (S, T, Y).
///
/// A residue already carrying another modification is not a site.
pub fn get_sites(peptide: &Peptide) -> Vec<usize> {
    peptide.residues().iter()
        .positions(|residue| residue.is_phospho_acceptor() && residue.ptm.is_none())
        .collect()
}

/// All `n_phospho_events` sized sets of sites.
///
/// Sets containing the first site come before sets without it, recursively,
/// i.e. lexicographic order over the site indices. No event gives no set.
pub fn compute_permutations(sites: &[usize], n_phospho_events: usize) -> Vec<Vec<usize>> {
    if n_phospho_events == 0 || n_phospho_events > sites.len() {
        return Vec::new();
    }

    sites.iter().copied().combinations(n_phospho_events).collect()
}
