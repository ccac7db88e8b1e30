use anyhow::*;
use itertools::Itertools;

use crate::ascore::scoring::{peptide_score, PeakDepthScores};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RankedPermutation {
    pub weighted_score: f64,
    /// Index of the permutation (and of its theoretical spectrum and scores)
    pub id: usize,
}

/// Permutations ordered by decreasing weighted score.
///
/// Equal scores are ordered by decreasing permutation index, the last
/// enumerated permutation among tied ones is ranked first.
#[derive(Clone, Debug, Default)]
pub struct Ranking {
    ranked: Vec<RankedPermutation>,
}

impl Ranking {
    pub fn new(peptide_site_scores: &[PeakDepthScores]) -> Ranking {
        let ranked = peptide_site_scores.iter().enumerate()
            .map(|(id, scores)| RankedPermutation { weighted_score: peptide_score(scores), id })
            .sorted_by(|x1, x2| {
                // Use partial_cmp because cmp cannot deal with floating point numbers
                x2.weighted_score.partial_cmp(&x1.weighted_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| x2.id.cmp(&x1.id))
            })
            .collect();

        Ranking { ranked }
    }

    pub fn best(&self) -> Option<&RankedPermutation> {
        self.ranked.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPermutation> {
        self.ranked.iter()
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

/// A phosphosite of the best assignment and its closest competing assignment.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct ProbablePhosphoSite {
    /// Site of the best scoring assignment
    pub site: usize,
    /// Site used instead of `site` by the competing assignment
    pub alternative_site: usize,
    pub best_permutation: usize,
    pub competing_permutation: usize,
    /// Peak depth (1 to 10) maximizing the score difference between both assignments
    pub peak_depth: usize,
}

/// For every site of the best assignment, finds the next best assignment
/// that keeps all other sites but moves this one, and the peak depth that
/// separates both the most.
pub fn determine_highest_scoring_permutations(
    peptide_site_scores: &[PeakDepthScores],
    permutations: &[Vec<usize>],
    ranking: &Ranking,
) -> Result<Vec<ProbablePhosphoSite>> {

    let best = ranking.best().ok_or_else(|| anyhow!("can't resolve sites without any ranked permutation"))?;
    let best_sites = permutations.get(best.id).ok_or_else(|| anyhow!("unknown permutation {}", best.id))?;

    let mut phospho_sites = Vec::with_capacity(best_sites.len());

    for (i, &site) in best_sites.iter().enumerate() {

        // --- iterate from the best scoring assignment to the first one lacking only the current site --- //
        let competitor = ranking.iter().skip(1).find(|candidate| {
            let candidate_sites = &permutations[candidate.id];
            !candidate_sites.contains(&site) && best_sites.iter().enumerate()
                .all(|(j, other_site)| j == i || candidate_sites.contains(other_site))
        }).ok_or_else(|| {
            anyhow!("no competing permutation moves site {} of permutation {:?}", site, best_sites)
        })?;

        let alternative_site = permutations[competitor.id].iter()
            .find(|s| !best_sites.contains(s))
            .copied()
            .ok_or_else(|| anyhow!("permutation {} has no site outside of {:?}", competitor.id, best_sites))?;

        let peak_depth = find_max_score_difference_depth(
            &peptide_site_scores[best.id],
            &peptide_site_scores[competitor.id],
        );

        phospho_sites.push(ProbablePhosphoSite {
            site,
            alternative_site,
            best_permutation: best.id,
            competing_permutation: competitor.id,
            peak_depth,
        });
    }

    Ok(phospho_sites)
}

/// First depth reaching the largest positive `first - second` difference, 1 when there is none.
pub fn find_max_score_difference_depth(first: &PeakDepthScores, second: &PeakDepthScores) -> usize {
    let mut maximum_score_difference = 0.0;
    let mut peak_depth = 1;

    for (i, (phospho_at_site_score, no_phospho_at_site_score)) in first.iter().zip(second.iter()).enumerate() {
        let score_difference = phospho_at_site_score - no_phospho_at_site_score;
        if score_difference > maximum_score_difference {
            maximum_score_difference = score_difference;
            peak_depth = i + 1;
        }
    }

    peak_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> PeakDepthScores {
        [value; 10]
    }

    #[test]
    fn test_ranking_order_and_ties() {
        let ranking = Ranking::new(&[flat(1.0), flat(3.0), flat(2.0), flat(3.0)]);
        let ids: Vec<usize> = ranking.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 0]);
        assert_eq!(ranking.best().unwrap().id, 3);
        assert!((ranking.best().unwrap().weighted_score - 2.1).abs() < 1e-12);
    }

    #[test]
    fn test_peak_depth_selection() {
        let first = [5.0, 6.0, 9.0, 9.0, 7.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let second = [5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0];
        // first depth achieving the maximum wins
        assert_eq!(find_max_score_difference_depth(&first, &second), 3);
        // no positive difference keeps depth 1
        assert_eq!(find_max_score_difference_depth(&second, &first), 1);
    }

    #[test]
    fn test_single_event_competitor() {
        let permutations = vec![vec![1], vec![4], vec![6]];
        let scores = vec![flat(2.0), flat(5.0), flat(3.0)];
        let ranking = Ranking::new(&scores);

        let sites = determine_highest_scoring_permutations(&scores, &permutations, &ranking).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0], ProbablePhosphoSite {
            site: 4,
            alternative_site: 6,
            best_permutation: 1,
            competing_permutation: 2,
            peak_depth: 1,
        });
    }

    #[test]
    fn test_multiple_events_keep_other_sites() {
        // sites 1, 3, 5 with two events
        let permutations = vec![vec![1, 3], vec![1, 5], vec![3, 5]];
        let mut scores = vec![flat(9.0), flat(4.0), flat(6.0)];
        scores[1][4] = 1.0;
        let ranking = Ranking::new(&scores);

        let sites = determine_highest_scoring_permutations(&scores, &permutations, &ranking).unwrap();
        assert_eq!(sites.len(), 2);

        // moving site 1 keeps site 3: [3, 5]
        assert_eq!(sites[0].site, 1);
        assert_eq!(sites[0].competing_permutation, 2);
        assert_eq!(sites[0].alternative_site, 5);

        // moving site 3 keeps site 1: [1, 5], largest gap at depth 5
        assert_eq!(sites[1].site, 3);
        assert_eq!(sites[1].competing_permutation, 1);
        assert_eq!(sites[1].alternative_site, 5);
        assert_eq!(sites[1].peak_depth, 5);
    }

    #[test]
    fn test_missing_competitor_is_an_error() {
        let permutations = vec![vec![2]];
        let scores = vec![flat(1.0)];
        let ranking = Ranking::new(&scores);
        assert!(determine_highest_scoring_permutations(&scores, &permutations, &ranking).is_err());
    }
}
