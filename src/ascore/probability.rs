//! Cumulative binomial model of random fragment ion matches.

use statrs::function::factorial::binomial;

/// Probability of matching at least `n` out of `N` theoretical ions by chance,
/// each match having the probability `p`.
///
/// ```math
/// P = \sum_{k=n}^{N} \binom{N}{k} p^k (1-p)^{N-k}
/// ```
///
/// No match at all gets the worst probability (1.0), see Beausoleil et al. (2006).
///
/// # Panics
/// If `n > N` or if `p` is not a probability.
#[allow(non_snake_case)]
pub fn compute_cumulative_score(N: usize, n: usize, p: f64) -> f64 {
    assert!(n <= N, "the number of matched ions ({}) can be at most the number of trials ({})", n, N);
    assert!((0.0..=1.0).contains(&p), "p must be a probability in [0,1], got {}", p);

    if n == 0 {
        return 1.0;
    }

    (n..=N).map(|k| {
        binomial(N as u64, k as u64) * p.powi(k as i32) * (1.0 - p).powi((N - k) as i32)
    }).sum()
}

/// `|-10 log10(P)|`, the absolute value avoids -0 scores when P is 1.
pub fn probability_to_score(probability: f64) -> f64 {
    (-10.0 * probability.log10()).abs()
}
