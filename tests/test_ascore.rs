use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;

use ascore::ascore::scoring::{calculate_peak_depth_scores, calculate_permutation_scores, peptide_score};
use ascore::ascore::theoretical::{synthesize, PhosphoIsoform};
use ascore::ascore::{ascore_key, SEARCH_ENGINE_SEQUENCE_KEY};
use ascore::chemistry::model::Peptide;
use ascore::ident::PeptideHit;
use ascore::io::hits::AScoreRecord;
use ascore::ms::spectrum::{ObservedSpectrum, Peak};
use ascore::ms::windows::SpectrumWindows;
use ascore::msms::fragmentation::{PeakGenerator, SimplePeakGenerator};
use ascore::msms::model::{FragmentIonSeries, TheoreticalFragmentIon};
use ascore::{AScore, AScoreParameters};

fn isoform(sequence: &str, sites: &[usize]) -> PhosphoIsoform {
    let base: Peptide = sequence.parse().unwrap();
    synthesize(&SimplePeakGenerator::default(), &base, sites).unwrap()
}

fn spectrum_of(mz_values: impl IntoIterator<Item = f64>) -> ObservedSpectrum {
    ObservedSpectrum::new(mz_values.into_iter().map(|mz| Peak::new(mz, 100.0)).collect())
}

fn rescore(sequence: &str, spectrum: &mut ObservedSpectrum) -> PeptideHit {
    let hit = PeptideHit::new(sequence.parse().unwrap(), 25.0, Some(2));
    AScore::new(AScoreParameters::default()).compute(&hit, spectrum).unwrap()
}

#[test_log::test]
fn test_single_site_single_event() {
    let expected = isoform("GAPSLK", &[3]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().step_by(2).map(|ion| ion.mz));

    let result = rescore("GAPS(Phospho)LK", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "GAPS(Phospho)LK");
    assert!(result.get_meta_value(&ascore_key(1)).is_none());
    assert_eq!(
        result.get_meta_value(SEARCH_ENGINE_SEQUENCE_KEY).and_then(|v| v.as_str()),
        Some("GAPS(Phospho)LK")
    );

    let windows = SpectrumWindows::new(&mut spectrum).unwrap();
    let tol = AScoreParameters::default().mz_tolerance();
    let score = peptide_score(&calculate_peak_depth_scores(&expected.spectrum, &windows, &tol));
    assert!(score > 0.0);
    assert!((result.score - score).abs() < 1e-9);
}

#[test_log::test]
fn test_two_sites_one_event() {
    // GASASAK: serines at positions 2 and 4, the spectrum supports position 2
    let expected = isoform("GASASAK", &[2]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().map(|ion| ion.mz));

    // the search engine placed the phosphate on the wrong serine
    let result = rescore("GASAS(Phospho)AK", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "GAS(Phospho)ASAK");
    assert_eq!(
        result.get_meta_value(SEARCH_ENGINE_SEQUENCE_KEY).and_then(|v| v.as_str()),
        Some("GASAS(Phospho)AK")
    );

    // the 4 site-determining ions are all matched at depth 3, the competitor ones never are
    let ascore = result.get_meta_value(&ascore_key(1)).and_then(|v| v.as_f64()).unwrap();
    let expected_ascore = -40.0 * 0.03f64.log10();
    assert!((ascore - expected_ascore).abs() < 1e-6, "{} != {}", ascore, expected_ascore);
    assert!(result.get_meta_value(&ascore_key(2)).is_none());
}

#[test]
fn test_two_events_three_sites() {
    let expected = isoform("SASASK", &[0, 2]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().map(|ion| ion.mz));

    let result = rescore("S(Phospho)ASAS(Phospho)K", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "S(Phospho)AS(Phospho)ASK");
    for rank in 1..=2 {
        let ascore = result.get_meta_value(&ascore_key(rank)).and_then(|v| v.as_f64()).unwrap();
        assert!(ascore >= 0.0);
    }
    assert!(result.get_meta_value(&ascore_key(3)).is_none());

    let record = AScoreRecord::from_hit("scan=3", &result);
    assert_eq!(record.search_engine_sequence, "S(Phospho)ASAS(Phospho)K");
    assert_eq!(record.ascores.split(';').count(), 2);
}

#[test_log::test]
fn test_no_eligible_site() {
    let expected = isoform("AAGK", &[]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().map(|ion| ion.mz));

    let result = rescore("A(Phospho)AGK", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "AAGK");
    assert_eq!(
        result.get_meta_value(SEARCH_ENGINE_SEQUENCE_KEY).and_then(|v| v.as_str()),
        Some("A(Phospho)AGK")
    );
    assert!(result.metadata.keys().all(|key| !key.starts_with("AScore_")));

    let windows = SpectrumWindows::new(&mut spectrum).unwrap();
    let tol = AScoreParameters::default().mz_tolerance();
    let score = peptide_score(&calculate_peak_depth_scores(&expected.spectrum, &windows, &tol));
    assert!(score > 0.0);
    assert!((result.score - score).abs() < 1e-9);
}

#[test]
fn test_other_modifications_are_kept() {
    // the acetylated serine can't carry the phosphate, the free one is the only site
    let expected = isoform("S(Acetyl)ASAK", &[2]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().map(|ion| ion.mz));

    let result = rescore("S(Acetyl)AS(Phospho)AK", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "S(Acetyl)AS(Phospho)AK");
    assert!(result.get_meta_value(&ascore_key(1)).is_none());
    assert!(result.score > 0.0);
}

#[test]
fn test_empty_spectrum() {
    let mut spectrum = ObservedSpectrum::default();
    let result = rescore("GAS(Phospho)ASAK", &mut spectrum);

    assert_eq!(result.sequence.to_string(), "GAS(Phospho)ASAK");
    assert_eq!(result.score, 0.0);
    assert!(result.metadata.is_empty());
}

#[test_log::test]
fn test_indistinguishable_sites() {
    // only the ions shared by both assignments are observed
    let first = isoform("GASASAK", &[2]);
    let second = isoform("GASASAK", &[4]);
    let shared = first.spectrum.ions().iter()
        .map(|ion| ion.mz)
        .filter(|mz| second.spectrum.ions().iter().any(|ion| (ion.mz - mz).abs() < 1e-6))
        .collect::<Vec<f64>>();
    assert_eq!(shared.len(), 8);

    let mut spectrum = spectrum_of(shared);
    let windows = SpectrumWindows::new(&mut spectrum).unwrap();
    let tol = AScoreParameters::default().mz_tolerance();
    let scores = calculate_permutation_scores([&first.spectrum, &second.spectrum], &windows, &tol);
    assert_eq!(peptide_score(&scores[0]), peptide_score(&scores[1]));

    let result = rescore("GAS(Phospho)ASAK", &mut spectrum);

    // ties go to the last enumerated assignment
    assert_eq!(result.sequence.to_string(), "GASAS(Phospho)AK");
    assert!(result.score > 0.0);

    let ascore = result.get_meta_value(&ascore_key(1)).and_then(|v| v.as_f64()).unwrap();
    assert_eq!(ascore, 0.0);
}

#[test]
fn test_ppm_tolerance() {
    let expected = isoform("GASASAK", &[2]);
    let shifted: Vec<f64> = expected.spectrum.ions().iter().map(|ion| ion.mz + 0.01).collect();
    let hit = PeptideHit::new("GAS(Phospho)ASAK".parse().unwrap(), 0.0, None);

    let da = AScore::new(AScoreParameters { fragment_mass_tolerance: 0.05, fragment_mass_unit_ppm: false });
    let result = da.compute(&hit, &mut spectrum_of(shifted.clone())).unwrap();
    assert!(result.score > 0.0);

    let ppm = AScore::new(AScoreParameters { fragment_mass_tolerance: 5.0, fragment_mass_unit_ppm: true });
    let result = ppm.compute(&hit, &mut spectrum_of(shifted)).unwrap();
    assert_eq!(result.score, 0.0);
}

struct CountingGenerator {
    inner: SimplePeakGenerator,
    calls: AtomicUsize,
}

impl PeakGenerator for CountingGenerator {
    fn generate(&self, peptide: &Peptide, ion_type: FragmentIonSeries, charge: i8) -> Result<Vec<TheoreticalFragmentIon>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.generate(peptide, ion_type, charge)
    }
}

#[test]
fn test_custom_peak_generator() {
    let generator = CountingGenerator { inner: SimplePeakGenerator::default(), calls: AtomicUsize::new(0) };
    let engine = AScore::with_generator(AScoreParameters::default(), generator);

    let expected = isoform("GASASAK", &[2]);
    let mut spectrum = spectrum_of(expected.spectrum.ions().iter().map(|ion| ion.mz));
    let hit = PeptideHit::new("GAS(Phospho)ASAK".parse().unwrap(), 0.0, None);
    engine.compute(&hit, &mut spectrum).unwrap();

    // b and y series of both assignments
    assert_eq!(engine.generator().calls.load(Ordering::SeqCst), 4);
}
