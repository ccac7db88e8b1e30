use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::*;
use std::result::Result::Ok;
use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ascore::io::hits::{read_peptide_hits_file, write_ascore_file, AScoreRecord, PeptideHitRecord};
use ascore::io::mgf::for_each_spectrum;
use ascore::ms::spectrum::ObservedSpectrum;
use ascore::{AScore, AScoreParameters};

/// Localize the phosphosites of peptide identifications with the AScore algorithm
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct AScoreArgs {
    /// MGF file holding the MS/MS spectra
    #[arg(long)]
    mgf: PathBuf,

    /// Tab separated peptide hits with `title` and `sequence` columns
    #[arg(long)]
    hits: PathBuf,

    /// Where to write the rescored hits
    #[arg(short, long)]
    output: PathBuf,

    /// Fragment m/z tolerance, in Th unless --ppm is given
    #[arg(long, default_value_t = 0.5)]
    fragment_mass_tolerance: f64,

    /// Interpret the fragment tolerance in ppm
    #[arg(long)]
    ppm: bool,

    /// Number of worker threads, all cores by default
    #[arg(short, long)]
    threads: Option<usize>,
}

impl AScoreArgs {
    fn parameters(&self) -> AScoreParameters {
        AScoreParameters {
            fragment_mass_tolerance: self.fragment_mass_tolerance,
            fragment_mass_unit_ppm: self.ppm,
        }
    }

    fn create_threadpool(&self) -> Result<rayon::ThreadPool> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.threads.filter(|n| *n > 0) {
            debug!("Using {} threads", threads);
            builder = builder.num_threads(threads);
        }

        builder.build().context("can't build the worker thread pool")
    }
}

fn configure_log() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(tracing::Level::INFO.into())
                        .from_env_lossy(),
                ),
        )
        .init();
}

fn load_spectra(args: &AScoreArgs) -> Result<HashMap<String, ObservedSpectrum>> {
    let mut spectra = HashMap::new();
    for_each_spectrum(&args.mgf, |spectrum| {
        let observed = ObservedSpectrum::from(&spectrum);
        if spectra.insert(spectrum.header.title, observed).is_some() {
            warn!("duplicated spectrum title in {}, keeping the last one", args.mgf.display());
        }
    })?;

    Ok(spectra)
}

/// Rescores one hit, skipping it with a warning when it can't be matched to a
/// spectrum or its sequence can't be read.
fn rescore_record(
    engine: &AScore,
    spectra: &HashMap<String, ObservedSpectrum>,
    record: &PeptideHitRecord,
) -> Result<Option<AScoreRecord>> {
    let mut spectrum = match spectra.get(&record.title) {
        Some(spectrum) => spectrum.clone(),
        None => {
            warn!("no spectrum titled '{}', skipping {}", record.title, record.sequence);
            return Ok(None);
        }
    };

    let hit = match record.to_peptide_hit() {
        Ok(hit) => hit,
        Err(err) => {
            warn!("{:#}, skipping", err);
            return Ok(None);
        }
    };

    let rescored = engine.compute(&hit, &mut spectrum)
        .with_context(|| format!("AScore failed for '{}' ({})", record.title, record.sequence))?;

    Ok(Some(AScoreRecord::from_hit(&record.title, &rescored)))
}

fn main() -> Result<()> {
    configure_log();
    let args = AScoreArgs::parse();
    let start = Instant::now();

    let spectra = load_spectra(&args)?;
    info!("Loaded {} spectra from {}", spectra.len(), args.mgf.display());

    let hit_records = read_peptide_hits_file(&args.hits)?;
    info!("Loaded {} peptide hits from {}", hit_records.len(), args.hits.display());

    let engine = AScore::new(args.parameters());
    let pool = args.create_threadpool()?;

    let results: Vec<Option<AScoreRecord>> = pool.install(|| {
        hit_records.par_iter()
            .map(|record| rescore_record(&engine, &spectra, record))
            .collect::<Result<Vec<_>>>()
    })?;

    let records: Vec<AScoreRecord> = results.into_iter().flatten().collect();
    write_ascore_file(&args.output, &records)?;

    info!(
        "Wrote {} rescored hits to {} in {:.2} seconds",
        records.len(),
        args.output.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
