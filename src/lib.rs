//! Phosphosite localization of peptide-spectrum matches with the AScore algorithm.
//!
//! ```no_run
//! use ascore::ascore::{AScore, AScoreParameters};
//! use ascore::ident::PeptideHit;
//! use ascore::ms::spectrum::{ObservedSpectrum, Peak};
//!
//! let hit = PeptideHit::new("GAS(Phospho)PTK".parse()?, 0.0, Some(2));
//! let mut spectrum = ObservedSpectrum::new(vec![Peak::new(217.0826, 120.0)]);
//!
//! let rescored = AScore::new(AScoreParameters::default()).compute(&hit, &mut spectrum)?;
//! println!("{} {:?}", rescored.sequence, rescored.get_meta_value("AScore_1"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod ascore;
pub mod chemistry;
pub mod ident;
pub mod io;
pub mod ms;
pub mod msms;

pub use crate::ascore::{AScore, AScoreParameters};
