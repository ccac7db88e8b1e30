pub mod peptide_hit;

pub use peptide_hit::{MetaValue, PeptideHit};
