use anyhow::*;
use serde::{Serialize, Deserialize};
use std::io::{Read, Write};
use std::path::Path;

use crate::ascore::{ascore_key, SEARCH_ENGINE_SEQUENCE_KEY};
use crate::ident::PeptideHit;

/// A row of the peptide hit TSV file.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PeptideHitRecord {
    /// Title of the MGF spectrum the hit was identified from
    pub title: String,
    pub sequence: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub charge: Option<i8>,
}

impl PeptideHitRecord {
    pub fn to_peptide_hit(&self) -> Result<PeptideHit> {
        let sequence = self.sequence.parse()
            .with_context(|| format!("invalid sequence for spectrum '{}'", self.title))?;

        Ok(PeptideHit::new(sequence, self.score.unwrap_or(0.0), self.charge))
    }
}

/// A row of the AScore result TSV file.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AScoreRecord {
    pub title: String,
    pub search_engine_sequence: String,
    pub sequence: String,
    pub score: f64,
    /// AScores of the phosphosites in sequence order, separated by semicolons
    pub ascores: String,
}

impl AScoreRecord {
    pub fn from_hit(title: &str, hit: &PeptideHit) -> AScoreRecord {
        let search_engine_sequence = hit.get_meta_value(SEARCH_ENGINE_SEQUENCE_KEY)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| hit.sequence.to_string());

        let ascores: Vec<String> = (1..)
            .map_while(|rank| hit.get_meta_value(&ascore_key(rank)).and_then(|v| v.as_f64()))
            .map(|ascore| format!("{:.4}", ascore))
            .collect();

        AScoreRecord {
            title: title.to_string(),
            search_engine_sequence,
            sequence: hit.sequence.to_string(),
            score: hit.score,
            ascores: ascores.join(";"),
        }
    }
}

pub fn read_peptide_hit_records<R: Read>(reader: R) -> Result<Vec<PeptideHitRecord>> {
    let mut tsv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, record) in tsv_reader.deserialize().enumerate() {
        let record: PeptideHitRecord = record.with_context(|| format!("invalid peptide hit at row {}", i + 1))?;
        records.push(record);
    }

    Ok(records)
}

pub fn read_peptide_hits_file(path: impl AsRef<Path>) -> Result<Vec<PeptideHitRecord>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("can't open {}", path.display()))?;

    read_peptide_hit_records(std::io::BufReader::new(file))
}

pub fn write_ascore_records<W: Write>(writer: W, records: &[AScoreRecord]) -> Result<()> {
    let mut tsv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);

    for record in records {
        tsv_writer.serialize(record)?;
    }
    tsv_writer.flush()?;

    Ok(())
}

pub fn write_ascore_file(path: impl AsRef<Path>, records: &[AScoreRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).with_context(|| format!("can't create {}", path.display()))?;

    write_ascore_records(std::io::BufWriter::new(file), records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let content = "title\tsequence\tscore\tcharge\nscan=1\tPEPS(Phospho)TIDE\t35.2\t2\nscan=2\tAASK\t\t\n";
        let records = read_peptide_hit_records(content.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].charge, Some(2));
        assert_eq!(records[1].score, None);

        let hit = records[0].to_peptide_hit().unwrap();
        assert_eq!(hit.sequence.to_string(), "PEPS(Phospho)TIDE");
        assert_eq!(hit.score, 35.2);
    }

    #[test]
    fn test_optional_columns() {
        let content = "title\tsequence\nscan=7\tGAS(Phospho)K\n";
        let records = read_peptide_hit_records(content.as_bytes()).unwrap();
        assert_eq!(records[0].score, None);
        assert_eq!(records[0].charge, None);
    }

    #[test]
    fn test_invalid_sequence() {
        let record = PeptideHitRecord { title: "x".to_string(), sequence: "PEP(Foo)".to_string(), score: None, charge: None };
        assert!(record.to_peptide_hit().is_err());
    }

    #[test]
    fn test_write_records() {
        let mut hit = PeptideHit::new("PEPT(Phospho)SIDE".parse().unwrap(), 12.5, None);
        hit.set_meta_value(SEARCH_ENGINE_SEQUENCE_KEY, "PEPTS(Phospho)IDE");
        hit.set_meta_value(&ascore_key(1), 19.0);

        let record = AScoreRecord::from_hit("scan=3", &hit);
        assert_eq!(record.ascores, "19.0000");

        let mut out = Vec::new();
        write_ascore_records(&mut out, &[record]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "title\tsearch_engine_sequence\tsequence\tscore\tascores\nscan=3\tPEPTS(Phospho)IDE\tPEPT(Phospho)SIDE\t12.5\t19.0000\n"
        );
    }
}
