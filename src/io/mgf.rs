use anyhow::*;
use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::io::reader::TextReader;

const READ_BUFFER_CAPACITY: usize = 10 * 1024 * 1024; // 10MB

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MgfSpectrum {
    pub header: MgfSpectrumHeader,
    pub data: SpectrumData,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MgfSpectrumHeader {
    pub title: String,
    pub precursor_mz: f64,
    pub precursor_charge: Option<i8>,
    pub retention_time: Option<f32>,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SpectrumData {
    pub mz_list: Vec<f64>,
    pub intensity_list: Vec<f32>,
}

fn parse_charge(value: &str) -> Option<i8> {
    let value = value.trim();
    let charge_sign_idx = value.chars().position(|c| !c.is_ascii_digit()).unwrap_or(value.len());
    let charge: i8 = value[0..charge_sign_idx].parse().ok()?;

    if value[charge_sign_idx..].starts_with('-') { Some(-charge) } else { Some(charge) }
}

pub fn for_each_spectrum<F>(path: impl AsRef<Path>, mut cb: F) -> Result<()> where F: FnMut(MgfSpectrum) {

    let path = path.as_ref();
    let text_reader = TextReader::open(path, READ_BUFFER_CAPACITY)
        .with_context(|| format!("can't open MGF file {}", path.display()))?;

    let mut mz_list_buffer: Vec<f64> = Vec::with_capacity(10000);
    let mut intensity_list_buffer: Vec<f32> = Vec::with_capacity(10000);

    let mut title: String = "".to_string();
    let mut pep_mass: f64 = 0.0;
    let mut charge: Option<i8> = None;
    let mut rt: Option<f32> = None;

    let mut is_inside_spectrum_block = false;
    for (line_idx, line_res) in text_reader.enumerate() {

        let line_rc = line_res?;
        let line = line_rc.trim();

        let first_char = match line.chars().next() {
            Some(c) => c,
            None => continue,
        };

        if line.starts_with("BEGIN IONS") {
            // the title is expected in every block
            title.clear();
            pep_mass = 0.0;
            charge = None;
            rt = None;

            // peaks of an unterminated block are dropped
            mz_list_buffer.clear();
            intensity_list_buffer.clear();

            is_inside_spectrum_block = true;
        } else if line.starts_with("END IONS") {

            cb(MgfSpectrum {
                header: MgfSpectrumHeader {
                    title: title.clone(),
                    precursor_mz: pep_mass,
                    precursor_charge: charge,
                    retention_time: rt
                },
                data: SpectrumData {
                    mz_list: mz_list_buffer.to_vec(),
                    intensity_list: intensity_list_buffer.to_vec(),
                }
            });

            mz_list_buffer.clear();
            intensity_list_buffer.clear();

            is_inside_spectrum_block = false;
        } else if is_inside_spectrum_block {

            // if peak line
            if first_char.is_ascii_digit() {
                let mut parts = line.split_ascii_whitespace();
                let (mz_str, intensity_str) = match (parts.next(), parts.next()) {
                    (Some(mz_str), Some(intensity_str)) => (mz_str, intensity_str),
                    _ => bail!("invalid number of columns for a peak line at line {}", line_idx + 1),
                };

                let mz: f64 = fast_float::parse(mz_str)
                    .map_err(|_| anyhow!("invalid m/z value '{}' at line {}", mz_str, line_idx + 1))?;
                let intensity: f32 = fast_float::parse(intensity_str)
                    .map_err(|_| anyhow!("invalid intensity value '{}' at line {}", intensity_str, line_idx + 1))?;

                mz_list_buffer.push(mz);
                intensity_list_buffer.push(intensity);
            } else { // header line assumed

                match line.split_once('=') {
                    Some(("TITLE", value)) => {
                        title = value.to_string();
                    }
                    Some(("PEPMASS", value)) => {
                        let pep_mass_str = value.split_ascii_whitespace().next().unwrap_or("0.0");
                        pep_mass = pep_mass_str.parse()
                            .with_context(|| format!("invalid PEPMASS at line {}", line_idx + 1))?;
                    }
                    Some(("CHARGE", value)) => {
                        charge = parse_charge(value);
                    }
                    Some(("RTINSECONDS", value)) => {
                        rt = value.parse::<f32>().ok();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

pub fn read_mgf_file(path: impl AsRef<Path>) -> Result<Vec<MgfSpectrum>> {
    let mut spectra = Vec::new();
    for_each_spectrum(path, |spectrum| spectra.push(spectrum))?;

    Ok(spectra)
}
