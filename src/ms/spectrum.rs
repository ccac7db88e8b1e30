use serde::{Serialize, Deserialize};

use crate::io::mgf::MgfSpectrum;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f32,
}

impl Peak {
    pub fn new(mz: f64, intensity: f32) -> Peak {
        Peak { mz, intensity }
    }
}

/// Centroided peaks of one MS/MS spectrum.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct ObservedSpectrum {
    pub peaks: Vec<Peak>,
}

impl ObservedSpectrum {
    pub fn new(peaks: Vec<Peak>) -> ObservedSpectrum {
        ObservedSpectrum { peaks }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.peaks.windows(2).all(|w| w[0].mz <= w[1].mz)
    }

    pub fn sort_by_mz(&mut self) {
        self.peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
    }

    pub fn first(&self) -> Option<&Peak> {
        self.peaks.first()
    }

    pub fn last(&self) -> Option<&Peak> {
        self.peaks.last()
    }
}

impl From<&MgfSpectrum> for ObservedSpectrum {
    fn from(spectrum: &MgfSpectrum) -> ObservedSpectrum {
        let peaks = spectrum.data.mz_list.iter()
            .zip(spectrum.data.intensity_list.iter())
            .map(|(mz, intensity)| Peak::new(*mz, *intensity))
            .collect();

        ObservedSpectrum { peaks }
    }
}
