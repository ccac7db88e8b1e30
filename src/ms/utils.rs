use serde::{Serialize, Deserialize};

use crate::chemistry::constants::PROTON_MASS;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum MassTolUnit {
    Da,
    ppm
}

impl std::fmt::Display for MassTolUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Fragment m/z tolerance, either absolute or relative to the theoretical m/z.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct MzTolerance {
    pub value: f64,
    pub unit: MassTolUnit,
}

impl MzTolerance {
    pub fn new(value: f64, unit: MassTolUnit) -> MzTolerance {
        MzTolerance { value, unit }
    }

    /// Error of an observed m/z against a theoretical one, in the tolerance unit.
    pub fn calc_error(&self, theo_mz: f64, observed_mz: f64) -> f64 {
        let error = (theo_mz - observed_mz).abs();
        match self.unit {
            MassTolUnit::Da => error,
            MassTolUnit::ppm => error / theo_mz * 1e6,
        }
    }

    /// The bound is exclusive.
    pub fn is_match(&self, theo_mz: f64, observed_mz: f64) -> bool {
        self.calc_error(theo_mz, observed_mz) < self.value
    }
}

impl std::fmt::Display for MzTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

pub fn mass_to_mz( mass: f64, charge: i32 ) -> f64 {
    let z = charge as f64;
    (mass + z * PROTON_MASS) / z.abs()
}
