// Source: NIST 2010 CODATA
pub const PROTON_MASS: f64 = 1.007276466812;

pub const WATER_MONO_MASS: f64 = 18.010565;

// Unimod mono mass deltas
pub const PHOSPHO_MONO_MASS: f64 = 79.966331;
pub const OXIDATION_MONO_MASS: f64 = 15.994915;
pub const CARBAMIDOMETHYL_MONO_MASS: f64 = 57.021464;
pub const ACETYL_MONO_MASS: f64 = 42.010565;

pub mod aa {
    pub const S: char = 'S';
    pub const T: char = 'T';
    pub const Y: char = 'Y';

    /// Residues able to carry a phosphorylation.
    pub const PHOSPHO_ACCEPTORS: [char; 3] = [S, T, Y];
}
