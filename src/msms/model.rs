use rstar::RTree;

use crate::chemistry::constants::*;

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum FragmentIonSeries {
    b,
    y,
}

// Shift relative to the mass of the fragment residues plus water
pub fn get_ion_mono_mass_shift(ion_type: FragmentIonSeries) -> f64 {

    use FragmentIonSeries::*;
    match ion_type {
        b => - WATER_MONO_MASS, //Composition(formula='H-2O-1'),
        y => 0.0,
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum FragmentIonSeriesDirection {
    FORWARD,
    REVERSE,
}

pub fn get_ion_series_direction(ion_type: FragmentIonSeries) -> FragmentIonSeriesDirection {

    use FragmentIonSeries::*;
    use FragmentIonSeriesDirection::*;

    match ion_type {
        b => FORWARD,
        y => REVERSE,
    }
}

impl std::fmt::Display for FragmentIonSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TheoreticalFragmentIon {
    pub ion_series: FragmentIonSeries,
    /// Number of residues in the fragment, e.g. 3 for b3
    pub position: usize,
    pub charge: i8,
    pub mz: f64,
}

impl std::fmt::Display for TheoreticalFragmentIon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}({}+) {:.4}", self.ion_series, self.position, self.charge, self.mz)
    }
}

/// Fragment ions sorted by m/z, indexed for nearest m/z lookups.
#[derive(Clone)]
pub struct TheoreticalSpectrum {
    pub name: String,
    ions: Vec<TheoreticalFragmentIon>,
    mz_tree: RTree<[f64; 2]>,
}

impl TheoreticalSpectrum {
    pub fn new(name: String, mut ions: Vec<TheoreticalFragmentIon>) -> TheoreticalSpectrum {
        ions.sort_by(|a, b| a.mz.total_cmp(&b.mz));

        // --- Compute R*Tree indexing of theoretical m/z values (second coordinate is unused) --- //
        let points: Vec<[f64; 2]> = ions.iter().map(|ion| [ion.mz, 0.0]).collect();
        let mz_tree = RTree::bulk_load(points);

        TheoreticalSpectrum { name, ions, mz_tree }
    }

    pub fn ions(&self) -> &[TheoreticalFragmentIon] {
        &self.ions
    }

    pub fn len(&self) -> usize {
        self.ions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ions.is_empty()
    }

    pub fn find_nearest_mz(&self, mz: f64) -> Option<f64> {
        self.mz_tree.nearest_neighbor(&[mz, 0.0]).map(|point| point[0])
    }
}

impl std::fmt::Debug for TheoreticalSpectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheoreticalSpectrum")
            .field("name", &self.name)
            .field("ions", &self.ions)
            .finish()
    }
}
