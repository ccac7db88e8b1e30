pub mod constants;
pub mod mass_calc;
pub mod model;
pub mod table;
