pub mod flat;
pub mod gallery;
