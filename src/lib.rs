pub mod dfs;
pub mod error;
pub mod importer;
pub mod matrix;
pub mod rules;
pub mod solver;
pub mod visualizer;

// Necessary to export the modules to be integration tested in 'tests'
