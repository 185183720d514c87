pub mod cli;
pub mod config;
pub mod report;
pub mod runner;
pub mod scan;
pub mod summary;
pub mod util;
