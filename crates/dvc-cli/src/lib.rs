//! Library components of the `dvc` command line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
