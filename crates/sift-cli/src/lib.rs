//! Library side of the `sift` command: reading sheets and rule files,
//! writing results, and logging setup.

pub mod ingest;
pub mod logging;
pub mod output;
pub mod rules;
