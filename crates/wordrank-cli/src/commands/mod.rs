pub mod stats;
pub mod top;

use anyhow::Result;
use std::path::Path;
use wordrank_count::{Engine, Tally};

/// Count `path`, or stdin when no path is given.
fn count_input(engine: &Engine, path: Option<&Path>) -> Result<Tally> {
    let tally = match path {
        Some(path) => engine.count_path(path)?,
        None => engine.count(std::io::stdin().lock())?,
    };
    Ok(tally)
}
