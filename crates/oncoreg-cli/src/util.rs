use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use oncoreg_engine::FilterState;
use serde::{Serialize, de::DeserializeOwned};

/// Pretty-prints `value` as JSON to `path`, or to stdout when `path` is `None`.
pub fn write_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            emit_json(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => emit_json(io::stdout().lock(), value).context("Failed to write JSON to stdout")?,
    }
    Ok(())
}

fn emit_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn read_json<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {what}: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {what}: {}", path.display()))
}

/// Reads a saved filter preset and restores its invariants.
pub fn read_preset(path: &Path) -> anyhow::Result<FilterState> {
    let mut state: FilterState = read_json("filter preset", path)?;
    state.normalize();
    Ok(state)
}
