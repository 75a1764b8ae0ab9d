//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. CSV helpers shared by
//! the commands live here; `-` as a path means stdin.

pub mod check;
pub mod resample;
pub mod sample;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::path::Path;

use crate::{CliError, Result};

/// Read every record of a headed CSV file (or stdin for `-`).
pub fn read_records<T: DeserializeOwned>(path: &str) -> Result<Vec<T>> {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All);

    if path == "-" {
        return collect_records(builder.from_reader(io::stdin().lock()));
    }
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    collect_records(builder.from_path(path)?)
}

fn collect_records<R: io::Read, T: DeserializeOwned>(mut reader: csv::Reader<R>) -> Result<Vec<T>> {
    Ok(reader.deserialize().collect::<std::result::Result<Vec<T>, csv::Error>>()?)
}

/// Write records with a header row to `output`, or stdout when `None`.
pub fn write_records<T: Serialize>(output: Option<&str>, records: &[T]) -> Result<()> {
    match output {
        Some(path) => write_all(csv::Writer::from_path(path)?, records),
        None => write_all(csv::Writer::from_writer(io::stdout().lock()), records),
    }
}

fn write_all<W: io::Write, T: Serialize>(mut writer: csv::Writer<W>, records: &[T]) -> Result<()> {
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
