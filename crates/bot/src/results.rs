// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Game result file.
use anyhow::{Result, anyhow};
use log::info;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

/// Appends a line to the result file, creating it if needed.
pub fn append(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    info!("Data appended to {}", path.display());
    Ok(())
}

/// Reads the result on the first line of the file.
///
/// Returns `None` if the file doesn't exist or is empty.
pub fn read_result(path: &Path) -> Result<Option<i64>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let Some(line) = content.lines().next().map(str::trim).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };

    let value = line
        .parse::<f64>()
        .map_err(|_| anyhow!("Invalid result {line:?} in {}", path.display()))?;

    Ok(Some(value.trunc() as i64))
}

/// Truncates the result file if it exists.
pub fn clear(path: &Path) -> Result<()> {
    if path.is_file() {
        OpenOptions::new().write(true).truncate(true).open(path)?;
    }

    Ok(())
}
