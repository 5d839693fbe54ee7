//! Compares a result file against a truth file within an absolute tolerance.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

pub const DEFAULT_TOLERANCE: f64 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub key: String,
    pub missing: bool,
    pub mean_ok: bool,
    pub min_ok: bool,
    pub max_ok: bool,
}

/// Parses `key;mean;min;max` lines. Blank lines are ignored.
pub fn read_results<R: BufRead>(reader: R, path: &Path) -> Result<BTreeMap<String, ResultRow>> {
    let mut rows = BTreeMap::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| Error::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let malformed = || Error::MalformedResult {
            path: path.to_path_buf(),
            line: n + 1,
        };
        let fields: Vec<&str> = line.split(';').collect();
        let &[key, mean, min, max] = fields.as_slice() else {
            return Err(malformed());
        };
        let number = |s: &str| s.trim().parse::<f64>().map_err(|_| malformed());
        rows.insert(
            key.to_string(),
            ResultRow {
                mean: number(mean)?,
                min: number(min)?,
                max: number(max)?,
            },
        );
    }
    Ok(rows)
}

pub fn read_results_file(path: &Path) -> Result<BTreeMap<String, ResultRow>> {
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    read_results(BufReader::new(file), path)
}

/// Every truth key, in sorted order, whose calculated row is missing or off
/// by more than `tolerance` in any field.
pub fn compare(
    truth: &BTreeMap<String, ResultRow>,
    calculated: &BTreeMap<String, ResultRow>,
    tolerance: f64,
) -> Vec<Mismatch> {
    let close = |a: f64, b: f64| (a - b).abs() <= tolerance;
    truth
        .iter()
        .filter_map(|(key, want)| {
            let mismatch = match calculated.get(key) {
                None => Mismatch {
                    key: key.clone(),
                    missing: true,
                    mean_ok: false,
                    min_ok: false,
                    max_ok: false,
                },
                Some(got) => Mismatch {
                    key: key.clone(),
                    missing: false,
                    mean_ok: close(want.mean, got.mean),
                    min_ok: close(want.min, got.min),
                    max_ok: close(want.max, got.max),
                },
            };
            let ok = !mismatch.missing && mismatch.mean_ok && mismatch.min_ok && mismatch.max_ok;
            (!ok).then_some(mismatch)
        })
        .collect()
}
