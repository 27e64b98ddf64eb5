use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::LoadError;
use crate::store::Population;

/// One wide-format input row: subject attributes, sample attributes, and
/// the five population counts inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRecord {
    pub subject_id: String,
    pub condition: String,
    pub age: u32,
    pub sex: String,
    pub treatment: String,
    pub response: String,
    pub sample_id: String,
    pub project: String,
    pub sample_type: String,
    pub time_from_treatment_start: i64,
    /// Counts in `Population::ALL` order.
    pub counts: [u64; 5],
}

const SUBJECT_COLUMNS: [&str; 6] = ["subject", "condition", "age", "sex", "treatment", "response"];
const SAMPLE_COLUMNS: [&str; 4] = ["sample", "project", "sample_type", "time_from_treatment_start"];

struct ColumnIndex {
    subject: [usize; 6],
    sample: [usize; 4],
    counts: [usize; 5],
}

pub fn read_records(path: &Path) -> Result<Vec<WideRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut header = String::new();
    if reader.read_line(&mut header)? == 0 {
        anyhow::bail!("{}: input file is empty", path.display());
    }
    let index = resolve_columns(header.trim())?;

    let mut records = Vec::new();
    let mut line = String::new();
    // Row numbers are file line numbers; the header is line 1.
    let mut row = 1usize;
    while reader.read_line(&mut line)? > 0 {
        row += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            line.clear();
            continue;
        }
        records.push(parse_record(trimmed, row, &index)?);
        line.clear();
    }
    Ok(records)
}

fn resolve_columns(header: &str) -> Result<ColumnIndex, LoadError> {
    let names: Vec<&str> = header.split(',').map(str::trim).collect();
    let find = |name: &str| -> Result<usize, LoadError> {
        names
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };

    let mut subject = [0usize; 6];
    for (slot, name) in subject.iter_mut().zip(SUBJECT_COLUMNS) {
        *slot = find(name)?;
    }
    let mut sample = [0usize; 4];
    for (slot, name) in sample.iter_mut().zip(SAMPLE_COLUMNS) {
        *slot = find(name)?;
    }
    let mut counts = [0usize; 5];
    for (slot, population) in counts.iter_mut().zip(Population::ALL) {
        *slot = find(population.as_str())?;
    }
    Ok(ColumnIndex {
        subject,
        sample,
        counts,
    })
}

fn get<'a>(fields: &[&'a str], col: usize, name: &str, row: usize) -> Result<&'a str, LoadError> {
    fields.get(col).copied().ok_or_else(|| LoadError::Validation {
        row,
        reason: format!("missing value for column '{}'", name),
    })
}

fn require(fields: &[&str], col: usize, name: &str, row: usize) -> Result<String, LoadError> {
    let value = get(fields, col, name, row)?;
    if value.is_empty() {
        return Err(LoadError::Validation {
            row,
            reason: format!("column '{}' must not be empty", name),
        });
    }
    Ok(value.to_string())
}

fn parse_record(line: &str, row: usize, index: &ColumnIndex) -> Result<WideRecord, LoadError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    let subject_id = require(&fields, index.subject[0], "subject", row)?;
    let condition = require(&fields, index.subject[1], "condition", row)?;
    let age: u32 = get(&fields, index.subject[2], "age", row)?
        .parse()
        .map_err(|_| LoadError::Validation {
            row,
            reason: "column 'age' must be a non-negative integer".to_string(),
        })?;
    let sex = require(&fields, index.subject[3], "sex", row)?;
    let treatment = require(&fields, index.subject[4], "treatment", row)?;
    let response = require(&fields, index.subject[5], "response", row)?;

    let sample_id = require(&fields, index.sample[0], "sample", row)?;
    let project = require(&fields, index.sample[1], "project", row)?;
    let sample_type = require(&fields, index.sample[2], "sample_type", row)?;
    let time_from_treatment_start: i64 = get(&fields, index.sample[3], "time_from_treatment_start", row)?
        .parse()
        .map_err(|_| LoadError::Validation {
            row,
            reason: "column 'time_from_treatment_start' must be an integer".to_string(),
        })?;

    let mut counts = [0u64; 5];
    for (slot, (col, population)) in counts
        .iter_mut()
        .zip(index.counts.iter().zip(Population::ALL))
    {
        let raw = get(&fields, *col, population.as_str(), row)?;
        let value: i64 = raw.parse().map_err(|_| LoadError::Validation {
            row,
            reason: format!("column '{}' must be an integer count", population),
        })?;
        if value < 0 {
            return Err(LoadError::Validation {
                row,
                reason: format!("column '{}' must not be negative", population),
            });
        }
        *slot = value as u64;
    }

    Ok(WideRecord {
        subject_id,
        condition,
        age,
        sex,
        treatment,
        response,
        sample_id,
        project,
        sample_type,
        time_from_treatment_start,
        counts,
    })
}
