use std::collections::BTreeMap;
use std::fmt;

use crate::error::LoadError;
use crate::io::csv_reader::WideRecord;

/// The closed set of measured immune cell populations.
///
/// Every sample carries exactly one count per variant; the set is checked
/// at load time and never inferred from column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Population {
    BCell,
    Cd8TCell,
    Cd4TCell,
    NkCell,
    Monocyte,
}

impl Population {
    pub const ALL: [Population; 5] = [
        Population::BCell,
        Population::Cd8TCell,
        Population::Cd4TCell,
        Population::NkCell,
        Population::Monocyte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Population::BCell => "b_cell",
            Population::Cd8TCell => "cd8_t_cell",
            Population::Cd4TCell => "cd4_t_cell",
            Population::NkCell => "nk_cell",
            Population::Monocyte => "monocyte",
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub subject_id: String,
    pub condition: String,
    pub age: u32,
    pub sex: String,
    pub treatment: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub sample_id: String,
    pub subject_id: String,
    pub project: String,
    pub sample_type: String,
    pub time_from_treatment_start: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCount {
    pub sample_id: String,
    pub population: Population,
    pub count: u64,
}

/// Normalized cohort relations: subjects, samples, cell counts.
///
/// The store is the single source of truth for a run. It is built once by
/// the loader (full-reload semantics) and read-only afterward; every
/// derived table is a pure function of it.
#[derive(Debug, Default, Clone)]
pub struct CohortStore {
    subjects: BTreeMap<String, Subject>,
    samples: BTreeMap<String, Sample>,
    cell_counts: BTreeMap<(String, Population), u64>,
}

impl CohortStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project wide-format records into the three relations, all-or-nothing.
    ///
    /// Duplicate keys with identical payloads are a no-op (idempotent
    /// replay); duplicate keys with divergent payloads are a conflict and
    /// fail the whole load.
    pub fn from_records(records: &[WideRecord]) -> Result<Self, LoadError> {
        let mut store = Self::new();
        for record in records {
            store.insert_subject(Subject {
                subject_id: record.subject_id.clone(),
                condition: record.condition.clone(),
                age: record.age,
                sex: record.sex.clone(),
                treatment: record.treatment.clone(),
                response: record.response.clone(),
            })?;
        }
        for record in records {
            store.insert_sample(Sample {
                sample_id: record.sample_id.clone(),
                subject_id: record.subject_id.clone(),
                project: record.project.clone(),
                sample_type: record.sample_type.clone(),
                time_from_treatment_start: record.time_from_treatment_start,
            })?;
            for (population, count) in Population::ALL.iter().zip(record.counts.iter()) {
                store.insert_cell_count(CellCount {
                    sample_id: record.sample_id.clone(),
                    population: *population,
                    count: *count,
                })?;
            }
        }
        Ok(store)
    }

    pub fn insert_subject(&mut self, subject: Subject) -> Result<(), LoadError> {
        if let Some(existing) = self.subjects.get(&subject.subject_id) {
            if *existing != subject {
                return Err(LoadError::SubjectConflict {
                    subject_id: subject.subject_id,
                });
            }
            return Ok(());
        }
        self.subjects.insert(subject.subject_id.clone(), subject);
        Ok(())
    }

    pub fn insert_sample(&mut self, sample: Sample) -> Result<(), LoadError> {
        if !self.subjects.contains_key(&sample.subject_id) {
            return Err(LoadError::UnknownSubject {
                sample_id: sample.sample_id,
                subject_id: sample.subject_id,
            });
        }
        if let Some(existing) = self.samples.get(&sample.sample_id) {
            if *existing != sample {
                return Err(LoadError::SampleConflict {
                    sample_id: sample.sample_id,
                });
            }
            return Ok(());
        }
        self.samples.insert(sample.sample_id.clone(), sample);
        Ok(())
    }

    pub fn insert_cell_count(&mut self, cell_count: CellCount) -> Result<(), LoadError> {
        let key = (cell_count.sample_id.clone(), cell_count.population);
        if let Some(existing) = self.cell_counts.get(&key) {
            if *existing != cell_count.count {
                return Err(LoadError::SampleConflict {
                    sample_id: cell_count.sample_id,
                });
            }
            return Ok(());
        }
        self.cell_counts.insert(key, cell_count.count);
        Ok(())
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.get(subject_id)
    }

    pub fn sample(&self, sample_id: &str) -> Option<&Sample> {
        self.samples.get(sample_id)
    }

    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.values()
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.values()
    }

    pub fn cell_counts(&self) -> impl Iterator<Item = CellCount> + '_ {
        self.cell_counts
            .iter()
            .map(|((sample_id, population), count)| CellCount {
                sample_id: sample_id.clone(),
                population: *population,
                count: *count,
            })
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn cell_count_rows(&self) -> usize {
        self.cell_counts.len()
    }

    /// Check referential integrity and population closure.
    ///
    /// Returns the violations as messages; an empty list means the store
    /// satisfies every schema invariant.
    pub fn verify(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for sample in self.samples.values() {
            if !self.subjects.contains_key(&sample.subject_id) {
                violations.push(format!(
                    "sample '{}' references unknown subject '{}'",
                    sample.sample_id, sample.subject_id
                ));
            }
            for population in Population::ALL {
                let key = (sample.sample_id.clone(), population);
                if !self.cell_counts.contains_key(&key) {
                    violations.push(format!(
                        "sample '{}' is missing a count for population '{}'",
                        sample.sample_id, population
                    ));
                }
            }
        }
        let mut last_checked: Option<&str> = None;
        for (sample_id, _) in self.cell_counts.keys() {
            // Keys are sorted, so one check per distinct sample is enough.
            if last_checked == Some(sample_id.as_str()) {
                continue;
            }
            last_checked = Some(sample_id.as_str());
            if !self.samples.contains_key(sample_id) {
                violations.push(format!(
                    "cell count references unknown sample '{}'",
                    sample_id
                ));
            }
        }
        violations
    }
}
