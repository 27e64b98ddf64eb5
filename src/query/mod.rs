use std::collections::{BTreeMap, BTreeSet};

use crate::freq::FrequencyTable;
use crate::store::{CohortStore, Population, Sample, Subject};

/// Filter on `time_from_treatment_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Exact(i64),
    After(i64),
}

impl TimeFilter {
    pub fn matches(&self, time: i64) -> bool {
        match self {
            TimeFilter::Exact(t) => time == *t,
            TimeFilter::After(t) => time > *t,
        }
    }
}

/// Conjunctive equality filter over subject and sample attributes.
///
/// `None` fields match everything. Evaluation is a pure read of the store;
/// identical filters over an unchanged store return identical results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CohortFilter {
    pub condition: Option<String>,
    pub treatment: Option<String>,
    pub sample_type: Option<String>,
    pub time: Option<TimeFilter>,
}

impl CohortFilter {
    pub fn with_time(&self, time: TimeFilter) -> Self {
        Self {
            time: Some(time),
            ..self.clone()
        }
    }

    fn matches(&self, subject: &Subject, sample: &Sample) -> bool {
        if let Some(condition) = &self.condition {
            if subject.condition != *condition {
                return false;
            }
        }
        if let Some(treatment) = &self.treatment {
            if subject.treatment != *treatment {
                return false;
            }
        }
        if let Some(sample_type) = &self.sample_type {
            if sample.sample_type != *sample_type {
                return false;
            }
        }
        if let Some(time) = &self.time {
            if !time.matches(sample.time_from_treatment_start) {
                return false;
            }
        }
        true
    }
}

/// One joined (subject, sample, frequency) row for a cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortRow {
    pub subject_id: String,
    pub condition: String,
    pub treatment: String,
    pub response: String,
    pub sample_id: String,
    pub sample_type: String,
    pub time_from_treatment_start: i64,
    pub population: Population,
    pub count: u64,
    pub total_count: u64,
    pub percentage: f64,
}

/// Cohort-scoped subset summaries for the baseline report.
#[derive(Debug, Clone, Default)]
pub struct SubsetCounts {
    pub baseline_samples: Vec<String>,
    pub samples_by_project: Vec<(String, u64)>,
    pub subjects_by_response: Vec<(String, u64)>,
    pub subjects_by_sex: Vec<(String, u64)>,
}

/// Join the frequency table against subjects and samples, keeping rows the
/// filter matches.
pub fn cohort_rows(
    store: &CohortStore,
    frequencies: &FrequencyTable,
    filter: &CohortFilter,
) -> Vec<CohortRow> {
    frequencies
        .rows
        .iter()
        .filter_map(|freq| {
            let sample = store.sample(&freq.sample_id)?;
            let subject = store.subject(&sample.subject_id)?;
            if !filter.matches(subject, sample) {
                return None;
            }
            Some(CohortRow {
                subject_id: subject.subject_id.clone(),
                condition: subject.condition.clone(),
                treatment: subject.treatment.clone(),
                response: subject.response.clone(),
                sample_id: sample.sample_id.clone(),
                sample_type: sample.sample_type.clone(),
                time_from_treatment_start: sample.time_from_treatment_start,
                population: freq.population,
                count: freq.count,
                total_count: freq.total_count,
                percentage: freq.percentage,
            })
        })
        .collect()
}

/// Sample ids matching the filter, in sorted order.
pub fn sample_ids(store: &CohortStore, filter: &CohortFilter) -> Vec<String> {
    filtered_samples(store, filter)
        .map(|(_, sample)| sample.sample_id.clone())
        .collect()
}

/// Count of samples grouped by project, scoped by the filter.
pub fn samples_by_project(store: &CohortStore, filter: &CohortFilter) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for (_, sample) in filtered_samples(store, filter) {
        *counts.entry(sample.project.clone()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Count of distinct subjects grouped by response, scoped by the filter.
pub fn subjects_by_response(store: &CohortStore, filter: &CohortFilter) -> Vec<(String, u64)> {
    group_distinct_subjects(store, filter, |subject| subject.response.clone())
}

/// Count of distinct subjects grouped by sex, scoped by the filter.
pub fn subjects_by_sex(store: &CohortStore, filter: &CohortFilter) -> Vec<(String, u64)> {
    group_distinct_subjects(store, filter, |subject| subject.sex.clone())
}

pub fn subset_counts(store: &CohortStore, baseline: &CohortFilter) -> SubsetCounts {
    SubsetCounts {
        baseline_samples: sample_ids(store, baseline),
        samples_by_project: samples_by_project(store, baseline),
        subjects_by_response: subjects_by_response(store, baseline),
        subjects_by_sex: subjects_by_sex(store, baseline),
    }
}

fn filtered_samples<'a>(
    store: &'a CohortStore,
    filter: &'a CohortFilter,
) -> impl Iterator<Item = (&'a Subject, &'a Sample)> {
    store.samples().filter_map(move |sample| {
        let subject = store.subject(&sample.subject_id)?;
        filter.matches(subject, sample).then_some((subject, sample))
    })
}

fn group_distinct_subjects<F>(
    store: &CohortStore,
    filter: &CohortFilter,
    key: F,
) -> Vec<(String, u64)>
where
    F: Fn(&Subject) -> String,
{
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for (subject, _) in filtered_samples(store, filter) {
        if seen.insert(subject.subject_id.as_str()) {
            *counts.entry(key(subject)).or_insert(0) += 1;
        }
    }
    counts.into_iter().collect()
}
