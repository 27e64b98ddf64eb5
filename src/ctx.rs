use std::path::PathBuf;

use crate::freq::FrequencyTable;
use crate::io::csv_reader::WideRecord;
use crate::query::{CohortFilter, SubsetCounts};
use crate::schema::v1::CohortReportV1;
use crate::stats::StratumStats;
use crate::store::CohortStore;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
}

/// All state threaded through the pipeline stages.
///
/// The store and derived tables are filled in by their producing stage and
/// read-only for every stage after it.
#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub cohort: CohortFilter,
    pub write_json: bool,
    pub records: Vec<WideRecord>,
    pub store: Option<CohortStore>,
    pub frequencies: Option<FrequencyTable>,
    pub stratum_stats: Vec<StratumStats>,
    pub subsets: Option<SubsetCounts>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: CohortReportV1,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        cohort: CohortFilter,
        write_json: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("cohort_report.json");
        Self {
            input,
            cohort,
            write_json,
            records: Vec::new(),
            store: None,
            frequencies: None,
            stratum_stats: Vec::new(),
            subsets: None,
            warnings: Vec::new(),
            output: OutputPaths { out_dir, json_path },
            report: CohortReportV1::empty(tool_version),
        }
    }

    pub fn store(&self) -> anyhow::Result<&CohortStore> {
        self.store
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("schema store not loaded"))
    }

    pub fn frequencies(&self) -> anyhow::Result<&FrequencyTable> {
        self.frequencies
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("frequency table not derived"))
    }
}
