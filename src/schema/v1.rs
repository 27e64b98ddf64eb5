use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub rows: Option<u64>,
    pub subjects: Option<u64>,
    pub samples: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortEcho {
    pub condition: Option<String>,
    pub treatment: Option<String>,
    pub sample_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationStatRow {
    pub population: String,
    pub responder_mean: f64,
    pub non_responder_mean: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub significant: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPopulationRow {
    pub population: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratumReport {
    pub stratum: String,
    pub stats: Vec<PopulationStatRow>,
    pub skipped: Vec<SkippedPopulationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsetReport {
    pub baseline_samples: Vec<String>,
    pub samples_by_project: Vec<GroupCount>,
    pub subjects_by_response: Vec<GroupCount>,
    pub subjects_by_sex: Vec<GroupCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input_meta: InputMeta,
    pub cohort: CohortEcho,
    pub strata: Vec<StratumReport>,
    pub subsets: Option<SubsetReport>,
    pub warnings: Vec<String>,
}

impl CohortReportV1 {
    pub fn empty(tool_version: &str) -> Self {
        Self {
            tool: "cytostat".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input_meta: InputMeta {
                rows: None,
                subjects: None,
                samples: None,
            },
            cohort: CohortEcho {
                condition: None,
                treatment: None,
                sample_type: None,
            },
            strata: Vec::new(),
            subsets: None,
            warnings: Vec::new(),
        }
    }
}
