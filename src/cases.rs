//! Rectangle test cases stored as JSON.
//!
//! ```json
//! { "testCases": [ { "panelW": 1, "panelH": 1, "roofW": 5, "roofH": 5, "expected": 25 } ] }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solver::pack_rectangle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub panel_w: i64,
    pub panel_h: i64,
    pub roof_w: i64,
    pub roof_h: i64,
    pub expected: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaseFile {
    test_cases: Vec<TestCase>,
}

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid test cases in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseOutcome {
    pub case: TestCase,
    pub got: u64,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.got == self.case.expected
    }
}

pub fn parse_cases(json: &str) -> Result<Vec<TestCase>, serde_json::Error> {
    serde_json::from_str::<CaseFile>(json).map(|file| file.test_cases)
}

pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<TestCase>, CaseError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CaseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_cases(&json).map_err(|source| CaseError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn run_cases(cases: &[TestCase]) -> Vec<CaseOutcome> {
    cases
        .iter()
        .map(|&case| {
            let got = pack_rectangle(case.panel_w, case.panel_h, case.roof_w, case.roof_h);
            tracing::debug!(?case, got, "ran test case");
            CaseOutcome { case, got }
        })
        .collect()
}
