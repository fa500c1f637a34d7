use report_uniquify::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock ReportReader serving canned analyses by path
#[derive(Default, Clone)]
pub struct MockReportReader {
    reports: HashMap<PathBuf, Vec<Analysis>>,
}

impl MockReportReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, path: &str, analyses: Vec<Analysis>) -> Self {
        self.reports.insert(PathBuf::from(path), analyses);
        self
    }
}

impl ReportReader for MockReportReader {
    fn read_reports(&self, path: &Path) -> Result<Vec<Analysis>> {
        self.reports.get(path).cloned().ok_or_else(|| {
            IngestError::ReportNotFound {
                path: path.to_path_buf(),
                suggestion: "not registered with the mock reader".to_string(),
            }
            .into()
        })
    }
}
