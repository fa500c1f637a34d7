use crate::application::dto::{
    IngestMode, IngestRequest, IngestResponse, ReportOutcome, RunMetadata,
};
use crate::ports::outbound::{ProgressReporter, RecordDatabase, RecordSession, ReportReader};
use crate::shared::error::IngestError;
use crate::shared::Result;
use crate::uniquify::domain::{Analysis, DedupCache, RecordRef};
use crate::uniquify::services::{BatchLoader, IdentityAssigner, Resolver};
use anyhow::Context;
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

/// IngestReportsUseCase - loads report files into the store
///
/// Reads every requested file, assigns content ids and writes the analyses
/// through the resolver (one transaction per analysis) or the batch loader
/// (one transaction for the run). A failed transaction is rolled back and
/// its error returned; analyses committed before it stay committed.
///
/// # Type Parameters
/// * `DB` - RecordDatabase implementation
/// * `RR` - ReportReader implementation
/// * `PR` - ProgressReporter implementation
pub struct IngestReportsUseCase<DB, RR, PR> {
    database: DB,
    report_reader: RR,
    progress_reporter: PR,
    assigner: IdentityAssigner,
}

impl<DB, RR, PR> IngestReportsUseCase<DB, RR, PR>
where
    DB: RecordDatabase,
    RR: ReportReader,
    PR: ProgressReporter,
{
    /// Creates a new IngestReportsUseCase with injected dependencies
    pub fn new(database: DB, report_reader: RR, progress_reporter: PR) -> Self {
        Self {
            database,
            report_reader,
            progress_reporter,
            assigner: IdentityAssigner::new(),
        }
    }

    pub fn database(&self) -> &DB {
        &self.database
    }

    pub fn into_database(self) -> DB {
        self.database
    }

    pub fn execute(&mut self, request: IngestRequest) -> Result<IngestResponse> {
        if request.paths.is_empty() {
            return Err(IngestError::Validation {
                message: "No report files given".to_string(),
            }
            .into());
        }
        let metadata = RunMetadata::new(Utc::now().to_rfc3339(), request.mode);

        // Step 1: read and identify
        let analyses = self.load(&request.paths)?;
        self.progress_reporter.report(&format!(
            "📖 Loaded {} analysis record(s) from {} file(s)",
            analyses.len(),
            request.paths.len()
        ));

        // Step 2: write
        let response = match request.mode {
            IngestMode::Resolve => self.resolve_each(&analyses, metadata)?,
            IngestMode::Bulk => self.load_bulk(&analyses, metadata)?,
        };

        self.progress_reporter.report_completion(&format!(
            "✅ Ingested {} analysis record(s): {} new row(s), {} reused",
            response.analyses(),
            response.rows_written,
            response.rows_reused()
        ));
        Ok(response)
    }

    fn load(&self, paths: &[PathBuf]) -> Result<Vec<(PathBuf, Analysis)>> {
        let mut loaded = Vec::new();
        for path in paths {
            let analyses = self.report_reader.read_reports(path)?;
            if analyses.is_empty() {
                warn!(path = %path.display(), "report file holds no analyses");
            }
            for mut analysis in analyses {
                self.assigner.assign(&mut analysis);
                loaded.push((path.clone(), analysis));
            }
        }
        Ok(loaded)
    }

    fn resolve_each(
        &mut self,
        analyses: &[(PathBuf, Analysis)],
        metadata: RunMetadata,
    ) -> Result<IngestResponse> {
        let total = analyses.len();
        let mut reports = Vec::with_capacity(total);
        let mut rows_written = 0;

        for (index, (path, analysis)) in analyses.iter().enumerate() {
            let label = path.display().to_string();
            self.progress_reporter
                .report_progress(index, total, Some(&label));

            let session = self.database.begin()?;
            let resolved =
                Resolver::new(&session).resolve(RecordRef::Analysis(analysis), DedupCache::new());
            let resolution = match resolved {
                Ok(resolution) => resolution,
                Err(err) => {
                    if let Err(rollback_err) = session.rollback() {
                        warn!(error = %rollback_err, "rollback failed");
                    }
                    self.progress_reporter
                        .report_error(&format!("❌ Failed to ingest {}", label));
                    return Err(err.context(format!("Failed to ingest {}", label)));
                }
            };
            session
                .commit()
                .with_context(|| format!("Failed to commit {}", label))?;

            info!(
                path = %label,
                id = %resolution.root.id(),
                written = resolution.stats.written,
                "ingested analysis"
            );
            rows_written += resolution.stats.written;
            reports.push(ReportOutcome {
                path: path.clone(),
                root_id: resolution.root.id().clone(),
                stats: Some(resolution.stats),
            });
        }
        self.progress_reporter.report_progress(total, total, None);

        Ok(IngestResponse {
            reports,
            batch: None,
            rows_written,
            metadata,
        })
    }

    fn load_bulk(
        &mut self,
        analyses: &[(PathBuf, Analysis)],
        metadata: RunMetadata,
    ) -> Result<IngestResponse> {
        let session = self.database.begin()?;
        let loaded = BatchLoader::new(&session)
            .bulk_load(analyses.iter().map(|(_, analysis)| RecordRef::Analysis(analysis)));
        let batch = match loaded {
            Ok(batch) => batch,
            Err(err) => {
                if let Err(rollback_err) = session.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                self.progress_reporter
                    .report_error("❌ Bulk load failed, nothing was committed");
                return Err(err);
            }
        };
        session.commit().context("Failed to commit bulk load")?;

        let mut reports = Vec::with_capacity(analyses.len());
        for (path, analysis) in analyses {
            let root_id = analysis.id.clone().ok_or(IngestError::MissingContentId {
                kind: RecordRef::Analysis(analysis).kind(),
            })?;
            reports.push(ReportOutcome {
                path: path.clone(),
                root_id,
                stats: None,
            });
        }

        Ok(IngestResponse {
            reports,
            rows_written: batch.inserted,
            batch: Some(batch),
            metadata,
        })
    }
}
