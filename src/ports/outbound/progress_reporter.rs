/// ProgressReporter port for user-facing feedback during ingestion
///
/// Diagnostics go through `tracing`; this port only carries what a person
/// running the loader wants to see (which report is being ingested, how far
/// along the corpus is, the final summary).
pub trait ProgressReporter {
    /// Reports a one-off status line.
    fn report(&self, message: &str);

    /// Reports how many of `total` reports have been handled.
    ///
    /// # Arguments
    /// * `current` - Reports handled so far
    /// * `total` - Reports in this run
    /// * `message` - Optional label, usually the report path
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a failure. Any running progress display is closed first.
    fn report_error(&self, message: &str);

    /// Reports the end of the run.
    fn report_completion(&self, message: &str);
}
