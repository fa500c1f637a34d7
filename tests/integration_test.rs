/// Integration tests for the application layer and the resolution services
mod test_utilities;

use report_uniquify::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use test_utilities::fixtures::*;
use test_utilities::mocks::*;

fn use_case(
    reader: MockReportReader,
) -> (
    IngestReportsUseCase<InMemoryDatabase, MockReportReader, MockProgressReporter>,
    MockProgressReporter,
) {
    let reporter = MockProgressReporter::new();
    let use_case = IngestReportsUseCase::new(InMemoryDatabase::new(), reader, reporter.clone());
    (use_case, reporter)
}

fn request(paths: &[&str], mode: IngestMode) -> IngestRequest {
    IngestRequest::new(paths.iter().map(PathBuf::from).collect(), mode)
}

#[test]
fn test_ingest_single_report_happy_path() {
    let reader = MockReportReader::new().with_report("run.json", vec![sample_analysis()]);
    let (mut use_case, reporter) = use_case(reader);

    let response = use_case
        .execute(request(&["run.json"], IngestMode::Resolve))
        .unwrap();

    assert_eq!(response.analyses(), 1);
    assert_eq!(response.rows_written, 8);
    let db = use_case.database();
    assert_eq!(db.total_rows(), 8);
    assert_eq!(db.commits, 1);
    for table in [
        Table::Analysis,
        Table::Metadata,
        Table::Generator,
        Table::Sut,
        Table::File,
        Table::Location,
        Table::Message,
        Table::Result,
    ] {
        assert_eq!(db.row_count(table), 1, "{table}");
    }
    assert!(reporter
        .get_messages()
        .iter()
        .any(|m| m.starts_with("Completed: ")));
}

#[test]
fn test_reingest_returns_same_root_and_writes_nothing() {
    let reader = MockReportReader::new().with_report("run.json", vec![sample_analysis()]);
    let (mut use_case, _) = use_case(reader);

    let first = use_case
        .execute(request(&["run.json"], IngestMode::Resolve))
        .unwrap();
    let second = use_case
        .execute(request(&["run.json"], IngestMode::Resolve))
        .unwrap();

    assert_eq!(first.reports[0].root_id, second.reports[0].root_id);
    assert_eq!(second.rows_written, 0);
    assert_eq!(second.rows_reused(), 8);
    assert_eq!(use_case.database().total_rows(), 8);
}

#[test]
fn test_two_reports_share_common_records() {
    let reader = MockReportReader::new()
        .with_report("first.json", vec![sample_analysis()])
        .with_report("second.json", vec![sibling_analysis()]);
    let (mut use_case, _) = use_case(reader);

    let response = use_case
        .execute(request(&["first.json", "second.json"], IngestMode::Resolve))
        .unwrap();

    assert_eq!(response.rows_written, 11);
    let second = response.reports[1].stats.unwrap();
    assert_eq!(second.written, 3);
    assert_eq!(second.store_hits, 5);

    let db = use_case.database();
    assert_eq!(db.row_count(Table::Analysis), 2);
    assert_eq!(db.row_count(Table::Metadata), 1);
    assert_eq!(db.row_count(Table::File), 1);
    assert_eq!(db.row_count(Table::Result), 2);
}

#[test]
fn test_shared_location_resolves_from_cache_before_commit() {
    // the session cannot see its own staged rows, so a second insert of the
    // shared location would fail on the primary key
    let reader =
        MockReportReader::new().with_report("run.json", vec![shared_location_analysis()]);
    let (mut use_case, _) = use_case(reader);

    let response = use_case
        .execute(request(&["run.json"], IngestMode::Resolve))
        .unwrap();

    let stats = response.reports[0].stats.unwrap();
    assert_eq!(stats.written, 9);
    assert_eq!(stats.cache_hits, 2);
    assert_eq!(use_case.database().row_count(Table::Location), 1);
}

#[test]
fn test_bulk_mode_matches_resolve_mode() {
    let reports = vec![sample_analysis(), sibling_analysis(), traced_analysis()];
    let reader = MockReportReader::new().with_report("all.json", reports);

    let (mut resolving, _) = use_case(reader.clone());
    resolving
        .execute(request(&["all.json"], IngestMode::Resolve))
        .unwrap();
    let (mut bulk, _) = use_case(reader);
    let response = bulk
        .execute(request(&["all.json"], IngestMode::Bulk))
        .unwrap();

    let batch = response.batch.unwrap();
    assert_eq!(batch.inserted, batch.distinct_records);
    assert_eq!(bulk.database().commits, 1);
    for table in Table::ALL {
        assert_eq!(
            resolving.database().row_count(table),
            bulk.database().row_count(table),
            "{table}"
        );
    }
}

#[test]
fn test_failed_analysis_is_rolled_back() {
    let reader = MockReportReader::new().with_report("run.json", vec![sample_analysis()]);
    let reporter = MockProgressReporter::new();
    let mut use_case = IngestReportsUseCase::new(
        InMemoryDatabase::failing_on(RecordKind::Message),
        reader,
        reporter.clone(),
    );

    let err = use_case
        .execute(request(&["run.json"], IngestMode::Resolve))
        .unwrap_err();

    assert!(err.to_string().contains("Failed to ingest run.json"));
    let db = use_case.database();
    assert_eq!(db.rollbacks, 1);
    assert_eq!(db.commits, 0);
    assert_eq!(db.total_rows(), 0);
    assert_eq!(reporter.errors().len(), 1);
}

#[test]
fn test_missing_report_maps_to_application_error() {
    let (mut use_case, _) = use_case(MockReportReader::new());

    let err = use_case
        .execute(request(&["absent.json"], IngestMode::Resolve))
        .unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::ApplicationError);
    assert_eq!(use_case.database().commits, 0);
}

#[test]
fn test_progress_is_reported_per_analysis() {
    let reader = MockReportReader::new()
        .with_report("first.json", vec![sample_analysis()])
        .with_report("second.json", vec![sibling_analysis()]);
    let (mut use_case, reporter) = use_case(reader);

    use_case
        .execute(request(&["first.json", "second.json"], IngestMode::Resolve))
        .unwrap();

    let messages = reporter.get_messages();
    assert!(messages.contains(&"Progress: 0/2 - first.json".to_string()));
    assert!(messages.contains(&"Progress: 1/2 - second.json".to_string()));
    assert!(messages.contains(&"Progress: 2/2".to_string()));
}

#[test]
fn test_resolver_checks_each_distinct_record_once() {
    let analysis = identified(traced_analysis());
    let mut db = InMemoryDatabase::new();
    let store = CountingStore::new(db.begin().unwrap());

    let resolution = Resolver::new(&store)
        .resolve(RecordRef::Analysis(&analysis), DedupCache::new())
        .unwrap();

    let lookups = store.lookups.borrow();
    let distinct: HashSet<_> = lookups.iter().collect();
    assert_eq!(distinct.len(), lookups.len());

    // one file, three points, three locations, three notes, three states,
    // trace, message, issue, generator, metadata, analysis
    assert_eq!(resolution.stats.written, 19);
    assert_eq!(store.inserts.get(), 19);
    assert!(resolution.stats.existence_checks <= 19);
    assert_eq!(resolution.stats.visited, 24);
    assert_eq!(resolution.cache.len(), 19);

    let written = store.written.borrow();
    let ids: HashSet<_> = written.iter().map(|row| (row.table(), row.id())).collect();
    assert_eq!(ids.len(), written.len());
}

#[test]
fn test_resolver_handles_very_wide_reports() {
    const WIDTH: usize = 5_000;
    let analysis = identified(wide_analysis(WIDTH as i64));
    let mut db = InMemoryDatabase::new();
    let store = CountingStore::new(db.begin().unwrap());

    let resolution = Resolver::new(&store)
        .resolve(RecordRef::Analysis(&analysis), DedupCache::new())
        .unwrap();

    // per issue: issue, location, point; shared: file, message, generator,
    // metadata, analysis
    let distinct = 3 * WIDTH + 5;
    let stats = resolution.stats;
    assert_eq!(stats.written, distinct);
    assert_eq!(stats.existence_checks, distinct);
    assert_eq!(store.finds.get(), distinct);
    assert_eq!(stats.visited, 5 * WIDTH + 3);
    assert_eq!(stats.cache_hits, stats.visited - distinct);

    store.into_inner().commit().unwrap();
    assert_eq!(db.row_count(Table::Result), WIDTH);
    assert_eq!(db.row_count(Table::File), 1);
    assert_eq!(db.total_rows(), distinct);
}

#[test]
fn test_trace_states_point_back_at_their_trace() {
    let analysis = identified(traced_analysis());
    let mut db = InMemoryDatabase::new();
    let session = db.begin().unwrap();
    Resolver::new(&session)
        .resolve(RecordRef::Analysis(&analysis), DedupCache::new())
        .unwrap();
    session.commit().unwrap();

    let trace_id = db.rows(Table::Trace)[0].id().clone();
    let states = db.rows(Table::State);
    assert_eq!(states.len(), 3);
    assert!(states
        .iter()
        .all(|state| state.foreign_key("trace") == Some(trace_id.as_str())));
}

#[test]
fn test_batch_loader_stages_references_before_referrers() {
    let analyses = [
        identified(sample_analysis()),
        identified(traced_analysis()),
    ];
    let mut db = InMemoryDatabase::new();
    let store = CountingStore::new(db.begin().unwrap());

    let report = BatchLoader::new(&store)
        .bulk_load(analyses.iter().map(RecordRef::Analysis))
        .unwrap();
    assert_eq!(store.deferrals.get(), 1);
    assert_eq!(report.inserted, report.distinct_records);

    let written = store.written.borrow();
    let mut staged = HashSet::new();
    for row in written.iter() {
        for (column, target) in row.table().references() {
            if let Some(Value::Text(id)) = row.get(column) {
                assert!(
                    staged.contains(&(*target, id.clone())),
                    "{} {} references unstaged {} {}",
                    row.table(),
                    row.id(),
                    target,
                    id
                );
            }
        }
        staged.insert((row.table(), row.id().as_str().to_string()));
    }
    drop(written);

    store.into_inner().commit().unwrap();
    assert_eq!(db.total_rows(), report.distinct_records);
}
