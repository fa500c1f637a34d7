//! Typed report model.
//!
//! Every record carries an optional content id filled in by the identity
//! assigner. [`RecordRef`] gives the traversal a uniform, borrowed view over
//! all record types and enumerates their attributes on demand.

use super::{ContentId, RecordKind, Value};
use serde::{Deserialize, Serialize};

/// One run of one static-analysis tool over one piece of software.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub metadata: Metadata,
    #[serde(default)]
    pub results: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customfields: Option<CustomFields>,
}

impl Analysis {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            id: None,
            metadata,
            results: Vec::new(),
            customfields: None,
        }
    }

    pub fn with_result(mut self, finding: Finding) -> Self {
        self.results.push(finding);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub generator: Generator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sut: Option<Sut>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

impl Metadata {
    pub fn new(generator: Generator) -> Self {
        Self {
            id: None,
            generator,
            sut: None,
            file: None,
            stats: None,
        }
    }

    pub fn with_sut(mut self, sut: Sut) -> Self {
        self.sut = Some(sut);
        self
    }
}

/// The tool that produced the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Generator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Generator {
    pub fn new(name: &str, version: Option<&str>) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            version: version.map(str::to_string),
        }
    }
}

/// Software under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Sut {
    DebianSource(DebianSource),
    DebianBinary(DebianBinary),
    SourceRpm(SourceRpm),
}

impl Sut {
    pub fn kind(&self) -> RecordKind {
        match self {
            Sut::DebianSource(_) => RecordKind::DebianSource,
            Sut::DebianBinary(_) => RecordKind::DebianBinary,
            Sut::SourceRpm(_) => RecordKind::SourceRpm,
        }
    }

    pub fn id(&self) -> Option<&ContentId> {
        match self {
            Sut::DebianSource(sut) => sut.id.as_ref(),
            Sut::DebianBinary(sut) => sut.id.as_ref(),
            Sut::SourceRpm(sut) => sut.id.as_ref(),
        }
    }

    pub fn debian_source(name: &str, version: &str, release: Option<&str>) -> Self {
        Sut::DebianSource(DebianSource {
            id: None,
            name: name.to_string(),
            version: version.to_string(),
            release: release.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebianSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebianBinary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release: Option<String>,
    pub buildarch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceRpm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub name: String,
    pub version: String,
    pub release: String,
    pub buildarch: String,
}

/// Execution statistics of the analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub wallclocktime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct File {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub givenpath: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abspath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Hash>,
}

impl File {
    pub fn new(givenpath: &str) -> Self {
        Self {
            id: None,
            givenpath: givenpath.to_string(),
            abspath: None,
            hash: None,
        }
    }
}

/// Digest of a file's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hash {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub alg: String,
    pub hexdigest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Function {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub name: String,
}

impl Function {
    pub fn new(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub line: i64,
    pub column: i64,
}

impl Point {
    pub fn new(line: i64, column: i64) -> Self {
        Self {
            id: None,
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Range {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub start: Point,
    pub end: Point,
}

/// Where in the code something happens: a file plus an optional function
/// and an optional point or range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub file: File,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<Function>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<Range>,
}

impl Location {
    pub fn new(file: File) -> Self {
        Self {
            id: None,
            file,
            function: None,
            point: None,
            range: None,
        }
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_point(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub text: String,
}

impl Message {
    pub fn new(text: &str) -> Self {
        Self {
            id: None,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Notes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub text: String,
}

/// Free-form tool-specific key/value data, stored as one JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    #[serde(default)]
    pub states: Vec<State>,
}

/// One step of an execution trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
}

/// A single result of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Finding {
    Issue(Issue),
    Failure(Failure),
    Info(Info),
}

impl Finding {
    pub fn kind(&self) -> RecordKind {
        match self {
            Finding::Issue(_) => RecordKind::Issue,
            Finding::Failure(_) => RecordKind::Failure,
            Finding::Info(_) => RecordKind::Info,
        }
    }

    pub fn id(&self) -> Option<&ContentId> {
        match self {
            Finding::Issue(issue) => issue.id.as_ref(),
            Finding::Failure(failure) => failure.id.as_ref(),
            Finding::Info(info) => info.id.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testid: Option<String>,
    pub location: Location,
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Notes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Trace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customfields: Option<CustomFields>,
}

impl Issue {
    pub fn new(location: Location, message: Message) -> Self {
        Self {
            id: None,
            cwe: None,
            testid: None,
            location,
            message,
            notes: None,
            trace: None,
            severity: None,
            customfields: None,
        }
    }

    pub fn with_testid(mut self, testid: &str) -> Self {
        self.testid = Some(testid.to_string());
        self
    }
}

/// The tool failed on part of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Failure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failureid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customfields: Option<CustomFields>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Info {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infoid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customfields: Option<CustomFields>,
}

/// Borrowed view of any storable record.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Analysis(&'a Analysis),
    Metadata(&'a Metadata),
    Generator(&'a Generator),
    Sut(&'a Sut),
    Stats(&'a Stats),
    File(&'a File),
    Hash(&'a Hash),
    Function(&'a Function),
    Point(&'a Point),
    Range(&'a Range),
    Location(&'a Location),
    Message(&'a Message),
    Notes(&'a Notes),
    CustomFields(&'a CustomFields),
    Trace(&'a Trace),
    State(&'a State),
    Finding(&'a Finding),
}

/// Borrowed view of a collection-valued attribute.
#[derive(Debug, Clone, Copy)]
pub enum ListRef<'a> {
    Findings(&'a [Finding]),
    States(&'a [State]),
}

impl<'a> ListRef<'a> {
    pub fn items(self) -> Vec<RecordRef<'a>> {
        match self {
            ListRef::Findings(findings) => findings.iter().map(RecordRef::Finding).collect(),
            ListRef::States(states) => states.iter().map(RecordRef::State).collect(),
        }
    }

    pub fn len(self) -> usize {
        match self {
            ListRef::Findings(findings) => findings.len(),
            ListRef::States(states) => states.len(),
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Trace steps are a sequence; findings of a run are a set.
    pub fn is_ordered(self) -> bool {
        matches!(self, ListRef::States(_))
    }
}

/// Value of one attribute as seen from its owner.
#[derive(Debug, Clone)]
pub enum AttributeValue<'a> {
    Scalar(Value),
    Record(RecordRef<'a>),
    List(ListRef<'a>),
    Null,
}

#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    pub name: &'static str,
    pub value: AttributeValue<'a>,
}

fn scalar<'a>(name: &'static str, value: impl Into<Value>) -> Attribute<'a> {
    Attribute {
        name,
        value: AttributeValue::Scalar(value.into()),
    }
}

fn record<'a, T>(
    name: &'static str,
    value: Option<&'a T>,
    wrap: fn(&'a T) -> RecordRef<'a>,
) -> Attribute<'a> {
    Attribute {
        name,
        value: value.map_or(AttributeValue::Null, |v| AttributeValue::Record(wrap(v))),
    }
}

fn list<'a>(name: &'static str, value: ListRef<'a>) -> Attribute<'a> {
    Attribute {
        name,
        value: AttributeValue::List(value),
    }
}

impl<'a> RecordRef<'a> {
    pub fn kind(self) -> RecordKind {
        match self {
            RecordRef::Analysis(_) => RecordKind::Analysis,
            RecordRef::Metadata(_) => RecordKind::Metadata,
            RecordRef::Generator(_) => RecordKind::Generator,
            RecordRef::Sut(sut) => sut.kind(),
            RecordRef::Stats(_) => RecordKind::Stats,
            RecordRef::File(_) => RecordKind::File,
            RecordRef::Hash(_) => RecordKind::Hash,
            RecordRef::Function(_) => RecordKind::Function,
            RecordRef::Point(_) => RecordKind::Point,
            RecordRef::Range(_) => RecordKind::Range,
            RecordRef::Location(_) => RecordKind::Location,
            RecordRef::Message(_) => RecordKind::Message,
            RecordRef::Notes(_) => RecordKind::Notes,
            RecordRef::CustomFields(_) => RecordKind::CustomFields,
            RecordRef::Trace(_) => RecordKind::Trace,
            RecordRef::State(_) => RecordKind::State,
            RecordRef::Finding(finding) => finding.kind(),
        }
    }

    pub fn id(self) -> Option<&'a ContentId> {
        match self {
            RecordRef::Analysis(r) => r.id.as_ref(),
            RecordRef::Metadata(r) => r.id.as_ref(),
            RecordRef::Generator(r) => r.id.as_ref(),
            RecordRef::Sut(r) => r.id(),
            RecordRef::Stats(r) => r.id.as_ref(),
            RecordRef::File(r) => r.id.as_ref(),
            RecordRef::Hash(r) => r.id.as_ref(),
            RecordRef::Function(r) => r.id.as_ref(),
            RecordRef::Point(r) => r.id.as_ref(),
            RecordRef::Range(r) => r.id.as_ref(),
            RecordRef::Location(r) => r.id.as_ref(),
            RecordRef::Message(r) => r.id.as_ref(),
            RecordRef::Notes(r) => r.id.as_ref(),
            RecordRef::CustomFields(r) => r.id.as_ref(),
            RecordRef::Trace(r) => r.id.as_ref(),
            RecordRef::State(r) => r.id.as_ref(),
            RecordRef::Finding(r) => r.id(),
        }
    }

    /// Enumerates the record's attributes in declaration order.
    pub fn attributes(self) -> Vec<Attribute<'a>> {
        match self {
            RecordRef::Analysis(a) => vec![
                record("metadata", Some(&a.metadata), RecordRef::Metadata),
                list("results", ListRef::Findings(&a.results)),
                record("customfields", a.customfields.as_ref(), RecordRef::CustomFields),
            ],
            RecordRef::Metadata(m) => vec![
                record("generator", Some(&m.generator), RecordRef::Generator),
                record("sut", m.sut.as_ref(), RecordRef::Sut),
                record("file", m.file.as_ref(), RecordRef::File),
                record("stats", m.stats.as_ref(), RecordRef::Stats),
            ],
            RecordRef::Generator(g) => vec![
                scalar("name", g.name.as_str()),
                scalar("version", g.version.as_deref()),
            ],
            RecordRef::Sut(Sut::DebianSource(s)) => vec![
                scalar("name", s.name.as_str()),
                scalar("version", s.version.as_str()),
                scalar("release", s.release.as_deref()),
            ],
            RecordRef::Sut(Sut::DebianBinary(s)) => vec![
                scalar("name", s.name.as_str()),
                scalar("version", s.version.as_str()),
                scalar("release", s.release.as_deref()),
                scalar("buildarch", s.buildarch.as_str()),
            ],
            RecordRef::Sut(Sut::SourceRpm(s)) => vec![
                scalar("name", s.name.as_str()),
                scalar("version", s.version.as_str()),
                scalar("release", s.release.as_str()),
                scalar("buildarch", s.buildarch.as_str()),
            ],
            RecordRef::Stats(s) => vec![scalar("wallclocktime", s.wallclocktime)],
            RecordRef::File(f) => vec![
                scalar("givenpath", f.givenpath.as_str()),
                scalar("abspath", f.abspath.as_deref()),
                record("hash", f.hash.as_ref(), RecordRef::Hash),
            ],
            RecordRef::Hash(h) => vec![
                scalar("alg", h.alg.as_str()),
                scalar("hexdigest", h.hexdigest.as_str()),
            ],
            RecordRef::Function(f) => vec![scalar("name", f.name.as_str())],
            RecordRef::Point(p) => vec![scalar("line", p.line), scalar("column", p.column)],
            RecordRef::Range(r) => vec![
                record("start", Some(&r.start), RecordRef::Point),
                record("end", Some(&r.end), RecordRef::Point),
            ],
            RecordRef::Location(l) => vec![
                record("file", Some(&l.file), RecordRef::File),
                record("function", l.function.as_ref(), RecordRef::Function),
                record("point", l.point.as_ref(), RecordRef::Point),
                record("range", l.range.as_ref(), RecordRef::Range),
            ],
            RecordRef::Message(m) => vec![scalar("text", m.text.as_str())],
            RecordRef::Notes(n) => vec![scalar("text", n.text.as_str())],
            RecordRef::CustomFields(c) => vec![scalar(
                "fields",
                serde_json::Value::Object(c.fields.clone()).to_string(),
            )],
            RecordRef::Trace(t) => vec![list("states", ListRef::States(&t.states))],
            RecordRef::State(s) => vec![
                record("location", Some(&s.location), RecordRef::Location),
                record("notes", s.notes.as_ref(), RecordRef::Notes),
            ],
            RecordRef::Finding(Finding::Issue(i)) => vec![
                scalar("cwe", i.cwe),
                scalar("testid", i.testid.as_deref()),
                record("location", Some(&i.location), RecordRef::Location),
                record("message", Some(&i.message), RecordRef::Message),
                record("notes", i.notes.as_ref(), RecordRef::Notes),
                record("trace", i.trace.as_ref(), RecordRef::Trace),
                scalar("severity", i.severity.as_deref()),
                record("customfields", i.customfields.as_ref(), RecordRef::CustomFields),
            ],
            RecordRef::Finding(Finding::Failure(f)) => vec![
                scalar("failureid", f.failureid.as_deref()),
                record("location", f.location.as_ref(), RecordRef::Location),
                record("message", f.message.as_ref(), RecordRef::Message),
                record("customfields", f.customfields.as_ref(), RecordRef::CustomFields),
            ],
            RecordRef::Finding(Finding::Info(i)) => vec![
                scalar("infoid", i.infoid.as_deref()),
                record("location", i.location.as_ref(), RecordRef::Location),
                record("message", i.message.as_ref(), RecordRef::Message),
                record("customfields", i.customfields.as_ref(), RecordRef::CustomFields),
            ],
        }
    }
}
