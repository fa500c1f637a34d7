pub mod content_id;
pub mod dedup_cache;
pub mod record;
pub mod record_kind;
pub mod row;
pub mod tree;

pub use content_id::ContentId;
pub use dedup_cache::DedupCache;
pub use record::{
    Analysis, Attribute, AttributeValue, CustomFields, DebianBinary, DebianSource, Failure,
    File, Finding, Function, Generator, Hash, Info, Issue, ListRef, Location, Message, Metadata,
    Notes, Point, Range, RecordRef, SourceRpm, State, Stats, Sut, Trace,
};
pub use record_kind::{RecordKind, Table};
pub use row::{Row, Value};
pub use tree::{Node, NodeId, NodeState, ReportTree, Subject, ROOT};
