use crate::uniquify::domain::{
    Analysis, AttributeValue, ContentId, CustomFields, Finding, File, Function, Generator, Hash,
    Location, Message, Metadata, Notes, Point, Range, RecordRef, State, Stats, Sut, Trace, Value,
};

/// Records that can compute and store their own content id.
///
/// Children are identified first, so a record's id covers its whole subtree.
/// Report nesting is shallow and bounded by the record model.
pub trait Identify {
    fn assign_ids(&mut self) -> ContentId;
}

/// IdentityAssigner service for content-derived record ids
///
/// An id is a blake3 digest over the record kind, every scalar field (name
/// and typed value) and every child's role and id. The findings of an
/// analysis are hashed as a set; trace states keep their order. Ids already
/// present on the input are overwritten.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityAssigner;

impl IdentityAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Assigns ids to every record of `analysis` and returns the root id.
    pub fn assign(&self, analysis: &mut Analysis) -> ContentId {
        analysis.assign_ids()
    }

    pub fn assign_all(&self, analyses: &mut [Analysis]) -> Vec<ContentId> {
        analyses.iter_mut().map(|a| self.assign(a)).collect()
    }
}

fn digest(record: RecordRef<'_>) -> ContentId {
    let mut hasher = blake3::Hasher::new();
    write_text(&mut hasher, record.kind().as_str());

    for attribute in record.attributes() {
        write_text(&mut hasher, attribute.name);
        match attribute.value {
            AttributeValue::Scalar(Value::Null) | AttributeValue::Null => {
                hasher.update(b"n");
            }
            AttributeValue::Scalar(Value::Integer(value)) => {
                hasher.update(b"i");
                hasher.update(&value.to_le_bytes());
            }
            AttributeValue::Scalar(Value::Real(value)) => {
                hasher.update(b"r");
                hasher.update(&value.to_bits().to_le_bytes());
            }
            AttributeValue::Scalar(Value::Text(value)) => {
                hasher.update(b"t");
                write_text(&mut hasher, &value);
            }
            AttributeValue::Record(child) => {
                hasher.update(b"c");
                write_text(&mut hasher, child.id().map(ContentId::as_str).unwrap_or_default());
            }
            AttributeValue::List(list) => {
                let items = list.items();
                let mut ids: Vec<&str> = items
                    .iter()
                    .map(|item| item.id().map(ContentId::as_str).unwrap_or_default())
                    .collect();
                if !list.is_ordered() {
                    ids.sort_unstable();
                }
                hasher.update(b"l");
                hasher.update(&(ids.len() as u64).to_le_bytes());
                for id in ids {
                    write_text(&mut hasher, id);
                }
            }
        }
    }

    ContentId::from_digest(&hasher.finalize())
}

/// Length-prefixed so adjacent fields cannot run together.
fn write_text(hasher: &mut blake3::Hasher, text: &str) {
    hasher.update(&(text.len() as u64).to_le_bytes());
    hasher.update(text.as_bytes());
}

fn assign_opt<T: Identify>(value: &mut Option<T>) {
    if let Some(value) = value {
        value.assign_ids();
    }
}

macro_rules! identify_leaf {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Identify for $ty {
                fn assign_ids(&mut self) -> ContentId {
                    let id = digest(RecordRef::$ty(self));
                    self.id = Some(id.clone());
                    id
                }
            }
        )*
    };
}

identify_leaf!(Generator, Stats, Hash, Function, Point, Message, Notes, CustomFields);

impl Identify for Sut {
    fn assign_ids(&mut self) -> ContentId {
        let id = digest(RecordRef::Sut(self));
        match self {
            Sut::DebianSource(sut) => sut.id = Some(id.clone()),
            Sut::DebianBinary(sut) => sut.id = Some(id.clone()),
            Sut::SourceRpm(sut) => sut.id = Some(id.clone()),
        }
        id
    }
}

impl Identify for File {
    fn assign_ids(&mut self) -> ContentId {
        assign_opt(&mut self.hash);
        let id = digest(RecordRef::File(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for Range {
    fn assign_ids(&mut self) -> ContentId {
        self.start.assign_ids();
        self.end.assign_ids();
        let id = digest(RecordRef::Range(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for Location {
    fn assign_ids(&mut self) -> ContentId {
        self.file.assign_ids();
        assign_opt(&mut self.function);
        assign_opt(&mut self.point);
        assign_opt(&mut self.range);
        let id = digest(RecordRef::Location(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for State {
    fn assign_ids(&mut self) -> ContentId {
        self.location.assign_ids();
        assign_opt(&mut self.notes);
        let id = digest(RecordRef::State(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for Trace {
    fn assign_ids(&mut self) -> ContentId {
        for state in &mut self.states {
            state.assign_ids();
        }
        let id = digest(RecordRef::Trace(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for Finding {
    fn assign_ids(&mut self) -> ContentId {
        match self {
            Finding::Issue(issue) => {
                issue.location.assign_ids();
                issue.message.assign_ids();
                assign_opt(&mut issue.notes);
                assign_opt(&mut issue.trace);
                assign_opt(&mut issue.customfields);
            }
            Finding::Failure(failure) => {
                assign_opt(&mut failure.location);
                assign_opt(&mut failure.message);
                assign_opt(&mut failure.customfields);
            }
            Finding::Info(info) => {
                assign_opt(&mut info.location);
                assign_opt(&mut info.message);
                assign_opt(&mut info.customfields);
            }
        }

        let id = digest(RecordRef::Finding(self));
        match self {
            Finding::Issue(issue) => issue.id = Some(id.clone()),
            Finding::Failure(failure) => failure.id = Some(id.clone()),
            Finding::Info(info) => info.id = Some(id.clone()),
        }
        id
    }
}

impl Identify for Metadata {
    fn assign_ids(&mut self) -> ContentId {
        self.generator.assign_ids();
        assign_opt(&mut self.sut);
        assign_opt(&mut self.file);
        assign_opt(&mut self.stats);
        let id = digest(RecordRef::Metadata(self));
        self.id = Some(id.clone());
        id
    }
}

impl Identify for Analysis {
    fn assign_ids(&mut self) -> ContentId {
        self.metadata.assign_ids();
        for finding in &mut self.results {
            finding.assign_ids();
        }
        assign_opt(&mut self.customfields);
        let id = digest(RecordRef::Analysis(self));
        self.id = Some(id.clone());
        id
    }
}
