/// Runtime type of a persisted report record.
///
/// Polymorphic records get one kind per subtype; several kinds can share a
/// [`Table`] and are told apart by its `type` discriminator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Analysis,
    Metadata,
    Generator,
    DebianSource,
    DebianBinary,
    SourceRpm,
    Stats,
    File,
    Hash,
    Function,
    Point,
    Range,
    Location,
    Message,
    Notes,
    CustomFields,
    Trace,
    State,
    Issue,
    Failure,
    Info,
}

impl RecordKind {
    /// Bulk insert order. Every kind comes after all kinds it holds a
    /// foreign key to, except list members pointing back at their owner,
    /// which come after the owner as well.
    pub const INSERT_ORDER: [RecordKind; 21] = [
        // tier 0: no foreign keys
        RecordKind::Notes,
        RecordKind::Point,
        RecordKind::CustomFields,
        RecordKind::Hash,
        RecordKind::Message,
        RecordKind::Trace,
        // tier 1
        RecordKind::File,
        RecordKind::Function,
        RecordKind::Generator,
        RecordKind::DebianSource,
        RecordKind::DebianBinary,
        RecordKind::SourceRpm,
        RecordKind::Stats,
        RecordKind::Range,
        // tier 2
        RecordKind::Location,
        RecordKind::Metadata,
        RecordKind::Analysis,
        RecordKind::State,
        RecordKind::Issue,
        RecordKind::Failure,
        RecordKind::Info,
    ];

    pub fn table(self) -> Table {
        match self {
            RecordKind::Analysis => Table::Analysis,
            RecordKind::Metadata => Table::Metadata,
            RecordKind::Generator => Table::Generator,
            RecordKind::DebianSource | RecordKind::DebianBinary | RecordKind::SourceRpm => {
                Table::Sut
            }
            RecordKind::Stats => Table::Stats,
            RecordKind::File => Table::File,
            RecordKind::Hash => Table::Hash,
            RecordKind::Function => Table::Function,
            RecordKind::Point => Table::Point,
            RecordKind::Range => Table::Range,
            RecordKind::Location => Table::Location,
            RecordKind::Message => Table::Message,
            RecordKind::Notes => Table::Notes,
            RecordKind::CustomFields => Table::CustomFields,
            RecordKind::Trace => Table::Trace,
            RecordKind::State => Table::State,
            RecordKind::Issue | RecordKind::Failure | RecordKind::Info => Table::Result,
        }
    }

    /// Value of the `type` column for kinds stored in a polymorphic table.
    pub fn discriminator(self) -> Option<&'static str> {
        if self.table().is_polymorphic() {
            Some(self.as_str())
        } else {
            None
        }
    }

    /// Maps a stored `type` value back to its kind.
    pub fn from_discriminator(table: Table, value: &str) -> Option<RecordKind> {
        Self::INSERT_ORDER
            .into_iter()
            .find(|kind| kind.table() == table && kind.discriminator() == Some(value))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Analysis => "analysis",
            RecordKind::Metadata => "metadata",
            RecordKind::Generator => "generator",
            RecordKind::DebianSource => "debian-source",
            RecordKind::DebianBinary => "debian-binary",
            RecordKind::SourceRpm => "source-rpm",
            RecordKind::Stats => "stats",
            RecordKind::File => "file",
            RecordKind::Hash => "hash",
            RecordKind::Function => "function",
            RecordKind::Point => "point",
            RecordKind::Range => "range",
            RecordKind::Location => "location",
            RecordKind::Message => "message",
            RecordKind::Notes => "notes",
            RecordKind::CustomFields => "customfields",
            RecordKind::Trace => "trace",
            RecordKind::State => "state",
            RecordKind::Issue => "issue",
            RecordKind::Failure => "failure",
            RecordKind::Info => "info",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relational table holding one or more record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Analysis,
    Metadata,
    Generator,
    Sut,
    Stats,
    File,
    Hash,
    Function,
    Point,
    Range,
    Location,
    Message,
    Notes,
    CustomFields,
    Trace,
    State,
    Result,
}

impl Table {
    pub const ALL: [Table; 17] = [
        Table::Analysis,
        Table::Metadata,
        Table::Generator,
        Table::Sut,
        Table::Stats,
        Table::File,
        Table::Hash,
        Table::Function,
        Table::Point,
        Table::Range,
        Table::Location,
        Table::Message,
        Table::Notes,
        Table::CustomFields,
        Table::Trace,
        Table::State,
        Table::Result,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Analysis => "analysis",
            Table::Metadata => "metadata",
            Table::Generator => "generator",
            Table::Sut => "sut",
            Table::Stats => "stats",
            Table::File => "file",
            Table::Hash => "hash",
            Table::Function => "function",
            Table::Point => "point",
            Table::Range => "range",
            Table::Location => "location",
            Table::Message => "message",
            Table::Notes => "notes",
            Table::CustomFields => "customfields",
            Table::Trace => "trace",
            Table::State => "state",
            Table::Result => "result",
        }
    }

    /// Data columns besides `id` and the `type` discriminator.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Analysis => &["metadata_id", "customfields_id"],
            Table::Metadata => &["generator_id", "sut_id", "file_id", "stats_id"],
            Table::Generator => &["name", "version"],
            Table::Sut => &["name", "version", "release", "buildarch"],
            Table::Stats => &["wallclocktime"],
            Table::File => &["givenpath", "abspath", "hash_id"],
            Table::Hash => &["alg", "hexdigest"],
            Table::Function => &["name"],
            Table::Point => &["line", "column"],
            Table::Range => &["start_id", "end_id"],
            Table::Location => &["file_id", "function_id", "point_id", "range_id"],
            Table::Message => &["text"],
            Table::Notes => &["text"],
            Table::CustomFields => &["fields"],
            Table::Trace => &[],
            Table::State => &["trace_id", "location_id", "notes_id"],
            Table::Result => &[
                "analysis_id",
                "location_id",
                "message_id",
                "customfields_id",
                "notes_id",
                "trace_id",
                "testid",
                "severity",
                "cwe",
                "failureid",
                "infoid",
            ],
        }
    }

    /// Foreign-key columns and the tables they point at.
    pub fn references(self) -> &'static [(&'static str, Table)] {
        match self {
            Table::Analysis => &[
                ("metadata_id", Table::Metadata),
                ("customfields_id", Table::CustomFields),
            ],
            Table::Metadata => &[
                ("generator_id", Table::Generator),
                ("sut_id", Table::Sut),
                ("file_id", Table::File),
                ("stats_id", Table::Stats),
            ],
            Table::File => &[("hash_id", Table::Hash)],
            Table::Range => &[("start_id", Table::Point), ("end_id", Table::Point)],
            Table::Location => &[
                ("file_id", Table::File),
                ("function_id", Table::Function),
                ("point_id", Table::Point),
                ("range_id", Table::Range),
            ],
            Table::State => &[
                ("trace_id", Table::Trace),
                ("location_id", Table::Location),
                ("notes_id", Table::Notes),
            ],
            Table::Result => &[
                ("analysis_id", Table::Analysis),
                ("location_id", Table::Location),
                ("message_id", Table::Message),
                ("customfields_id", Table::CustomFields),
                ("notes_id", Table::Notes),
                ("trace_id", Table::Trace),
            ],
            Table::Generator
            | Table::Sut
            | Table::Stats
            | Table::Hash
            | Table::Function
            | Table::Point
            | Table::Message
            | Table::Notes
            | Table::CustomFields
            | Table::Trace => &[],
        }
    }

    pub fn is_polymorphic(self) -> bool {
        matches!(self, Table::Sut | Table::Result)
    }

    /// Column a list member uses to point back at an owner stored here.
    pub fn owner_column(self) -> String {
        format!("{}_id", self.name())
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
