//! Relational schema for report records.
//!
//! One table per record type; `sut` and `result` are polymorphic and carry a
//! `type` discriminator. Every foreign key is deferred to commit so rows of
//! one unit of work may be staged in any order.

pub const PRAGMAS: &str = "
    PRAGMA foreign_keys = ON;
    PRAGMA synchronous = NORMAL;
    PRAGMA busy_timeout = 5000;
";

pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS "notes" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "text" TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "point" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "line" INTEGER NOT NULL,
    "column" INTEGER NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "customfields" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "fields" TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "hash" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "alg" TEXT NOT NULL,
    "hexdigest" TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "message" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "text" TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "trace" (
    "id" TEXT PRIMARY KEY NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "file" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "givenpath" TEXT NOT NULL,
    "abspath" TEXT,
    "hash_id" TEXT REFERENCES "hash" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "function" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "name" TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "generator" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "name" TEXT NOT NULL,
    "version" TEXT
) STRICT;

CREATE TABLE IF NOT EXISTS "sut" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "type" TEXT NOT NULL CHECK ("type" IN ('debian-source', 'debian-binary', 'source-rpm')),
    "name" TEXT NOT NULL,
    "version" TEXT NOT NULL,
    "release" TEXT,
    "buildarch" TEXT
) STRICT;

CREATE TABLE IF NOT EXISTS "stats" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "wallclocktime" REAL NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS "range" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "start_id" TEXT NOT NULL REFERENCES "point" ("id") DEFERRABLE INITIALLY DEFERRED,
    "end_id" TEXT NOT NULL REFERENCES "point" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "location" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "file_id" TEXT NOT NULL REFERENCES "file" ("id") DEFERRABLE INITIALLY DEFERRED,
    "function_id" TEXT REFERENCES "function" ("id") DEFERRABLE INITIALLY DEFERRED,
    "point_id" TEXT REFERENCES "point" ("id") DEFERRABLE INITIALLY DEFERRED,
    "range_id" TEXT REFERENCES "range" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "metadata" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "generator_id" TEXT NOT NULL REFERENCES "generator" ("id") DEFERRABLE INITIALLY DEFERRED,
    "sut_id" TEXT REFERENCES "sut" ("id") DEFERRABLE INITIALLY DEFERRED,
    "file_id" TEXT REFERENCES "file" ("id") DEFERRABLE INITIALLY DEFERRED,
    "stats_id" TEXT REFERENCES "stats" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "analysis" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "metadata_id" TEXT NOT NULL REFERENCES "metadata" ("id") DEFERRABLE INITIALLY DEFERRED,
    "customfields_id" TEXT REFERENCES "customfields" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "state" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "trace_id" TEXT REFERENCES "trace" ("id") DEFERRABLE INITIALLY DEFERRED,
    "location_id" TEXT NOT NULL REFERENCES "location" ("id") DEFERRABLE INITIALLY DEFERRED,
    "notes_id" TEXT REFERENCES "notes" ("id") DEFERRABLE INITIALLY DEFERRED
) STRICT;

CREATE TABLE IF NOT EXISTS "result" (
    "id" TEXT PRIMARY KEY NOT NULL,
    "type" TEXT NOT NULL CHECK ("type" IN ('issue', 'failure', 'info')),
    "analysis_id" TEXT REFERENCES "analysis" ("id") DEFERRABLE INITIALLY DEFERRED,
    "location_id" TEXT REFERENCES "location" ("id") DEFERRABLE INITIALLY DEFERRED,
    "message_id" TEXT REFERENCES "message" ("id") DEFERRABLE INITIALLY DEFERRED,
    "customfields_id" TEXT REFERENCES "customfields" ("id") DEFERRABLE INITIALLY DEFERRED,
    "notes_id" TEXT REFERENCES "notes" ("id") DEFERRABLE INITIALLY DEFERRED,
    "trace_id" TEXT REFERENCES "trace" ("id") DEFERRABLE INITIALLY DEFERRED,
    "testid" TEXT,
    "severity" TEXT,
    "cwe" INTEGER,
    "failureid" TEXT,
    "infoid" TEXT
) STRICT;

CREATE INDEX IF NOT EXISTS "idx_result_analysis" ON "result" ("analysis_id");
CREATE INDEX IF NOT EXISTS "idx_state_trace" ON "state" ("trace_id");
"#;

/// Double-quotes an identifier; several column names are SQL keywords.
pub fn quoted(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
