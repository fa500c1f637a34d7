use report_uniquify::prelude::*;
use report_uniquify::uniquify::domain::{
    File, Finding, Generator, Issue, Location, Message, Metadata, Notes, Point, State, Sut, Trace,
};

pub fn issue(path: &str, text: &str) -> Finding {
    Finding::Issue(Issue::new(Location::new(File::new(path)), Message::new(text)))
}

/// gcc 4.8 run over coreutils with one leak in a.c
pub fn sample_analysis() -> Analysis {
    Analysis::new(
        Metadata::new(Generator::new("gcc", Some("4.8")))
            .with_sut(Sut::debian_source("coreutils", "8.21", Some("1"))),
    )
    .with_result(issue("a.c", "leak"))
}

/// Same generator and file as [`sample_analysis`], different finding
pub fn sibling_analysis() -> Analysis {
    Analysis::new(
        Metadata::new(Generator::new("gcc", Some("4.8")))
            .with_sut(Sut::debian_source("coreutils", "8.21", Some("1"))),
    )
    .with_result(issue("a.c", "overflow"))
}

/// Two issues reporting at the same location
pub fn shared_location_analysis() -> Analysis {
    Analysis::new(Metadata::new(Generator::new("clang-analyzer", None)))
        .with_result(issue("main.c", "use after free"))
        .with_result(issue("main.c", "double free"))
}

/// One issue carrying a three-step trace
pub fn traced_analysis() -> Analysis {
    let state = |line: i64, note: &str| State {
        id: None,
        location: Location::new(File::new("util.c")).with_point(Point::new(line, 1)),
        notes: Some(Notes {
            id: None,
            text: note.to_string(),
        }),
    };
    let mut finding = Issue::new(
        Location::new(File::new("util.c")).with_point(Point::new(30, 1)),
        Message::new("null dereference"),
    );
    finding.trace = Some(Trace {
        id: None,
        states: vec![
            state(10, "allocated"),
            state(20, "freed"),
            state(30, "dereferenced"),
        ],
    });
    Analysis::new(Metadata::new(Generator::new("cppcheck", Some("1.6"))))
        .with_result(Finding::Issue(finding))
}

/// `width` issues in one file, each at its own line, all with one message
pub fn wide_analysis(width: i64) -> Analysis {
    let mut analysis = Analysis::new(Metadata::new(Generator::new("cppcheck", Some("1.6"))));
    for line in 1..=width {
        analysis = analysis.with_result(Finding::Issue(Issue::new(
            Location::new(File::new("big.c")).with_point(Point::new(line, 1)),
            Message::new("unchecked return value"),
        )));
    }
    analysis
}

pub fn identified(mut analysis: Analysis) -> Analysis {
    IdentityAssigner::new().assign(&mut analysis);
    analysis
}

pub const SAMPLE_JSON: &str = r#"{
  "metadata": {
    "generator": {"name": "gcc", "version": "4.8"},
    "sut": {"type": "debian-source", "name": "coreutils", "version": "8.21", "release": "1"}
  },
  "results": [
    {
      "type": "issue",
      "location": {"file": {"givenpath": "a.c"}},
      "message": {"text": "leak"}
    }
  ]
}"#;
