use std::path::{Path, PathBuf};

use parsing::IndexFileError;
use srcindex::session::{INDEX_FILE_NAME, ResolveError, SessionError, SourceIndexSession};

const GEN_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/gen");

#[test]
fn resolves_through_configured_directory() {
    let mut session = SourceIndexSession::default();
    session.configure(GEN_DIR).unwrap();
    assert!(!session.is_loaded());

    let resolution = session.resolve("withStyle").unwrap();
    assert!(session.is_loaded());
    insta::assert_snapshot!(resolution.complete_pqn, @"stdlib_api:packages:eu.numberfour.stdlib.format.api:src/n4js/n4/format/DateTimeFormat:DateTimeFormat@withStyle");
    assert_eq!(resolution.entry.source_line, 18);
    assert_eq!(
        resolution.entry.repo_relative_url(),
        "packages/eu.numberfour.stdlib.format.api/src/n4js/n4/format/DateTimeFormat.n4js"
    );
}

#[test]
fn paths_inside_the_directory() {
    let session = SourceIndexSession::new(GEN_DIR);
    assert_eq!(session.index_file().unwrap(), Path::new(GEN_DIR).join(INDEX_FILE_NAME));
    assert_eq!(session.modules_dir().unwrap(), Path::new(GEN_DIR).join("modules"));

    let resolution = session.resolve("first").unwrap();
    let expected = Path::new(GEN_DIR)
        .join("modules")
        .join("stdlib_api#packages")
        .join("eu.numberfour.n4js.base.api#src.n4js")
        .join("n4.lang")
        .join("IterableExt.adoc");
    assert_eq!(session.documentation_file(&resolution.entry).unwrap(), expected);
}

#[test]
fn diagnostics() {
    let session = SourceIndexSession::new(GEN_DIR);

    let error = session.resolve("withPattern").unwrap_err();
    let ResolveError::Ambiguous { candidates, .. } = &error else {
        panic!("expected an ambiguous PQN, found {error:?}");
    };
    assert_eq!(candidates.len(), 2);
    assert!(candidates.iter().all(|candidate| candidate.ends_with("@withPattern")));
    insta::assert_snapshot!(error, @"PQN is ambiguous: 'withPattern'.");
    assert_eq!(error.inline_message(), "Ambiguous PQN");

    let error = session.resolve("DateXY@withStyle").unwrap_err();
    assert!(matches!(error, ResolveError::NotFound { .. }));
    insta::assert_snapshot!(error, @"PQN not found: 'DateXY@withStyle'.");
    assert_eq!(error.inline_message(), "PQN not found");

    let error = session.resolve("Foo:12").unwrap_err();
    assert!(matches!(error, ResolveError::Malformed { .. }));
    insta::assert_snapshot!(error, @"PQN could not be parsed: 'Foo:12'.");
    assert_eq!(error.inline_message(), "PQN malformed");
}

#[test]
fn malformed_pqn_does_not_load_the_index() {
    let session = SourceIndexSession::new(GEN_DIR);
    assert!(session.resolve("\"open").is_err());
    assert!(!session.is_loaded());
}

#[test]
fn reconfiguration() {
    let mut session = SourceIndexSession::new("elsewhere");
    session.configure(GEN_DIR).unwrap();
    session.database().unwrap();

    session.configure(GEN_DIR).unwrap();
    let error = session.configure("elsewhere").unwrap_err();
    assert!(matches!(error, SessionError::Reconfigured { .. }));
    assert_eq!(session.gen_dir(), Some(Path::new(GEN_DIR)));

    session.reset();
    assert!(!session.is_loaded());
    assert_eq!(session.gen_dir(), None);
    session.configure("elsewhere").unwrap();
}

#[test]
fn index_is_loaded_once() {
    let session = SourceIndexSession::new(GEN_DIR);
    let first = session.database().unwrap();
    let second = session.database().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first.len(), 5);
}

#[test]
fn unconfigured_session() {
    let session = SourceIndexSession::default();
    let error = session.resolve("withStyle").unwrap_err();
    assert!(matches!(error, ResolveError::Session(SessionError::NotConfigured)));
    assert_eq!(error.inline_message(), "Source index unavailable");
}

#[test]
fn missing_index_file() {
    let gen_dir = PathBuf::from(GEN_DIR).join("missing");
    let session = SourceIndexSession::new(&gen_dir);
    let error = session.resolve("withStyle").unwrap_err();
    assert!(matches!(
        error,
        ResolveError::Session(SessionError::Index(IndexFileError::Io { .. }))
    ));
}
