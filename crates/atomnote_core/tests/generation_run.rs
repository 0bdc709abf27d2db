use atomnote_core::{
    load_catalog, DirectorySink, EmissionSink, GenerateError, GenerationConfig, GenerationPolicy,
    MemorySink, NoteFailureReason, NoteGenerator, NoteRecord, NoteStore, SinkError, StoreError,
};
use chrono::NaiveDate;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/ralph_wiggum.toml")
}

fn generator(policy: GenerationPolicy) -> NoteGenerator {
    let config = GenerationConfig::new("Parent", NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    NoteGenerator::new(config, policy)
}

/// Rejects one configured file name and accepts everything else.
struct FlakySink {
    reject: &'static str,
    inner: MemorySink,
}

impl EmissionSink for FlakySink {
    fn emit(&mut self, file_name: &str, content: &str) -> Result<(), SinkError> {
        if file_name == self.reject {
            return Err(SinkError::Io {
                path: PathBuf::from(file_name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        self.inner.emit(file_name, content)
    }
}

#[test]
fn emitted_file_names_are_title_plus_md_in_store_order() {
    let records = vec![
        NoteRecord::new("Stop Hook", "ia"),
        NoteRecord::new("Bun", "tecnologia"),
        NoteRecord::new("C++ Notes (draft)", "tecnologia"),
    ];
    let mut sink = MemorySink::new();
    let report = generator(GenerationPolicy::default())
        .generate_records(records, &mut sink)
        .unwrap();

    assert_eq!(
        sink.file_names(),
        vec!["Stop Hook.md", "Bun.md", "C++ Notes (draft).md"]
    );
    assert_eq!(report.emitted_count(), 3);
    assert!(report.is_clean());
}

#[test]
fn duplicate_titles_fail_the_run_and_emit_nothing() {
    let records = vec![
        NoteRecord::new("Bun", "tecnologia"),
        NoteRecord::new("Stop Hook", "ia"),
        NoteRecord::new("Bun", "ia"),
    ];
    let mut sink = MemorySink::new();
    let err = generator(GenerationPolicy::default())
        .generate_records(records, &mut sink)
        .unwrap_err();

    assert_eq!(
        err,
        GenerateError::DuplicateTitle(StoreError::DuplicateTitle {
            title: "Bun".to_string(),
            first_index: 0,
            duplicate_index: 2,
        })
    );
    assert!(sink.documents.is_empty());
}

#[test]
fn invalid_note_is_isolated_from_valid_ones() {
    let records = vec![
        NoteRecord::new("A", "ia").with_tags(["conceito"]),
        NoteRecord::new("B", "ia").with_tags(["conceito", ""]),
        NoteRecord::new("C", "ia"),
    ];
    let mut sink = MemorySink::new();
    let report = generator(GenerationPolicy::default())
        .generate_records(records, &mut sink)
        .unwrap();

    assert_eq!(sink.file_names(), vec!["A.md", "C.md"]);
    assert_eq!(report.failed_count(), 1);
    let failure = &report.failures[0];
    assert_eq!(failure.title, "B");
    assert_eq!(failure.file_name, "B.md");
    assert!(matches!(failure.reason, NoteFailureReason::Render(_)));
    assert!(failure.reason.to_string().contains("tag at index 1"));
}

#[test]
fn all_or_nothing_policy_emits_nothing_when_one_note_fails() {
    let records = vec![
        NoteRecord::new("A", "ia"),
        NoteRecord::new("", "ia"),
    ];
    let policy = GenerationPolicy {
        all_or_nothing: true,
        ..GenerationPolicy::default()
    };
    let mut sink = MemorySink::new();
    let err = generator(policy)
        .generate_records(records, &mut sink)
        .unwrap_err();

    match err {
        GenerateError::Aborted { failures } => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].file_name, ".md");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(sink.documents.is_empty());
}

#[test]
fn sink_failure_is_reported_and_batch_continues() {
    let records = vec![
        NoteRecord::new("A", "ia"),
        NoteRecord::new("B", "ia"),
        NoteRecord::new("C", "ia"),
    ];
    let mut sink = FlakySink {
        reject: "B.md",
        inner: MemorySink::new(),
    };
    let report = generator(GenerationPolicy::default())
        .generate_records(records, &mut sink)
        .unwrap();

    assert_eq!(sink.inner.file_names(), vec!["A.md", "C.md"]);
    assert_eq!(report.emitted, vec!["A.md".to_string(), "C.md".to_string()]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].title, "B");
    assert!(matches!(
        report.failures[0].reason,
        NoteFailureReason::Sink(ref message) if message.contains("B.md")
    ));
}

#[test]
fn title_with_path_separator_fails_at_the_sink_only() {
    let records = vec![
        NoteRecord::new("Input/Output", "tecnologia"),
        NoteRecord::new("Bun", "tecnologia"),
    ];
    let mut sink = MemorySink::new();
    let report = generator(GenerationPolicy::default())
        .generate_records(records, &mut sink)
        .unwrap();

    assert_eq!(sink.file_names(), vec!["Bun.md"]);
    assert_eq!(report.failures[0].file_name, "Input/Output.md");
    assert!(matches!(report.failures[0].reason, NoteFailureReason::Sink(_)));
}

#[test]
fn invalid_config_fails_before_emission() {
    let mut config =
        GenerationConfig::new("Parent", NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    config.updated_at = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    let generator = NoteGenerator::new(config, GenerationPolicy::default());

    let store = NoteStore::from_records(vec![NoteRecord::new("A", "ia")]).unwrap();
    let mut sink = MemorySink::new();
    let err = generator.generate(&store, &mut sink).unwrap_err();
    assert!(matches!(err, GenerateError::Config(_)));
    assert!(sink.documents.is_empty());
}

#[test]
fn fixture_catalog_writes_every_note_to_disk() {
    let catalog = load_catalog(fixture_path()).unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::create(out.path().join("Conceitos")).unwrap();

    let generator = NoteGenerator::new(catalog.config.clone(), GenerationPolicy::default());
    let report = generator.generate(&catalog.store, &mut sink).unwrap();

    assert_eq!(report.emitted_count(), 10);
    assert!(report.is_clean());
    for note in catalog.store.iter() {
        let path = sink.root().join(note.file_name());
        let written = std::fs::read_to_string(&path).unwrap();
        let expected = generator.render(note).unwrap();
        assert_eq!(written, expected.content, "content of {}", path.display());
    }

    let dangling: Vec<&str> = report
        .dangling_links
        .iter()
        .map(|link| link.target.as_str())
        .collect();
    assert!(dangling.contains(&"Bash"));
    assert!(dangling.contains(&"TypeScript"));
    assert!(!dangling.contains(&"Stop Hook"));
}

#[test]
fn fixture_catalog_with_denied_dangling_links_only_emits_closed_notes() {
    let catalog = load_catalog(fixture_path()).unwrap();
    let policy = GenerationPolicy {
        deny_dangling_links: true,
        ..GenerationPolicy::default()
    };
    let generator = NoteGenerator::new(catalog.config, policy);
    let mut sink = MemorySink::new();
    let report = generator.generate(&catalog.store, &mut sink).unwrap();

    let failed: Vec<&str> = report.failures.iter().map(|f| f.title.as_str()).collect();
    assert_eq!(failed, vec!["Ralph Wiggum Technique", "Bun"]);
    assert_eq!(report.emitted_count(), 8);
}

#[test]
fn directory_sink_overwrites_existing_file() {
    let out = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(out.path());
    sink.emit("Bun.md", "first").unwrap();
    sink.emit("Bun.md", "second").unwrap();
    assert_eq!(
        std::fs::read_to_string(out.path().join("Bun.md")).unwrap(),
        "second"
    );
}

#[test]
fn directory_sink_reports_missing_root_as_io_error() {
    let out = tempfile::tempdir().unwrap();
    let mut sink = DirectorySink::new(out.path().join("missing"));
    let err = sink.emit("Bun.md", "x").unwrap_err();
    assert!(matches!(err, SinkError::Io { .. }));
}

#[test]
fn deferred_directory_sink_is_not_created_when_strict_run_aborts() {
    let out = tempfile::tempdir().unwrap();
    let root = out.path().join("Conceitos");
    let mut sink = DirectorySink::deferred(&root);
    let policy = GenerationPolicy {
        all_or_nothing: true,
        ..GenerationPolicy::default()
    };
    let records = vec![NoteRecord::new("A", "ia"), NoteRecord::new("B", "")];

    let err = generator(policy)
        .generate_records(records, &mut sink)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Aborted { .. }));
    assert!(!root.exists());
}

#[test]
fn deferred_directory_sink_creates_root_on_first_document() {
    let out = tempfile::tempdir().unwrap();
    let root = out.path().join("nested").join("Conceitos");
    let mut sink = DirectorySink::deferred(&root);
    assert!(!root.exists());

    let report = generator(GenerationPolicy::default())
        .generate_records(vec![NoteRecord::new("Bun", "tecnologia")], &mut sink)
        .unwrap();
    assert_eq!(report.emitted_count(), 1);
    assert!(root.join("Bun.md").is_file());
}
