use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use journeys::{
    DatasetCache, DatasetSource, FieldMapping, JourneyConfig, JourneyError, JourneySession,
    JsonFileSource, RawDataset,
};

struct Flaky {
    inner: JsonFileSource,
    fetches: Arc<AtomicUsize>,
}

impl DatasetSource for Flaky {
    fn id(&self) -> &str {
        self.inner.id()
    }

    fn fetch(&self) -> Result<RawDataset, JourneyError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.inner.fetch()
    }
}

#[test]
fn cache_survives_source_going_bad() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    fs::write(
        &path,
        r#"[{"Method":"Persona","Alt 1":"Sketch a user"},{"Method":"Storyboard","Alt 2":"Draw the flow"}]"#,
    )
    .unwrap();
    let fetches = Arc::new(AtomicUsize::new(0));
    let cache = DatasetCache::new();
    let mut session = JourneySession::with_cache(
        JourneyConfig::default().with_seed(4),
        Box::new(Flaky {
            inner: JsonFileSource::new("local_file", &path),
            fetches: fetches.clone(),
        }),
        cache.clone(),
    );

    assert_eq!(session.derive_topic_set().methods.len(), 2);

    fs::write(&path, "{ broken").unwrap();
    assert!(matches!(
        session.refresh_dataset(),
        Err(JourneyError::DataFormat { .. })
    ));
    assert_eq!(session.derive_topic_set().methods.len(), 2);
    assert_eq!(fetches.load(Ordering::Relaxed), 2);
    assert_eq!(cache.get().unwrap().unwrap().source, "local_file");

    session.clear_cache();
    assert!(session.derive_topic_set().is_empty());
    assert!(matches!(
        session.try_derive_topic_set(),
        Err(JourneyError::DataFormat { .. })
    ));
}

#[test]
fn corrupted_cache_slot_degrades_once_then_refetches() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    fs::write(&path, r#"[{"label":"A","alt1":"a1"}]"#).unwrap();
    let cache = DatasetCache::new();
    cache.put_serialized("[1, 2, 3]");
    let mut session = JourneySession::with_cache(
        JourneyConfig::default(),
        Box::new(JsonFileSource::new("local_file", &path)),
        cache.clone(),
    );
    assert!(session.derive_topic_set().is_empty());
    assert!(session.topic().is_some());
    assert!(session.displayed_texts().is_empty());
    assert!(cache.is_empty());

    assert_eq!(session.derive_topic_set().methods, vec!["A"]);
    assert_eq!(session.displayed_texts(), vec!["A"]);
    assert_eq!(cache.get().unwrap().unwrap().source, "local_file");
}

#[test]
fn custom_columns_on_the_source_reach_the_topic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    fs::write(&path, r#"[{"Technique":"Persona","Variant A":"Sketch"}]"#).unwrap();
    let mapping = FieldMapping::default()
        .with_label_column("Technique")
        .with_alternative_column(0, "Variant A")
        .unwrap();
    let mut session = JourneySession::new(
        JourneyConfig::default().with_seed(5),
        JsonFileSource::new("local_file", &path).with_field_mapping(mapping),
    );
    let topic = session.derive_topic_set();
    assert_eq!(topic.methods, vec!["Persona"]);
    assert_eq!(topic.pool["Persona"], vec!["Sketch"]);
    assert_eq!(session.advance(0).unwrap(), "Sketch");

    let mut unmapped = JourneySession::new(
        JourneyConfig::default(),
        JsonFileSource::new("local_file", &path),
    );
    assert!(unmapped.derive_topic_set().is_empty());
}

#[test]
fn method_count_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sheet.json");
    let rows: Vec<String> = (0..10)
        .map(|idx| format!(r#"{{"label":"m{idx}","alt1":"v{idx}"}}"#))
        .collect();
    fs::write(&path, format!("[{}]", rows.join(","))).unwrap();
    let mut session = JourneySession::new(
        JourneyConfig::default().with_method_count(3).with_seed(2),
        JsonFileSource::new("local_file", &path),
    );
    assert_eq!(session.derive_topic_set().methods.len(), 3);
    assert_eq!(session.config().method_count, 3);
}
