use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use journeys::source::payload::records_from_json;
use journeys::{
    AlternativesBuilder, FieldMapping, InMemorySource, JourneyConfig, JourneyError,
    JourneySession, MethodSampler, RawDataset, RawRecord, RotationEngine, TopicSet,
};

fn scenario_dataset() -> RawDataset {
    RawDataset::new(
        "scenario",
        vec![
            RawRecord::new("A", "A1", "", "A3"),
            RawRecord::new("A", "A1b", "", ""),
        ],
    )
}

fn wide_dataset() -> RawDataset {
    let records = (0..12)
        .map(|idx| {
            RawRecord::new(
                if idx % 4 == 3 { String::new() } else { format!("label{idx}") },
                format!("alt{idx}a"),
                if idx % 2 == 0 { String::new() } else { format!("alt{idx}b") },
                format!("alt{idx}c"),
            )
        })
        .collect();
    RawDataset::new("wide", records)
}

#[test]
fn scenario_pool_and_full_cycle() {
    let dataset = scenario_dataset();
    let methods = vec!["A".to_string()];
    let pool = AlternativesBuilder.build(&dataset, &methods);
    assert_eq!(pool["A"], vec!["A1", "A3", "A1b"]);

    let mut engine = RotationEngine::new(&TopicSet { methods, pool }).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let first = engine.advance(0, &mut rng).unwrap().to_string();
    assert!(["A1", "A3", "A1b"].contains(&first.as_str()));
    for _ in 0..3 {
        engine.advance(0, &mut rng).unwrap();
    }
    assert_eq!(engine.current_text_for("A").unwrap(), "A");
}

#[test]
fn empty_dataset_derives_nothing_without_error() {
    let dataset = RawDataset::new("empty", Vec::new());
    let mut rng = StdRng::seed_from_u64(1);
    let methods = MethodSampler::default().sample(&dataset, &mut rng);
    assert!(methods.is_empty());
    assert!(AlternativesBuilder.build(&dataset, &methods).is_empty());

    let mut session = JourneySession::new(
        JourneyConfig::default().with_seed(1),
        InMemorySource::new("empty", Vec::new()),
    );
    let set = session.try_derive_topic_set().unwrap();
    assert!(set.is_empty());
    assert!(set.pool.is_empty());
}

#[test]
fn malformed_payload_is_a_format_error() {
    let err = records_from_json("sheet", &json!("not rows"), &FieldMapping::default()).unwrap_err();
    assert!(matches!(err, JourneyError::DataFormat { .. }));
}

#[test]
fn sampled_labels_are_bounded_and_drawn_from_the_column() {
    let dataset = wide_dataset();
    let column: HashSet<&str> = dataset.labels().filter(|label| !label.is_empty()).collect();
    let mut rng = StdRng::seed_from_u64(5);
    for count in 0..12 {
        let drawn = MethodSampler::new(count).sample(&dataset, &mut rng);
        assert!(drawn.len() <= count.min(column.len()));
        assert!(drawn.iter().all(|label| column.contains(label.as_str())));
    }
}

#[test]
fn pools_never_hold_empty_alternatives() {
    let dataset = wide_dataset();
    let methods: Vec<String> = dataset
        .labels()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();
    let pool = AlternativesBuilder.build(&dataset, &methods);
    assert_eq!(pool.len(), methods.len());
    assert!(pool.values().flatten().all(|alt| !alt.is_empty()));
    assert_eq!(pool["label0"], vec!["alt0a", "alt0c"]);
    assert_eq!(pool["label1"], vec!["alt1a", "alt1b", "alt1c"]);
}

#[test]
fn displayed_text_stays_within_own_pool() {
    let mut session = JourneySession::new(
        JourneyConfig::default().with_seed(21),
        InMemorySource::new("wide", wide_dataset().records),
    );
    let set = session.derive_topic_set().clone();
    assert_eq!(set.methods.len(), 5);
    for step in 0..60 {
        let slot = step % set.methods.len();
        let text = session.advance(slot).unwrap().to_string();
        let label = &set.methods[slot];
        assert!(text == *label || set.pool[label].contains(&text));
    }
}

#[test]
fn every_method_returns_to_its_label_after_a_full_cycle() {
    let mut session = JourneySession::new(
        JourneyConfig::default().with_seed(8),
        InMemorySource::new("wide", wide_dataset().records),
    );
    let set = session.derive_topic_set().clone();
    for (slot, label) in set.methods.iter().enumerate() {
        for _ in 0..=set.pool[label].len() {
            session.advance(slot).unwrap();
        }
        assert_eq!(session.current_text(slot).unwrap(), label);
    }
}
