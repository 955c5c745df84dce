//! Tests for the directory-backed JSON document store

use chrono::Utc;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use famtree::domain::{CustomField, Family, FamilyNode, FieldKind};
use famtree::infrastructure::{FamilyStore, JsonFileStore, StoreError};

struct TestStore {
    store: JsonFileStore,
    temp: TempDir,
}

#[fixture]
fn store() -> TestStore {
    let temp = TempDir::new().expect("scratch dir");
    let store = JsonFileStore::open(temp.path()).expect("open store");
    TestStore { store, temp }
}

fn sample_family(id: &str) -> Family {
    let now = Utc::now();
    Family {
        id: id.to_string(),
        name: "Garcia".to_string(),
        description: Some("three generations".to_string()),
        sons: vec![FamilyNode {
            id: "n1".to_string(),
            dni: 11,
            name: "Ana".to_string(),
            description: None,
            custom_fields: vec![CustomField {
                id: "eyes".to_string(),
                kind: FieldKind::Color,
                label: "Eye color".to_string(),
                value: "#336699".to_string(),
            }],
            sons: vec![FamilyNode {
                id: "n2".to_string(),
                dni: 12,
                name: "Luis".to_string(),
                description: None,
                custom_fields: Vec::new(),
                sons: Vec::new(),
                birthdate: now,
                created_at: now,
            }],
            birthdate: now,
            created_at: now,
        }],
        created_at: now,
    }
}

#[rstest]
fn given_saved_family_when_loading_then_document_roundtrips(store: TestStore) {
    let family = sample_family("fam-1");

    store.store.save(&family).expect("save");
    let loaded = store.store.load("fam-1").expect("load").expect("present");

    assert_eq!(loaded, family);
}

#[rstest]
fn given_missing_id_when_loading_then_none(store: TestStore) {
    assert!(store.store.load("missing").expect("load").is_none());
}

#[rstest]
fn given_saved_family_when_saving_again_then_document_is_replaced(store: TestStore) {
    let mut family = sample_family("fam-1");
    store.store.save(&family).expect("first save");

    family.name = "Lopez".to_string();
    family.sons.clear();
    store.store.save(&family).expect("second save");

    let loaded = store.store.load("fam-1").unwrap().unwrap();
    assert_eq!(loaded.name, "Lopez");
    assert!(loaded.sons.is_empty());
}

#[rstest]
fn given_saved_family_when_deleting_then_gone(store: TestStore) {
    store.store.save(&sample_family("fam-1")).expect("save");

    store.store.delete("fam-1").expect("delete");
    assert!(store.store.load("fam-1").unwrap().is_none());
}

#[rstest]
fn given_missing_id_when_deleting_then_ok(store: TestStore) {
    store.store.delete("missing").expect("idempotent delete");
}

#[rstest]
fn given_corrupt_document_when_listing_then_it_is_skipped(store: TestStore) {
    store.store.save(&sample_family("fam-1")).expect("save");
    std::fs::write(store.temp.path().join("broken.json"), "{not json").expect("write junk");

    let families = store.store.list().expect("list survives junk");
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].id, "fam-1");
}

#[rstest]
fn given_non_json_files_when_listing_then_they_are_ignored(store: TestStore) {
    std::fs::write(store.temp.path().join("notes.txt"), "hi").expect("write");

    assert!(store.store.list().expect("list").is_empty());
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case("a/b")]
fn given_path_like_id_when_loading_then_rejected(store: TestStore, #[case] id: &str) {
    assert!(matches!(
        store.store.load(id),
        Err(StoreError::InvalidId(_))
    ));
}

#[rstest]
fn given_saved_family_when_reading_raw_json_then_layout_is_camel_case(store: TestStore) {
    store.store.save(&sample_family("fam-1")).expect("save");

    let raw =
        std::fs::read_to_string(store.temp.path().join("fam-1.json")).expect("read document");
    let doc: serde_json::Value = serde_json::from_str(&raw).expect("valid json");

    assert!(doc.get("createdAt").is_some());
    let node = &doc["sons"][0];
    assert!(node.get("customFields").is_some());
    assert_eq!(node["customFields"][0]["type"], "color");
    assert!(node.get("birthdate").is_some());
    assert!(
        node.get("description").is_none(),
        "empty optionals are omitted"
    );
}
