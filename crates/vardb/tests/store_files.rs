//! Whole-file load/edit/save behavior of `VariableStore`.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use vardb::{StoreError, TableBuilder, Value, VariableStore, decode_database, encode_database};

/// A scratch directory under the system temp dir, removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("vardb-{}-{}-{}", name, std::process::id(), n));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn sample_bytes() -> Vec<u8> {
    let root = TableBuilder::new()
        .table("reputation", |t| {
            t.number("communist", 1.0)
                .number("ultraliberal", 0.0)
                .number("moralist", 2.0)
                .number("revacholian_nationhood", 0.0)
                .number("kim", 5.0)
        })
        .table("TASK", |t| t.boolean("find_your_gun", false).boolean("find_your_badge", true))
        .string("player_name", "Tequila Sunset")
        .build();
    encode_database(&root).unwrap()
}

#[test]
fn test_open_edit_save_reopen() {
    let scratch = Scratch::new("roundtrip");
    let path = scratch.file("slot.ntwtf.lua");
    fs::write(&path, sample_bytes()).unwrap();

    let mut store = VariableStore::open(&path).unwrap();
    assert!(store.report().is_clean());
    assert_eq!(store.get("reputation.kim"), Some(&Value::Num(5.0)));

    store.set("reputation.communist", Value::Num(7.0));
    store
        .apply_text_edits([("TASK.find_your_gun", "true"), ("player_name", "Raphael Ambrosius")])
        .unwrap();
    assert!(store.is_modified().unwrap());

    store.save(&path).unwrap();
    assert!(!store.is_modified().unwrap());
    assert!(!scratch.file("slot.ntwtf.lua.tmp").exists());

    let reopened = VariableStore::open(&path).unwrap();
    assert_eq!(reopened.root(), store.root());
    assert_eq!(reopened.get("reputation.communist"), Some(&Value::Num(7.0)));
    assert_eq!(reopened.get("TASK.find_your_gun"), Some(&Value::Bool(true)));
    assert_eq!(reopened.get("player_name"), Some(&Value::from("Raphael Ambrosius")));
    assert_eq!(reopened.baseline(), store.baseline());
}

#[test]
fn test_unedited_clean_file_saves_identically() {
    let scratch = Scratch::new("identity");
    let path = scratch.file("slot.ntwtf.lua");
    let original = sample_bytes();
    fs::write(&path, &original).unwrap();

    let mut store = VariableStore::open(&path).unwrap();
    assert!(!store.is_modified().unwrap());
    store.save(&path).unwrap();

    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_irregular_file_is_normalized_on_save() {
    let scratch = Scratch::new("normalize");
    let path = scratch.file("slot.ntwtf.lua");

    let first = TableBuilder::new().number("a", 1.0).build();
    let second = TableBuilder::new().number("a", 2.0).number("b", 3.0).build();
    let mut bytes = encode_database(&first).unwrap();
    bytes.push(0x00);
    bytes.extend(encode_database(&second).unwrap());
    fs::write(&path, &bytes).unwrap();

    let mut store = VariableStore::open(&path).unwrap();
    assert_eq!(store.report().tables_merged, 2);
    assert_eq!(store.report().padding_skipped, 1);
    store.save(&path).unwrap();

    let saved = fs::read(&path).unwrap();
    assert_eq!(saved, encode_database(&second).unwrap());
    assert!(VariableStore::open(&path).unwrap().report().is_clean());
}

#[test]
fn test_missing_file() {
    let scratch = Scratch::new("missing");
    let path = scratch.file("absent.ntwtf.lua");

    let err = VariableStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Read { .. }));
    assert!(err.to_string().contains("absent.ntwtf.lua"));
}

#[test]
fn test_corrupted_file() {
    let scratch = Scratch::new("corrupt");
    let path = scratch.file("slot.ntwtf.lua");
    fs::write(&path, [0xFFu8, 0xFF, 0xFF]).unwrap();

    let err = VariableStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupted(_)));
    assert!(err.to_string().starts_with("variable store appears corrupted"));
}

#[test]
fn test_failed_save_leaves_file_untouched() {
    let scratch = Scratch::new("failed-save");
    let path = scratch.file("slot.ntwtf.lua");
    let original = sample_bytes();
    fs::write(&path, &original).unwrap();

    let mut store = VariableStore::open(&path).unwrap();
    store.set("reputation.kim", Value::Num(9.0));

    // The target's directory does not exist, so the temp file cannot be created
    let bad_path = scratch.file("no-such-dir").join("slot.ntwtf.lua");
    let err = store.save(&bad_path).unwrap_err();
    assert!(matches!(err, StoreError::Write { .. }));

    assert_eq!(fs::read(&path).unwrap(), original);
    assert!(store.is_modified().unwrap());
    assert_eq!(decode_database(&original).unwrap().len(), 3);
}

#[test]
fn test_truncated_file_is_corrupted_not_partial() {
    let scratch = Scratch::new("truncated");
    let path = scratch.file("slot.ntwtf.lua");
    let original = sample_bytes();
    fs::write(&path, &original[..original.len() - 3]).unwrap();

    let err = VariableStore::open(&path).unwrap_err();
    match err {
        StoreError::Corrupted(inner) => assert!(inner.is_end_of_stream()),
        other => panic!("expected Corrupted, got {:?}", other),
    }
}
