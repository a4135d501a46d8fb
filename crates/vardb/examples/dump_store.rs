//! Simple dumper to inspect variable store files.

use std::fs;

use vardb::{Fingerprint, Value, VariableStore, search};

fn format_value(v: &Value) -> String {
    match v {
        Value::Str(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Num(n) => format!("{}", n),
        Value::Bool(b) => format!("{}", b),
        Value::Table(t) => format!("TABLE[{}]", t.len()),
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "save.ntwtf.lua".to_string());
    let query = args.next().unwrap_or_default();

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());
    println!("File SHA-256: {}", Fingerprint::of(&data));

    let store = VariableStore::from_bytes(&data).expect("Failed to decode");
    let report = store.report();

    println!("\n=== Decode Report ===");
    println!("Tables merged: {}", report.tables_merged);
    println!("Non-table fragments discarded: {}", report.fragments_discarded);
    println!("Padding bytes skipped: {}", report.padding_skipped);
    println!("Junk bytes skipped: {}", report.junk_skipped);
    if !report.is_clean() {
        println!("WARNING: file was irregular; contents were recovered on a best-effort basis");
    }
    println!("Canonical SHA-256: {}", store.baseline());

    println!("\n=== Top-level Keys ({}) ===", store.root().len());
    for (key, value) in store.root().iter().take(20) {
        println!("  {:<40} {:<8} {}", key, value.type_name(), format_value(value));
    }

    let matches = search(store.root(), &query, 50);
    println!("\n=== Variables matching {:?} (first {}) ===", query, matches.len());
    for entry in &matches {
        println!("  {:<60} {:<8} {}", entry.path, entry.type_name(), format_value(&entry.value));
    }
    println!("\nTotal flattened variables: {}", store.flatten().len());
}
