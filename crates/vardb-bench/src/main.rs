//! Benchmark for vardb serialization using a variable store.
//!
//! Loads a `.ntwtf.lua` store, a JSON variable export, or synthesizes a
//! store of roughly the size a late-game save carries (about 12k leaves).

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;
use vardb::{
    Fingerprint, Table, TableBuilder, Value, decode_database, decode_database_with_report,
    encode_database, flatten, set_by_path,
};

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

/// A variable export as produced by save editors: a name and a nested object
/// of variables.
#[derive(Debug, Deserialize)]
struct VariableExport {
    #[serde(default)]
    name: Option<String>,
    variables: serde_json::Map<String, serde_json::Value>,
}

fn json_to_table(object: &serde_json::Map<String, serde_json::Value>) -> Table {
    let mut table = Table::with_capacity(object.len());
    for (key, value) in object {
        if let Some(value) = json_to_value(value) {
            table.insert(key.as_str(), value);
        }
    }
    table
}

/// Arrays become tables keyed "1".."n"; nulls have no wire form and are dropped.
fn json_to_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => n.as_f64().map(Value::Num),
        serde_json::Value::String(s) => Some(Value::Str(s.clone())),
        serde_json::Value::Array(items) => {
            let mut table = Table::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                if let Some(item) = json_to_value(item) {
                    table.insert((i + 1).to_string(), item);
                }
            }
            Some(Value::Table(table))
        }
        serde_json::Value::Object(object) => Some(Value::Table(json_to_table(object))),
    }
}

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

const SKILLS: [&str; 6] = [
    "logic",
    "encyclopedia",
    "rhetoric",
    "drama",
    "conceptualization",
    "visual_calculus",
];

const AREAS: [&str; 8] = [
    "whirling",
    "plaza",
    "harbor",
    "church",
    "fishing_village",
    "coast",
    "doomed_commercial_area",
    "tribunal",
];

/// Builds a deterministic store shaped like a real save: per-area dialogue
/// flags, numeric counters, check results and a few long strings.
fn synthesize_store(leaves: usize) -> Table {
    let per_area = leaves / AREAS.len();
    let mut builder = TableBuilder::new()
        .table("reputation", |t| {
            t.number("communist", 3.0)
                .number("ultraliberal", 1.0)
                .number("moralist", 4.0)
                .number("revacholian_nationhood", 2.0)
                .number("kim", 12.0)
        })
        .string("player_name", "Harrier Du Bois")
        .number("xp", 4_230.0);

    for (a, &area) in AREAS.iter().enumerate() {
        builder = builder.table(area, |mut t| {
            for i in 0..per_area {
                t = match i % 4 {
                    0 => t.boolean(format!("dialogue_seen_{}", i), i % 3 == 0),
                    1 => t.number(format!("counter_{}", i), (i * (a + 1)) as f64),
                    2 => t.number(
                        format!("{}_check_{}", SKILLS[i % SKILLS.len()], i),
                        (i % 13) as f64 - 6.5,
                    ),
                    _ => t.string(
                        format!("note_{}", i),
                        format!("{} thought cabinet entry {}", area, i),
                    ),
                };
            }
            t
        });
    }
    builder.build()
}

// =============================================================================
// TIMING
// =============================================================================

fn throughput(bytes: usize, elapsed: Duration) -> f64 {
    (bytes as f64 / 1_000_000.0) / elapsed.as_secs_f64()
}

fn main() {
    let source = std::env::args().nth(1);

    let (label, input, root) = match source.as_deref() {
        Some(path) if path.ends_with(".json") => {
            println!("Loading variable export from: {}", path);
            let json_data = fs::read_to_string(path).expect("Failed to read export");

            let parse_start = Instant::now();
            let export: VariableExport =
                serde_json::from_str(&json_data).expect("Failed to parse JSON");
            let root = json_to_table(&export.variables);
            println!(
                "Converted {} in {:?}",
                export.name.as_deref().unwrap_or("export"),
                parse_start.elapsed()
            );
            (path.to_string(), None, root)
        }
        Some(path) => {
            println!("Loading variable store from: {}", path);
            let bytes = fs::read(path).expect("Failed to read store");
            let (root, report) = decode_database_with_report(&bytes).expect("Failed to decode");
            if !report.is_clean() {
                println!(
                    "  Recovered: {} tables merged, {} fragments discarded, {} padding / {} junk bytes skipped",
                    report.tables_merged,
                    report.fragments_discarded,
                    report.padding_skipped,
                    report.junk_skipped
                );
            }
            (path.to_string(), Some(bytes), root)
        }
        None => {
            let build_start = Instant::now();
            let root = synthesize_store(12_000);
            println!("Synthesized store in {:?}", build_start.elapsed());
            ("synthetic".to_string(), None, root)
        }
    };

    let flat = flatten(&root);
    println!("{} top-level entries, {} leaves", root.len(), flat.len());

    // Benchmark encoding
    let encode_start = Instant::now();
    let encoded = encode_database(&root).expect("Failed to encode");
    let encode_time = encode_start.elapsed();

    println!("\nEncode: {} bytes in {:?}", encoded.len(), encode_time);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), encode_time));

    // Encoding is deterministic
    let encoded2 = encode_database(&root).expect("Failed to encode");
    assert_eq!(encoded, encoded2, "Encoding should be deterministic");

    // Benchmark decoding
    const DECODE_ITERS: u32 = 20;

    // Warmup
    for _ in 0..3 {
        let _ = decode_database(&encoded).expect("Failed to decode");
    }

    let decode_start = Instant::now();
    let mut decoded = Table::new();
    for _ in 0..DECODE_ITERS {
        decoded = decode_database(&encoded).expect("Failed to decode");
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!("\nDecode: {:?} (avg of {} iterations)", decode_time, DECODE_ITERS);
    println!("  Throughput: {:.2} MB/s", throughput(encoded.len(), decode_time));
    assert_eq!(decoded, root, "Decoded store should equal the original");

    // Benchmark flattening
    let flatten_start = Instant::now();
    let mut flat_again = Table::new();
    for _ in 0..DECODE_ITERS {
        flat_again = flatten(&decoded);
    }
    let flatten_time = flatten_start.elapsed() / DECODE_ITERS;

    println!("\nFlatten: {} paths in {:?} (avg of {} iterations)", flat_again.len(), flatten_time, DECODE_ITERS);

    // Rebuild from paths, then re-encode
    let rebuild_start = Instant::now();
    let mut rebuilt = Table::new();
    for (path, value) in flat_again.iter() {
        set_by_path(&mut rebuilt, path, value.clone());
    }
    let rebuild_time = rebuild_start.elapsed();
    let reencoded = encode_database(&rebuilt).expect("Failed to re-encode");

    println!("\nRebuild from paths: {:?}", rebuild_time);
    println!(
        "  Re-encoded {} bytes, identical: {}",
        reencoded.len(),
        reencoded == encoded
    );
    assert_eq!(
        decode_database(&reencoded).expect("Failed to decode rebuilt store"),
        rebuilt,
    );

    // Write output file
    if source.is_some() {
        let input_path = Path::new(&label);
        let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
        let parent = input_path.parent().unwrap_or(Path::new("."));
        let output = parent.join(format!("{}.canonical.ntwtf.lua", stem));
        fs::write(&output, &encoded).expect("Failed to write output file");

        println!("\n=== Output File ===");
        println!("Canonical: {}", output.display());
    }

    // Summary
    println!("\n=== Summary ===");
    println!("Source: {}", label);
    println!("Leaves: {}", flat.len());
    if let Some(input) = &input {
        println!(
            "Input size: {} bytes, canonical size: {} bytes ({})",
            input.len(),
            encoded.len(),
            if *input == encoded { "unchanged" } else { "normalized" }
        );
    }
    println!(
        "Encoded: {} bytes ({:.1} KB)",
        encoded.len(),
        encoded.len() as f64 / 1_000.0
    );
    println!("SHA-256: {}", Fingerprint::of(&encoded));
}
