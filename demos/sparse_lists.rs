//! Rebuilding sequences from sparse indices, and the inputs that are refused.
//!
//! Run with: cargo run --example sparse_lists

use flattery::{flatten, unflatten, unflatten_with_options, FlatMap, FlattenOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut flat = FlatMap::new();
    flat.insert("queue.0", "first");
    flat.insert("queue.4", "fifth");
    flat.insert("queue.2.id", 7);

    let nested = unflatten(&flat)?;
    println!("Sparse input:");
    for (path, leaf) in &flat {
        println!("  {} = {}", path, leaf);
    }
    println!("\nRebuilt: {:?}", nested);

    // Gaps become explicit nulls once flattened again.
    println!("\nFlattened again:");
    for (path, leaf) in &flatten(&nested) {
        println!("  {} = {}", path, leaf);
    }

    let refused = [
        vec![("a.0", 1), ("a.b", 2)],
        vec![("a.1", 1), ("a.01", 2)],
        vec![("a", 1), ("a.b", 2)],
    ];
    println!("\nRefused inputs:");
    for entries in refused {
        let mut bad = FlatMap::new();
        for (path, n) in entries {
            bad.insert(path, n);
        }
        if let Err(err) = unflatten(&bad) {
            println!("  {}", err);
        }
    }

    let mut huge = FlatMap::new();
    huge.insert("ids.4294967295", 1);
    let options = FlattenOptions::new().with_max_sequence_len(10_000);
    if let Err(err) = unflatten_with_options(&huge, &options) {
        println!("  {}", err);
    }

    Ok(())
}
