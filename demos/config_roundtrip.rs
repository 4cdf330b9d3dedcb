//! Flattening a typed config into path/value pairs and reading it back.
//!
//! Run with: cargo run --example config_roundtrip

use flattery::{from_flat, to_flat, FlatMap, Leaf};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    listen: Vec<Listener>,
    database: Database,
    #[serde(default)]
    plugins: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Listener {
    host: String,
    port: u16,
    tls: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    url: String,
    pool_size: u32,
    timeout_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "gateway".to_string(),
        listen: vec![
            Listener {
                host: "0.0.0.0".to_string(),
                port: 80,
                tls: false,
            },
            Listener {
                host: "0.0.0.0".to_string(),
                port: 443,
                tls: true,
            },
        ],
        database: Database {
            url: "postgres://localhost/gateway".to_string(),
            pool_size: 8,
            timeout_ms: None,
        },
        plugins: vec![],
    };

    let flat = to_flat(&config)?;
    println!("Flattened:");
    for (path, leaf) in &flat {
        println!("  {} = {}", path, leaf);
    }

    // Overrides arrive as flat pairs, e.g. from the environment.
    let mut overrides: FlatMap = flat.clone();
    overrides.insert("listen.1.port", 8443);
    overrides.insert("database.timeout_ms", 2500);
    overrides.insert("plugins.0", "rate-limit");

    let patched: Config = from_flat(&overrides)?;
    println!("\nPatched: {:#?}", patched);
    assert_eq!(patched.listen[1].port, 8443);
    assert_eq!(patched.database.timeout_ms, Some(2500));

    let back: Config = from_flat(&flat)?;
    assert_eq!(back, config);
    assert_eq!(flat.get("database.timeout_ms"), Some(&Leaf::Null));
    println!("\n✓ Round-trip successful");

    Ok(())
}
