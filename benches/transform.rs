use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flattery::{flatten, from_flat, to_flat, unflatten, value, FlatMap, Map, Value};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    tags: Vec<String>,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            tags: vec!["new".to_string(), format!("batch-{}", i % 7)],
        })
        .collect()
}

// A mapping nested `depth` levels deep with `width` children per level.
fn tree(depth: u32, width: u32) -> Value {
    if depth == 0 {
        return Value::from(i64::from(width));
    }
    let mut map = Map::new();
    for i in 0..width {
        map.insert(format!("k{}", i), tree(depth - 1, width));
    }
    Value::Mapping(map)
}

fn benchmark_flatten_simple(c: &mut Criterion) {
    let value = value!({
        "server": { "host": "localhost", "ports": [80, 443] },
        "debug": false,
        "users": [{ "name": "Alice" }, { "name": "Bob" }]
    });

    c.bench_function("flatten_simple", |b| b.iter(|| flatten(black_box(&value))));
}

fn benchmark_unflatten_simple(c: &mut Criterion) {
    let flat = flatten(&value!({
        "server": { "host": "localhost", "ports": [80, 443] },
        "debug": false,
        "users": [{ "name": "Alice" }, { "name": "Bob" }]
    }));

    c.bench_function("unflatten_simple", |b| b.iter(|| unflatten(black_box(&flat))));
}

fn benchmark_flatten_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_tree");

    for depth in [2, 4, 6].iter() {
        let value = tree(*depth, 4);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &value, |b, value| {
            b.iter(|| flatten(black_box(value)))
        });
    }
    group.finish();
}

fn benchmark_unflatten_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten_tree");

    for depth in [2, 4, 6].iter() {
        let flat = flatten(&tree(*depth, 4));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &flat, |b, flat| {
            b.iter(|| unflatten(black_box(flat)))
        });
    }
    group.finish();
}

fn benchmark_unflatten_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten_sparse");

    for size in [10, 1_000, 100_000].iter() {
        let mut flat = FlatMap::new();
        flat.insert("a.0", 1);
        flat.insert(format!("a.{}", size - 1), 2);
        group.bench_with_input(BenchmarkId::from_parameter(size), &flat, |b, flat| {
            b.iter(|| unflatten(black_box(flat)))
        });
    }
    group.finish();
}

fn benchmark_to_flat_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_flat_array");

    for size in [10, 50, 100, 500].iter() {
        let products = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            b.iter(|| to_flat(black_box(products)))
        });
    }
    group.finish();
}

fn benchmark_from_flat_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_flat_array");

    for size in [10, 50, 100, 500].iter() {
        let flat = to_flat(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &flat, |b, flat| {
            b.iter(|| from_flat::<Vec<Product>>(black_box(flat)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten_simple,
    benchmark_unflatten_simple,
    benchmark_flatten_tree,
    benchmark_unflatten_tree,
    benchmark_unflatten_sparse,
    benchmark_to_flat_array,
    benchmark_from_flat_array
);
criterion_main!(benches);
