use cart::{CartEngine, ProductInfo};
use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};
use snapshot_store::InMemorySnapshotStore;

fn make_product(id: i64) -> ProductInfo {
    ProductInfo::new(
        id,
        format!("Product {id}"),
        Money::from_cents(1000 + id),
        format!("https://img.example/{id}.png"),
    )
}

fn bench_add_item(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_single_item", |b| {
        b.iter(|| {
            rt.block_on(async {
                let engine = CartEngine::new(InMemorySnapshotStore::new());
                engine.add_item(make_product(1)).await;
            });
        });
    });
}

fn bench_add_20_distinct_items(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("cart/add_20_distinct_items", |b| {
        b.iter(|| {
            rt.block_on(async {
                let engine = CartEngine::new(InMemorySnapshotStore::new());
                for id in 0..20 {
                    engine.add_item(make_product(id)).await;
                }
            });
        });
    });
}

fn bench_derived_totals(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let engine = rt.block_on(async {
        let engine = CartEngine::new(InMemorySnapshotStore::new());
        for id in 0..50 {
            engine.add_item(make_product(id)).await;
        }
        engine
    });

    c.bench_function("cart/derived_totals_50_lines", |b| {
        b.iter(|| {
            rt.block_on(async {
                let _ = engine.total().await;
                let _ = engine.item_count().await;
            });
        });
    });
}

fn bench_load_roundtrip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let store = rt.block_on(async {
        let store = InMemorySnapshotStore::new();
        let engine = CartEngine::new(store.clone());
        for id in 0..20 {
            engine.add_item(make_product(id)).await;
        }
        store
    });

    c.bench_function("cart/load_20_line_snapshot", |b| {
        b.iter(|| {
            rt.block_on(async {
                let engine = CartEngine::new(store.clone());
                engine.load().await;
            });
        });
    });
}

criterion_group!(
    benches,
    bench_add_item,
    bench_add_20_distinct_items,
    bench_derived_totals,
    bench_load_roundtrip
);
criterion_main!(benches);
