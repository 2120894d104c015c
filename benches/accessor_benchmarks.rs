//! Benchmarks for cached property access.
//!
//! Compares a cached accessor with resolving the accessor on every call, and
//! measures table lookups on the hit path.
//!
//! ## Profiling with Puffin
//!
//! ```bash
//! cargo bench --features profile-with-puffin -- --profile-time 5
//! ```

use std::any::Any;
use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use propcache::{
    AccessorRegistry, PropertyInfo, Reflect, TableCaches, TypeInfo, Value, Visibility, cast, catalog, compiler,
};

#[cfg(feature = "profile-with-puffin")]
static FRAME_VIEW: std::sync::OnceLock<puffin::GlobalFrameView> = std::sync::OnceLock::new();

#[cfg(feature = "profile-with-puffin")]
fn setup_profiler() {
    puffin::set_scopes_on(true);
    FRAME_VIEW.get_or_init(puffin::GlobalFrameView::default);
}

#[cfg(not(feature = "profile-with-puffin"))]
fn setup_profiler() {}

struct Base {
    id: u64,
}

struct Record {
    base: Base,
    title: String,
    score: i32,
}

impl Reflect for Base {
    fn type_name() -> &'static str {
        "bench::Base"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Base>()
            .property(
                PropertyInfo::build::<Base, u64>("Id")
                    .get(Visibility::Public, |b| b.id)
                    .build(),
            )
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}

impl Reflect for Record {
    fn type_name() -> &'static str {
        "bench::Record"
    }

    fn type_info() -> TypeInfo {
        TypeInfo::class::<Record>()
            .base::<Base>(|r| &r.base, |r| &mut r.base)
            .property(
                PropertyInfo::build::<Record, String>("Title")
                    .get(Visibility::Public, |r| r.title.clone())
                    .set(Visibility::Public, |r, v| r.title = v)
                    .build(),
            )
            .property(
                PropertyInfo::build::<Record, i32>("Score")
                    .get(Visibility::Public, |r| r.score)
                    .set(Visibility::Public, |r, v| r.score = v)
                    .build(),
            )
            .build()
    }

    fn cast_ref(instance: &dyn Any) -> Option<&Self> {
        cast::class_ref::<Self>(instance)
    }

    fn cast_mut(instance: &mut dyn Any) -> Option<&mut Self> {
        cast::class_mut::<Self>(instance)
    }
}

fn record() -> Record {
    Record {
        base: Base { id: 7 },
        title: "bench".into(),
        score: 0,
    }
}

fn bench_get(c: &mut Criterion) {
    setup_profiler();
    let mut group = c.benchmark_group("get");
    let table = TableCaches::global().all().get_table_of::<Record>().unwrap();
    let score = table.get("Score").unwrap().clone();
    let id = table.get("Id").unwrap().clone();
    let instance = record();

    group.bench_function("cached_own", |b| b.iter(|| black_box(score.get(black_box(&instance)).unwrap())));
    group.bench_function("cached_inherited", |b| {
        b.iter(|| black_box(id.get(black_box(&instance)).unwrap()))
    });
    group.bench_function("typed_getter", |b| {
        let getter = score.typed_getter::<Record, i32>().unwrap();
        b.iter(|| black_box(getter(black_box(&instance))))
    });
    group.bench_function("compile_each_call", |b| {
        b.iter(|| {
            let property = catalog().property(Record::type_hash(), "Score").unwrap();
            let accessor = compiler::compile(&property).unwrap();
            black_box(accessor.get(&instance).unwrap())
        })
    });
    group.finish();
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    let title = TableCaches::global()
        .all()
        .get_table_of::<Record>()
        .unwrap()
        .get("Title")
        .unwrap()
        .clone();

    group.bench_function("cached_string", |b| {
        b.iter_batched(
            || (record(), Value::String("updated".into())),
            |(mut instance, value)| {
                title.set(&mut instance, value).unwrap();
                instance
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let info = Record::type_info();
    let _ = TableCaches::global().all().get_table(&info).unwrap();

    group.bench_function("table_hit", |b| {
        b.iter(|| black_box(TableCaches::global().all().get_table(black_box(&info)).unwrap()))
    });
    group.bench_function("registry_hit", |b| {
        let registry = AccessorRegistry::new();
        let property = info.find_property("Score").unwrap();
        let _ = registry.get(property).unwrap();
        b.iter(|| black_box(registry.get(black_box(property)).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_get, bench_set, bench_lookup);
criterion_main!(benches);
