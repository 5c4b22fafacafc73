// benches/query_bench.rs
//! Benchmarks for query building and item normalization.

use content_resolver::{
    build, AssetResolver, AssetTransform, CmsItem, FilterSpec, ImageField, ItemNormalizer, Locale,
    LocaleRequest, QueryOptions,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn create_listing_options(num_filters: usize) -> QueryOptions {
    let filter = (0..num_filters).fold(FilterSpec::new().eq("status", "published"), |f, i| {
        f.op(format!("field_{}", i), "_gte", i)
    });
    QueryOptions::new()
        .with_filter(filter)
        .with_fields(vec!["*", "translations.*", "destination.translations.*"])
        .with_page(2, 24)
        .with_sort("-date_created")
        .with_meta("filter_count")
}

fn create_sample_hotel(num_locales: usize, gallery_size: usize) -> CmsItem {
    let translations: Vec<_> = (0..num_locales)
        .map(|i| {
            json!({
                "id": 100 + i,
                "hotels_id": 1,
                "languages_code": format!("xx-L{:02}", i),
                "title": format!("Title {}", i),
                "description": null
            })
        })
        .collect();
    let gallery: Vec<_> = (0..gallery_size)
        .map(|i| json!({ "image": format!("img-{}", i) }))
        .collect();

    CmsItem::from_value(json!({
        "id": 1,
        "title": "Base",
        "description": "Base description",
        "hero_image": "hero",
        "gallery": gallery,
        "translations": translations
    }))
    .unwrap_or_default()
}

fn bench_query_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_building");

    for num_filters in [1, 10, 50] {
        let options = create_listing_options(num_filters);
        group.bench_with_input(
            BenchmarkId::new("build", num_filters),
            &options,
            |b, options| b.iter(|| build(black_box(options))),
        );
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");
    let normalizer = ItemNormalizer::new(
        AssetResolver::new("https://cms.example.com").expect("valid origin"),
    );
    let fields = [
        ImageField::from("hero_image").with_transform(AssetTransform::new().width(1600)),
        ImageField::from("gallery"),
    ];

    for (num_locales, gallery_size) in [(2, 5), (10, 20), (30, 100)] {
        let hotel = create_sample_hotel(num_locales, gallery_size);
        let locale = Locale::new(format!("xx-L{:02}", num_locales - 1)).expect("valid tag");
        let request = LocaleRequest::new(locale);
        group.bench_with_input(
            BenchmarkId::new("normalize", format!("{}x{}", num_locales, gallery_size)),
            &hotel,
            |b, hotel| b.iter(|| normalizer.normalize(Some(black_box(hotel)), &request, &fields)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_query_building, bench_normalization);
criterion_main!(benches);
