use criterion::{black_box, criterion_group, criterion_main, Criterion};
use garment_scan::{
    CoinCalibration, DominantColorExtractor, GarmentMeasurer, GarmentPipeline, Garment,
    OutfitRecommender, RasterImage, WhitePatch,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// 1024x768 segmented garment with a 600x400 opaque block
fn garment_rgba() -> RgbaImage {
    RgbaImage::from_fn(1024, 768, |x, y| {
        if (200..800).contains(&x) && (150..550).contains(&y) {
            Rgba([180, 60, 40, 255])
        } else {
            Rgba([240, 235, 220, 0])
        }
    })
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut png = Vec::new();
    DynamicImage::ImageRgba8(garment_rgba())
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();

    let pipeline = GarmentPipeline::new();
    let coin = CoinCalibration::generic(81.0);
    let patch = WhitePatch::new(60.0, 60.0, 30.0);

    c.bench_function("process_garment_png", |b| {
        b.iter(|| pipeline.process(black_box(&png), &coin, &patch).unwrap())
    });
}

fn benchmark_stages(c: &mut Criterion) {
    let rgba = garment_rgba();
    let raster = RasterImage::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw()).unwrap();

    let extractor = DominantColorExtractor::new();
    c.bench_function("dominant_color", |b| {
        b.iter(|| extractor.extract(black_box(&raster)).unwrap())
    });

    let measurer = GarmentMeasurer::new();
    c.bench_function("measure_outline", |b| {
        b.iter(|| measurer.measure(black_box(&raster), None).unwrap())
    });
}

fn benchmark_recommendations(c: &mut Criterion) {
    let palette = ["#FF6B35", "#0066CC", "#808080", "#0099FF", "#FFD700", "#123456"];
    let garments: Vec<Garment> = (0..200)
        .map(|i| Garment::new(format!("g{}", i), palette[i % palette.len()]))
        .collect();
    let recommender = OutfitRecommender::new();

    c.bench_function("instant_match_200", |b| {
        b.iter(|| recommender.instant_match(black_box("#FF8C3A"), "", &garments).unwrap())
    });
    c.bench_function("weekly_plan_200", |b| {
        b.iter(|| recommender.weekly_plan(black_box(&garments), "").unwrap())
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_stages, benchmark_recommendations);
criterion_main!(benches);
