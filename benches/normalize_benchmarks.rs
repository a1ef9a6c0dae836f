use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reelgrab::{normalize, Platform};

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("URL Normalization");

    group.bench_function("tiktok_full", |b| {
        b.iter(|| normalize(black_box("http://www.tiktok.com/@user/video/7301234567890?lang=en")))
    });

    group.bench_function("tiktok_short", |b| {
        b.iter(|| normalize(black_box("  vm.tiktok.com/ZMabc123/ ")))
    });

    group.bench_function("instagram_tracking", |b| {
        b.iter(|| normalize(black_box("instagram.com/reel/Cx1yZ2/?igsh=abc&utm_source=ig_web")))
    });

    group.bench_function("foreign", |b| {
        b.iter(|| normalize(black_box("https://example.com/watch?v=1")))
    });

    group.finish();
}

fn benchmark_media_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("Media Id Extraction");

    group.bench_function("tiktok", |b| {
        b.iter(|| {
            Platform::TikTok
                .extract_media_id(black_box("https://www.tiktok.com/@user/video/7301234567890"))
        })
    });

    group.bench_function("instagram", |b| {
        b.iter(|| Platform::Instagram.extract_media_id(black_box("https://www.instagram.com/reels/Cx1yZ2/")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_normalize, benchmark_media_id);
criterion_main!(benches);
