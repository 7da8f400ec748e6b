use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glyph_pack_core::prelude::*;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn generate_glyphs(count: usize, min_size: u32, max_size: u32) -> Vec<GlyphRequest<u32>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(count as u64);
    (0..count as u32)
        .map(|i| {
            let w = rng.gen_range(min_size..=max_size);
            let h = rng.gen_range(min_size..=max_size);
            GlyphRequest::new(i, w, h)
        })
        .collect()
}

fn bench_pack_glyphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_glyphs");

    for count in [95, 256, 1024] {
        let glyphs = generate_glyphs(count, 6, 40);
        group.throughput(Throughput::Elements(count as u64));

        for max_extent in [256, 1024] {
            group.bench_with_input(
                BenchmarkId::new(format!("max_{max_extent}"), count),
                &glyphs,
                |b, glyphs| b.iter(|| black_box(pack_glyphs(glyphs, max_extent))),
            );
        }
    }

    group.finish();
}

fn bench_bin_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("maxrects_insert");
    let glyphs = generate_glyphs(400, 4, 32);

    for heuristic in [
        MaxRectsHeuristic::BestShortSideFit,
        MaxRectsHeuristic::BestAreaFit,
        MaxRectsHeuristic::BottomLeft,
        MaxRectsHeuristic::ContactPoint,
    ] {
        group.bench_with_input(
            BenchmarkId::new(format!("{heuristic:?}"), glyphs.len()),
            &glyphs,
            |b, glyphs| {
                b.iter(|| {
                    let mut bin = MaxRectsBinPack::new(512, 512);
                    for g in glyphs {
                        let _ = bin.insert(g.w, g.h, heuristic);
                    }
                    black_box(bin.occupancy())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pack_glyphs, bench_bin_insert);
criterion_main!(benches);
