use criterion::{criterion_group, criterion_main, Criterion};
use genmat::{Codeword, GeneratorMatrix};
use rand::{rngs::SmallRng, SeedableRng};

fn criterion_benchmark(crit: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(1);
    let sizes = vec![64usize, 256, 1024];
    for size in sizes {
        let mut g = GeneratorMatrix::new();
        for _ in 0..size {
            g.stage_row(&Codeword::random(&mut rng, size)).unwrap();
        }
        g.freeze().unwrap();

        crit.bench_function(&format!("systematic form {}x{}", size, size), |crit| {
            crit.iter(|| g.systematic_form().unwrap())
        });

        crit.bench_function(&format!("rank {}x{}", size, size), |crit| {
            crit.iter(|| g.rank().unwrap())
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
