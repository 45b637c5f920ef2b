use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_particle_swarm::{PSOConfigBuilder, ParticleSwarm};
use math_test_functions::{BoundedFunction2D, Rastrigin, linspace_grid};

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("pso_step");
    for &n in &[10usize, 100, 1000] {
        for parallel in [false, true] {
            let config = PSOConfigBuilder::new()
                .n_particles(n)
                .seed(17)
                .enable_parallel(parallel)
                .build()
                .unwrap();
            let mut swarm = ParticleSwarm::over_domain(Rastrigin::default(), config);
            swarm.initialize().unwrap();

            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| swarm.step().unwrap())
            });
        }
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    c.bench_function("pso_search_rastrigin_10x20", |b| {
        b.iter(|| {
            let config = PSOConfigBuilder::new()
                .n_particles(10)
                .seed(17)
                .build()
                .unwrap();
            let mut swarm = ParticleSwarm::over_domain(Rastrigin::default(), config);
            swarm.initialize().unwrap();
            black_box(swarm.search(20).unwrap())
        })
    });
}

fn bench_grid(c: &mut Criterion) {
    let f = Rastrigin::default();
    let (_, _, gx, gy) = linspace_grid(&f.domain(), 200, 200);

    c.bench_function("rastrigin_evaluate_grid_200x200", |b| {
        b.iter(|| black_box(f.evaluate_grid(gx.view(), gy.view()).unwrap()))
    });
}

criterion_group!(benches, bench_sweep, bench_search, bench_grid);
criterion_main!(benches);
