use criterion::Criterion;
use mendel::{Activation, Genome};
use rand::{rngs::StdRng, SeedableRng};

fn bench_forward(bench: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let genome = Genome::new(&[24, 64, 64, 4], Activation::ReLU, &mut rng).unwrap();
    let input: Vec<f64> = (0..24).map(|i| f64::from(i) / 24.).collect();

    bench.bench_function("forward-24-64-64-4", |b| b.iter(|| genome.forward(&input)));
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_forward(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
