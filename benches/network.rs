use criterion::{Criterion, black_box, criterion_group, criterion_main};

use matrix_net::{Activation, Matrix, NetworkBuilder};

fn network_predict_bench(c: &mut Criterion) {
    let network = NetworkBuilder::new(16)
        .unwrap()
        .add_layer(32, Activation::Sigmoid)
        .unwrap()
        .add_layer(1, Activation::Sigmoid)
        .unwrap()
        .build_with_seed(0)
        .unwrap();
    let input = Matrix::filled(16, 1, 0.1).unwrap();

    c.bench_function("network_predict_16_32_1", |b| {
        b.iter(|| {
            let out = network.predict(black_box(&input)).unwrap();
            black_box(out);
        })
    });
}

fn network_optimize_bench(c: &mut Criterion) {
    let network = NetworkBuilder::new(16)
        .unwrap()
        .add_layer(32, Activation::Sigmoid)
        .unwrap()
        .add_layer(1, Activation::Sigmoid)
        .unwrap()
        .build_with_seed(0)
        .unwrap();
    let input = Matrix::filled(16, 1, 0.1).unwrap();
    let target = Matrix::filled(1, 1, 1.0).unwrap();

    c.bench_function("network_optimize_16_32_1", |b| {
        b.iter(|| {
            let next = network
                .optimize(black_box(&input), black_box(&target), 0.1)
                .unwrap();
            black_box(next);
        })
    });
}

criterion_group!(benches, network_predict_bench, network_optimize_bench);
criterion_main!(benches);
