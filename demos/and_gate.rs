use matrix_net::{Activation, Matrix, NetworkBuilder, TrainConfig};

fn main() -> matrix_net::Result<()> {
    // The AND truth table, one column vector per sample.
    let inputs = vec![
        Matrix::from_rows(&[vec![0.0], vec![0.0]])?,
        Matrix::from_rows(&[vec![0.0], vec![1.0]])?,
        Matrix::from_rows(&[vec![1.0], vec![0.0]])?,
        Matrix::from_rows(&[vec![1.0], vec![1.0]])?,
    ];
    let targets = vec![
        Matrix::from_rows(&[vec![0.0]])?,
        Matrix::from_rows(&[vec![0.0]])?,
        Matrix::from_rows(&[vec![0.0]])?,
        Matrix::from_rows(&[vec![1.0]])?,
    ];

    // 2 -> 2 -> 1 network, sigmoid throughout.
    let network = NetworkBuilder::new(2)?
        .add_layer(2, Activation::Sigmoid)?
        .add_layer(1, Activation::Sigmoid)?
        .build()?;

    let summed_abs_error = |net: &matrix_net::NeuralNetwork| -> matrix_net::Result<f64> {
        Ok(net
            .errors(&inputs, &targets)?
            .iter()
            .map(|e| e.sum().abs())
            .sum())
    };

    let before = summed_abs_error(&network)?;
    let trained = network.train(
        &inputs,
        &targets,
        TrainConfig {
            epochs: 2_000,
            learning_rate: 1.0,
        },
    )?;
    let after = summed_abs_error(&trained)?;

    println!("summed |error| before={before:.4} after={after:.4}");
    for (input, target) in inputs.iter().zip(&targets) {
        let y = trained.predict(input)?.sum();
        println!(
            "{} AND {} -> {y:.3} (target {})",
            input.get(0, 0),
            input.get(1, 0),
            target.sum()
        );
    }

    Ok(())
}
