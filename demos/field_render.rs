//! Trains a small XOR network in rounds and renders its decision field over
//! the unit square as ASCII shading, one frame per round: every cell is a
//! `predict` call and the scalar `sum()` of the output picks the intensity.

use matrix_net::{Activation, Matrix, NetworkBuilder, NeuralNetwork, TrainConfig};

const SHADES: &[u8] = b" .:-=+*#%@";
const ROWS: usize = 24;
const COLS: usize = 48;

fn main() -> matrix_net::Result<()> {
    let inputs = vec![
        Matrix::from_rows(&[vec![1.0], vec![1.0]])?,
        Matrix::from_rows(&[vec![0.0], vec![1.0]])?,
        Matrix::from_rows(&[vec![1.0], vec![0.0]])?,
        Matrix::from_rows(&[vec![0.0], vec![0.0]])?,
    ];
    let targets = vec![
        Matrix::from_rows(&[vec![0.0]])?,
        Matrix::from_rows(&[vec![1.0]])?,
        Matrix::from_rows(&[vec![1.0]])?,
        Matrix::from_rows(&[vec![0.0]])?,
    ];

    let mut network = NetworkBuilder::new(2)?
        .add_layer(4, Activation::Sigmoid)?
        .add_layer(1, Activation::Sigmoid)?
        .build()?;

    for round in 1..=5 {
        network = network.train(
            &inputs,
            &targets,
            TrainConfig {
                epochs: 200,
                learning_rate: 1.0,
            },
        )?;
        println!("after {} epochs:", round * 200);
        render(&network)?;
        println!();
    }

    Ok(())
}

fn render(network: &NeuralNetwork) -> matrix_net::Result<()> {
    for j in 0..ROWS {
        let mut line = String::with_capacity(COLS);
        for i in 0..COLS {
            let x1 = i as f64 / COLS as f64;
            let x2 = j as f64 / ROWS as f64;
            let input = Matrix::from_rows(&[vec![x1], vec![x2]])?;
            let y = network.predict(&input)?.sum();
            let shade = (y.clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).round() as usize;
            line.push(SHADES[shade] as char);
        }
        println!("{line}");
    }
    Ok(())
}
