//! A small feedforward neural network engine built on immutable matrices.
//!
//! `matrix-net` is a from-scratch dense network core: a shape-checked matrix
//! value type, a fully-connected [`Layer`], and a [`NeuralNetwork`] that
//! chains layers, measures prediction error, and trains by per-sample
//! gradient descent. The linear algebra is written out directly; there is no
//! external numeric backend.
//!
//! # Design goals
//!
//! - Value semantics everywhere: every operation returns a new, fully formed
//!   value. Nothing is mutated in place, so any intermediate network of a
//!   training fold can be kept around, and sharing values across callers is
//!   always safe.
//! - Clear contracts: shapes are validated at the API boundary and violations
//!   return [`Error`]. A failing call aborts immediately and leaves no
//!   partial state behind.
//! - Reproducibility on request: default entry points draw from the
//!   process-wide rng; every randomized operation has a `*_with_rng` twin
//!   (and the builder a `build_with_seed`) for deterministic runs.
//!
//! # Data layout and shapes
//!
//! - Scalars are `f64`.
//! - [`Matrix`] stores cells contiguously in row-major order.
//! - Layer weights have shape `(units, input_dim)`; biases are `(units, 1)`.
//! - Layer and network inputs are `input_dim x 1` column vectors.
//!
//! # Quick start
//!
//! ```rust
//! use matrix_net::{Activation, Matrix, NetworkBuilder, TrainConfig};
//!
//! # fn main() -> matrix_net::Result<()> {
//! // The AND truth table, one column vector per sample.
//! let inputs = vec![
//!     Matrix::from_rows(&[vec![0.0], vec![0.0]])?,
//!     Matrix::from_rows(&[vec![0.0], vec![1.0]])?,
//!     Matrix::from_rows(&[vec![1.0], vec![0.0]])?,
//!     Matrix::from_rows(&[vec![1.0], vec![1.0]])?,
//! ];
//! let targets = vec![
//!     Matrix::from_rows(&[vec![0.0]])?,
//!     Matrix::from_rows(&[vec![0.0]])?,
//!     Matrix::from_rows(&[vec![0.0]])?,
//!     Matrix::from_rows(&[vec![1.0]])?,
//! ];
//!
//! let network = NetworkBuilder::new(2)?
//!     .add_layer(2, Activation::Sigmoid)?
//!     .add_layer(1, Activation::Sigmoid)?
//!     .build_with_seed(0)?;
//!
//! // `train` returns a new network; `network` itself is unchanged.
//! let trained = network.train(
//!     &inputs,
//!     &targets,
//!     TrainConfig {
//!         epochs: 200,
//!         learning_rate: 1.0,
//!     },
//! )?;
//!
//! let prediction = trained.predict(&inputs[3])?;
//! assert_eq!((prediction.rows(), prediction.cols()), (1, 1));
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod builder;
pub mod error;
pub mod layer;
pub mod matrix;
pub mod network;

pub use activation::Activation;
pub use builder::NetworkBuilder;
pub use error::{Error, Result};
pub use layer::Layer;
pub use matrix::Matrix;
pub use network::{NeuralNetwork, TrainConfig};
