//! The network: an ordered chain of layers plus the training loop.
//!
//! Prediction folds an input column through every layer in order. Training is
//! plain stochastic gradient descent with strict per-sample ordering: each
//! epoch shuffles the (input, target) pairs into a fresh uniform order, then
//! applies one `optimize` step per pair, threading the updated network
//! forward. Nothing is mutated; every step returns a new `NeuralNetwork`.
//!
//! One behavior worth calling out: `optimize` hands the *same* network-level
//! output error (`target - prediction`) to every layer's local update. A
//! textbook multi-layer backprop would instead chain a distinct error signal
//! through transposed weight matrices; this update rule is intentionally the
//! simpler one, and swapping it out changes the training dynamics and the
//! numeric expectations of every downstream test. A consequence of the rule:
//! the per-layer `gradient = activation'(z) . output_error` product only has
//! compatible dimensions when the network's final output is a single row, so
//! multi-output networks fail with a dimension error at `optimize` time.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Error, Layer, Matrix, Result};

/// Hyperparameters for [`NeuralNetwork::train`].
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 100,
            learning_rate: 0.1,
        }
    }
}

/// An ordered sequence of layers.
///
/// Adjacent-layer compatibility (`layers[i + 1].input_dim() ==
/// layers[i].units()`) is not checked here; a mismatch surfaces as an
/// [`Error::Dimension`] on the first `predict` or `optimize` call.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
}

impl NeuralNetwork {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { layers }
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Fold `input` through every layer and return the final output.
    ///
    /// A network with no layers returns the input unchanged.
    pub fn predict(&self, input: &Matrix) -> Result<Matrix> {
        let mut outputs = self.layered_predict(input)?;
        Ok(outputs.pop().unwrap_or_else(|| input.clone()))
    }

    /// Like `predict`, but returns every layer's output in order.
    pub fn layered_predict(&self, input: &Matrix) -> Result<Vec<Matrix>> {
        let mut outputs: Vec<Matrix> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let next = match outputs.last() {
                Some(prev) => layer.predict(prev)?,
                None => layer.predict(input)?,
            };
            outputs.push(next);
        }
        Ok(outputs)
    }

    /// Prediction error for one sample: `target - predict(input)`.
    pub fn error(&self, input: &Matrix, target: &Matrix) -> Result<Matrix> {
        target.subtract(&self.predict(input)?)
    }

    /// Per-sample errors over index-paired inputs and targets.
    ///
    /// Fails with [`Error::Data`] if the two sequences differ in length.
    pub fn errors(&self, inputs: &[Matrix], targets: &[Matrix]) -> Result<Vec<Matrix>> {
        if inputs.len() != targets.len() {
            return Err(Error::Data(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }

        inputs
            .iter()
            .zip(targets)
            .map(|(input, target)| self.error(input, target))
            .collect()
    }

    /// One training step on a single sample; returns the updated network.
    ///
    /// Every layer's local input is recovered from the forward pass (the
    /// network input for layer 0, the previous layer's output otherwise), and
    /// every layer receives the same network-level `output_error` (see the
    /// module docs).
    pub fn optimize(
        &self,
        input: &Matrix,
        target: &Matrix,
        learning_rate: f64,
    ) -> Result<NeuralNetwork> {
        let layer_outputs = self.layered_predict(input)?;
        let prediction = layer_outputs.last().unwrap_or(input);
        let output_error = target.subtract(prediction)?;

        let mut layers = Vec::with_capacity(self.layers.len());
        for (idx, layer) in self.layers.iter().enumerate() {
            let local_input = if idx == 0 {
                input
            } else {
                &layer_outputs[idx - 1]
            };
            layers.push(layer.optimize(&output_error, local_input, learning_rate)?);
        }

        Ok(NeuralNetwork { layers })
    }

    /// Multi-epoch training over index-paired inputs and targets.
    ///
    /// Draws the per-epoch shuffle order from the process-wide rng; use
    /// [`NeuralNetwork::train_with_rng`] for a deterministic run.
    pub fn train(
        &self,
        inputs: &[Matrix],
        targets: &[Matrix],
        config: TrainConfig,
    ) -> Result<NeuralNetwork> {
        self.train_with_rng(inputs, targets, config, &mut rand::thread_rng())
    }

    /// Multi-epoch training with an explicit shuffle rng.
    ///
    /// Each epoch shuffles the pair order into a fresh uniform permutation,
    /// then folds `optimize` over every pair in that order. The argument
    /// sequences are never touched. `config.epochs == 0` returns an unchanged
    /// clone of this network.
    pub fn train_with_rng<R: Rng + ?Sized>(
        &self,
        inputs: &[Matrix],
        targets: &[Matrix],
        config: TrainConfig,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        if inputs.len() != targets.len() {
            return Err(Error::Data(format!(
                "inputs/targets length mismatch: {} vs {}",
                inputs.len(),
                targets.len()
            )));
        }
        if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
            return Err(Error::Config(format!(
                "learning_rate must be finite and > 0, got {}",
                config.learning_rate
            )));
        }

        let mut network = self.clone();
        let mut order: Vec<usize> = (0..inputs.len()).collect();

        for _ in 0..config.epochs {
            order.shuffle(rng);
            for &idx in &order {
                network = network.optimize(&inputs[idx], &targets[idx], config.learning_rate)?;
            }
        }

        Ok(network)
    }
}
