//! Network builder.
//!
//! `NetworkBuilder` is the convenient way to define a network: it anchors the
//! input dimension once and chains each layer's input dimension to the
//! previous layer's units, so the assembled network cannot have an internal
//! shape mismatch.
//!
//! Layers with explicit weights or bias still go through
//! [`Layer::from_parts`](crate::Layer::from_parts) +
//! [`NeuralNetwork::new`](crate::NeuralNetwork::new), which also keeps the
//! unvalidated composition path available (mismatches then surface on the
//! first `predict`).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Activation, Error, Layer, NeuralNetwork, Result};

#[derive(Debug, Clone, Copy)]
struct LayerSpec {
    units: usize,
    activation: Activation,
}

/// Builder for a [`NeuralNetwork`].
///
/// Example:
///
/// ```rust
/// use matrix_net::{Activation, NetworkBuilder};
///
/// # fn main() -> matrix_net::Result<()> {
/// let network = NetworkBuilder::new(2)?
///     .add_layer(4, Activation::Sigmoid)?
///     .add_layer(1, Activation::Sigmoid)?
///     .build_with_seed(0)?;
/// assert_eq!(network.num_layers(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    input_dim: usize,
    layers: Vec<LayerSpec>,
}

impl NetworkBuilder {
    /// Start building a network that accepts `input_dim x 1` inputs.
    pub fn new(input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(Error::Config("input_dim must be > 0".to_owned()));
        }
        Ok(Self {
            input_dim,
            layers: Vec::new(),
        })
    }

    /// Add a layer with `units` outputs.
    pub fn add_layer(mut self, units: usize, activation: Activation) -> Result<Self> {
        if units == 0 {
            return Err(Error::Config("layer units must be > 0".to_owned()));
        }

        self.layers.push(LayerSpec { units, activation });
        Ok(self)
    }

    /// Build using the process-wide rng.
    pub fn build(self) -> Result<NeuralNetwork> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<NeuralNetwork> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided rng.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<NeuralNetwork> {
        if self.layers.is_empty() {
            return Err(Error::Config(
                "network must have at least one layer".to_owned(),
            ));
        }

        let mut layers = Vec::with_capacity(self.layers.len());
        let mut input_dim = self.input_dim;
        for spec in self.layers {
            layers.push(Layer::new_with_rng(
                input_dim,
                spec.units,
                spec.activation,
                rng,
            )?);
            input_dim = spec.units;
        }

        Ok(NeuralNetwork::new(layers))
    }
}
