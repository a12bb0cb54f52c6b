use rand::Rng;

use crate::{Activation, Error, Matrix, Result};

/// One affine-plus-activation stage of a feedforward network.
///
/// A layer owns its parameters and never mutates them: `optimize` returns a
/// freshly built `Layer` and leaves the receiver untouched.
///
/// Shape invariants, enforced at construction:
/// - `weights` is `units x input_dim`
/// - `bias` is `units x 1`
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    input_dim: usize,
    units: usize,
    weights: Matrix,
    bias: Matrix,
    activation: Activation,
}

impl Layer {
    /// Build a layer with default parameters: uniform random weights in
    /// `[-1, 1)`, bias filled with `1.0`, sigmoid activation.
    pub fn new(input_dim: usize, units: usize) -> Result<Self> {
        Self::new_with_rng(input_dim, units, Activation::default(), &mut rand::thread_rng())
    }

    /// Build a layer with random weights drawn from `rng`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        input_dim: usize,
        units: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Result<Self> {
        if input_dim == 0 || units == 0 {
            return Err(Error::Config(format!(
                "layer dimensions must be > 0, got input_dim={input_dim} units={units}"
            )));
        }

        let weights = Matrix::random_with_rng(units, input_dim, rng)?;
        let bias = Matrix::filled(units, 1, 1.0)?;
        Ok(Self {
            input_dim,
            units,
            weights,
            bias,
            activation,
        })
    }

    /// Build a layer from explicit parameters.
    ///
    /// Fails with [`Error::Dimension`] if `weights` is not `units x input_dim`
    /// or `bias` is not `units x 1`.
    pub fn from_parts(
        input_dim: usize,
        units: usize,
        activation: Activation,
        weights: Matrix,
        bias: Matrix,
    ) -> Result<Self> {
        if weights.cols() != input_dim {
            return Err(Error::Dimension(format!(
                "weights cols {} do not match input dimension {input_dim}",
                weights.cols()
            )));
        }
        if weights.rows() != units {
            return Err(Error::Dimension(format!(
                "weights rows {} do not match units {units}",
                weights.rows()
            )));
        }
        if bias.rows() != units {
            return Err(Error::Dimension(format!(
                "bias rows {} do not match units {units}",
                bias.rows()
            )));
        }
        if bias.cols() != 1 {
            return Err(Error::Dimension(format!(
                "bias must be a single column, got {} columns",
                bias.cols()
            )));
        }

        Ok(Self {
            input_dim,
            units,
            weights,
            bias,
            activation,
        })
    }

    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    #[inline]
    pub fn units(&self) -> usize {
        self.units
    }

    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The pre-activation response `W x + b`.
    ///
    /// Shape contract: `input` must be an `input_dim x 1` column vector;
    /// anything else is an [`Error::Dimension`].
    fn affine(&self, input: &Matrix) -> Result<Matrix> {
        if input.rows() != self.input_dim {
            return Err(Error::Dimension(format!(
                "input rows {} do not match layer input dimension {}",
                input.rows(),
                self.input_dim
            )));
        }
        if input.cols() != 1 {
            return Err(Error::Dimension(format!(
                "layer input must be a single column, got {} columns",
                input.cols()
            )));
        }

        self.weights.dot(input)?.add(&self.bias)
    }

    /// Forward pass: `activation(W x + b)`.
    ///
    /// Returns a `units x 1` column vector. Pure; no state is touched.
    pub fn predict(&self, input: &Matrix) -> Result<Matrix> {
        Ok(self
            .affine(input)?
            .map(|x| self.activation.apply(x)))
    }

    /// One local gradient-descent step; returns the updated layer.
    ///
    /// `output_error` is the network-level error (`target - prediction`) and
    /// is the same value for every layer of the network; the module docs on
    /// `network` describe that update rule. `input` is this layer's own input
    /// from the forward pass.
    ///
    /// The step:
    /// - `gradient = activation'(W x + b) . output_error * learning_rate`
    /// - `weights' = weights + gradient . transpose(input)`
    /// - `bias' = bias + gradient`
    pub fn optimize(
        &self,
        output_error: &Matrix,
        input: &Matrix,
        learning_rate: f64,
    ) -> Result<Layer> {
        let deriv = self
            .affine(input)?
            .map(|x| self.activation.derivative(x));

        let gradient = deriv.dot(output_error)?.multiply_scalar(learning_rate);
        let weights_delta = gradient.dot(&input.transpose())?;

        let weights = self.weights.add(&weights_delta)?;
        let bias = self.bias.add(&gradient)?;

        Layer::from_parts(self.input_dim, self.units, self.activation, weights, bias)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn column(values: &[f64]) -> Matrix {
        Matrix::from_rows(&values.iter().map(|&v| vec![v]).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn default_layer_has_unit_bias_and_sigmoid() {
        let mut rng = StdRng::seed_from_u64(0);
        let layer = Layer::new_with_rng(3, 2, Activation::default(), &mut rng).unwrap();
        assert_eq!(layer.weights().rows(), 2);
        assert_eq!(layer.weights().cols(), 3);
        assert_eq!(layer.bias().data(), vec![vec![1.0], vec![1.0]]);
        assert_eq!(layer.activation(), Activation::Sigmoid);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(Layer::new(0, 2), Err(Error::Config(_))));
        assert!(matches!(Layer::new(2, 0), Err(Error::Config(_))));
    }

    #[test]
    fn from_parts_validates_every_shape() {
        let w = Matrix::filled(2, 3, 0.5).unwrap();
        let b = Matrix::filled(2, 1, 1.0).unwrap();
        assert!(Layer::from_parts(3, 2, Activation::Sigmoid, w.clone(), b.clone()).is_ok());

        // weights cols vs input_dim
        assert!(matches!(
            Layer::from_parts(4, 2, Activation::Sigmoid, w.clone(), b.clone()),
            Err(Error::Dimension(_))
        ));
        // weights rows vs units
        assert!(matches!(
            Layer::from_parts(3, 3, Activation::Sigmoid, w.clone(), Matrix::filled(3, 1, 1.0).unwrap()),
            Err(Error::Dimension(_))
        ));
        // bias rows vs units
        assert!(matches!(
            Layer::from_parts(3, 2, Activation::Sigmoid, w.clone(), Matrix::filled(3, 1, 1.0).unwrap()),
            Err(Error::Dimension(_))
        ));
        // bias must be a column
        assert!(matches!(
            Layer::from_parts(3, 2, Activation::Sigmoid, w, Matrix::filled(2, 2, 1.0).unwrap()),
            Err(Error::Dimension(_))
        ));
    }

    #[test]
    fn predict_matches_the_worked_example() {
        let weights = Matrix::from_rows(&[vec![1.0], vec![1.0], vec![0.0], vec![0.0]]).unwrap();
        let bias = column(&[1.0, 0.0, 1.0, 0.0]);
        let layer = Layer::from_parts(1, 4, Activation::Identity, weights, bias).unwrap();

        let out = layer.predict(&column(&[1.0])).unwrap();
        assert_eq!(out.data(), vec![vec![2.0], vec![1.0], vec![1.0], vec![0.0]]);
    }

    #[test]
    fn predict_rejects_misshaped_input() {
        let layer = Layer::new(2, 3).unwrap();
        assert!(matches!(
            layer.predict(&column(&[1.0, 2.0, 3.0])),
            Err(Error::Dimension(_))
        ));
        assert!(matches!(
            layer.predict(&Matrix::filled(2, 2, 1.0).unwrap()),
            Err(Error::Dimension(_))
        ));
    }

    #[test]
    fn predict_is_deterministic_for_fixed_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        let layer = Layer::new_with_rng(2, 2, Activation::Sigmoid, &mut rng).unwrap();
        let input = column(&[0.25, -0.5]);
        assert_eq!(layer.predict(&input).unwrap(), layer.predict(&input).unwrap());
    }

    #[test]
    fn optimize_with_zero_learning_rate_is_a_fixpoint() {
        let mut rng = StdRng::seed_from_u64(11);
        let layer = Layer::new_with_rng(2, 1, Activation::Sigmoid, &mut rng).unwrap();
        let input = column(&[0.5, -1.0]);
        let error = column(&[0.3]);

        let updated = layer.optimize(&error, &input, 0.0).unwrap();
        assert_eq!(layer, updated);
    }

    #[test]
    fn optimize_applies_the_expected_delta() {
        let weights = Matrix::from_rows(&[vec![0.0, 0.0]]).unwrap();
        let bias = column(&[0.0]);
        let layer = Layer::from_parts(2, 1, Activation::Identity, weights, bias).unwrap();

        let input = column(&[1.0, 1.0]);
        let error = column(&[2.0]);
        let updated = layer.optimize(&error, &input, 0.1).unwrap();

        // gradient = identity'(0) . [[2]] * 0.1 = [[0.2]]
        assert_eq!(updated.weights().data(), vec![vec![0.2, 0.2]]);
        assert_eq!(updated.bias().data(), vec![vec![0.2]]);
        // the receiver is untouched
        assert_eq!(layer.weights().data(), vec![vec![0.0, 0.0]]);
    }
}
