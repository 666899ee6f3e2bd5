//! Feed-forward Q-network
//!
//! Two sigmoid hidden layers and a linear output layer, trained one example
//! at a time with plain gradient descent on mean-squared error.

use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use tracing::warn;

use qbot_core::{QbotError, Result};

use crate::config::HiddenInit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    Sigmoid,
    Linear,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Linear => x,
        }
    }

    /// Derivative expressed in terms of the activation's output
    fn derivative_from_output(self, a: f64) -> f64 {
        match self {
            Activation::Sigmoid => a * (1.0 - a),
            Activation::Linear => 1.0,
        }
    }
}

/// A single fully connected layer; weights are `(inputs, outputs)`
#[derive(Debug, Clone)]
struct Layer {
    weights: Array2<f64>,
    biases: Array1<f64>,
    activation: Activation,
}

impl Layer {
    fn zeros(inputs: usize, outputs: usize, activation: Activation) -> Self {
        Self {
            weights: Array2::zeros((inputs, outputs)),
            biases: Array1::zeros(outputs),
            activation,
        }
    }

    fn glorot<R: Rng>(
        inputs: usize,
        outputs: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Self {
        let limit = (6.0 / (inputs + outputs) as f64).sqrt();
        Self {
            weights: Array2::from_shape_fn((inputs, outputs), |_| rng.gen_range(-limit..limit)),
            biases: Array1::zeros(outputs),
            activation,
        }
    }

    fn forward(&self, input: &Array1<f64>) -> Array1<f64> {
        let z = input.dot(&self.weights) + &self.biases;
        z.mapv(|x| self.activation.apply(x))
    }

    fn is_finite(&self) -> bool {
        self.weights.iter().chain(self.biases.iter()).all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone)]
struct Parameters {
    layers: Vec<Layer>,
}

impl Parameters {
    /// Forward pass keeping every layer's output, input first
    fn activations(&self, input: Array1<f64>) -> Vec<Array1<f64>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        let mut current = input;
        for layer in &self.layers {
            let next = layer.forward(&current);
            activations.push(current);
            current = next;
        }
        activations.push(current);
        activations
    }

    fn is_finite(&self) -> bool {
        self.layers.iter().all(Layer::is_finite)
    }
}

/// Q-value approximator: `input -> hidden -> hidden -> output`
#[derive(Debug, Clone)]
pub struct QNetwork {
    input_dim: usize,
    hidden_dim: usize,
    output_dim: usize,
    params: Option<Parameters>,
}

impl QNetwork {
    /// Create an uninitialized network; call `initialize` before use
    pub fn new(input_dim: usize, hidden_dim: usize, output_dim: usize) -> Self {
        Self {
            input_dim,
            hidden_dim,
            output_dim,
            params: None,
        }
    }

    /// Set all parameters. Biases start at zero and the output layer is
    /// Glorot-uniform; hidden weights follow `hidden_init`.
    pub fn initialize<R: Rng>(&mut self, rng: &mut R, hidden_init: HiddenInit) {
        let hidden = |inputs: usize, outputs: usize, rng: &mut R| match hidden_init {
            HiddenInit::Zeros => Layer::zeros(inputs, outputs, Activation::Sigmoid),
            HiddenInit::Xavier => Layer::glorot(inputs, outputs, Activation::Sigmoid, rng),
        };

        let fc1 = hidden(self.input_dim, self.hidden_dim, rng);
        let fc2 = hidden(self.hidden_dim, self.hidden_dim, rng);
        let out = Layer::glorot(self.hidden_dim, self.output_dim, Activation::Linear, rng);

        self.params = Some(Parameters {
            layers: vec![fc1, fc2, out],
        });
    }

    pub fn is_ready(&self) -> bool {
        self.params.is_some()
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Total number of weights and biases
    pub fn parameter_count(&self) -> usize {
        let h = self.hidden_dim;
        (self.input_dim + 1) * h + (h + 1) * h + (h + 1) * self.output_dim
    }

    fn ready_params(&self) -> Result<&Parameters> {
        self.params.as_ref().ok_or(QbotError::NotReady)
    }

    fn check_len(expected: usize, values: &[f64]) -> Result<()> {
        if values.len() != expected {
            return Err(QbotError::dimension(expected, values.len()));
        }
        Ok(())
    }

    /// Estimate Q-values for a single state
    pub fn evaluate(&self, state: &[f64]) -> Result<Array1<f64>> {
        let params = self.ready_params()?;
        Self::check_len(self.input_dim, state)?;

        let mut output = Array1::from(state.to_vec());
        for layer in &params.layers {
            output = layer.forward(&output);
        }
        Ok(output)
    }

    /// One gradient-descent step on `mean((evaluate(state) - target)^2)`.
    ///
    /// The updated parameters are built from a copy and only replace the
    /// current ones if every value is finite. Returns the loss before the
    /// step.
    pub fn fit_step(&mut self, state: &[f64], target: &[f64], learning_rate: f64) -> Result<f64> {
        let params = self.ready_params()?;
        Self::check_len(self.input_dim, state)?;
        Self::check_len(self.output_dim, target)?;

        let activations = params.activations(Array1::from(state.to_vec()));
        let output = &activations[params.layers.len()];
        let target = Array1::from(target.to_vec());

        let diff = output - &target;
        let n = self.output_dim as f64;
        let loss = diff.dot(&diff) / n;

        let mut next = params.clone();
        let mut upstream = diff * (2.0 / n);

        for (idx, layer) in params.layers.iter().enumerate().rev() {
            let input = &activations[idx];
            let out = &activations[idx + 1];
            let delta = &upstream * &out.mapv(|a| layer.activation.derivative_from_output(a));

            let grad_w = input
                .view()
                .insert_axis(Axis(1))
                .dot(&delta.view().insert_axis(Axis(0)));

            let updated = &mut next.layers[idx];
            updated.weights.scaled_add(-learning_rate, &grad_w);
            updated.biases.scaled_add(-learning_rate, &delta);

            // Propagate through the pre-update weights
            upstream = layer.weights.dot(&delta);
        }

        if !next.is_finite() {
            warn!(loss, "Rejecting training step with non-finite parameters");
            return Err(QbotError::Diverged);
        }

        self.params = Some(next);
        Ok(loss)
    }
}
