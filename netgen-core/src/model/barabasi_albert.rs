//! Preferential-attachment generator.

use tracing::{debug, instrument};

use super::{NetworkModel, draw, log_rejection, params::BarabasiAlbertParams};
use crate::{
    config::{Configuration, PropertiesConfiguration},
    error::Result,
    network::Network,
    random::{RandomSource, SeededRandom},
};

/// Generates Barabási–Albert trees by preferential attachment.
///
/// Each new node attaches to one existing node chosen with probability
/// proportional to its degree. The choice is made from a flat pool holding
/// both endpoints of every link created so far, so generation runs in linear
/// time. A network of `n` nodes always carries `n - 1` links. Self-loops and
/// repeated links are never filtered; the pool construction does not produce
/// them.
///
/// # Examples
/// ```
/// use netgen_core::{BarabasiAlbertModel, NetworkModel, NetworkView};
///
/// let mut model = BarabasiAlbertModel::with_defaults();
/// model.configure_parameters(5, 0, 42)?;
/// let network = model.generate()?;
/// assert_eq!(network.node_count(), 5);
/// assert_eq!(network.link_count(), 4);
/// # Ok::<(), netgen_core::ModelError>(())
/// ```
#[derive(Debug)]
pub struct BarabasiAlbertModel<R = SeededRandom> {
    params: BarabasiAlbertParams,
    configuration: PropertiesConfiguration,
    random: R,
}

impl BarabasiAlbertModel<SeededRandom> {
    /// Creates a model with `numNodes = 2` and the default seed.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_params(BarabasiAlbertParams::default(), SeededRandom::default())
    }
}

impl<R: RandomSource> BarabasiAlbertModel<R> {
    /// Creates a model from `configuration`, using defaults for absent keys.
    ///
    /// # Errors
    /// Returns [`crate::ModelError`] when a supplied value cannot be read or
    /// fails validation.
    pub fn new(configuration: &dyn Configuration, random: R) -> Result<Self> {
        let params = BarabasiAlbertParams::default().merged_with(configuration)?;
        Ok(Self::with_params(params, random))
    }

    /// Creates a model from validated parameters.
    pub fn with_params(params: BarabasiAlbertParams, random: R) -> Self {
        let mut model = Self {
            params,
            configuration: PropertiesConfiguration::new(),
            random,
        };
        model.apply(params);
        model
    }

    /// The effective parameters.
    #[must_use]
    pub const fn params(&self) -> &BarabasiAlbertParams {
        &self.params
    }

    /// Sets every parameter at once. `_d` is accepted so the signature
    /// matches [`crate::WattsStrogatzModel::configure_parameters`] and is
    /// otherwise ignored.
    ///
    /// # Errors
    /// Returns [`crate::ModelError::InvalidParameter`] when `num_nodes < 2`;
    /// the model is left unchanged.
    pub fn configure_parameters(&mut self, num_nodes: usize, _d: usize, seed: u64) -> Result<()> {
        let params = BarabasiAlbertParams::new(num_nodes)
            .inspect_err(|error| log_rejection(self.name(), error))?
            .with_seed(seed);
        self.apply(params);
        Ok(())
    }

    fn apply(&mut self, params: BarabasiAlbertParams) {
        params.write_to(&mut self.configuration);
        self.random.set_seed(params.seed());
        self.params = params;
        debug!(
            model = self.name(),
            num_nodes = params.num_nodes(),
            seed = params.seed(),
            "parameters applied"
        );
    }

    /// Fills the endpoint pool: entries `2k` and `2k + 1` are the endpoints
    /// of link `k`.
    fn stub_pool(&mut self) -> Result<Vec<usize>> {
        let n = self.params.num_nodes();
        let mut pool = Vec::with_capacity(2 * (n - 1));
        pool.extend([0, 1]);
        for node in 2..n {
            let target = *draw(&mut self.random, &pool)?;
            pool.extend([node, target]);
        }
        Ok(pool)
    }
}

impl<R: RandomSource> NetworkModel for BarabasiAlbertModel<R> {
    fn name(&self) -> &'static str {
        "barabasi_albert"
    }

    fn configure(&mut self, configuration: &dyn Configuration) -> Result<()> {
        let params = self
            .params
            .merged_with(configuration)
            .inspect_err(|error| log_rejection(self.name(), error))?;
        self.apply(params);
        Ok(())
    }

    fn configuration(&self) -> &PropertiesConfiguration {
        &self.configuration
    }

    #[instrument(
        name = "model.barabasi_albert.generate",
        err,
        skip(self),
        fields(num_nodes = self.params.num_nodes(), seed = self.params.seed()),
    )]
    fn generate(&mut self) -> Result<Network> {
        let n = self.params.num_nodes();
        let pool = self.stub_pool()?;

        let mut network = Network::with_capacity(n, n - 1);
        let nodes = (0..n)
            .map(|_| network.add_node(network.create_node()))
            .collect::<core::result::Result<Vec<_>, _>>()?;
        for pair in pool.chunks_exact(2) {
            if let [from, to] = *pair {
                network.add_link(nodes[from], nodes[to])?;
            }
        }
        debug!(links = pool.len() / 2, "preferential attachment complete");
        Ok(network)
    }
}
