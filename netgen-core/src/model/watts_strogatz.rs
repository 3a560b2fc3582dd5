//! Small-world generator.

use tracing::{debug, instrument};

use super::{NetworkModel, draw, log_rejection, params::WattsStrogatzParams};
use crate::{
    config::{Configuration, PropertiesConfiguration},
    entity::{Link, Node},
    error::{ModelError, Result},
    network::{Network, NetworkView},
    random::{RandomSource, SeededRandom},
};

/// Candidate draws allowed per node on the ring before a rewiring gives up.
///
/// A redraw loop only starts when its anchor has at least one valid target,
/// so the chance of exhausting `REWIRE_ATTEMPTS_PER_NODE * n` draws is below
/// `e^-32`.
pub const REWIRE_ATTEMPTS_PER_NODE: usize = 32;

/// Generates Watts–Strogatz small-world networks.
///
/// Nodes are placed on a ring and each is linked to its `d` nearest
/// neighbours on either side. Every lattice link is then visited in id order
/// and, with probability `p`, one endpoint is replaced by a uniformly drawn
/// node that is neither the other endpoint nor already adjacent to it.
///
/// The `to` endpoint is replaced unless `from` is already adjacent to every
/// other node, in which case `from` is replaced instead. A link whose two
/// endpoints are both saturated stays where it is. The probability draw is
/// made for every link before saturation is checked, so the random stream
/// advances identically whether or not a link can move. The link count stays
/// `n * d` and the result never contains self-loops or repeated links.
///
/// # Examples
/// ```
/// use netgen_core::{NetworkModel, NetworkView, WattsStrogatzModel};
///
/// let mut model = WattsStrogatzModel::with_defaults();
/// model.configure_parameters(10, 2, 0.0, 1)?;
/// let network = model.generate()?;
/// assert_eq!(network.link_count(), 20);
/// assert!(network.nodes().all(|node| network.degree(node) == Ok(4)));
/// # Ok::<(), netgen_core::ModelError>(())
/// ```
#[derive(Debug)]
pub struct WattsStrogatzModel<R = SeededRandom> {
    params: WattsStrogatzParams,
    configuration: PropertiesConfiguration,
    random: R,
}

impl WattsStrogatzModel<SeededRandom> {
    /// Creates a model with `numNodes = 10`, `d = 2`, `p = 0.1` and the
    /// default seed.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::with_params(WattsStrogatzParams::default(), SeededRandom::default())
    }
}

impl<R: RandomSource> WattsStrogatzModel<R> {
    /// Creates a model from `configuration`, using defaults for absent keys.
    ///
    /// # Errors
    /// Returns [`ModelError`] when a supplied value cannot be read or fails
    /// validation.
    pub fn new(configuration: &dyn Configuration, random: R) -> Result<Self> {
        let params = WattsStrogatzParams::default().merged_with(configuration)?;
        Ok(Self::with_params(params, random))
    }

    /// Creates a model from validated parameters.
    pub fn with_params(params: WattsStrogatzParams, random: R) -> Self {
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
    pub const fn params(&self) -> &WattsStrogatzParams {
        &self.params
    }

    /// Sets every parameter at once.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidParameter`] when `num_nodes <= 2 * d` or
    /// `p` lies outside `[0, 1)`; the model is left unchanged.
    pub fn configure_parameters(
        &mut self,
        num_nodes: usize,
        d: usize,
        p: f64,
        seed: u64,
    ) -> Result<()> {
        let params = WattsStrogatzParams::new(num_nodes, d, p)
            .inspect_err(|error| log_rejection(self.name(), error))?
            .with_seed(seed);
        self.apply(params);
        Ok(())
    }

    fn apply(&mut self, params: WattsStrogatzParams) {
        params.write_to(&mut self.configuration);
        self.random.set_seed(params.seed());
        self.params = params;
        debug!(
            model = self.name(),
            num_nodes = params.num_nodes(),
            d = params.d(),
            p = params.p(),
            seed = params.seed(),
            "parameters applied"
        );
    }

    /// Links every node to its `d` clockwise neighbours, giving each node
    /// degree `2d`.
    fn ring_lattice(&self) -> Result<(Network, Vec<Node>)> {
        let n = self.params.num_nodes();
        let mut network = Network::with_capacity(n, self.params.link_count());
        let nodes = (0..n)
            .map(|_| network.add_node(network.create_node()))
            .collect::<core::result::Result<Vec<_>, _>>()?;
        for (i, &from) in nodes.iter().enumerate() {
            for k in 1..=self.params.d() {
                network.add_link(from, nodes[(i + k) % n])?;
            }
        }
        Ok((network, nodes))
    }

    /// Moves one endpoint of `link`, returning `false` when both endpoints
    /// are saturated and the link has to stay in place.
    fn rewire(&mut self, network: &mut Network, nodes: &[Node], link: Link) -> Result<bool> {
        let (from, to) = network.endpoints(link)?;
        if !is_saturated(network, from)? {
            let target = self.pick_target(network, nodes, from)?;
            network.rewire(link, target)?;
        } else if !is_saturated(network, to)? {
            let source = self.pick_target(network, nodes, to)?;
            network.rewire_from(link, source)?;
        } else {
            debug!(
                link = link.id(),
                from = from.id(),
                to = to.id(),
                "both endpoints saturated; link kept"
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Draws nodes until one is neither `anchor` nor adjacent to it. The
    /// caller guarantees such a node exists.
    fn pick_target(&mut self, network: &Network, nodes: &[Node], anchor: Node) -> Result<Node> {
        let attempts = REWIRE_ATTEMPTS_PER_NODE.saturating_mul(nodes.len());
        for _ in 0..attempts {
            let candidate = *draw(&mut self.random, nodes)?;
            if candidate != anchor && !network.are_adjacent(anchor, candidate)? {
                return Ok(candidate);
            }
        }
        Err(ModelError::RewiringExhausted {
            node: anchor.id(),
            attempts,
        })
    }
}

/// A node is saturated once it is adjacent to every other node.
fn is_saturated(network: &Network, node: Node) -> Result<bool> {
    Ok(network.degree(node)? + 1 >= network.node_count())
}

impl<R: RandomSource> NetworkModel for WattsStrogatzModel<R> {
    fn name(&self) -> &'static str {
        "watts_strogatz"
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
        name = "model.watts_strogatz.generate",
        err,
        skip(self),
        fields(
            num_nodes = self.params.num_nodes(),
            d = self.params.d(),
            p = self.params.p(),
            seed = self.params.seed()
        ),
    )]
    fn generate(&mut self) -> Result<Network> {
        let (mut network, nodes) = self.ring_lattice()?;
        let p = self.params.p();
        let mut rewired = 0_usize;
        let mut kept = 0_usize;
        for id in 0..network.link_count() {
            if self.random.next_double() >= p {
                continue;
            }
            let Some(link) = network.link_by_id(id) else {
                continue;
            };
            if self.rewire(&mut network, &nodes, link)? {
                rewired += 1;
            } else {
                kept += 1;
            }
        }
        debug!(
            rewired,
            kept,
            links = network.link_count(),
            "rewiring complete"
        );
        Ok(network)
    }
}
