//! Parameter sets for the network models and helpers for reading them from a
//! [`Configuration`].

use crate::{
    config::{Configuration, ParamValue},
    error::{ModelError, Result},
    random::DEFAULT_SEED,
};

/// Configuration key holding the number of nodes to generate.
pub const NUM_NODES: &str = "numNodes";
/// Configuration key holding the random-stream seed.
pub const SEED: &str = "seed";
/// Configuration key holding the ring-lattice half-degree.
pub const D: &str = "d";
/// Configuration key holding the rewiring probability.
pub const P: &str = "p";

/// Parameters for [`crate::BarabasiAlbertModel`].
///
/// # Examples
/// ```
/// use netgen_core::BarabasiAlbertParams;
///
/// let params = BarabasiAlbertParams::new(50)?.with_seed(42);
/// assert_eq!(params.num_nodes(), 50);
/// assert_eq!(params.seed(), 42);
/// assert!(BarabasiAlbertParams::new(1).is_err());
/// # Ok::<(), netgen_core::ModelError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarabasiAlbertParams {
    num_nodes: usize,
    seed: u64,
}

impl BarabasiAlbertParams {
    /// Creates a parameter set for a network of `num_nodes` nodes.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidParameter`] when `num_nodes` is below 2.
    pub fn new(num_nodes: usize) -> Result<Self> {
        if num_nodes < 2 {
            return Err(ModelError::invalid(
                NUM_NODES,
                format!("numNodes must be >= 2 (got {num_nodes})"),
            ));
        }
        Ok(Self {
            num_nodes,
            seed: DEFAULT_SEED,
        })
    }

    /// Seeds the random stream used during generation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of nodes in generated networks.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Seed applied to the random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Reads recognised keys from `configuration`, keeping the current value
    /// for any key that is absent, and validates the result.
    pub(crate) fn merged_with(&self, configuration: &dyn Configuration) -> Result<Self> {
        let num_nodes = read_count(configuration, NUM_NODES, self.num_nodes)?;
        let seed = read_seed(configuration, self.seed)?;
        Ok(Self::new(num_nodes)?.with_seed(seed))
    }

    pub(crate) fn write_to(&self, configuration: &mut dyn Configuration) {
        write_count(configuration, NUM_NODES, self.num_nodes);
        write_seed(configuration, self.seed);
    }
}

impl Default for BarabasiAlbertParams {
    fn default() -> Self {
        Self {
            num_nodes: 2,
            seed: DEFAULT_SEED,
        }
    }
}

/// Parameters for [`crate::WattsStrogatzModel`].
///
/// # Examples
/// ```
/// use netgen_core::WattsStrogatzParams;
///
/// let params = WattsStrogatzParams::new(10, 2, 0.1)?.with_seed(1);
/// assert_eq!(params.d(), 2);
/// assert!(WattsStrogatzParams::new(4, 2, 0.1).is_err());
/// assert!(WattsStrogatzParams::new(10, 2, 1.0).is_err());
/// # Ok::<(), netgen_core::ModelError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WattsStrogatzParams {
    num_nodes: usize,
    d: usize,
    p: f64,
    seed: u64,
}

impl WattsStrogatzParams {
    /// Creates a parameter set for a ring of `num_nodes` nodes, each joined
    /// to its `d` nearest neighbours on either side, with every lattice link
    /// rewired with probability `p`.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidParameter`] when `num_nodes <= 2 * d`,
    /// when the lattice link count `num_nodes * d` does not fit a `usize`, or
    /// when `p` is not in `[0, 1)`.
    pub fn new(num_nodes: usize, d: usize, p: f64) -> Result<Self> {
        let lattice_span = d.checked_mul(2).ok_or_else(|| {
            ModelError::invalid(D, format!("d ({d}) is too large for a ring lattice"))
        })?;
        if num_nodes <= lattice_span {
            return Err(ModelError::invalid(
                NUM_NODES,
                format!("numNodes ({num_nodes}) must exceed 2 * d ({lattice_span})"),
            ));
        }
        if num_nodes.checked_mul(d).is_none() {
            return Err(ModelError::invalid(
                NUM_NODES,
                format!("numNodes * d overflows for numNodes {num_nodes} and d {d}"),
            ));
        }
        if !(0.0..1.0).contains(&p) {
            return Err(ModelError::invalid(P, format!("p must lie in [0, 1) (got {p})")));
        }
        Ok(Self {
            num_nodes,
            d,
            p,
            seed: DEFAULT_SEED,
        })
    }

    /// Seeds the random stream used during generation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of nodes on the ring.
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Neighbours joined on each side of a node in the seed lattice.
    #[must_use]
    pub const fn d(&self) -> usize {
        self.d
    }

    /// Per-link rewiring probability.
    #[must_use]
    pub const fn p(&self) -> f64 {
        self.p
    }

    /// Seed applied to the random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of links every generated network carries.
    #[must_use]
    pub const fn link_count(&self) -> usize {
        self.num_nodes * self.d
    }

    pub(crate) fn merged_with(&self, configuration: &dyn Configuration) -> Result<Self> {
        let num_nodes = read_count(configuration, NUM_NODES, self.num_nodes)?;
        let d = read_count(configuration, D, self.d)?;
        let p = configuration.get_double(P)?.unwrap_or(self.p);
        let seed = read_seed(configuration, self.seed)?;
        Ok(Self::new(num_nodes, d, p)?.with_seed(seed))
    }

    pub(crate) fn write_to(&self, configuration: &mut dyn Configuration) {
        write_count(configuration, NUM_NODES, self.num_nodes);
        write_count(configuration, D, self.d);
        configuration.set_property(P, ParamValue::Float(self.p));
        write_seed(configuration, self.seed);
    }
}

impl Default for WattsStrogatzParams {
    fn default() -> Self {
        Self {
            num_nodes: 10,
            d: 2,
            p: 0.1,
            seed: DEFAULT_SEED,
        }
    }
}

fn read_count(configuration: &dyn Configuration, key: &'static str, current: usize) -> Result<usize> {
    let Some(raw) = configuration.get_int(key)? else {
        return Ok(current);
    };
    usize::try_from(raw)
        .map_err(|_| ModelError::invalid(key, format!("{key} must be non-negative (got {raw})")))
}

fn read_seed(configuration: &dyn Configuration, current: u64) -> Result<u64> {
    Ok(configuration
        .get_long(SEED)?
        .map_or(current, i64::cast_unsigned))
}

fn write_count(configuration: &mut dyn Configuration, key: &str, value: usize) {
    let stored = i64::try_from(value).unwrap_or(i64::MAX);
    configuration.set_property(key, ParamValue::Int(stored));
}

fn write_seed(configuration: &mut dyn Configuration, seed: u64) {
    configuration.set_property(SEED, ParamValue::Int(seed.cast_signed()));
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::config::PropertiesConfiguration;

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn barabasi_albert_rejects_fewer_than_two_nodes(#[case] num_nodes: usize) {
        let err = BarabasiAlbertParams::new(num_nodes).expect_err("too few nodes");
        assert!(matches!(
            err,
            ModelError::InvalidParameter { parameter: NUM_NODES, .. }
        ));
    }

    #[rstest]
    #[case(4, 2, 0.0)]
    #[case(5, 2, -0.1)]
    #[case(5, 2, 1.0)]
    #[case(5, 2, f64::NAN)]
    #[case(3, usize::MAX, 0.0)]
    fn watts_strogatz_rejects_out_of_domain(
        #[case] num_nodes: usize,
        #[case] d: usize,
        #[case] p: f64,
    ) {
        assert!(WattsStrogatzParams::new(num_nodes, d, p).is_err());
    }

    #[rstest]
    #[case(usize::MAX, 2)]
    #[case(usize::MAX / 2 + 1, 2)]
    fn watts_strogatz_rejects_overflowing_link_counts(#[case] num_nodes: usize, #[case] d: usize) {
        let err = WattsStrogatzParams::new(num_nodes, d, 0.5).expect_err("n * d overflows");
        assert!(matches!(
            err,
            ModelError::InvalidParameter { parameter: NUM_NODES, .. }
        ));
    }

    #[test]
    fn watts_strogatz_accepts_smallest_ring() {
        let params = WattsStrogatzParams::new(5, 2, 0.0).expect("n = 2d + 1 is valid");
        assert_eq!(params.link_count(), 10);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let config = PropertiesConfiguration::new().with(NUM_NODES, -4);
        let err = BarabasiAlbertParams::default()
            .merged_with(&config)
            .expect_err("negative count");
        assert!(matches!(
            err,
            ModelError::InvalidParameter { parameter: NUM_NODES, .. }
        ));
    }

    #[test]
    fn seeds_round_trip_through_signed_storage() {
        let params = BarabasiAlbertParams::default().with_seed(u64::MAX);
        let mut config = PropertiesConfiguration::new();
        params.write_to(&mut config);
        assert_eq!(config.get(SEED), Some(&ParamValue::Int(-1)));
        let merged = BarabasiAlbertParams::default()
            .merged_with(&config)
            .expect("written parameters are valid");
        assert_eq!(merged.seed(), u64::MAX);
    }

    #[test]
    fn absent_keys_keep_current_values() {
        let current = WattsStrogatzParams::new(30, 3, 0.2)
            .expect("valid")
            .with_seed(9);
        let merged = current
            .merged_with(&PropertiesConfiguration::new().with(P, 0.5))
            .expect("valid");
        assert_eq!(merged.num_nodes(), 30);
        assert_eq!(merged.d(), 3);
        assert_eq!(merged.p(), 0.5);
        assert_eq!(merged.seed(), 9);
    }
}
