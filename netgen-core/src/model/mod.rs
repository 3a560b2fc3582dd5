//! Random network generators.
//!
//! Every generator implements [`NetworkModel`]: it owns a
//! [`PropertiesConfiguration`] describing its effective parameters and a
//! [`crate::RandomSource`] that is reseeded whenever the parameters change.

mod barabasi_albert;
mod factory;
mod params;
mod watts_strogatz;

pub use self::{
    barabasi_albert::BarabasiAlbertModel,
    factory::{ModelKind, build_model},
    params::{BarabasiAlbertParams, D, NUM_NODES, P, SEED, WattsStrogatzParams},
    watts_strogatz::{REWIRE_ATTEMPTS_PER_NODE, WattsStrogatzModel},
};

use tracing::warn;

use crate::{
    config::{Configuration, PropertiesConfiguration},
    error::{ModelError, Result},
    network::Network,
    random::RandomSource,
};

/// A configurable generator of random networks.
///
/// Models are always in a configured state: construction applies defaults for
/// missing keys and validates them. The trait is object safe so callers can
/// hold heterogeneous models behind `Box<dyn NetworkModel>`.
pub trait NetworkModel {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Applies every recognised key present in `configuration`. Absent keys
    /// keep their current values.
    ///
    /// The update is all-or-nothing: on error neither the owned
    /// configuration nor the random stream changes.
    ///
    /// # Errors
    /// Returns [`ModelError::Config`] when a value cannot be read as the
    /// expected type and [`ModelError::InvalidParameter`] when it is outside
    /// the model's domain.
    fn configure(&mut self, configuration: &dyn Configuration) -> Result<()>;

    /// The parameters the next [`NetworkModel::generate`] call will use.
    fn configuration(&self) -> &PropertiesConfiguration;

    /// Builds a new network. Successive calls continue the random stream and
    /// therefore generally differ.
    ///
    /// # Errors
    /// Returns [`ModelError`] when generation cannot complete; no partial
    /// network is returned.
    fn generate(&mut self) -> Result<Network>;
}

pub(crate) fn log_rejection(model: &'static str, error: &ModelError) {
    warn!(model, code = %error.code(), error = %error, "configuration rejected");
}

/// Draws a uniformly chosen element of `items`.
///
/// # Errors
/// Returns [`ModelError::DrawOutOfRange`] when `random` answers outside
/// `[0, items.len())`.
pub(crate) fn draw<'a, T, R>(random: &mut R, items: &'a [T]) -> Result<&'a T>
where
    R: RandomSource + ?Sized,
{
    let bound = items.len();
    let drawn = random.next_int(bound);
    items
        .get(drawn)
        .ok_or(ModelError::DrawOutOfRange { drawn, bound })
}
