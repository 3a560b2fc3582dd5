//! Construction of models by kind.

use std::{fmt, str::FromStr};

use super::{BarabasiAlbertModel, NetworkModel, WattsStrogatzModel};
use crate::{
    config::Configuration,
    error::{ModelError, Result},
    random::SeededRandom,
};

/// The generators the crate provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Preferential attachment, see [`BarabasiAlbertModel`].
    BarabasiAlbert,
    /// Small-world rewiring, see [`WattsStrogatzModel`].
    WattsStrogatz,
}

impl ModelKind {
    /// Every supported kind.
    pub const ALL: [Self; 2] = [Self::BarabasiAlbert, Self::WattsStrogatz];

    /// Canonical name, matching [`NetworkModel::name`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BarabasiAlbert => "barabasi_albert",
            Self::WattsStrogatz => "watts_strogatz",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ModelError;

    /// Accepts the canonical name and the common short forms, ignoring case
    /// and treating `-` like `_`.
    fn from_str(s: &str) -> Result<Self> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalised.as_str() {
            "barabasi_albert" | "ba" => Ok(Self::BarabasiAlbert),
            "watts_strogatz" | "ws" => Ok(Self::WattsStrogatz),
            _ => Err(ModelError::invalid(
                "model",
                format!("unknown model kind `{s}`"),
            )),
        }
    }
}

/// Builds a model of `kind` from `configuration`, seeded through a
/// [`SeededRandom`].
///
/// # Errors
/// Returns [`ModelError`] when the configuration cannot be read or fails the
/// model's validation.
///
/// # Examples
/// ```
/// use netgen_core::{
///     NetworkModel, NetworkView, PropertiesConfiguration, build_model,
/// };
///
/// let config = PropertiesConfiguration::new().with("numNodes", 30).with("d", 3);
/// let mut model = build_model("ws".parse()?, &config)?;
/// assert_eq!(model.name(), "watts_strogatz");
/// assert_eq!(model.generate()?.link_count(), 90);
/// # Ok::<(), netgen_core::ModelError>(())
/// ```
pub fn build_model(
    kind: ModelKind,
    configuration: &dyn Configuration,
) -> Result<Box<dyn NetworkModel>> {
    let model: Box<dyn NetworkModel> = match kind {
        ModelKind::BarabasiAlbert => Box::new(BarabasiAlbertModel::new(
            configuration,
            SeededRandom::default(),
        )?),
        ModelKind::WattsStrogatz => Box::new(WattsStrogatzModel::new(
            configuration,
            SeededRandom::default(),
        )?),
    };
    Ok(model)
}
