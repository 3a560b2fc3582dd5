//! Random network generation.
//!
//! The crate provides an in-memory graph store ([`Network`] and the
//! time-indexed [`DynamicNetwork`]) and generators that populate it:
//! [`BarabasiAlbertModel`] for scale-free trees grown by preferential
//! attachment and [`WattsStrogatzModel`] for small-world networks built by
//! rewiring a ring lattice. Generators read their parameters from a
//! [`Configuration`] and draw from a seeded [`RandomSource`], so a fixed seed
//! reproduces the same topology.
//!
//! # Examples
//! ```
//! use netgen_core::{
//!     ModelKind, NetworkModel, NetworkView, PropertiesConfiguration, build_model,
//! };
//!
//! let config = PropertiesConfiguration::new()
//!     .with("numNodes", 100)
//!     .with("seed", 42);
//! let mut model = build_model(ModelKind::BarabasiAlbert, &config)?;
//! let network = model.generate()?;
//! assert_eq!(network.node_count(), 100);
//! assert_eq!(network.link_count(), 99);
//! # Ok::<(), netgen_core::ModelError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod dynamic;
mod entity;
mod error;
mod model;
mod network;
mod properties;
mod random;
#[cfg(test)]
mod test_utils;

pub use crate::{
    config::{Configuration, ParamValue, PropertiesConfiguration},
    dynamic::{DynamicNetwork, Lifespan},
    entity::{Link, LinkEntry, NetworkId, NewLink, NewNode, Node, NodeEntry, NodePair},
    error::{
        ConfigError, ConfigErrorCode, ModelError, ModelErrorCode, NetworkError, NetworkErrorCode,
        Result,
    },
    model::{
        BarabasiAlbertModel, BarabasiAlbertParams, D, ModelKind, NUM_NODES, NetworkModel, P,
        REWIRE_ATTEMPTS_PER_NODE, SEED, WattsStrogatzModel, WattsStrogatzParams, build_model,
    },
    network::{Network, NetworkView},
    properties::Properties,
    random::{DEFAULT_SEED, RandomSource, SeededRandom},
};
