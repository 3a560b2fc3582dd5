//! Error types for the netgen core library.
//!
//! Defines the configuration, structural, and model error enums exposed by
//! the public API together with their stable error codes and a convenient
//! result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident
                    $( ( $($tuple:tt)* ) )? $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(
                        Self::$ErrVariant $( ( $($tuple)* ) )? $( { $($pattern)* } )?
                            => $CodeTy::$CodeVariant,
                    )+
                }
            }
        }
    };
}

/// An error produced when reading typed values from a
/// [`crate::Configuration`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// The stored value could not be read as the requested type.
    #[error("parameter `{key}` holds {found} but {expected} was requested")]
    TypeMismatch {
        /// Key whose value had the wrong type.
        key: String,
        /// Type requested by the caller.
        expected: &'static str,
        /// Description of the stored value.
        found: String,
    },
    /// The stored integer does not fit the requested width.
    #[error("parameter `{key}` value {value} does not fit in a 32-bit integer")]
    OutOfRange {
        /// Key whose value overflowed.
        key: String,
        /// The stored value.
        value: i64,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// The stored value could not be read as the requested type.
        TypeMismatch => TypeMismatch { .. } => "CONFIG_TYPE_MISMATCH",
        /// The stored integer does not fit the requested width.
        OutOfRange => OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
    }
}

/// Structural violations raised by [`crate::Network`] and
/// [`crate::DynamicNetwork`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NetworkError {
    /// The node is not a member of the target network.
    #[error("node {node} is not a member of this network")]
    NodeNotFound {
        /// Identifier of the missing node.
        node: usize,
    },
    /// The link is not a member of the target network.
    #[error("link {link} is not a member of this network")]
    LinkNotFound {
        /// Identifier of the missing link.
        link: usize,
    },
    /// A node draft created by another network was offered to this one.
    #[error("node draft {node} was created by a different network")]
    ForeignNode {
        /// Identifier peeked by the foreign network when the draft was made.
        node: usize,
    },
    /// A link draft bound to another network was offered to this one.
    #[error("link draft belongs to a different network")]
    ForeignLink,
    /// The node exists but is not alive at the requested step.
    #[error("node {node} is not alive at step {step}")]
    NodeNotAlive {
        /// Identifier of the node.
        node: usize,
        /// Step at which the node was queried.
        step: u64,
    },
    /// The link exists but is not alive at the requested step.
    #[error("link {link} is not alive at step {step}")]
    LinkNotAlive {
        /// Identifier of the link.
        link: usize,
        /// Step at which the link was queried.
        step: u64,
    },
    /// Dynamic networks only move forward in time.
    #[error("cannot move to step {requested}; the network is already at step {current}")]
    StepInPast {
        /// Step requested by the caller.
        requested: u64,
        /// Step the network is currently at.
        current: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// The node is not a member of the target network.
        NodeNotFound => NodeNotFound { .. } => "NETWORK_NODE_NOT_FOUND",
        /// The link is not a member of the target network.
        LinkNotFound => LinkNotFound { .. } => "NETWORK_LINK_NOT_FOUND",
        /// A node draft created by another network was offered to this one.
        ForeignNode => ForeignNode { .. } => "NETWORK_FOREIGN_NODE",
        /// A link draft bound to another network was offered to this one.
        ForeignLink => ForeignLink => "NETWORK_FOREIGN_LINK",
        /// The node exists but is not alive at the requested step.
        NodeNotAlive => NodeNotAlive { .. } => "NETWORK_NODE_NOT_ALIVE",
        /// The link exists but is not alive at the requested step.
        LinkNotAlive => LinkNotAlive { .. } => "NETWORK_LINK_NOT_ALIVE",
        /// Dynamic networks only move forward in time.
        StepInPast => StepInPast { .. } => "NETWORK_STEP_IN_PAST",
    }
}

/// Error type produced when configuring or running a [`crate::NetworkModel`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ModelError {
    /// A parameter was outside its valid domain.
    #[error("invalid `{parameter}` parameter: {reason}")]
    InvalidParameter {
        /// Configuration key of the rejected parameter.
        parameter: &'static str,
        /// Human-readable explanation of the constraint.
        reason: String,
    },
    /// The configuration store could not supply a parameter.
    #[error("configuration failure: {0}")]
    Config(#[from] ConfigError),
    /// The graph store rejected a structural operation.
    #[error("network failure: {0}")]
    Network(#[from] NetworkError),
    /// Rewiring could not find a replacement endpoint.
    #[error("no valid rewiring target for node {node} after {attempts} attempts")]
    RewiringExhausted {
        /// Node whose link could not be rewired.
        node: usize,
        /// Number of draws made before giving up.
        attempts: usize,
    },
    /// A random source returned an index outside the bound it was asked for.
    #[error("random source drew {drawn} for bound {bound}")]
    DrawOutOfRange {
        /// Value returned by the source.
        drawn: usize,
        /// Exclusive upper bound passed to the source.
        bound: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ModelError`] variants.
    enum ModelErrorCode for ModelError {
        /// A parameter was outside its valid domain.
        InvalidParameter => InvalidParameter { .. } => "MODEL_INVALID_PARAMETER",
        /// The configuration store could not supply a parameter.
        ConfigFailure => Config(..) => "MODEL_CONFIG_FAILURE",
        /// The graph store rejected a structural operation.
        NetworkFailure => Network(..) => "MODEL_NETWORK_FAILURE",
        /// Rewiring could not find a replacement endpoint.
        RewiringExhausted => RewiringExhausted { .. } => "MODEL_REWIRING_EXHAUSTED",
        /// A random source broke its bound contract.
        DrawOutOfRange => DrawOutOfRange { .. } => "MODEL_DRAW_OUT_OF_RANGE",
    }
}

impl ModelError {
    /// Retrieve the inner [`NetworkErrorCode`] when the error originated in
    /// the graph store.
    #[must_use]
    pub const fn network_code(&self) -> Option<NetworkErrorCode> {
        match self {
            Self::Network(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`ConfigErrorCode`] when the error originated in
    /// the configuration store.
    #[must_use]
    pub const fn config_code(&self) -> Option<ConfigErrorCode> {
        match self {
            Self::Config(error) => Some(error.code()),
            _ => None,
        }
    }

    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the model API.
pub type Result<T> = core::result::Result<T, ModelError>;
