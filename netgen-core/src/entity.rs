//! Node and link handles, drafts, and stored records.
//!
//! Handles ([`Node`], [`Link`]) are lightweight indices into a network's
//! arenas. They are only minted by the store, carry the identity of the
//! network that issued them, and compare by id alone. Drafts ([`NewNode`],
//! [`NewLink`]) are unattached values waiting to be committed; records
//! ([`NodeEntry`], [`LinkEntry`]) are what the store holds once they are.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};

use crate::properties::Properties;

/// Process-unique identity of a network instance.
///
/// Every [`crate::Network`] draws a fresh identifier on construction, so a
/// handle issued by one network is recognised as foreign by every other.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NetworkId(u64);

impl NetworkId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

macro_rules! id_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        pub struct $name {
            id: usize,
            network: NetworkId,
        }

        impl $name {
            pub(crate) const fn new(network: NetworkId, id: usize) -> Self {
                Self { id, network }
            }

            /// Returns the store-assigned identifier.
            #[must_use]
            pub const fn id(self) -> usize {
                self.id
            }

            /// Returns the network that issued this handle.
            #[must_use]
            pub const fn network(self) -> NetworkId {
                self.network
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.id.cmp(&other.id)
            }
        }
    };
}

id_handle! {
    /// Handle to a node stored in a network.
    ///
    /// Equality, ordering, and hashing use the id only, so two handles with
    /// the same id from the same network are interchangeable.
    Node
}

id_handle! {
    /// Handle to a link stored in a network.
    ///
    /// Link ids are numbered independently from node ids.
    Link
}

/// The endpoints of a link without regard to direction.
///
/// # Examples
/// ```
/// use netgen_core::Network;
///
/// let mut network = Network::new();
/// let a = network.add_node(network.create_node())?;
/// let b = network.add_node(network.create_node())?;
/// let ab = network.add_link(a, b)?;
/// let ba = network.add_link(b, a)?;
/// assert_eq!(network.link(ab)?.nodes(), network.link(ba)?.nodes());
/// # Ok::<(), netgen_core::NetworkError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodePair {
    low: Node,
    high: Node,
}

impl NodePair {
    /// Builds the pair, ordering the endpoints by id.
    #[must_use]
    pub fn new(a: Node, b: Node) -> Self {
        if b < a {
            Self { low: b, high: a }
        } else {
            Self { low: a, high: b }
        }
    }

    /// Endpoint with the smaller id.
    #[must_use]
    pub const fn low(&self) -> Node {
        self.low
    }

    /// Endpoint with the larger id.
    #[must_use]
    pub const fn high(&self) -> Node {
        self.high
    }

    /// Reports whether `node` is one of the endpoints.
    #[must_use]
    pub fn contains(&self, node: Node) -> bool {
        self.low == node || self.high == node
    }

    /// Returns the endpoint opposite `node`, or `None` when `node` is not an
    /// endpoint. A self-loop returns the node itself.
    #[must_use]
    pub fn other(&self, node: Node) -> Option<Node> {
        if self.low == node {
            Some(self.high)
        } else if self.high == node {
            Some(self.low)
        } else {
            None
        }
    }

    /// Reports whether both endpoints are the same node.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.low == self.high
    }
}

/// An unattached node produced by [`crate::Network::create_node`].
///
/// Properties may be set before the draft is committed with
/// [`crate::Network::add_node`].
#[derive(Clone, Debug)]
pub struct NewNode {
    network: NetworkId,
    id: usize,
    properties: Properties,
}

impl NewNode {
    pub(crate) fn new(network: NetworkId, id: usize) -> Self {
        Self {
            network,
            id,
            properties: Properties::default(),
        }
    }

    /// The id the issuing network would assign if the draft were committed
    /// now. The store assigns the actual id on insertion.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Network that created this draft.
    #[must_use]
    pub const fn network(&self) -> NetworkId {
        self.network
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Stores a property, returning the value it replaced.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.set(key, value)
    }

    pub(crate) fn into_properties(self) -> Properties {
        self.properties
    }
}

/// An unattached link carrying a value and properties but no endpoints.
///
/// Drafts come from [`crate::Network::create_link`], which binds them to the
/// issuing network, or from [`LinkEntry::detached_copy`] and
/// [`NewLink::default`], which leave them unbound. The network association is
/// assigned by the store only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewLink {
    network: Option<NetworkId>,
    value: f64,
    properties: Properties,
}

impl NewLink {
    pub(crate) fn bound_to(network: NetworkId) -> Self {
        Self {
            network: Some(network),
            ..Self::default()
        }
    }

    /// Network this draft is bound to, if any.
    #[must_use]
    pub const fn network(&self) -> Option<NetworkId> {
        self.network
    }

    /// Numeric value, typically a distance weight.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Overrides the numeric value.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Stores a property, returning the value it replaced.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.set(key, value)
    }

    /// Read-only view of the property bag.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    pub(crate) fn into_parts(self) -> (f64, Properties) {
        (self.value, self.properties)
    }
}

/// A node as held by the store.
#[derive(Clone, Debug)]
pub struct NodeEntry {
    node: Node,
    properties: Properties,
}

impl NodeEntry {
    pub(crate) const fn new(node: Node, properties: Properties) -> Self {
        Self { node, properties }
    }

    /// Handle of this node.
    #[must_use]
    pub const fn node(&self) -> Node {
        self.node
    }

    /// Store-assigned id.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.node.id()
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Stores a property, returning the value it replaced.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.set(key, value)
    }

    /// Read-only view of the property bag.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Mutable view of the property bag.
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

/// A link as held by the store.
#[derive(Clone, Debug)]
pub struct LinkEntry {
    link: Link,
    from: Node,
    to: Node,
    value: f64,
    properties: Properties,
}

impl LinkEntry {
    pub(crate) const fn new(
        link: Link,
        from: Node,
        to: Node,
        value: f64,
        properties: Properties,
    ) -> Self {
        Self {
            link,
            from,
            to,
            value,
            properties,
        }
    }

    /// Handle of this link.
    #[must_use]
    pub const fn link(&self) -> Link {
        self.link
    }

    /// Store-assigned id.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.link.id()
    }

    /// Network that owns this link.
    #[must_use]
    pub const fn network(&self) -> NetworkId {
        self.link.network()
    }

    /// Endpoint the link was created from.
    #[must_use]
    pub const fn from(&self) -> Node {
        self.from
    }

    /// Endpoint the link was created to.
    #[must_use]
    pub const fn to(&self) -> Node {
        self.to
    }

    /// Endpoints regardless of creation order.
    #[must_use]
    pub fn nodes(&self) -> NodePair {
        NodePair::new(self.from, self.to)
    }

    /// Reports whether the link starts and ends at the same node.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }

    /// Numeric value, typically a distance weight. Defaults to `0.0`.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Overrides the numeric value.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Returns the property stored under `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    /// Stores a property, returning the value it replaced.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.set(key, value)
    }

    /// Read-only view of the property bag.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Mutable view of the property bag.
    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    /// Copies the value and properties into an unbound draft.
    ///
    /// The copy has no network and no endpoints; committing it with
    /// [`crate::Network::insert_link`] gives it a fresh id.
    ///
    /// # Examples
    /// ```
    /// use netgen_core::Network;
    ///
    /// let mut network = Network::new();
    /// let a = network.add_node(network.create_node())?;
    /// let b = network.add_node(network.create_node())?;
    /// let link = network.add_link(a, b)?;
    /// network.link_mut(link)?.set_value(2.5);
    ///
    /// let copy = network.link(link)?.detached_copy();
    /// assert_eq!(copy.value(), 2.5);
    /// assert!(copy.network().is_none());
    /// # Ok::<(), netgen_core::NetworkError>(())
    /// ```
    #[must_use]
    pub fn detached_copy(&self) -> NewLink {
        NewLink {
            network: None,
            value: self.value,
            properties: self.properties.clone(),
        }
    }

    pub(crate) fn set_from(&mut self, from: Node) {
        self.from = from;
    }

    pub(crate) fn set_to(&mut self, to: Node) {
        self.to = to;
    }
}
