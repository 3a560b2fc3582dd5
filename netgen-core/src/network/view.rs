//! Read-only query surface shared by static and dynamic networks.

use crate::{
    entity::{Link, Node},
    error::NetworkError,
};

/// Structural queries answered by every network representation.
///
/// [`crate::Network`] answers them for its whole contents;
/// [`crate::DynamicNetwork`] answers them for its current step. Incidence
/// queries run in time proportional to the queried node's degree. Self-loops
/// are reported twice by [`NetworkView::links_of`] and therefore count two
/// toward [`NetworkView::degree`].
///
/// # Examples
/// ```
/// use netgen_core::{Network, NetworkView};
///
/// fn average_degree(view: &dyn NetworkView) -> f64 {
///     if view.is_empty() {
///         return 0.0;
///     }
///     2.0 * view.link_count() as f64 / view.node_count() as f64
/// }
///
/// let mut network = Network::new();
/// let a = network.add_node(network.create_node())?;
/// let b = network.add_node(network.create_node())?;
/// network.add_link(a, b)?;
/// assert_eq!(average_degree(&network), 1.0);
/// # Ok::<(), netgen_core::NetworkError>(())
/// ```
pub trait NetworkView {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of links.
    fn link_count(&self) -> usize;

    /// Reports whether the view holds no nodes.
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Nodes in insertion order.
    fn nodes(&self) -> Box<dyn Iterator<Item = Node> + '_>;

    /// Links in insertion order.
    fn links(&self) -> Box<dyn Iterator<Item = Link> + '_>;

    /// Reports whether `node` is a member of the view.
    fn contains_node(&self, node: Node) -> bool;

    /// Reports whether `link` is a member of the view.
    fn contains_link(&self, link: Link) -> bool;

    /// Returns the `(from, to)` endpoints of `link`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    fn endpoints(&self, link: Link) -> Result<(Node, Node), NetworkError>;

    /// Links incident to `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    fn links_of(&self, node: Node) -> Result<Box<dyn Iterator<Item = Link> + '_>, NetworkError>;

    /// Number of link endpoints attached to `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    fn degree(&self, node: Node) -> Result<usize, NetworkError> {
        Ok(self.links_of(node)?.count())
    }

    /// Nodes at the far end of every link incident to `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    fn neighbours(&self, node: Node) -> Result<Vec<Node>, NetworkError> {
        self.links_of(node)?
            .map(|link| {
                let (from, to) = self.endpoints(link)?;
                Ok(if from == node { to } else { from })
            })
            .collect()
    }

    /// Reports whether a link joins `a` and `b` in either direction.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when either node is not a
    /// member.
    fn are_adjacent(&self, a: Node, b: Node) -> Result<bool, NetworkError> {
        if !self.contains_node(b) {
            return Err(NetworkError::NodeNotFound { node: b.id() });
        }
        Ok(self.neighbours(a)?.contains(&b))
    }
}
