//! Static graph store.
//!
//! [`Network`] owns every node and link in id-indexed arenas and is the sole
//! authority for id assignment. Each node keeps the ids of its incident links
//! so incidence and adjacency queries cost time proportional to its degree.

mod view;

pub use self::view::NetworkView;

use tracing::trace;

use crate::{
    entity::{Link, LinkEntry, NetworkId, NewLink, NewNode, Node, NodeEntry, NodePair},
    error::NetworkError,
};

/// An undirected multigraph with string properties on nodes and links.
///
/// Node ids and link ids are each dense ranges starting at zero, assigned in
/// insertion order. Handles issued by one network are rejected by every
/// other, including copies made with [`Network::copy`].
///
/// # Examples
/// ```
/// use netgen_core::{Network, NetworkView};
///
/// let mut network = Network::new();
/// let mut draft = network.create_node();
/// draft.set_property("role", "hub");
/// let hub = network.add_node(draft)?;
/// let leaf = network.add_node(network.create_node())?;
/// let link = network.add_link(hub, leaf)?;
///
/// assert_eq!(network.node(hub)?.property("role"), Some("hub"));
/// assert_eq!(network.degree(hub)?, 1);
/// assert_eq!(network.find_link(leaf, hub)?, Some(link));
/// # Ok::<(), netgen_core::NetworkError>(())
/// ```
#[derive(Debug)]
pub struct Network {
    id: NetworkId,
    nodes: Vec<NodeEntry>,
    links: Vec<LinkEntry>,
    incidence: Vec<Vec<usize>>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Creates an empty network with a fresh identity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty network with room for `nodes` nodes and `links`
    /// links.
    #[must_use]
    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            id: NetworkId::fresh(),
            nodes: Vec::with_capacity(nodes),
            links: Vec::with_capacity(links),
            incidence: Vec::with_capacity(nodes),
        }
    }

    /// Identity of this network.
    #[must_use]
    pub const fn id(&self) -> NetworkId {
        self.id
    }

    /// Allocates an unattached node draft. The draft is not inserted until
    /// passed to [`Network::add_node`].
    #[must_use]
    pub fn create_node(&self) -> NewNode {
        NewNode::new(self.id, self.nodes.len())
    }

    /// Commits a node draft and returns its handle.
    ///
    /// The node receives the next free id regardless of the id peeked when
    /// the draft was created.
    ///
    /// # Errors
    /// Returns [`NetworkError::ForeignNode`] when the draft was created by a
    /// different network.
    pub fn add_node(&mut self, draft: NewNode) -> Result<Node, NetworkError> {
        if draft.network() != self.id {
            return Err(NetworkError::ForeignNode { node: draft.id() });
        }
        let node = Node::new(self.id, self.nodes.len());
        self.nodes
            .push(NodeEntry::new(node, draft.into_properties()));
        self.incidence.push(Vec::new());
        trace!(network = %self.id, node = node.id(), "node added");
        Ok(node)
    }

    /// Allocates an unattached link draft bound to this network.
    #[must_use]
    pub fn create_link(&self) -> NewLink {
        NewLink::bound_to(self.id)
    }

    /// Creates a link from `from` to `to` with default value and no
    /// properties.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when either endpoint is not a
    /// member of this network. The network is left unchanged.
    pub fn add_link(&mut self, from: Node, to: Node) -> Result<Link, NetworkError> {
        self.insert_link(self.create_link(), from, to)
    }

    /// Commits a link draft between `from` and `to`.
    ///
    /// Unbound drafts, such as those produced by
    /// [`LinkEntry::detached_copy`], are adopted by this network.
    ///
    /// # Errors
    /// Returns [`NetworkError::ForeignLink`] when the draft is bound to
    /// another network and [`NetworkError::NodeNotFound`] when either endpoint
    /// is not a member. The network is left unchanged on error.
    pub fn insert_link(
        &mut self,
        draft: NewLink,
        from: Node,
        to: Node,
    ) -> Result<Link, NetworkError> {
        if draft.network().is_some_and(|owner| owner != self.id) {
            return Err(NetworkError::ForeignLink);
        }
        self.check_node(from)?;
        self.check_node(to)?;

        let link = Link::new(self.id, self.links.len());
        let (value, properties) = draft.into_parts();
        self.links
            .push(LinkEntry::new(link, from, to, value, properties));
        self.incidence_mut(from).push(link.id());
        self.incidence_mut(to).push(link.id());
        trace!(
            network = %self.id,
            link = link.id(),
            from = from.id(),
            to = to.id(),
            "link added"
        );
        Ok(link)
    }

    /// Returns the stored record for `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    pub fn node(&self, node: Node) -> Result<&NodeEntry, NetworkError> {
        self.check_node(node)?;
        self.nodes
            .get(node.id())
            .ok_or(NetworkError::NodeNotFound { node: node.id() })
    }

    /// Returns the mutable record for `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    pub fn node_mut(&mut self, node: Node) -> Result<&mut NodeEntry, NetworkError> {
        self.check_node(node)?;
        self.nodes
            .get_mut(node.id())
            .ok_or(NetworkError::NodeNotFound { node: node.id() })
    }

    /// Returns the stored record for `link`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    pub fn link(&self, link: Link) -> Result<&LinkEntry, NetworkError> {
        self.check_link(link)?;
        self.links
            .get(link.id())
            .ok_or(NetworkError::LinkNotFound { link: link.id() })
    }

    /// Returns the mutable record for `link`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    pub fn link_mut(&mut self, link: Link) -> Result<&mut LinkEntry, NetworkError> {
        self.check_link(link)?;
        self.links
            .get_mut(link.id())
            .ok_or(NetworkError::LinkNotFound { link: link.id() })
    }

    /// Looks up the handle of the node with the given id.
    #[must_use]
    pub fn node_by_id(&self, id: usize) -> Option<Node> {
        self.nodes.get(id).map(NodeEntry::node)
    }

    /// Looks up the handle of the link with the given id.
    #[must_use]
    pub fn link_by_id(&self, id: usize) -> Option<Link> {
        self.links.get(id).map(LinkEntry::link)
    }

    /// Stored node records in insertion order.
    #[must_use]
    pub fn node_entries(&self) -> &[NodeEntry] {
        &self.nodes
    }

    /// Stored link records in insertion order.
    #[must_use]
    pub fn link_entries(&self) -> &[LinkEntry] {
        &self.links
    }

    /// Returns a link joining `a` and `b` in either direction, if one exists.
    ///
    /// Scans the incidence list of whichever endpoint has the lower degree.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when either node is not a
    /// member.
    pub fn find_link(&self, a: Node, b: Node) -> Result<Option<Link>, NetworkError> {
        let wanted = NodePair::new(a, b);
        let a_links = self.incidence(a)?;
        let b_links = self.incidence(b)?;
        let scan = if b_links.len() < a_links.len() {
            b_links
        } else {
            a_links
        };
        Ok(scan
            .iter()
            .filter_map(|&id| self.links.get(id))
            .find(|entry| entry.nodes() == wanted)
            .map(LinkEntry::link))
    }

    /// Moves the `to` endpoint of `link` onto `new_to`, keeping `from`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] or
    /// [`NetworkError::NodeNotFound`] when either handle is not a member. The
    /// network is left unchanged on error.
    pub fn rewire(&mut self, link: Link, new_to: Node) -> Result<(), NetworkError> {
        self.check_node(new_to)?;
        let old_to = self.link(link)?.to();
        self.move_incidence(link, old_to, new_to);
        self.link_mut(link)?.set_to(new_to);
        trace!(
            network = %self.id,
            link = link.id(),
            old_to = old_to.id(),
            new_to = new_to.id(),
            "link rewired"
        );
        Ok(())
    }

    /// Moves the `from` endpoint of `link` onto `new_from`, keeping `to`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] or
    /// [`NetworkError::NodeNotFound`] when either handle is not a member. The
    /// network is left unchanged on error.
    pub fn rewire_from(&mut self, link: Link, new_from: Node) -> Result<(), NetworkError> {
        self.check_node(new_from)?;
        let old_from = self.link(link)?.from();
        self.move_incidence(link, old_from, new_from);
        self.link_mut(link)?.set_from(new_from);
        trace!(
            network = %self.id,
            link = link.id(),
            old_from = old_from.id(),
            new_from = new_from.id(),
            "link rewired"
        );
        Ok(())
    }

    /// Deep-copies the network under a fresh identity.
    ///
    /// Ids, values, and properties are preserved; handles issued by `self`
    /// are foreign to the copy and must be translated with
    /// [`Network::node_by_id`] or [`Network::link_by_id`].
    ///
    /// # Examples
    /// ```
    /// use netgen_core::{Network, NetworkView};
    ///
    /// let mut network = Network::new();
    /// let a = network.add_node(network.create_node())?;
    /// let copy = network.copy();
    /// assert_eq!(copy.node_count(), 1);
    /// assert!(!copy.contains_node(a));
    /// assert!(copy.node_by_id(a.id()).is_some());
    /// # Ok::<(), netgen_core::NetworkError>(())
    /// ```
    #[must_use]
    pub fn copy(&self) -> Self {
        let id = NetworkId::fresh();
        let nodes = self
            .nodes
            .iter()
            .map(|entry| {
                NodeEntry::new(Node::new(id, entry.id()), entry.properties().clone())
            })
            .collect();
        let links = self
            .links
            .iter()
            .map(|entry| {
                LinkEntry::new(
                    Link::new(id, entry.id()),
                    Node::new(id, entry.from().id()),
                    Node::new(id, entry.to().id()),
                    entry.value(),
                    entry.properties().clone(),
                )
            })
            .collect();
        Self {
            id,
            nodes,
            links,
            incidence: self.incidence.clone(),
        }
    }

    pub(crate) fn incidence(&self, node: Node) -> Result<&[usize], NetworkError> {
        self.check_node(node)?;
        self.incidence
            .get(node.id())
            .map(Vec::as_slice)
            .ok_or(NetworkError::NodeNotFound { node: node.id() })
    }

    fn move_incidence(&mut self, link: Link, old: Node, new: Node) {
        let old_links = self.incidence_mut(old);
        if let Some(position) = old_links.iter().position(|&id| id == link.id()) {
            old_links.remove(position);
        }
        self.incidence_mut(new).push(link.id());
    }

    fn incidence_mut(&mut self, node: Node) -> &mut Vec<usize> {
        debug_assert!(self.contains_node(node), "endpoints are validated first");
        &mut self.incidence[node.id()]
    }

    fn check_node(&self, node: Node) -> Result<(), NetworkError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(NetworkError::NodeNotFound { node: node.id() })
        }
    }

    fn check_link(&self, link: Link) -> Result<(), NetworkError> {
        if self.contains_link(link) {
            Ok(())
        } else {
            Err(NetworkError::LinkNotFound { link: link.id() })
        }
    }
}

impl NetworkView for Network {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn link_count(&self) -> usize {
        self.links.len()
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = Node> + '_> {
        Box::new(self.nodes.iter().map(NodeEntry::node))
    }

    fn links(&self) -> Box<dyn Iterator<Item = Link> + '_> {
        Box::new(self.links.iter().map(LinkEntry::link))
    }

    fn contains_node(&self, node: Node) -> bool {
        node.network() == self.id && node.id() < self.nodes.len()
    }

    fn contains_link(&self, link: Link) -> bool {
        link.network() == self.id && link.id() < self.links.len()
    }

    fn endpoints(&self, link: Link) -> Result<(Node, Node), NetworkError> {
        let entry = self.link(link)?;
        Ok((entry.from(), entry.to()))
    }

    fn links_of(&self, node: Node) -> Result<Box<dyn Iterator<Item = Link> + '_>, NetworkError> {
        let id = self.id;
        Ok(Box::new(
            self.incidence(node)?
                .iter()
                .map(move |&link| Link::new(id, link)),
        ))
    }

    fn degree(&self, node: Node) -> Result<usize, NetworkError> {
        Ok(self.incidence(node)?.len())
    }

    fn are_adjacent(&self, a: Node, b: Node) -> Result<bool, NetworkError> {
        Ok(self.find_link(a, b)?.is_some())
    }
}
