//! Time-indexed graph store.
//!
//! [`DynamicNetwork`] keeps every node and link ever added in an inner
//! [`Network`] and records when each one became alive and when it was
//! removed. Queries can be answered at any step up to the current one, and
//! [`DynamicNetwork::snapshot_at`] freezes a step into a static network.

use tracing::trace;

use crate::{
    entity::{Link, LinkEntry, NetworkId, NewLink, NewNode, Node, NodeEntry},
    error::NetworkError,
    network::{Network, NetworkView},
};

/// The half-open step interval `[added, removed)` during which an entity is
/// alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifespan {
    added: u64,
    removed: Option<u64>,
}

impl Lifespan {
    const fn starting(step: u64) -> Self {
        Self {
            added: step,
            removed: None,
        }
    }

    /// Step at which the entity was added.
    #[must_use]
    pub const fn added(&self) -> u64 {
        self.added
    }

    /// Step at which the entity was removed, if it has been.
    #[must_use]
    pub const fn removed(&self) -> Option<u64> {
        self.removed
    }

    /// Reports whether the entity is alive at `step`.
    #[must_use]
    pub const fn is_alive_at(&self, step: u64) -> bool {
        if step < self.added {
            return false;
        }
        match self.removed {
            Some(removed) => step < removed,
            None => true,
        }
    }
}

/// A network whose structure changes over discrete time steps.
///
/// Mutations take effect at the current step, which starts at 0 and only
/// moves forward. Removed entities keep their ids and records so past steps
/// remain queryable. Through [`NetworkView`] the network presents its
/// structure at the current step.
///
/// # Examples
/// ```
/// use netgen_core::{DynamicNetwork, NetworkView};
///
/// let mut network = DynamicNetwork::new();
/// let a = network.add_node(network.create_node())?;
/// let b = network.add_node(network.create_node())?;
/// let link = network.add_link(a, b)?;
///
/// network.advance();
/// network.remove_link(link)?;
///
/// assert_eq!(network.link_count_at(0), 1);
/// assert_eq!(network.link_count(), 0);
/// assert_eq!(network.degree_at(a, 0)?, 1);
/// # Ok::<(), netgen_core::NetworkError>(())
/// ```
#[derive(Debug, Default)]
pub struct DynamicNetwork {
    network: Network,
    node_spans: Vec<Lifespan>,
    link_spans: Vec<Lifespan>,
    step: u64,
}

impl DynamicNetwork {
    /// Creates an empty network positioned at step 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of this network.
    #[must_use]
    pub const fn id(&self) -> NetworkId {
        self.network.id()
    }

    /// The step at which mutations currently take effect.
    #[must_use]
    pub const fn current_step(&self) -> u64 {
        self.step
    }

    /// Moves to the next step and returns it.
    pub fn advance(&mut self) -> u64 {
        self.step = self.step.saturating_add(1);
        trace!(network = %self.id(), step = self.step, "step advanced");
        self.step
    }

    /// Moves forward to `step`. Staying on the current step is allowed.
    ///
    /// # Errors
    /// Returns [`NetworkError::StepInPast`] when `step` precedes the current
    /// step.
    pub fn advance_to(&mut self, step: u64) -> Result<(), NetworkError> {
        if step < self.step {
            return Err(NetworkError::StepInPast {
                requested: step,
                current: self.step,
            });
        }
        self.step = step;
        trace!(network = %self.id(), step, "step advanced");
        Ok(())
    }

    /// Allocates an unattached node draft.
    #[must_use]
    pub fn create_node(&self) -> NewNode {
        self.network.create_node()
    }

    /// Commits a node draft at the current step.
    ///
    /// # Errors
    /// Returns [`NetworkError::ForeignNode`] when the draft was created by a
    /// different network.
    pub fn add_node(&mut self, draft: NewNode) -> Result<Node, NetworkError> {
        let node = self.network.add_node(draft)?;
        self.node_spans.push(Lifespan::starting(self.step));
        Ok(node)
    }

    /// Allocates an unattached link draft bound to this network.
    #[must_use]
    pub fn create_link(&self) -> NewLink {
        self.network.create_link()
    }

    /// Links two live nodes at the current step.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] for non-members and
    /// [`NetworkError::NodeNotAlive`] for endpoints removed earlier.
    pub fn add_link(&mut self, from: Node, to: Node) -> Result<Link, NetworkError> {
        self.insert_link(self.create_link(), from, to)
    }

    /// Commits a link draft between two live nodes at the current step.
    ///
    /// # Errors
    /// As [`Network::insert_link`], plus [`NetworkError::NodeNotAlive`] when
    /// either endpoint is not alive at the current step.
    pub fn insert_link(
        &mut self,
        draft: NewLink,
        from: Node,
        to: Node,
    ) -> Result<Link, NetworkError> {
        if draft.network().is_some_and(|owner| owner != self.id()) {
            return Err(NetworkError::ForeignLink);
        }
        self.require_node_alive(from, self.step)?;
        self.require_node_alive(to, self.step)?;
        let link = self.network.insert_link(draft, from, to)?;
        self.link_spans.push(Lifespan::starting(self.step));
        Ok(link)
    }

    /// Removes a live link at the current step.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] for non-members and
    /// [`NetworkError::LinkNotAlive`] when the link is already gone.
    pub fn remove_link(&mut self, link: Link) -> Result<(), NetworkError> {
        self.require_link_alive(link, self.step)?;
        self.end_link(link.id());
        trace!(network = %self.id(), link = link.id(), step = self.step, "link removed");
        Ok(())
    }

    /// Removes a live node at the current step together with its live
    /// incident links.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] for non-members and
    /// [`NetworkError::NodeNotAlive`] when the node is already gone.
    pub fn remove_node(&mut self, node: Node) -> Result<(), NetworkError> {
        self.require_node_alive(node, self.step)?;
        let mut incident: Vec<usize> = self.live_incidence(node, self.step)?.collect();
        // Both ends of a self-loop are listed next to each other.
        incident.dedup();
        for &link in &incident {
            self.end_link(link);
        }
        if let Some(span) = self.node_spans.get_mut(node.id()) {
            span.removed = Some(self.step);
        }
        trace!(
            network = %self.id(),
            node = node.id(),
            step = self.step,
            links = incident.len(),
            "node removed"
        );
        Ok(())
    }

    /// Returns the stored record for `node`, whether or not it is alive.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    pub fn node(&self, node: Node) -> Result<&NodeEntry, NetworkError> {
        self.network.node(node)
    }

    /// Returns the mutable record for `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    pub fn node_mut(&mut self, node: Node) -> Result<&mut NodeEntry, NetworkError> {
        self.network.node_mut(node)
    }

    /// Returns the stored record for `link`, whether or not it is alive.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    pub fn link(&self, link: Link) -> Result<&LinkEntry, NetworkError> {
        self.network.link(link)
    }

    /// Returns the mutable record for `link`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    pub fn link_mut(&mut self, link: Link) -> Result<&mut LinkEntry, NetworkError> {
        self.network.link_mut(link)
    }

    /// Lifespan recorded for `node`.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] when `node` is not a member.
    pub fn node_lifespan(&self, node: Node) -> Result<Lifespan, NetworkError> {
        if !self.network.contains_node(node) {
            return Err(NetworkError::NodeNotFound { node: node.id() });
        }
        self.node_spans
            .get(node.id())
            .copied()
            .ok_or(NetworkError::NodeNotFound { node: node.id() })
    }

    /// Lifespan recorded for `link`.
    ///
    /// # Errors
    /// Returns [`NetworkError::LinkNotFound`] when `link` is not a member.
    pub fn link_lifespan(&self, link: Link) -> Result<Lifespan, NetworkError> {
        if !self.network.contains_link(link) {
            return Err(NetworkError::LinkNotFound { link: link.id() });
        }
        self.link_spans
            .get(link.id())
            .copied()
            .ok_or(NetworkError::LinkNotFound { link: link.id() })
    }

    /// Nodes alive at `step`, in id order.
    pub fn nodes_at(&self, step: u64) -> impl Iterator<Item = Node> + '_ {
        self.network
            .node_entries()
            .iter()
            .zip(&self.node_spans)
            .filter(move |(_, span)| span.is_alive_at(step))
            .map(|(entry, _)| entry.node())
    }

    /// Links alive at `step`, in id order.
    pub fn links_at(&self, step: u64) -> impl Iterator<Item = Link> + '_ {
        self.network
            .link_entries()
            .iter()
            .zip(&self.link_spans)
            .filter(move |(_, span)| span.is_alive_at(step))
            .map(|(entry, _)| entry.link())
    }

    /// Reports whether `node` is a member alive at `step`.
    #[must_use]
    pub fn contains_node_at(&self, node: Node, step: u64) -> bool {
        self.node_lifespan(node)
            .is_ok_and(|span| span.is_alive_at(step))
    }

    /// Reports whether `link` is a member alive at `step`.
    #[must_use]
    pub fn contains_link_at(&self, link: Link, step: u64) -> bool {
        self.link_lifespan(link)
            .is_ok_and(|span| span.is_alive_at(step))
    }

    /// Number of nodes alive at `step`.
    #[must_use]
    pub fn node_count_at(&self, step: u64) -> usize {
        self.nodes_at(step).count()
    }

    /// Number of links alive at `step`.
    #[must_use]
    pub fn link_count_at(&self, step: u64) -> usize {
        self.links_at(step).count()
    }

    /// Degree of `node` at `step`. Self-loops count twice.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] for non-members and
    /// [`NetworkError::NodeNotAlive`] when `node` is not alive at `step`.
    pub fn degree_at(&self, node: Node, step: u64) -> Result<usize, NetworkError> {
        self.require_node_alive(node, step)?;
        Ok(self.live_incidence(node, step)?.count())
    }

    /// Neighbours of `node` at `step`, one entry per incident link.
    ///
    /// # Errors
    /// Returns [`NetworkError::NodeNotFound`] for non-members and
    /// [`NetworkError::NodeNotAlive`] when `node` is not alive at `step`.
    pub fn neighbours_at(&self, node: Node, step: u64) -> Result<Vec<Node>, NetworkError> {
        self.require_node_alive(node, step)?;
        self.live_incidence(node, step)?
            .map(|id| {
                let entry = self.network.link(Link::new(self.id(), id))?;
                Ok(entry.nodes().other(node).unwrap_or(node))
            })
            .collect()
    }

    /// Freezes the structure alive at `step` into a static network.
    ///
    /// Nodes and links are renumbered densely in their original id order.
    /// Properties and link values are copied.
    ///
    /// # Errors
    /// Propagates [`NetworkError`] from the target store; a consistent
    /// history never produces one.
    pub fn snapshot_at(&self, step: u64) -> Result<Network, NetworkError> {
        let mut snapshot =
            Network::with_capacity(self.node_count_at(step), self.link_count_at(step));
        let mut renumbered: Vec<Option<Node>> = vec![None; self.node_spans.len()];

        for node in self.nodes_at(step) {
            let mut draft = snapshot.create_node();
            for (key, value) in self.network.node(node)?.properties().iter() {
                draft.set_property(key, value);
            }
            renumbered[node.id()] = Some(snapshot.add_node(draft)?);
        }

        for link in self.links_at(step) {
            let entry = self.network.link(link)?;
            let from = Self::translate(&renumbered, entry.from())?;
            let to = Self::translate(&renumbered, entry.to())?;
            snapshot.insert_link(entry.detached_copy(), from, to)?;
        }
        Ok(snapshot)
    }

    fn translate(renumbered: &[Option<Node>], node: Node) -> Result<Node, NetworkError> {
        renumbered
            .get(node.id())
            .copied()
            .flatten()
            .ok_or(NetworkError::NodeNotFound { node: node.id() })
    }

    fn end_link(&mut self, id: usize) {
        if let Some(span) = self.link_spans.get_mut(id) {
            span.removed = Some(self.step);
        }
    }

    /// Ids of links incident to `node` that are alive at `step`, with
    /// self-loops listed twice.
    fn live_incidence(
        &self,
        node: Node,
        step: u64,
    ) -> Result<impl Iterator<Item = usize> + '_, NetworkError> {
        let spans = &self.link_spans;
        Ok(self
            .network
            .incidence(node)?
            .iter()
            .copied()
            .filter(move |&id| spans.get(id).is_some_and(|span| span.is_alive_at(step))))
    }

    fn require_node_alive(&self, node: Node, step: u64) -> Result<(), NetworkError> {
        if self.node_lifespan(node)?.is_alive_at(step) {
            Ok(())
        } else {
            Err(NetworkError::NodeNotAlive {
                node: node.id(),
                step,
            })
        }
    }

    fn require_link_alive(&self, link: Link, step: u64) -> Result<(), NetworkError> {
        if self.link_lifespan(link)?.is_alive_at(step) {
            Ok(())
        } else {
            Err(NetworkError::LinkNotAlive {
                link: link.id(),
                step,
            })
        }
    }
}

impl NetworkView for DynamicNetwork {
    fn node_count(&self) -> usize {
        self.node_count_at(self.step)
    }

    fn link_count(&self) -> usize {
        self.link_count_at(self.step)
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = Node> + '_> {
        Box::new(self.nodes_at(self.step))
    }

    fn links(&self) -> Box<dyn Iterator<Item = Link> + '_> {
        Box::new(self.links_at(self.step))
    }

    fn contains_node(&self, node: Node) -> bool {
        self.contains_node_at(node, self.step)
    }

    fn contains_link(&self, link: Link) -> bool {
        self.contains_link_at(link, self.step)
    }

    fn endpoints(&self, link: Link) -> Result<(Node, Node), NetworkError> {
        self.require_link_alive(link, self.step)?;
        self.network.endpoints(link)
    }

    fn links_of(&self, node: Node) -> Result<Box<dyn Iterator<Item = Link> + '_>, NetworkError> {
        self.require_node_alive(node, self.step)?;
        let id = self.id();
        Ok(Box::new(
            self.live_incidence(node, self.step)?
                .map(move |link| Link::new(id, link)),
        ))
    }
}

#[cfg(test)]
mod tests;
