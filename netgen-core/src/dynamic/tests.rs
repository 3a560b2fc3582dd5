//! Unit tests for the time-indexed graph store.

use rstest::{fixture, rstest};

use super::*;

/// A path `a - b - c` built at step 0.
#[fixture]
fn path() -> (DynamicNetwork, Vec<Node>, Vec<Link>) {
    let mut network = DynamicNetwork::new();
    let nodes: Vec<_> = (0..3)
        .map(|_| {
            network
                .add_node(network.create_node())
                .expect("own drafts are accepted")
        })
        .collect();
    let links = vec![
        network.add_link(nodes[0], nodes[1]).expect("members"),
        network.add_link(nodes[1], nodes[2]).expect("members"),
    ];
    (network, nodes, links)
}

#[rstest]
#[case(Lifespan { added: 2, removed: None }, 1, false)]
#[case(Lifespan { added: 2, removed: None }, 2, true)]
#[case(Lifespan { added: 2, removed: Some(4) }, 3, true)]
#[case(Lifespan { added: 2, removed: Some(4) }, 4, false)]
#[case(Lifespan { added: 3, removed: Some(3) }, 3, false)]
fn lifespans_are_half_open(#[case] span: Lifespan, #[case] step: u64, #[case] alive: bool) {
    assert_eq!(span.is_alive_at(step), alive);
}

#[rstest]
fn advance_moves_forward_only(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, _, _) = path;
    assert_eq!(network.current_step(), 0);
    assert_eq!(network.advance(), 1);
    network.advance_to(5).expect("forward move");
    network.advance_to(5).expect("staying put is allowed");
    assert_eq!(
        network.advance_to(2),
        Err(NetworkError::StepInPast {
            requested: 2,
            current: 5,
        })
    );
    assert_eq!(network.current_step(), 5);
}

#[rstest]
fn past_steps_are_unaffected_by_later_mutations(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, nodes, links) = path;
    network.advance();
    network.remove_link(links[0]).expect("live link");
    let d = network
        .add_node(network.create_node())
        .expect("own draft");
    network.add_link(nodes[2], d).expect("live members");

    assert_eq!(network.link_count_at(0), 2);
    assert_eq!(network.node_count_at(0), 3);
    assert_eq!(network.degree_at(nodes[0], 0).expect("alive at 0"), 1);
    assert!(!network.contains_node_at(d, 0));

    assert_eq!(network.link_count(), 2);
    assert_eq!(network.degree(nodes[0]).expect("alive now"), 0);
    assert_eq!(
        network.neighbours_at(nodes[2], 1).expect("alive at 1"),
        vec![nodes[1], d]
    );
}

#[rstest]
fn removing_a_node_removes_its_live_links(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, nodes, links) = path;
    network.advance();
    network.remove_node(nodes[1]).expect("live node");

    assert!(!network.contains_node(nodes[1]));
    assert!(links.iter().all(|&link| !network.contains_link(link)));
    assert_eq!(
        network.node_lifespan(nodes[1]).expect("member"),
        Lifespan {
            added: 0,
            removed: Some(1),
        }
    );
    assert_eq!(network.link_lifespan(links[1]).expect("member").removed(), Some(1));
    assert_eq!(network.degree(nodes[0]).expect("alive"), 0);
    assert_eq!(network.degree_at(nodes[1], 0).expect("alive at 0"), 2);
}

#[rstest]
fn dead_entities_reject_mutation(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, nodes, links) = path;
    network.remove_node(nodes[0]).expect("live node");

    assert_eq!(
        network.add_link(nodes[0], nodes[2]),
        Err(NetworkError::NodeNotAlive { node: 0, step: 0 })
    );
    assert_eq!(
        network.remove_link(links[0]),
        Err(NetworkError::LinkNotAlive { link: 0, step: 0 })
    );
    assert_eq!(
        network.remove_node(nodes[0]),
        Err(NetworkError::NodeNotAlive { node: 0, step: 0 })
    );
    assert_eq!(
        network.degree_at(nodes[0], 0),
        Err(NetworkError::NodeNotAlive { node: 0, step: 0 })
    );
}

#[test]
fn foreign_handles_are_not_members() {
    let (mut network, _, _) = path();
    let (_, strangers, stranger_links) = path();
    assert_eq!(
        network.remove_node(strangers[0]),
        Err(NetworkError::NodeNotFound { node: 0 })
    );
    assert_eq!(
        network.remove_link(stranger_links[0]),
        Err(NetworkError::LinkNotFound { link: 0 })
    );
    assert!(!network.contains_node_at(strangers[0], 0));
}

#[rstest]
fn self_loops_count_twice_while_alive(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, nodes, _) = path;
    let lp = network.add_link(nodes[0], nodes[0]).expect("loops are allowed");
    assert_eq!(network.degree(nodes[0]).expect("alive"), 3);
    network.advance();
    network.remove_link(lp).expect("live link");
    assert_eq!(network.degree(nodes[0]).expect("alive"), 1);
    assert_eq!(network.degree_at(nodes[0], 0).expect("alive at 0"), 3);
}

#[rstest]
fn snapshots_renumber_densely_and_copy_payloads(path: (DynamicNetwork, Vec<Node>, Vec<Link>)) {
    let (mut network, nodes, links) = path;
    network
        .node_mut(nodes[2])
        .expect("member")
        .set_property("label", "c");
    network.link_mut(links[1]).expect("member").set_value(2.5);
    network.advance();
    network.remove_node(nodes[0]).expect("live node");

    let snapshot = network.snapshot_at(1).expect("consistent history");
    assert_ne!(snapshot.id(), network.id());
    assert_eq!(snapshot.node_count(), 2);
    assert_eq!(snapshot.link_count(), 1);
    let ids: Vec<_> = snapshot.nodes().map(Node::id).collect();
    assert_eq!(ids, vec![0, 1]);

    let c = snapshot.node_by_id(1).expect("dense id");
    assert_eq!(snapshot.node(c).expect("member").property("label"), Some("c"));
    let link = snapshot.link_by_id(0).expect("dense id");
    let entry = snapshot.link(link).expect("member");
    assert_eq!(entry.value(), 2.5);
    assert_eq!((entry.from().id(), entry.to().id()), (0, 1));

    let earlier = network.snapshot_at(0).expect("consistent history");
    assert_eq!((earlier.node_count(), earlier.link_count()), (3, 2));
}

#[test]
fn empty_snapshot_before_anything_was_added() {
    let mut network = DynamicNetwork::new();
    network.advance_to(3).expect("forward move");
    network
        .add_node(network.create_node())
        .expect("own draft");
    let snapshot = network.snapshot_at(2).expect("consistent history");
    assert!(snapshot.is_empty());
    assert_eq!(network.node_count_at(3), 1);
}
