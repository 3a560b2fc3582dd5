//! End-to-end generation through the public API, including the tracing
//! output each generator emits.

use netgen_core::{
    BarabasiAlbertModel, Configuration, DynamicNetwork, ModelError, ModelKind, NUM_NODES,
    NetworkModel, NetworkView, P, PropertiesConfiguration, RandomSource, SEED,
    WattsStrogatzModel, WattsStrogatzParams, build_model,
};
use netgen_test_support::tracing::RecordingLayer;
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// Always draws the lowest value, so every link is rewired and every
/// candidate is node 0.
struct Lowest;

impl RandomSource for Lowest {
    fn set_seed(&mut self, _seed: u64) {}

    fn next_int(&mut self, _bound: usize) -> usize {
        0
    }

    fn next_double(&mut self) -> f64 {
        0.0
    }
}

#[fixture]
fn small_world() -> PropertiesConfiguration {
    PropertiesConfiguration::new()
        .with(NUM_NODES, 24)
        .with("d", 2)
        .with(P, "0.25")
        .with(SEED, 11)
}

#[rstest]
fn generation_is_reproducible_from_configuration(small_world: PropertiesConfiguration) {
    let mut first = build_model(ModelKind::WattsStrogatz, &small_world).expect("valid");
    let mut second = WattsStrogatzModel::new(&small_world, netgen_core::SeededRandom::default())
        .expect("valid");

    let a = first.generate().expect("generation succeeds");
    let b = second.generate().expect("generation succeeds");
    let ends = |network: &netgen_core::Network| {
        network
            .link_entries()
            .iter()
            .map(|entry| (entry.from().id(), entry.to().id()))
            .collect::<Vec<_>>()
    };
    assert_eq!(ends(&a), ends(&b));
    assert_eq!(a.link_count(), 48);
    assert_ne!(a.id(), b.id());
}

#[rstest]
fn generate_spans_carry_parameters(small_world: PropertiesConfiguration) {
    let mut model = build_model(ModelKind::WattsStrogatz, &small_world).expect("valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || model.generate()).expect("generation succeeds");

    let span = layer
        .span("model.watts_strogatz.generate")
        .expect("generate span must close");
    assert_eq!(span.field("num_nodes"), Some("24"));
    assert_eq!(span.field("d"), Some("2"));
    assert_eq!(span.field("p"), Some("0.25"));
    assert_eq!(span.field("seed"), Some("11"));
    assert!(layer.has_event("rewiring complete"));
}

#[test]
fn barabasi_albert_span_and_summary() {
    let layer = RecordingLayer::default();
    let _guard = layer.install();

    let mut model = BarabasiAlbertModel::with_defaults();
    model.configure_parameters(30, 0, 42).expect("valid");
    let network = model.generate().expect("generation succeeds");
    assert_eq!(network.link_count(), 29);

    let span = layer
        .span("model.barabasi_albert.generate")
        .expect("generate span must close");
    assert_eq!(span.field("num_nodes"), Some("30"));
    assert_eq!(span.field("seed"), Some("42"));
    let summary = layer
        .events_at(Level::DEBUG)
        .into_iter()
        .find(|event| event.message() == Some("preferential attachment complete"))
        .expect("summary event");
    assert_eq!(summary.field("links"), Some("29"));
}

#[test]
fn rejected_configuration_is_logged_and_ignored() {
    let layer = RecordingLayer::default();
    let _guard = layer.install();

    let mut model = BarabasiAlbertModel::with_defaults();
    let before = model.configuration().clone();
    let err = model
        .configure(&PropertiesConfiguration::new().with(NUM_NODES, 1))
        .expect_err("one node is too few");
    assert!(matches!(err, ModelError::InvalidParameter { .. }));
    assert_eq!(model.configuration(), &before);

    let warnings = layer.events_at(Level::WARN);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("model"), Some("barabasi_albert"));
    assert_eq!(warnings[0].field("code"), Some("MODEL_INVALID_PARAMETER"));
}

#[test]
fn generation_failures_are_recorded_on_the_span() {
    let layer = RecordingLayer::default();
    let _guard = layer.install();

    let params = WattsStrogatzParams::new(9, 1, 0.5).expect("valid");
    let mut model = WattsStrogatzModel::with_params(params, Lowest);
    let err = model.generate().expect_err("node 0 is never a valid target");
    assert!(matches!(err, ModelError::RewiringExhausted { node: 0, .. }));

    assert!(layer.span("model.watts_strogatz.generate").is_some());
    let errors = layer.events_at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0]
            .field("error")
            .is_some_and(|message| message.contains("no valid rewiring target")),
        "unexpected error event: {:?}",
        errors[0]
    );
}

#[test]
fn generated_networks_can_seed_a_dynamic_history() {
    let generated = BarabasiAlbertModel::new(
        &PropertiesConfiguration::new().with(NUM_NODES, 10),
        netgen_core::SeededRandom::new(3),
    )
    .expect("valid")
    .generate()
    .expect("generation succeeds");

    let mut history = DynamicNetwork::new();
    let nodes: Vec<_> = generated
        .nodes()
        .map(|_| history.add_node(history.create_node()))
        .collect::<Result<_, _>>()
        .expect("own drafts");
    for entry in generated.link_entries() {
        history
            .add_link(nodes[entry.from().id()], nodes[entry.to().id()])
            .expect("live members");
    }

    history.advance();
    let hub = nodes
        .iter()
        .copied()
        .max_by_key(|&node| history.degree(node).expect("alive"))
        .expect("non-empty");
    history.remove_node(hub).expect("alive");

    assert_eq!(history.link_count_at(0), 9);
    let before = history.snapshot_at(0).expect("consistent history");
    let after = history.snapshot_at(1).expect("consistent history");
    assert_eq!(before.link_count(), generated.link_count());
    assert_eq!(after.node_count(), 9);
    assert_eq!(
        after.link_count(),
        9 - history.degree_at(hub, 0).expect("alive at 0")
    );
}

#[test]
fn configuration_is_readable_through_the_trait() {
    let model = BarabasiAlbertModel::with_defaults();
    let config: &dyn Configuration = model.configuration();
    assert_eq!(config.get_int(NUM_NODES), Ok(Some(2)));
    assert!(config.contains_key(SEED));
}
