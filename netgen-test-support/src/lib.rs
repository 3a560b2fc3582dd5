//! Test helpers shared by the netgen crates.
//!
//! [`tracing`] captures spans and events so suites can assert on
//! instrumentation; [`ci`] holds the environment-driven run profiles used by
//! property tests.

pub mod ci;

pub mod tracing {
    //! In-memory capture of tracing output.

    use std::{
        collections::BTreeMap,
        fmt,
        sync::{Arc, Mutex, PoisonError},
    };

    use tracing::{
        Event, Level, Subscriber,
        field::{Field, Visit},
        span::{Attributes, Id, Record},
        subscriber::DefaultGuard,
    };
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
    };

    /// A layer that stores every closed span and every event it observes.
    ///
    /// Clones share the same storage, so a test can install one clone and
    /// read from another.
    ///
    /// # Examples
    /// ```
    /// use netgen_test_support::tracing::RecordingLayer;
    ///
    /// let layer = RecordingLayer::default();
    /// {
    ///     let _guard = layer.install();
    ///     tracing::info_span!("work", items = 3).in_scope(|| {
    ///         tracing::debug!(done = true, "finished");
    ///     });
    /// }
    /// let span = layer.span("work").expect("span closed");
    /// assert_eq!(span.field("items"), Some("3"));
    /// assert!(layer.has_event("finished"));
    /// ```
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        store: Arc<Mutex<Recording>>,
    }

    #[derive(Default)]
    struct Recording {
        spans: Vec<SpanRecord>,
        events: Vec<EventRecord>,
    }

    impl RecordingLayer {
        /// Installs this layer on a fresh registry as the thread-default
        /// subscriber until the returned guard is dropped.
        #[must_use]
        pub fn install(&self) -> DefaultGuard {
            let subscriber = tracing_subscriber::registry().with(self.clone());
            tracing::subscriber::set_default(subscriber)
        }

        /// Closed spans in completion order.
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            self.with_store(|store| store.spans.clone())
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            self.with_store(|store| store.events.clone())
        }

        /// The first closed span called `name`.
        #[must_use]
        pub fn span(&self, name: &str) -> Option<SpanRecord> {
            self.with_store(|store| store.spans.iter().find(|span| span.name == name).cloned())
        }

        /// Events emitted at `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
            self.with_store(|store| {
                store
                    .events
                    .iter()
                    .filter(|event| event.level == level)
                    .cloned()
                    .collect()
            })
        }

        /// Reports whether any event carried `message`.
        #[must_use]
        pub fn has_event(&self, message: &str) -> bool {
            self.with_store(|store| {
                store
                    .events
                    .iter()
                    .any(|event| event.message() == Some(message))
            })
        }

        fn with_store<T>(&self, read: impl FnOnce(&mut Recording) -> T) -> T {
            let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
            read(&mut store)
        }
    }

    /// A span captured when it closed.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Name from the span metadata.
        pub name: String,
        /// Fields recorded at creation or later.
        pub fields: BTreeMap<String, String>,
    }

    impl SpanRecord {
        /// Rendered value of the field called `name`.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }
    }

    /// A captured event.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, normally the emitting module path.
        pub target: String,
        /// Event fields, including `message` when one was given.
        pub fields: BTreeMap<String, String>,
    }

    impl EventRecord {
        /// Rendered value of the field called `name`.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// The event message, if any.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    /// Fields of a span that has not closed yet.
    struct OpenSpan(SpanRecord);

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut record = SpanRecord {
                name: attrs.metadata().name().to_owned(),
                fields: BTreeMap::new(),
            };
            attrs.record(&mut FieldCollector(&mut record.fields));
            span.extensions_mut().insert(OpenSpan(record));
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(OpenSpan(record)) = span.extensions_mut().get_mut::<OpenSpan>() {
                values.record(&mut FieldCollector(&mut record.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(OpenSpan(record)) = span.extensions_mut().remove::<OpenSpan>() else {
                return;
            };
            self.with_store(|store| store.spans.push(record));
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = BTreeMap::new();
            event.record(&mut FieldCollector(&mut fields));
            let metadata = event.metadata();
            let record = EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                fields,
            };
            self.with_store(|store| store.events.push(record));
        }
    }

    struct FieldCollector<'a>(&'a mut BTreeMap<String, String>);

    impl FieldCollector<'_> {
        fn put(&mut self, field: &Field, value: String) {
            self.0.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.put(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.put(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.put(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.put(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.put(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.put(field, value.to_string());
        }

        fn record_f64(&mut self, field: &Field, value: f64) {
            self.put(field, value.to_string());
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn captures_late_recorded_span_fields() {
            let layer = RecordingLayer::default();
            {
                let _guard = layer.install();
                let span = tracing::info_span!("job", total = tracing::field::Empty);
                span.record("total", 7_u64);
            }
            let span = layer.span("job").expect("span closed");
            assert_eq!(span.field("total"), Some("7"));
        }

        #[test]
        fn filters_events_by_level() {
            let layer = RecordingLayer::default();
            {
                let _guard = layer.install();
                tracing::warn!(code = "X", "rejected");
                tracing::debug!("noise");
            }
            let warnings = layer.events_at(Level::WARN);
            assert_eq!(warnings.len(), 1);
            assert_eq!(warnings[0].field("code"), Some("X"));
            assert_eq!(warnings[0].message(), Some("rejected"));
            assert!(layer.has_event("noise"));
        }

        #[test]
        fn nothing_is_recorded_outside_the_guard() {
            let layer = RecordingLayer::default();
            drop(layer.install());
            tracing::warn!("unobserved");
            assert!(layer.events().is_empty());
        }
    }
}
