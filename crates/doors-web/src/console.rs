#![forbid(unsafe_code)]

//! Tracing layer that writes one plain-text line per event to a log sink.
//!
//! In the browser the sink is the devtools console, with the event level
//! selecting `console.error`, `console.warn` and so on. The layer itself is
//! host-independent so formatting is tested natively.

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Destination for formatted log lines.
pub trait LogSink {
    fn emit(&self, level: Level, line: &str);
}

// ============================================================================
// Event Visitor
// ============================================================================

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.fields.push((field.name(), value.to_owned()));
        }
    }
}

/// `LEVEL target: message key=value ...`
fn format_event(event: &Event<'_>) -> String {
    let metadata = event.metadata();
    let mut visitor = EventVisitor::default();
    event.record(&mut visitor);

    let mut line = format!("{} {}:", metadata.level(), metadata.target());
    if let Some(message) = visitor.message {
        let _ = write!(line, " {message}");
    }
    for (name, value) in visitor.fields {
        let _ = write!(line, " {name}={value}");
    }
    line
}

// ============================================================================
// ConsoleLayer
// ============================================================================

/// Layer forwarding events at or above `max_level` to a [`LogSink`].
pub struct ConsoleLayer<S> {
    sink: S,
    max_level: Level,
}

impl<S: LogSink> ConsoleLayer<S> {
    /// Layer passing `DEBUG` and above.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            max_level: Level::DEBUG,
        }
    }

    /// Builder: most verbose level to pass through.
    #[must_use]
    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

impl<S, Sub> Layer<Sub> for ConsoleLayer<S>
where
    S: LogSink + Send + Sync + 'static,
    Sub: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, Sub>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        self.sink.emit(*event.metadata().level(), &format_event(event));
    }
}

// ============================================================================
// Browser console
// ============================================================================

/// The devtools console.
#[cfg(target_arch = "wasm32")]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl LogSink for BrowserConsole {
    fn emit(&self, level: Level, line: &str) {
        use web_sys::console;

        let value = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => console::error_1(&value),
            Level::WARN => console::warn_1(&value),
            Level::INFO => console::info_1(&value),
            _ => console::debug_1(&value),
        }
    }
}

/// Install the console layer as the global subscriber. A second call, or a
/// page that already installed one, is a no-op.
#[cfg(target_arch = "wasm32")]
pub fn install() {
    use tracing_subscriber::prelude::*;

    let _ = tracing_subscriber::registry()
        .with(ConsoleLayer::new(BrowserConsole))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::prelude::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl LogSink for Capture {
        fn emit(&self, level: Level, line: &str) {
            self.0
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .push((level, line.to_owned()));
        }
    }

    impl Capture {
        fn lines(&self) -> Vec<(Level, String)> {
            self.0.lock().unwrap().clone()
        }
    }

    fn with_layer(layer: ConsoleLayer<Capture>, f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn formats_message_and_fields() {
        let sink = Capture::default();
        with_layer(ConsoleLayer::new(sink.clone()), || {
            tracing::info!(target: "doors", page = "life", widget = "garden", "widget mounted");
        });
        assert_eq!(
            sink.lines(),
            vec![(
                Level::INFO,
                "INFO doors: widget mounted page=life widget=garden".to_owned()
            )]
        );
    }

    #[test]
    fn debug_fields_keep_their_debug_form() {
        let sink = Capture::default();
        with_layer(ConsoleLayer::new(sink.clone()), || {
            tracing::warn!(target: "doors", delay = ?core::time::Duration::from_millis(610), "late");
        });
        assert_eq!(sink.lines()[0].1, "WARN doors: late delay=610ms");
    }

    #[test]
    fn levels_above_max_are_dropped() {
        let sink = Capture::default();
        with_layer(ConsoleLayer::new(sink.clone()).max_level(Level::WARN), || {
            tracing::debug!("hidden");
            tracing::info!("hidden too");
            tracing::error!(target: "doors", "shown");
        });
        assert_eq!(sink.lines(), vec![(Level::ERROR, "ERROR doors: shown".to_owned())]);
    }

    #[test]
    fn trace_is_off_by_default() {
        let sink = Capture::default();
        with_layer(ConsoleLayer::new(sink.clone()), || {
            tracing::trace!("noise");
            tracing::debug!(target: "doors", "kept");
        });
        assert_eq!(sink.lines().len(), 1);
        assert_eq!(sink.lines()[0].0, Level::DEBUG);
    }
}
