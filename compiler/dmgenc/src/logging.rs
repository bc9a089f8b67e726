use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the hierarchical tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, so plain runs stay silent.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            use tracing_subscriber::prelude::*;
            use tracing_subscriber::EnvFilter;

            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
