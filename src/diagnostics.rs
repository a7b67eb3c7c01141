//! Console logging setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the stderr subscriber.
///
/// Default level is `orgchart=info`, `debug` with `verbose`, `warn` with
/// `quiet`. `RUST_LOG` overrides all of them.
pub fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "orgchart=debug"
    } else if quiet {
        "orgchart=warn"
    } else {
        "orgchart=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
