use tracing_subscriber::EnvFilter;

fn default_directives(verbose: u8) -> String {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    // Keep the GUI and HTTP stacks quiet unless asked for via RUST_LOG.
    format!("warn,simple_file_downloader={}", level)
}

/// Install the stderr subscriber. `RUST_LOG` wins over `-v`.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
