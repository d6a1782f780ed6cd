use std::io;

use tracing_subscriber::EnvFilter;

use platebench::benchmark::{self, BenchConfig};

fn main() {
    // The phase timings are logged at the info level, so show them unless told otherwise.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let report = benchmark::run(&BenchConfig::default());
    println!("Found matches (1): {}", report.hashed.found);
    println!("Found matches (2): {}", report.ordered.found);
}
