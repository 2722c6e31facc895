use std::env;
use std::path::Path;
use std::process;

use pencil_sketch::config::{load_config, ServiceConfig};
use pencil_sketch::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    // Optional single argument: path to a JSON config. Defaults otherwise.
    let config = match env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        },
        None => ServiceConfig::default(),
    };

    server::serve(config).await;
}
