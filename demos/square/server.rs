//! End-to-end demo server: registers a `calculate` servicer that squares
//! its input and serves it over TCP.

#[path = "generated.rs"]
mod generated;

use std::error::Error;
use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use log::info;
use serde::Deserialize;

use generated::{CalculateServicer, Number};
use srpc::server::Server;

#[derive(Debug, Deserialize)]
struct ServerConfig {
    port: u16,
    #[serde(default = "default_backlog")]
    backlog: u32,
}

fn default_backlog() -> u32 {
    8
}

#[derive(Parser, Debug)]
#[command(about = "srpc square demo server")]
struct Args {
    /// Path to a JSON server configuration file (`{"port": 4000}`).
    #[arg(long)]
    config: std::path::PathBuf,
}

struct Calculator;

impl CalculateServicer for Calculator {
    fn square(&self, input: Number) -> Result<Number, srpc::error::DispatchError> {
        Ok(Number {
            num: input.num * input.num,
        })
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config: ServerConfig = serde_json::from_reader(File::open(&args.config)?)?;
    info!("loaded config: port={} backlog={}", config.port, config.backlog);

    let mut server = Server::new();
    generated::register_calculate_servicer(&mut server, Arc::new(Calculator));

    info!("serving calculate on port {}", config.port);
    server.serve(config.port)?;
    Ok(())
}
