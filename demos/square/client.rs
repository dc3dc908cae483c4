//! End-to-end demo client: connects to the `calculate` server and squares
//! a number supplied on the command line.

#[path = "generated.rs"]
mod generated;

use std::error::Error;

use clap::Parser;
use log::info;

use generated::{CalculateStub, Number};

#[derive(Parser, Debug)]
#[command(about = "srpc square demo client")]
struct Args {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long)]
    port: u16,

    #[arg(long)]
    num: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut stub = CalculateStub::connect(&args.host, args.port)?;
    let result = stub.square(Number { num: args.num })?;
    info!("{}^2 = {}", args.num, result.num);
    println!("{}", result.num);
    Ok(())
}
