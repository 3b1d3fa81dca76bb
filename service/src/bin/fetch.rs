//! Fetch one resource (or all of them) through the resource client and
//! print the JSON.
//!
//! Usage: `cargo run --bin fetch -- metro --base-url http://localhost:8080`

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use clap::Parser;
use routeviz_api::{
    catalog::Resource,
    client::{fetch_all, ClientError, ClientFacade, ResourceApi},
    config::Config,
    telemetry::init_tracing,
};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(about = "Fetch map resources from the resource server")]
struct Args {
    /// Resource name (metro, bus, route1..3, landmark1..3) or `all`
    target: String,

    /// Override `resources.base_url`
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let mut config = Config::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    if let Some(base_url) = args.base_url {
        config.resources.base_url = base_url;
    }
    init_tracing(&config.logging);

    let client = ClientFacade::from_config(&config.resources)?;

    let result = if args.target == "all" {
        fetch_all(&client).await.map(Value::Object)
    } else {
        let resource: Resource = args.target.parse()?;
        client.get(resource).await
    };

    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(ClientError::Status { status, body }) => {
            println!("{}", serde_json::to_string_pretty(&body)?);
            Err(anyhow::anyhow!("server responded {status}"))
        }
        Err(err) => Err(err.into()),
    }
}
