use admin_kernel::config::load_config;
use admin_logger::Logger;
use admin_server::{Server, ServerSettings};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1);
    let settings: ServerSettings =
        load_config(path.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder(env!("CARGO_PKG_NAME")).from_config(&settings.logging)?.init()?;

    Server::builder().settings(settings).build()?.run().await
}
