use clap::Parser;

use jsonrpc_dispatch::infra::config::{Config, Mode};
use jsonrpc_dispatch::infra::logging;
use jsonrpc_dispatch::rpc::methods;
use jsonrpc_dispatch::{api, Dispatcher};

/// JSON-RPC 2.0 dispatch server with the demo math methods registered.
#[derive(Parser)]
#[command(name = "jsonrpc-dispatch", version, about)]
struct Cli {
    /// Transport to serve: http, tcp or stdio. Overrides MODE.
    #[arg(long)]
    mode: Option<String>,
    /// Bind host for the http/tcp transports. Overrides HOST.
    #[arg(long)]
    host: Option<String>,
    /// Port for the http/tcp transports. Overrides PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let mut cfg = Config::load()?;
    if let Some(mode) = cli.mode {
        cfg.mode = mode.parse()?;
    }
    if let Some(host) = cli.host {
        cfg.host = host;
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }

    tracing::info!(
        mode = %cfg.mode,
        host = %cfg.host,
        port = cfg.port,
        "BOOT jsonrpc-dispatch"
    );

    let dispatcher = Dispatcher::new(methods::build_registry());

    match cfg.mode {
        Mode::Stdio => api::stdio::serve(dispatcher).await,
        Mode::Tcp => api::tcp::serve(cfg.bind_addr()?, dispatcher).await,
        Mode::Http => {
            let app = api::http::build_app(dispatcher);
            let listener = tokio::net::TcpListener::bind(cfg.bind_addr()?).await?;
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}
