use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::rpc::dispatcher::Dispatcher;

/// Upper bound on a single request message.
const MAX_REQUEST_BYTES: usize = 64 * 1024;

pub async fn serve(addr: SocketAddr, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(local = %listener.local_addr()?, "TCP transport listening");
    run(listener, dispatcher).await
}

pub async fn run(listener: TcpListener, dispatcher: Dispatcher) -> anyhow::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, dispatcher).await {
                tracing::warn!(%peer, error = %e, "connection failed");
            }
        });
    }
}

/// One request per connection: read a single message, write the reply if the
/// dispatcher produced one, close.
async fn handle_connection(mut stream: TcpStream, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let mut buf = vec![0u8; MAX_REQUEST_BYTES];
    let n = stream.read(&mut buf).await?;
    let msg = std::str::from_utf8(&buf[..n])?;

    if let Some(reply) = dispatcher.dispatch(msg).await {
        stream.write_all(reply.as_bytes()).await?;
    }
    stream.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn start() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let dispatcher = Dispatcher::new(crate::rpc::methods::build_registry());
        tokio::spawn(run(listener, dispatcher));
        addr
    }

    #[tokio::test]
    async fn it_answers_one_request_per_connection() {
        let addr = start().await;
        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(br#"{"jsonrpc":"2.0","method":"add","params":[2,3],"id":1}"#)
            .await
            .unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();
        let v: Value = serde_json::from_slice(&reply).unwrap();
        assert_eq!(v["result"], 5);
        assert_eq!(v["id"], 1);
    }

    #[tokio::test]
    async fn notification_closes_without_reply() {
        let addr = start().await;
        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(br#"{"jsonrpc":"2.0","method":"add","params":[2,3]}"#)
            .await
            .unwrap();

        let mut reply = Vec::new();
        client.read_to_end(&mut reply).await.unwrap();
        assert!(reply.is_empty());
    }
}
