use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::rpc::dispatcher::Dispatcher;

/// Line-delimited loop: one request per stdin line, one reply per stdout line.
pub async fn serve(dispatcher: Dispatcher) -> anyhow::Result<()> {
    run(io::stdin(), io::stdout(), dispatcher).await
}

pub async fn run<R, W>(reader: R, mut writer: W, dispatcher: Dispatcher) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(reply) = dispatcher.dispatch(&line).await {
            writer.write_all(reply.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }
    Ok(())
}
