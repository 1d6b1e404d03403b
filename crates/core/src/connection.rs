// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Newline delimited JSON connection over TCP.
use anyhow::{Result, anyhow};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
};

use crate::message::Message;

/// A line delimited connection for [Message]s.
pub struct Connection {
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

impl Connection {
    /// Creates a connection from a connected stream.
    pub fn new(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            lines: BufReader::new(reader).lines(),
            writer,
        }
    }

    /// Sends a [Message].
    pub async fn send(&mut self, msg: &Message) -> Result<()> {
        let mut line = msg.encode()?;
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Waits for the next line, skips empty lines.
    ///
    /// Returns `None` when the peer closed the connection.
    pub async fn recv_line(&mut self) -> Option<Result<String>> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => break Some(Ok(line)),
                Ok(None) => break None,
                Err(e) => break Some(Err(anyhow!("Connection error: {e}"))),
            }
        }
    }

    /// Waits for a [Message].
    ///
    /// A line that doesn't decode is returned as an error, the connection can
    /// still be used after that.
    pub async fn recv(&mut self) -> Option<Result<Message>> {
        self.recv_line()
            .await
            .map(|res| res.and_then(|line| Message::decode(&line)))
    }

    /// Closes this connection.
    pub async fn close(&mut self) {
        let _ = self.writer.shutdown().await;
    }
}

/// Connects to an engine and returns a [Connection] if successful.
pub async fn connect_async(addr: &str) -> Result<Connection> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| anyhow!("Connection to {addr} failed: {e}"))?;
    Ok(Connection::new(stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::PokerAction,
        message::ActionResponse,
        poker::{Chips, PlayerId},
    };
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn line_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let (tx, rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut conn = Connection::new(stream);

            conn.send(&Message::Connect(PlayerId::new(5))).await.unwrap();

            let msg = conn.recv().await.unwrap().unwrap();
            assert!(matches!(
                msg,
                Message::PlayerAction(ActionResponse { action: PokerAction::Call, .. })
            ));

            // A bad line followed by a good one.
            let msg = conn.recv().await.unwrap();
            assert!(msg.is_err());
            let msg = conn.recv().await.unwrap().unwrap();
            assert!(matches!(msg, Message::Text(s) if s == "bye"));

            tx.send(()).unwrap();
        });

        let mut conn = connect_async(&addr).await.unwrap();

        let msg = conn.recv().await.unwrap().unwrap();
        assert!(matches!(msg, Message::Connect(id) if id == PlayerId::new(5)));

        conn.send(&Message::PlayerAction(ActionResponse {
            player_id: PlayerId::new(5),
            action: PokerAction::Call,
            amount: Chips::new(20),
        }))
        .await
        .unwrap();

        conn.writer.write_all(b"{oops\n\n").await.unwrap();
        conn.send(&Message::Text("bye".to_string())).await.unwrap();

        rx.await.unwrap();
        conn.close().await;
    }
}
