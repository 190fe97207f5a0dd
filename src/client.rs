//! TCP client for the remote collector
//!
//! One connection, opened at construction, shared by every in-flight request.
//! The only capability exposed is [`CollectorClient::post`]: serialize a
//! tagged record into a single line frame and write it to the socket. No
//! retry, no reconnect, no queueing: a dead collector surfaces as a `Send`
//! error that the middleware reports locally and swallows.

use std::sync::Arc;

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::error::RelayError;
use crate::record::Record;

/// Shared handle to the collector connection.
///
/// Cloning is cheap and shares the underlying stream; the internal mutex
/// keeps frames from concurrent requests from interleaving on the wire.
#[derive(Clone)]
pub struct CollectorClient {
    stream: Arc<Mutex<TcpStream>>,
}

impl CollectorClient {
    /// Open a TCP connection to the collector.
    ///
    /// Fails with [`RelayError::Connect`] when the collector is unreachable;
    /// this is the only moment the crate reports a transport problem to the
    /// caller.
    pub async fn connect(host: &str, port: u16) -> Result<Self, RelayError> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(RelayError::Connect)?;
        let _ = stream.set_nodelay(true);
        tracing::debug!(host = %host, port = port, "collector connected");

        Ok(Self {
            stream: Arc::new(Mutex::new(stream)),
        })
    }

    /// Send one tagged record.
    ///
    /// Wire format is one line per record: a JSON array
    /// `[tag, unix_timestamp, {fields}]` terminated by `\n`, the
    /// collector's TCP/JSON input format. The frame is serialized before the
    /// stream lock is taken and written with a single `write_all`, so
    /// concurrent posts come out whole.
    pub async fn post(&self, tag: &str, record: Record) -> Result<(), RelayError> {
        let mut frame = serde_json::to_vec(&(tag, Utc::now().timestamp(), &record))?;
        frame.push(b'\n');

        let mut stream = self.stream.lock().await;
        stream.write_all(&frame).await.map_err(RelayError::Send)?;
        stream.flush().await.map_err(RelayError::Send)
    }
}
