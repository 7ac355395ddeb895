//! Redis client implementation
//!
//! Provides an async connect and methods for issuing GET, SET and QUIT.

use crate::cmd::{Get, Protocol, Quit, Set};
use crate::{Connection, Frame};
use bytes::Bytes;
use std::io::{Error, ErrorKind};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::{debug, instrument};

/// Backed by a single `TcpStream`.
///
/// Each request is written and its reply awaited before the next one is
/// issued; there is no pipelining, reconnect or retry.
pub struct Client {
    connection: Connection,
}

impl Client {
    /// Establish a connection with the Redis server located at `addr`.
    ///
    /// # Errors
    ///
    /// The I/O error of the single connect attempt.
    pub async fn connect<T: ToSocketAddrs>(addr: T) -> crate::Result<Client> {
        let stream = TcpStream::connect(addr).await?;
        let connection = Connection::new(stream);

        Ok(Client { connection })
    }

    /// Get the value of key.
    ///
    /// # return
    ///
    /// If the key does not exist the special value `None` is returned.
    ///
    /// # Errors
    ///
    /// An error reply from the server, an unexpected reply, or an I/O failure.
    #[instrument(skip(self))]
    pub async fn get(&mut self, key: &str) -> crate::Result<Option<Bytes>> {
        let frame = Get::new(key).into_frame();
        debug!(request = ?frame);

        self.connection.write_frame(&frame).await?;

        // `Null` represents the key not being present.
        match self.read_response().await? {
            Frame::Simple(value) => Ok(Some(value.into())),
            Frame::Bulk(value) => Ok(Some(value)),
            Frame::Null => Ok(None),
            frame => Err(frame.to_error()),
        }
    }

    /// Set `key` to hold the given `value`.
    ///
    /// If key already holds a value, it is overwritten.
    ///
    /// # Errors
    ///
    /// Any reply other than `OK`, or an I/O failure.
    #[instrument(skip(self))]
    pub async fn set(&mut self, key: &str, value: Bytes) -> crate::Result<()> {
        let frame = Set::new(key, value).into_frame();
        debug!(request = ?frame);

        self.connection.write_frame(&frame).await?;

        match self.read_response().await? {
            Frame::Simple(s) if s == "OK" => Ok(()),
            other => Err(other.to_error()),
        }
    }

    /// Ask the server to close the connection, then shut the socket down.
    ///
    /// Consumes the client, so a closed client cannot issue further commands.
    ///
    /// # Errors
    ///
    /// Any reply other than `OK`, or an I/O failure.
    #[instrument(skip(self))]
    pub async fn quit(mut self) -> crate::Result<()> {
        let frame = Quit::new().into_frame();
        debug!(request = ?frame);

        self.connection.write_frame(&frame).await?;

        match self.read_response().await? {
            Frame::Simple(s) if s == "OK" => {}
            other => return Err(other.to_error()),
        }

        self.connection.shutdown().await?;

        Ok(())
    }

    /// Reads a response frame from the socket.
    ///
    /// If an `Error` frame is received, it is converted to `Err`.
    async fn read_response(&mut self) -> crate::Result<Frame> {
        let response = self.connection.read_frame().await?;
        debug!(?response);

        match response {
            Some(Frame::Error(msg)) => Err(msg.into()),
            Some(frame) => Ok(frame),
            None => {
                let err = Error::new(ErrorKind::ConnectionReset, "connection reset by server");

                Err(err.into())
            }
        }
    }
}
