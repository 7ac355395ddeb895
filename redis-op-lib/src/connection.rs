use crate::frame::{self, Frame};
use bytes::{Buf, BytesMut};
use std::io::{self, Cursor};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;

/// Sends and receives `Frame` values over a single `TcpStream`.
///
/// Replies are accumulated in `read_buf` until a whole frame is buffered. Writes
/// go through a `BufWriter` and are flushed once per frame, so every command
/// reaches the server as one write.
#[derive(Debug)]
pub struct Connection {
    stream: BufWriter<TcpStream>,
    read_buf: BytesMut,
}

const BUF_SIZE: usize = 4 * 1024;

impl Connection {
    pub fn new(stream: TcpStream) -> Connection {
        Connection {
            stream: BufWriter::new(stream),
            read_buf: BytesMut::with_capacity(BUF_SIZE),
        }
    }

    /// Read a single `Frame` from the underlying stream, waiting until enough
    /// data has arrived. Bytes past the end of the frame stay buffered for the
    /// next call.
    ///
    /// # Returns
    ///
    /// `None` if the peer closed the stream on a frame boundary.
    ///
    /// # Errors
    ///
    /// I/O errors, malformed frames, and a close that cuts a frame in half.
    pub async fn read_frame(&mut self) -> crate::Result<Option<Frame>> {
        loop {
            if let Some(frame) = self.parse_frame()? {
                return Ok(Some(frame));
            }

            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(&mut self.read_buf).await? {
                if self.read_buf.is_empty() {
                    return Ok(None);
                }
                return Err("connection reset by peer".into());
            }
        }
    }

    /// `Ok(None)` means more bytes are needed.
    fn parse_frame(&mut self) -> crate::Result<Option<Frame>> {
        use frame::Error::Incomplete;

        let mut buf = Cursor::new(&self.read_buf[..]);

        // `check` is cheap compared to `parse`: nothing is allocated until the
        // whole frame is known to be buffered.
        match Frame::check(&mut buf) {
            Ok(()) => {
                let len = usize::try_from(buf.position())?;

                buf.set_position(0);
                let frame = Frame::parse(&mut buf)?;
                self.read_buf.advance(len);

                Ok(Some(frame))
            }
            Err(Incomplete) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write a single `Frame` to the underlying stream and flush it.
    ///
    /// # Errors
    ///
    /// Any I/O error from the socket.
    pub async fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        match frame {
            Frame::Array(val) => {
                self.stream.write_u8(b'*').await?;
                self.write_decimal(val.len() as u64).await?;

                for entry in val {
                    self.write_value(entry).await?;
                }
            }
            _ => self.write_value(frame).await?,
        }

        self.stream.flush().await
    }

    /// Flush anything still buffered and close the write half of the socket.
    ///
    /// # Errors
    ///
    /// Any I/O error from the socket.
    pub async fn shutdown(&mut self) -> io::Result<()> {
        self.stream.shutdown().await
    }

    /// Write a frame literal to the stream.
    async fn write_value(&mut self, frame: &Frame) -> io::Result<()> {
        match frame {
            Frame::Simple(val) => {
                self.stream.write_u8(b'+').await?;
                self.stream.write_all(val.as_bytes()).await?;
                self.stream.write_all(b"\r\n").await?;
            }
            Frame::Error(val) => {
                self.stream.write_u8(b'-').await?;
                self.stream.write_all(val.as_bytes()).await?;
                self.stream.write_all(b"\r\n").await?;
            }
            Frame::Integer(val) => {
                self.stream.write_u8(b':').await?;
                self.write_decimal(*val).await?;
            }
            Frame::Null => {
                self.stream.write_all(b"$-1\r\n").await?;
            }
            Frame::Bulk(val) => {
                self.stream.write_u8(b'$').await?;
                self.write_decimal(val.len() as u64).await?;
                self.stream.write_all(val).await?;
                self.stream.write_all(b"\r\n").await?;
            }
            // Commands are flat arrays of bulk strings.
            Frame::Array(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "nested array frames are not supported",
                ))
            }
        }

        Ok(())
    }

    async fn write_decimal(&mut self, val: u64) -> io::Result<()> {
        self.stream.write_all(val.to_string().as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;

        Ok(())
    }
}
