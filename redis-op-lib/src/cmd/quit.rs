use crate::cmd::Protocol;
use crate::frame::PushFrame;
use crate::Frame;
use bytes::Bytes;

/// Ask the server to close the connection.
///
/// The server replies `OK` once every pending reply has been written, then
/// closes the socket.
#[derive(Debug, Default)]
pub struct Quit;

impl Quit {
    pub fn new() -> Quit {
        Quit
    }
}

impl Protocol for Quit {
    fn into_frame(self) -> Frame {
        let mut frame: Vec<Frame> = Vec::new();
        frame.push_bulk(Bytes::from("quit".as_bytes()));

        frame.into()
    }
}
