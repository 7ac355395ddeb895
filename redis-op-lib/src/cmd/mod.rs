//! Request frames for the commands the client issues.

mod get;
pub use get::Get;

mod set;
pub use set::Set;

mod quit;
pub use quit::Quit;

use crate::Frame;

/// Converts a command into the frame sent to the server.
pub trait Protocol {
    fn into_frame(self) -> Frame;
}
