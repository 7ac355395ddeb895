//! The major components are:
//! * `client`: an async connection to a Redis server issuing GET, SET and QUIT.
//! * `cmd`: the frames for the supported Redis commands.
//! * `frame`: represents a single Redis protocol frame.
//! * `school`: the connect, get, set, get, quit sequence run by `redis-op-async`.

#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]

pub mod clients;
pub use clients::Client;

pub mod cmd;

mod connection;
pub use connection::Connection;

pub mod frame;
pub use frame::Frame;

pub mod school;
pub use school::ScriptConfig;

/// Default port that a redis server listens on.
pub const DEFAULT_PORT: u16 = 6379;

/// Default host the script connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// simple Error. It should be specifically defined by enum.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;
