//! The school sequence run by `redis-op-async`.
//!
//! Connects, shows the value stored for an existing school, stores a value for
//! a new school, shows it back and closes the connection. Every step prints one
//! line describing its result.

use crate::{Client, DEFAULT_HOST, DEFAULT_PORT};
use bytes::Bytes;
use std::fmt;
use std::str;
use tracing::{info, instrument};

/// What the sequence reads and writes.
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// `host:port` of the server.
    pub addr: String,
    /// School displayed before anything is written.
    pub existing_school: String,
    /// School that receives `new_value`.
    pub new_school: String,
    pub new_value: Bytes,
}

impl Default for ScriptConfig {
    fn default() -> ScriptConfig {
        ScriptConfig {
            addr: format!("{DEFAULT_HOST}:{DEFAULT_PORT}"),
            existing_school: "Holberton".to_string(),
            new_school: "HolbertonSanFrancisco".to_string(),
            new_value: Bytes::from_static(b"100"),
        }
    }
}

/// Open the connection the rest of the sequence runs on.
///
/// # Errors
///
/// The connect error, after it has been printed.
pub async fn connect_to_redis(addr: &str) -> crate::Result<Client> {
    match Client::connect(addr).await {
        Ok(client) => {
            println!("{}", connected_line());
            Ok(client)
        }
        Err(err) => {
            eprintln!("{}", not_connected_line(&err));
            Err(err)
        }
    }
}

/// Store `value` under `school_name`.
///
/// # Errors
///
/// The SET error, after it has been printed.
pub async fn set_new_school(
    client: &mut Client,
    school_name: &str,
    value: Bytes,
) -> crate::Result<()> {
    match client.set(school_name, value).await {
        Ok(()) => {
            println!("{}", set_line(school_name));
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", set_error_line(school_name, &err));
            Err(err)
        }
    }
}

/// Print the value stored under `school_name`.
///
/// A failed GET is printed and swallowed: the caller gets `None`, the same as
/// for a missing key, and the sequence carries on.
pub async fn display_school_value(client: &mut Client, school_name: &str) -> Option<Bytes> {
    match client.get(school_name).await {
        Ok(value) => {
            println!("{}", value_line(school_name, value.as_ref()));
            value
        }
        Err(err) => {
            eprintln!("{}", get_error_line(school_name, &err));
            None
        }
    }
}

/// The line printed for a successful lookup. Missing keys show as `null`.
pub fn value_line(school_name: &str, value: Option<&Bytes>) -> String {
    match value {
        Some(bytes) => match str::from_utf8(bytes) {
            Ok(string) => format!("Value for {school_name}: {string}"),
            Err(_) => format!("Value for {school_name}: {bytes:?}"),
        },
        None => format!("Value for {school_name}: null"),
    }
}

pub fn connected_line() -> &'static str {
    "Redis client connected to the server"
}

pub fn not_connected_line(err: &impl fmt::Display) -> String {
    format!("Redis client not connected to the server: {err}")
}

pub fn set_line(school_name: &str) -> String {
    format!("Value set for {school_name}")
}

pub fn set_error_line(school_name: &str, err: &impl fmt::Display) -> String {
    format!("Error setting value for {school_name}: {err}")
}

pub fn get_error_line(school_name: &str, err: &impl fmt::Display) -> String {
    format!("Error retrieving value for {school_name}: {err}")
}

/// Run the whole sequence.
///
/// Once the connection is open it is always closed with QUIT, even when a step
/// fails.
///
/// # Errors
///
/// The first failure: connecting, setting the new school, or quitting.
#[instrument(skip(config), fields(addr = %config.addr))]
pub async fn run(config: &ScriptConfig) -> crate::Result<()> {
    let mut client = connect_to_redis(&config.addr).await?;

    let outcome = run_steps(&mut client, config).await;
    let closed = client.quit().await;
    info!(steps_ok = outcome.is_ok(), quit_ok = closed.is_ok(), "sequence finished");

    outcome?;
    closed
}

async fn run_steps(client: &mut Client, config: &ScriptConfig) -> crate::Result<()> {
    display_school_value(client, &config.existing_school).await;
    set_new_school(client, &config.new_school, config.new_value.clone()).await?;
    display_school_value(client, &config.new_school).await;

    Ok(())
}
