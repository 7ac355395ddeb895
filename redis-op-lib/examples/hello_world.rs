//! Hello world client.
//!
//! Needs a redis server on the default port:
//!
//!     redis-server
//!
//! then:
//!
//!     cargo run -p redis-op-lib --example hello_world

use redis_op_lib::{Client, Result};

#[tokio::main]
pub async fn main() -> Result<()> {
    let mut client = Client::connect("127.0.0.1:6379").await?;

    client.set("hello", "world".into()).await?;

    let result = client.get("hello").await?;

    println!("got value from the server; success={:?}", result.is_some());

    client.quit().await
}
