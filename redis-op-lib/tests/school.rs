use redis_op_lib::school::{self, ScriptConfig};
use redis_op_lib::Client;

use bytes::Bytes;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const GET_HOLBERTON: &str = "*2\r\n$3\r\nget\r\n$9\r\nHolberton\r\n";
const SET_SAN_FRANCISCO: &str =
    "*3\r\n$3\r\nset\r\n$21\r\nHolbertonSanFrancisco\r\n$3\r\n100\r\n";
const GET_SAN_FRANCISCO: &str = "*2\r\n$3\r\nget\r\n$21\r\nHolbertonSanFrancisco\r\n";
const QUIT: &str = "*1\r\n$4\r\nquit\r\n";

/// Accepts one connection and plays `script`: the exact request expected from
/// the client, then the raw reply. Nothing may follow the script.
async fn start_scripted_peer(
    script: &'static [(&'static str, &'static str)],
) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();

        for (request, reply) in script {
            let mut buf = vec![0; request.len()];
            stream.read_exact(&mut buf).await.unwrap();
            assert_eq!(*request, String::from_utf8_lossy(&buf));

            stream.write_all(reply.as_bytes()).await.unwrap();
        }

        let mut rest = vec![];
        stream.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty(), "unexpected trailing bytes: {:?}", rest);
    });

    (addr, handle)
}

fn config_for(addr: SocketAddr) -> ScriptConfig {
    ScriptConfig {
        addr: addr.to_string(),
        ..ScriptConfig::default()
    }
}

#[tokio::test]
async fn full_sequence() {
    let (addr, peer) = start_scripted_peer(&[
        (GET_HOLBERTON, "$6\r\nSchool\r\n"),
        (SET_SAN_FRANCISCO, "+OK\r\n"),
        (GET_SAN_FRANCISCO, "$3\r\n100\r\n"),
        (QUIT, "+OK\r\n"),
    ])
    .await;

    school::run(&config_for(addr)).await.unwrap();

    peer.await.unwrap();
}

#[tokio::test]
async fn failed_lookup_does_not_stop_the_sequence() {
    let (addr, peer) = start_scripted_peer(&[
        (GET_HOLBERTON, "-ERR server is loading\r\n"),
        (SET_SAN_FRANCISCO, "+OK\r\n"),
        (GET_SAN_FRANCISCO, "$3\r\n100\r\n"),
        (QUIT, "+OK\r\n"),
    ])
    .await;

    school::run(&config_for(addr)).await.unwrap();

    peer.await.unwrap();
}

#[tokio::test]
async fn failed_set_still_quits() {
    let (addr, peer) = start_scripted_peer(&[
        (GET_HOLBERTON, "$-1\r\n"),
        (
            SET_SAN_FRANCISCO,
            "-READONLY You can't write against a read only replica.\r\n",
        ),
        (QUIT, "+OK\r\n"),
    ])
    .await;

    let err = school::run(&config_for(addr)).await.unwrap_err();
    assert_eq!(
        "READONLY You can't write against a read only replica.",
        err.to_string()
    );

    peer.await.unwrap();
}

#[tokio::test]
async fn failed_quit_is_reported() {
    let (addr, peer) = start_scripted_peer(&[
        (GET_HOLBERTON, "$-1\r\n"),
        (SET_SAN_FRANCISCO, "+OK\r\n"),
        (GET_SAN_FRANCISCO, "$3\r\n100\r\n"),
        (QUIT, "-ERR unknown command 'quit'\r\n"),
    ])
    .await;

    let err = school::run(&config_for(addr)).await.unwrap_err();
    assert_eq!("ERR unknown command 'quit'", err.to_string());

    peer.await.unwrap();
}

#[tokio::test]
async fn unreachable_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    assert!(school::connect_to_redis(&addr.to_string()).await.is_err());
    assert!(school::run(&config_for(addr)).await.is_err());
}

#[tokio::test]
async fn display_school_value_returns_what_it_printed() {
    let (addr, peer) = start_scripted_peer(&[
        (GET_HOLBERTON, "$6\r\nSchool\r\n"),
        (GET_SAN_FRANCISCO, "$-1\r\n"),
        (GET_HOLBERTON, "-ERR boom\r\n"),
    ])
    .await;

    let mut client = Client::connect(addr).await.unwrap();

    let value = school::display_school_value(&mut client, "Holberton").await;
    assert_eq!(Some(Bytes::from_static(b"School")), value);

    let value = school::display_school_value(&mut client, "HolbertonSanFrancisco").await;
    assert_eq!(None, value);

    // Errors are swallowed.
    let value = school::display_school_value(&mut client, "Holberton").await;
    assert_eq!(None, value);

    drop(client);
    peer.await.unwrap();
}

#[tokio::test]
async fn set_new_school_propagates_errors() {
    let (addr, peer) = start_scripted_peer(&[
        (SET_SAN_FRANCISCO, "+OK\r\n"),
        (SET_SAN_FRANCISCO, "-OOM command not allowed\r\n"),
    ])
    .await;

    let mut client = Client::connect(addr).await.unwrap();

    school::set_new_school(&mut client, "HolbertonSanFrancisco", "100".into())
        .await
        .unwrap();

    let err = school::set_new_school(&mut client, "HolbertonSanFrancisco", "100".into())
        .await
        .unwrap_err();
    assert_eq!("OOM command not allowed", err.to_string());

    drop(client);
    peer.await.unwrap();
}

#[test]
fn value_lines() {
    assert_eq!(
        "Value for HolbertonSanFrancisco: 100",
        school::value_line("HolbertonSanFrancisco", Some(&Bytes::from_static(b"100")))
    );
    assert_eq!("Value for Holberton: null", school::value_line("Holberton", None));
}

#[test]
fn connection_lines() {
    assert_eq!("Redis client connected to the server", school::connected_line());

    let err: redis_op_lib::Error = "Connection refused (os error 111)".into();
    assert_eq!(
        "Redis client not connected to the server: Connection refused (os error 111)",
        school::not_connected_line(&err)
    );
}

#[test]
fn set_lines() {
    assert_eq!(
        "Value set for HolbertonSanFrancisco",
        school::set_line("HolbertonSanFrancisco")
    );

    let err: redis_op_lib::Error = "OOM command not allowed".into();
    assert_eq!(
        "Error setting value for HolbertonSanFrancisco: OOM command not allowed",
        school::set_error_line("HolbertonSanFrancisco", &err)
    );
}

#[test]
fn get_error_line() {
    let err: redis_op_lib::Error = "ERR server is loading".into();
    assert_eq!(
        "Error retrieving value for Holberton: ERR server is loading",
        school::get_error_line("Holberton", &err)
    );
}

#[test]
fn default_config() {
    let config = ScriptConfig::default();

    assert_eq!("127.0.0.1:6379", config.addr);
    assert_eq!("Holberton", config.existing_school);
    assert_eq!("HolbertonSanFrancisco", config.new_school);
    assert_eq!(Bytes::from_static(b"100"), config.new_value);
}
