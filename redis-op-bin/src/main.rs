//!
//! redis-op-async: runs the school GET/SET sequence against a redis server.
//!

#![warn(clippy::pedantic)]

use bytes::Bytes;
use clap::Parser;
use redis_op_lib::{school, ScriptConfig, DEFAULT_HOST, DEFAULT_PORT};
use std::convert::Infallible;
use std::process::ExitCode;

#[cfg(feature = "otel")]
// To be able to set the XrayPropagator
use opentelemetry::global;
#[cfg(feature = "otel")]
// To configure certain options such as sampling rate
use opentelemetry::sdk::trace as sdktrace;
#[cfg(feature = "otel")]
// For passing along the same XrayId across services
use opentelemetry_aws::trace::XrayPropagator;
#[cfg(feature = "otel")]
// OpenTelemetry-specific types (such as `OpenTelemetryLayer`)
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

#[derive(Parser, Debug)]
#[command(
    name = "redis-op-async",
    version,
    author,
    about = "Get and set school values on a Redis server"
)]
struct CliCommand {
    #[clap(long, default_value = DEFAULT_HOST)]
    host: String,

    #[clap(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// School displayed before anything is written.
    #[clap(long, default_value = "Holberton")]
    school: String,

    /// School that receives `--value`.
    #[clap(long, default_value = "HolbertonSanFrancisco")]
    new_school: String,

    #[clap(long, default_value = "100", value_parser = bytes_from)]
    value: Bytes,
}

impl From<CliCommand> for ScriptConfig {
    fn from(cmd: CliCommand) -> ScriptConfig {
        ScriptConfig {
            addr: format!("{}:{}", cmd.host, cmd.port),
            existing_school: cmd.school,
            new_school: cmd.new_school,
            new_value: cmd.value,
        }
    }
}

fn bytes_from(src: &str) -> Result<Bytes, Infallible> {
    Ok(Bytes::from(src.to_string()))
}

/// `flavor = "current_thread"`: the sequence only ever has one request in flight.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(err) = set_up_logging() {
        eprintln!("failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }

    let config = ScriptConfig::from(CliCommand::parse());

    match school::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("An error occurred: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "otel"))]
fn set_up_logging() -> redis_op_lib::Result<()> {
    tracing_subscriber::fmt::try_init()
}

#[cfg(feature = "otel")]
fn set_up_logging() -> Result<(), TryInitError> {
    global::set_text_map_propagator(XrayPropagator::default());

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(opentelemetry_otlp::new_exporter().tonic())
        .with_trace_config(
            sdktrace::config()
                .with_sampler(sdktrace::Sampler::AlwaysOn)
                // Needed in order to convert the trace IDs into an Xray-compatible format
                .with_id_generator(sdktrace::XrayIdGenerator::default()),
        )
        .install_simple()
        .expect("Unable to initialize OtlpPipeline");

    // Create a tracing layer with the configured tracer
    let opentelemetry = tracing_opentelemetry::layer().with_tracer(tracer);

    // Parse an `EnvFilter` configuration from the `RUST_LOG`
    // environment variable.
    let filter = EnvFilter::from_default_env();

    // Use the tracing subscriber `Registry`, or any other subscriber
    // that impls `LookupSpan`
    tracing_subscriber::registry()
        .with(opentelemetry)
        .with(filter)
        .with(fmt::Layer::default())
        .try_init()
}
