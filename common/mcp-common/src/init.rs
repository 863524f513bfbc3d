//! Tracing setup shared by the MCP server binaries
//!
//! stdout carries the MCP protocol, so every log line goes to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive for a crate, raised to `debug` when `verbose` is set
fn crate_directive(crate_name: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{}={}", crate_name, level)
}

/// Initialize tracing/logging for an MCP server
///
/// - `RUST_LOG` filters are honoured; the crate directive is added on top
/// - `LOG_FORMAT=json` selects the JSON formatter, otherwise plain text
///   without ANSI colors
///
/// `crate_name` is the library target name (e.g. `"workspace_mcp"`).
pub fn init_tracing(crate_name: &str, verbose: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::from_default_env().add_directive(crate_directive(crate_name, verbose).parse()?);

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
