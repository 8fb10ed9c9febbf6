// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Neron-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Neron and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Neron CLI entrypoint.
//!
//! By default this runs the interactive TUI and serves MCP over streamable
//! HTTP at `http://127.0.0.1:<port>/mcp`.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool
//! integrations).

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};

use neron::bridge::{AgentRelay, Dispatcher, EventBridge};
use neron::engine::ViewState;
use neron::mcp::NeronMcp;
use neron::store::GraphCache;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--mcp-http-port <port>]\n  {program} --mcp\n\nTUI mode (default) serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\n--mcp runs the MCP server over stdio instead of the TUI."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    mcp_http_port: Option<u16>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            _ => return Err(()),
        }
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "neron".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let cache = GraphCache::global().clone();
        let dispatcher = Dispatcher::new(ViewState::bootstrap(), cache);
        let bridge = EventBridge::new(dispatcher, AgentRelay::new());
        let mcp = NeronMcp::new(bridge.clone())?;

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        if options.mcp {
            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }

        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    eprintln!("neron: MCP HTTP server error: {err}");
                }
            });

            let tui_bridge = bridge.clone();
            let tui_handle = tokio::runtime::Handle::current();
            let tui_join = tokio::task::spawn_blocking(move || {
                neron::tui::run(tui_bridge, tui_handle).map_err(|err| err.to_string())
            })
            .await;

            shutdown_token.cancel();
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("neron: {err}");
        std::process::exit(1);
    }
}
