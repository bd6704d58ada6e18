//! gdhttp - a CLI, cURL-like tool for GeneDock signed APIs.

use std::io;
use std::io::IsTerminal;
use std::io::Read;
use std::process;

use bytes::Bytes;
use clap::Parser;
use gdhttp_core::{parse_positional_arguments, Credential, Result};
use log::debug;

mod args;
mod client;
mod config;
mod dump;

use args::Args;
use client::Client;
use config::Config;
use dump::DumpConfig;

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("gdhttp: error: {err}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let pa = parse_positional_arguments(&args.args)?;
    let params = read_stdin_body()?;

    let config = match config::config_path(args.config.as_deref()) {
        Some(path) => Config::load(&path)?,
        None => None,
    };
    let credential = config::resolve_credential(
        Credential::new(args.access_key_id.clone(), args.access_key_secret.clone()),
        config.as_ref(),
        &pa.url,
    );
    if !args.no_auth && !credential.is_valid() {
        debug!("no credential configured for {}", pa.url);
    }

    let hook = DumpConfig::new(args.verbose, args.body);
    let client = Client::new(credential, args.timeout)?;
    client
        .do_request(pa.method, &pa.url, params, args.no_auth, &hook)
        .await
}

/// Anything piped in becomes the request body. An interactive terminal
/// contributes nothing.
fn read_stdin_body() -> Result<Bytes> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(Bytes::new());
    }

    let mut buf = Vec::new();
    stdin.read_to_end(&mut buf)?;
    Ok(buf.into())
}
