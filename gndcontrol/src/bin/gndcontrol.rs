/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the air traffic ground control server executable

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use gndcontrol::{GndConfig, load_config, server};

#[derive(Parser)]
#[command(about="air traffic ground control server")]
struct Args {
    #[arg(long, help="pathname of RON config to load (built-in defaults otherwise)")]
    config: Option<String>,

    #[arg(long, help="override the listener port")]
    port: Option<u16>,
}

#[tokio::main]
async fn main ()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config( path)?,
        None => GndConfig::default(),
    };
    if let Some(port) = args.port {
        config.port = port;
    }

    server::run_server( config).await?;
    Ok(())
}
