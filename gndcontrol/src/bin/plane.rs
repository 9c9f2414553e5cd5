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

//! interactive airplane console: connects to a ground control server, forwards stdin
//! lines as commands and prints whatever the server sends back (including unsolicited
//! TAKEOFF/NOTICE pushes)

use anyhow::Result;
use clap::Parser;
use tokio::{
    io::{self,AsyncBufReadExt,AsyncWriteExt,BufReader},
    net::TcpStream,
};

#[derive(Parser)]
#[command(about="airplane console for the ground control server")]
struct Args {
    #[arg(help="server address, e.g. localhost:8080")]
    url: String,
}

#[tokio::main]
async fn main ()->Result<()> {
    let args = Args::parse();

    let stream = TcpStream::connect( &args.url).await?;
    let (rx, mut tx) = stream.into_split();

    let mut server_lines = BufReader::new( rx).lines();
    let mut stdin_lines = BufReader::new( io::stdin()).lines();

    loop {
        tokio::select! {
            line = server_lines.next_line() => {
                match line? {
                    Some(line) => println!("{}", line),
                    None => break, // server closed the connection
                }
            }
            line = stdin_lines.next_line() => {
                match line? {
                    Some(line) => tx.write_all( format!("{}\n", line).as_bytes()).await?,
                    None => break, // stdin closed
                }
            }
        }
    }

    Ok(())
}
