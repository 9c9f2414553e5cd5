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

//! listener and per-connection glue: accept, wrap the raw stream into line oriented
//! read/write directions, run the command loop, tear down.

use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt,AsyncWriteExt,BufReader},
    net::{TcpListener,TcpStream,tcp::OwnedWriteHalf},
    sync::mpsc::{self,UnboundedReceiver},
};
use tracing::{debug,info,warn};
use crate::GndConfig;
use crate::airplane::{Airplane,PlaneState};
use crate::errors::Result;
use crate::planelist::PlaneList;
use crate::protocol;
use crate::taxiqueue::{self,TaxiQueue};

/// bind the listener and serve until the process is terminated. Failure to bind is
/// the one fatal error of the whole service.
pub async fn run_server (config: GndConfig)->Result<()> {
    let listener = TcpListener::bind( ("0.0.0.0", config.port)).await?;
    info!("ground control listening on port {}", config.port);
    serve( listener, config).await
}

/// accept loop over an already bound listener (separate so tests can bind an
/// ephemeral port). Constructs the registry, the taxi queue and the manager task,
/// then spawns one handler task per accepted connection, without an upper bound.
pub async fn serve (listener: TcpListener, config: GndConfig)->Result<()> {
    let planes = Arc::new( PlaneList::new());
    let queue = Arc::new( TaxiQueue::new());
    taxiqueue::spawn_manager( queue.clone(), planes.clone(), config.separation);

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("got connection from {}", addr);
                let planes = planes.clone();
                let queue = queue.clone();
                tokio::spawn( client_task( stream, planes, queue));
            }
            Err(e) => warn!("accept failed: {}", e), // transient, keep serving others
        }
    }
}

/// one task per connection: owns the plane record from registration to removal and
/// feeds the protocol until the plane is done or the client is gone
async fn client_task (stream: TcpStream, planes: Arc<PlaneList>, queue: Arc<TaxiQueue>) {
    // split into independently owned read/write directions - interleaving buffered
    // reads and writes on one handle confuses the stream position
    let (rx, tx) = stream.into_split();
    let (sender, outbound) = mpsc::unbounded_channel();
    let writer = tokio::spawn( write_lines( tx, outbound));

    let plane = Arc::new( Airplane::new( sender));
    planes.add( plane.clone());

    let mut reader = BufReader::new( rx);
    let mut buf = Vec::new();
    while plane.state() != PlaneState::Done {
        buf.clear();
        match reader.read_until( b'\n', &mut buf).await {
            Ok(0) => break, // EOF, client disconnected
            Ok(_) => {
                // lossy conversion: garbage bytes become an unknown command, not a
                // dead connection
                let line = String::from_utf8_lossy( &buf);
                protocol::docommand( &plane, &line, &planes, &queue);
            }
            Err(e) => {
                debug!("read from {} failed: {}", plane, e);
                break;
            }
        }
    }

    // unregister and release the channel exactly once, on every exit path
    info!("client {} disconnected", plane);
    planes.remove( &plane);
    queue.wake(); // the departed plane might have been the watched queue head

    drop( plane); // last sender clone - the writer drains pending lines and exits
    let _ = writer.await;
}

async fn write_lines (mut tx: OwnedWriteHalf, mut outbound: UnboundedReceiver<String>) {
    while let Some(line) = outbound.recv().await {
        if tx.write_all( format!("{}\n", line).as_bytes()).await.is_err() {
            break; // peer gone, remaining output is undeliverable
        }
    }
    // dropping tx closes the write direction
}
