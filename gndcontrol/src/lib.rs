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

//! ground control service for sequential takeoff clearance
//!
//! Airplanes connect over a line oriented TCP protocol, register a flight id, request
//! taxi clearance and are released for takeoff one at a time in strict arrival order.
//! The per-connection protocol lives in [`protocol`], the shared plane registry in
//! [`planelist`] and the clearance scheduler in [`taxiqueue`]. [`server`] ties them
//! together with one handler task per connection.

use std::{fs, path::Path, time::Duration};
use serde::{Serialize,Deserialize};

pub mod airplane;
pub mod planelist;
pub mod taxiqueue;
pub mod protocol;
pub mod server;

pub mod errors;
use errors::Result;

/// max number of chars in a registered flight id
pub const MAX_FLIGHT_ID: usize = 20;

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct GndConfig {
    pub port: u16, // port the listener binds on (all interfaces)
    pub separation: Duration, // delay between one takeoff and the next clearance
}

impl Default for GndConfig {
    fn default()->Self {
        GndConfig { port: 8080, separation: Duration::from_secs(4) }
    }
}

pub fn load_config<P: AsRef<Path>> (path: P)->Result<GndConfig> {
    let data = fs::read_to_string( path)?;
    Ok( ron::from_str( &data)? )
}
