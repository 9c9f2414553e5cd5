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

use std::{fmt, sync::{RwLock, atomic::{AtomicU8,Ordering}}};
use tokio::sync::mpsc::UnboundedSender;
use crate::errors::{GndError,Result};

/// protocol state of a connected airplane. Transitions only move forward, with the
/// exception of the unconditional jump to `Done` (BYE, disconnect).
#[repr(u8)]
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord)]
pub enum PlaneState {
    Unregistered = 0,
    AtTerminal,
    Taxiing,
    Cleared,
    InAir,
    Done,
}

impl PlaneState {
    fn from_u8 (v: u8)->PlaneState {
        match v {
            0 => PlaneState::Unregistered,
            1 => PlaneState::AtTerminal,
            2 => PlaneState::Taxiing,
            3 => PlaneState::Cleared,
            4 => PlaneState::InAir,
            _ => PlaneState::Done,
        }
    }
}

/// the per-connection plane record. One is created per accepted connection and dropped
/// when the connection handler terminates.
///
/// Note that `state` is written by the owning connection task but also read by the
/// queue manager task, hence the atomic. Relaxed ordering suffices since state only
/// advances forward and the manager re-checks on every wakeup. The flight id is only
/// written through [`crate::planelist::PlaneList::change_id`], which holds the registry
/// write lock, so `find` never observes a partially written id.
pub struct Airplane {
    id: RwLock<String>,
    state: AtomicU8,
    sender: UnboundedSender<String>, // outbound line channel, drained by the connection's writer task
}

impl Airplane {
    pub fn new (sender: UnboundedSender<String>)->Self {
        Airplane {
            id: RwLock::new( String::new()),
            state: AtomicU8::new( PlaneState::Unregistered as u8),
            sender,
        }
    }

    pub fn state (&self)->PlaneState {
        PlaneState::from_u8( self.state.load( Ordering::Relaxed))
    }

    pub fn set_state (&self, state: PlaneState) {
        self.state.store( state as u8, Ordering::Relaxed);
    }

    pub fn id (&self)->String {
        self.id.read().unwrap().clone()
    }

    pub (crate) fn set_id (&self, new_id: &str) {
        let mut id = self.id.write().unwrap();
        id.clear();
        id.push_str( new_id);
    }

    /// queue a line for transmission to the client (newline appended by the writer task).
    /// Fails once the connection's writer task is gone, which callers treat as a
    /// disconnect in progress, never as a protocol error.
    pub fn send_line (&self, line: impl ToString)->Result<()> {
        self.sender.send( line.to_string()).map_err(|e| GndError::SendError( e.to_string()))
    }
}

impl fmt::Display for Airplane {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        let id = self.id.read().unwrap();
        if id.is_empty() {
            write!( f, "<unregistered> ({:?})", self.state())
        } else {
            write!( f, "{} ({:?})", id, self.state())
        }
    }
}
