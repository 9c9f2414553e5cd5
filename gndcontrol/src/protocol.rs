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

//! the application layer protocol between airplanes and ground control.
//!
//! One command per line: `REG <flightid>`, `REQTAXI`, `REQPOS`, `REQAHEAD`, `INAIR`,
//! `BYE`. Replies are `OK`/`OK <data>`/`ERR <description>`, plus the unsolicited
//! `TAKEOFF` and `NOTICE <text>` pushes. Protocol violations answer with `ERR` and
//! leave the plane state untouched - they are never fatal to the connection.

use std::sync::Arc;
use tracing::{debug,info};
use crate::MAX_FLIGHT_ID;
use crate::airplane::{Airplane,PlaneState};
use crate::planelist::PlaneList;
use crate::taxiqueue::TaxiQueue;

/// parse one input line and perform the command in it, if any. An empty line yields
/// no reply and no state change.
pub fn docommand (plane: &Arc<Airplane>, line: &str, planes: &PlaneList, queue: &TaxiQueue) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    // first whitespace delimited token is the command (case-sensitive), the trimmed
    // remainder is the argument
    let (cmd, rest) = match line.split_once( char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };

    match cmd {
        "REG" => cmd_reg( plane, rest, planes),
        "REQTAXI" => cmd_reqtaxi( plane, queue),
        "REQPOS" => cmd_reqpos( plane, queue),
        "REQAHEAD" => cmd_reqahead( plane, queue),
        "INAIR" => cmd_inair( plane, queue),
        "BYE" => cmd_bye( plane),
        _ => send_err( plane, "Unknown command"),
    }
}

fn cmd_reg (plane: &Arc<Airplane>, rest: &str, planes: &PlaneList) {
    if plane.state() != PlaneState::Unregistered {
        send_err( plane, &format!("Already registered as {}", plane.id()));
        return;
    }

    if rest.is_empty() {
        send_err( plane, "REG missing flightid");
        return;
    }

    if !rest.chars().all( |c| c.is_ascii_alphanumeric()) {
        send_err( plane, "Invalid flight id -- only alphanumeric characters allowed");
        return;
    }

    if rest.len() > MAX_FLIGHT_ID {
        send_err( plane, "Invalid flight id -- too long");
        return;
    }

    // duplicate check and id update are one atomic registry step - two concurrent
    // REGs of the same id cannot both pass
    if !planes.change_id( plane, rest) {
        send_err( plane, "Duplicate flight id");
        return;
    }

    plane.set_state( PlaneState::AtTerminal);
    info!("flight {} registered", rest);

    send_ok( plane);
}

fn cmd_reqtaxi (plane: &Arc<Airplane>, queue: &TaxiQueue) {
    if plane.state() == PlaneState::Unregistered {
        send_err( plane, "Unregistered plane -- cannot process request");
        return;
    }

    if plane.state() != PlaneState::AtTerminal {
        send_err( plane, "Plane must be at the terminal to request taxi");
        return;
    }

    let flight_id = plane.id();
    let pos = queue.add( &flight_id);
    plane.set_state( PlaneState::Taxiing);
    send_ok( plane);

    // a flight that entered an empty queue is cleared right here, without the
    // separation delay - the manager only grants successors
    if pos == 1 {
        reply( plane, "TAKEOFF");
        plane.set_state( PlaneState::Cleared);
        info!("clearing flight {} for takeoff", flight_id);
    }
}

fn cmd_reqpos (plane: &Arc<Airplane>, queue: &TaxiQueue) {
    if plane.state() == PlaneState::Unregistered {
        send_err( plane, "Unregistered plane -- cannot process request");
        return;
    }

    if plane.state() != PlaneState::Taxiing {
        send_err( plane, "Plane not taxiing -- cannot process request");
        return;
    }

    let pos = queue.get_pos( &plane.id());
    if pos == 0 {
        send_err( plane, "Plane not in taxi queue");
    } else {
        reply( plane, &format!("OK {}", pos));
    }
}

fn cmd_reqahead (plane: &Arc<Airplane>, queue: &TaxiQueue) {
    if plane.state() == PlaneState::Unregistered {
        send_err( plane, "Unregistered plane -- cannot process request");
        return;
    }

    if plane.state() != PlaneState::Taxiing {
        send_err( plane, "Plane not taxiing -- cannot process request");
        return;
    }

    let ahead = queue.get_ahead( &plane.id());
    if ahead.is_empty() {
        reply( plane, "OK No planes ahead");
    } else {
        reply( plane, &format!("OK {}", ahead));
    }
}

fn cmd_inair (plane: &Arc<Airplane>, queue: &TaxiQueue) {
    if plane.state() != PlaneState::Cleared {
        send_err( plane, "Plane not cleared for takeoff -- cannot process INAIR command");
        return;
    }

    let flight_id = plane.id();
    plane.set_state( PlaneState::InAir);
    queue.remove_airborne( &flight_id);

    send_ok( plane);
    reply( plane, "NOTICE Disconnecting from ground control - please connect to air control");

    info!("flight {} is in the air", flight_id);
    plane.set_state( PlaneState::Done);
}

fn cmd_bye (plane: &Arc<Airplane>) {
    plane.set_state( PlaneState::Done);
}

//--- the response functions, to keep reply formatting in one place

fn send_ok (plane: &Airplane) {
    reply( plane, "OK");
}

fn send_err (plane: &Airplane, desc: &str) {
    reply( plane, &format!("ERR {}", desc));
}

fn reply (plane: &Airplane, line: &str) {
    if plane.send_line( line).is_err() {
        // writer task already gone - the client disconnected mid-command
        debug!("dropped reply to {}: {}", plane, line);
    }
}
