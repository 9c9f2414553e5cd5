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

#![allow(unused)]

use std::{sync::Arc, thread};
use tokio::sync::mpsc::{self,UnboundedReceiver};
use gndcontrol::airplane::{Airplane,PlaneState};
use gndcontrol::planelist::PlaneList;

// run with "cargo test test_xx -- --nocapture"

fn new_plane ()->(Arc<Airplane>, UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new( Airplane::new( tx)), rx)
}

#[test]
fn test_find_skips_unregistered () {
    let planes = PlaneList::new();
    let (plane, _rx) = new_plane();
    planes.add( plane.clone());

    assert!( planes.find("AA1").is_none());

    assert!( planes.change_id( &plane, "AA1"));
    // id is set but the plane has not reached the terminal yet
    assert!( planes.find("AA1").is_none());

    plane.set_state( PlaneState::AtTerminal);
    let found = planes.find("AA1").expect("registered plane not found");
    assert!( Arc::ptr_eq( &found, &plane));
}

#[test]
fn test_change_id_rejects_duplicates () {
    let planes = PlaneList::new();
    let (p1, _rx1) = new_plane();
    let (p2, _rx2) = new_plane();
    planes.add( p1.clone());
    planes.add( p2.clone());

    assert!( planes.change_id( &p1, "AA1"));
    p1.set_state( PlaneState::AtTerminal);

    // second record cannot take the same id
    assert!( !planes.change_id( &p2, "AA1"));
    assert!( planes.change_id( &p2, "BB2"));
}

#[test]
fn test_registration_in_flight_blocks_duplicate () {
    let planes = PlaneList::new();
    let (p1, _rx1) = new_plane();
    let (p2, _rx2) = new_plane();
    planes.add( p1.clone());
    planes.add( p2.clone());

    // p1 has the id but is still unregistered (state not advanced yet) - the id is
    // taken nevertheless
    assert!( planes.change_id( &p1, "AA1"));
    assert!( !planes.change_id( &p2, "AA1"));
}

#[test]
fn test_concurrent_registration_single_winner () {
    let planes = Arc::new( PlaneList::new());

    let mut keep = Vec::new();
    let mut handles = Vec::new();
    for _ in 0..8 {
        let (plane, rx) = new_plane();
        planes.add( plane.clone());
        keep.push( rx);

        let planes = planes.clone();
        handles.push( thread::spawn( move || {
            let won = planes.change_id( &plane, "AA1");
            if won {
                plane.set_state( PlaneState::AtTerminal);
            }
            won
        }));
    }

    let winners = handles.into_iter()
        .map( |h| h.join().unwrap())
        .filter( |won| *won)
        .count();
    assert_eq!( winners, 1);
    assert!( planes.find("AA1").is_some());
}

#[test]
fn test_remove_by_identity () {
    let planes = PlaneList::new();
    let (p1, _rx1) = new_plane();
    let (p2, _rx2) = new_plane();
    planes.add( p1.clone());
    planes.add( p2.clone());

    assert!( planes.change_id( &p1, "AA1"));
    p1.set_state( PlaneState::AtTerminal);
    assert!( planes.change_id( &p2, "BB2"));
    p2.set_state( PlaneState::AtTerminal);

    planes.remove( &p1);
    assert_eq!( planes.len(), 1);
    assert!( planes.find("AA1").is_none());
    assert!( planes.find("BB2").is_some());

    // removing again is an anomaly but must not panic
    planes.remove( &p1);
    assert_eq!( planes.len(), 1);
}
