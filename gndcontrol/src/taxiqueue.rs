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

//! the taxi queue and its manager task.
//!
//! The queue keeps flight ids in strict REQTAXI arrival order. The manager is one
//! long-lived task that watches the queue head: once the head flight reports airborne
//! (or its record vanishes) the head is dequeued and - after the configured separation
//! interval - the next flight is cleared for takeoff. At most one flight holds an
//! active clearance at any time.

use std::{sync::{Arc,Mutex}, time::Duration};
use tokio::{sync::Notify, task::JoinHandle, time::sleep};
use tracing::{debug,info};
use crate::airplane::PlaneState;
use crate::planelist::PlaneList;

pub struct TaxiQueue {
    queue: Mutex<Vec<String>>, // flight ids in arrival order, head at index 0
    wakeup: Notify, // takes the place of the queue condition variable
}

impl TaxiQueue {
    pub fn new ()->Self {
        TaxiQueue { queue: Mutex::new( Vec::new()), wakeup: Notify::new() }
    }

    /// append a flight to the tail and wake the manager. Returns the 1-based position
    /// of the appended entry so the caller can tell whether this flight just became
    /// the head (position queries by id would report a stale entry should the same id
    /// re-enter while a leftover of a vanished plane is still queued).
    pub fn add (&self, flight_id: &str)->usize {
        let mut queue = self.queue.lock().unwrap();
        queue.push( flight_id.to_string());
        self.wakeup.notify_one();
        queue.len()
    }

    /// 1-based queue position of the given flight, or 0 if it is not queued
    pub fn get_pos (&self, flight_id: &str)->usize {
        let queue = self.queue.lock().unwrap();
        match queue.iter().position( |id| id == flight_id) {
            Some(i) => i + 1,
            None => 0,
        }
    }

    /// the ids ahead of the given flight, in order, comma separated. Empty if the
    /// flight is at the head or not queued at all.
    pub fn get_ahead (&self, flight_id: &str)->String {
        let queue = self.queue.lock().unwrap();
        match queue.iter().position( |id| id == flight_id) {
            Some(i) if i > 0 => queue[..i].join( ", "),
            _ => String::new(),
        }
    }

    /// remove a flight that reported airborne, wherever it is queued, and wake the
    /// manager so it can re-inspect the head
    pub fn remove_airborne (&self, flight_id: &str) {
        let mut queue = self.queue.lock().unwrap();
        if let Some(i) = queue.iter().position( |id| id == flight_id) {
            queue.remove( i);
        }
        self.wakeup.notify_one();
    }

    /// explicit manager wakeup, used by connection teardown so that a head whose
    /// plane record vanished is re-examined right away
    pub fn wake (&self) {
        self.wakeup.notify_one();
    }

    pub fn head (&self)->Option<String> {
        let queue = self.queue.lock().unwrap();
        queue.first().cloned()
    }

    pub fn len (&self)->usize {
        self.queue.lock().unwrap().len()
    }

    fn remove_head_if (&self, flight_id: &str) {
        let mut queue = self.queue.lock().unwrap();
        if queue.first().map( |id| id == flight_id).unwrap_or(false) {
            queue.remove( 0);
        }
    }

    async fn await_wakeup (&self) {
        self.wakeup.notified().await;
    }
}

/// spawn the queue manager. Called once at startup; the task runs for the process
/// lifetime.
pub fn spawn_manager (queue: Arc<TaxiQueue>, planes: Arc<PlaneList>, separation: Duration)->JoinHandle<()> {
    tokio::spawn( manager_loop( queue, planes, separation))
}

async fn manager_loop (queue: Arc<TaxiQueue>, planes: Arc<PlaneList>, separation: Duration) {
    loop {
        // block (no polling) until the queue has a head
        let head = loop {
            match queue.head() {
                Some(id) => break id,
                None => queue.await_wakeup().await,
            }
        };

        // wait for the head flight to depart: airborne, record vanished, or already
        // dequeued by its INAIR processing. Re-resolve on every wakeup - wakeups can
        // be lost in coalescing or fire redundantly, and the plane can disappear at
        // any point.
        let mut airborne = false;
        loop {
            if queue.head().as_deref() != Some( head.as_str()) {
                airborne = true; // only INAIR processing removes entries behind our back
                break;
            }
            let state = planes.find( &head).map( |plane| plane.state());
            match state {
                Some(state) if state < PlaneState::InAir => queue.await_wakeup().await,
                _ => {
                    airborne = state.is_some(); // a vanished record departs without takeoff
                    queue.remove_head_if( &head);
                    break;
                }
            }
        }

        if airborne {
            info!("flight {} has taken off", head);
        } else {
            debug!("flight {} left the queue without takeoff", head);
        }

        // clear the next flight after the separation interval. The sleep must not hold
        // the queue lock so REQTAXI/REQPOS/REQAHEAD stay responsive during it.
        if queue.head().is_some() {
            sleep( separation).await;
            if let Some(next) = queue.head() {
                if let Some(plane) = planes.find( &next) {
                    // re-check right before granting - a flight that is no longer
                    // taxiing was already cleared or is on its way out, and must not
                    // receive a second TAKEOFF
                    if plane.state() == PlaneState::Taxiing {
                        plane.set_state( PlaneState::Cleared);
                        let _ = plane.send_line( "TAKEOFF");
                        info!("clearing flight {} for takeoff", next);
                        queue.wake();
                    }
                }
            }
        }
    }
}
