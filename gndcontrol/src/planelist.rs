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

use std::sync::{Arc,RwLock};
use tracing::warn;
use crate::airplane::{Airplane,PlaneState};

/// the shared registry of all connected planes. Insertion ordered, no duplicate
/// records, at most one record with a given non-empty id outside `Unregistered`.
///
/// Lookups take the read lock and may proceed in parallel; `add`, `change_id` and
/// `remove` take the write lock. Ids are only ever written under the write lock so
/// a concurrent `find` cannot observe a half-updated id.
pub struct PlaneList {
    planes: RwLock<Vec<Arc<Airplane>>>,
}

impl PlaneList {
    pub fn new ()->Self {
        PlaneList { planes: RwLock::new( Vec::new()) }
    }

    /// add a newly connected plane. No uniqueness check here - records enter in
    /// `Unregistered` state with an empty id and only acquire one via `change_id`.
    pub fn add (&self, plane: Arc<Airplane>) {
        let mut planes = self.planes.write().unwrap();
        planes.push( plane);
    }

    /// set the flight id of `plane` if no other record carries `new_id`, as one atomic
    /// step with respect to all `find` calls. Returns false if the id is taken.
    ///
    /// The duplicate scan also matches records that are still unregistered but already
    /// have this id - that is a registration in flight (REG sets the id before it
    /// advances the state), and admitting a second one would let two concurrent REGs
    /// of the same id both succeed.
    pub fn change_id (&self, plane: &Arc<Airplane>, new_id: &str)->bool {
        let planes = self.planes.write().unwrap();
        for p in planes.iter() {
            if !Arc::ptr_eq( p, plane) && p.id() == new_id {
                return false;
            }
        }
        plane.set_id( new_id);
        true
    }

    /// find the first registered plane with the given flight id. Unregistered records
    /// never match, whatever their id field holds.
    pub fn find (&self, flight_id: &str)->Option<Arc<Airplane>> {
        let planes = self.planes.read().unwrap();
        for p in planes.iter() {
            if p.state() != PlaneState::Unregistered && p.id() == flight_id {
                return Some( p.clone());
            }
        }
        None
    }

    /// remove a plane record by identity. Called from its own connection handler on
    /// exit. A missing record is an internal anomaly - logged, never fatal.
    pub fn remove (&self, plane: &Arc<Airplane>) {
        let mut planes = self.planes.write().unwrap();
        if let Some(i) = planes.iter().position( |p| Arc::ptr_eq( p, plane)) {
            planes.remove( i);
        } else {
            warn!("couldn't find plane {} to remove - this shouldn't happen", plane);
        }
    }

    pub fn len (&self)->usize {
        self.planes.read().unwrap().len()
    }
}
