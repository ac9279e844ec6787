use std::{collections::VecDeque, sync::RwLock};

use chrono::Utc;

use crate::location_log::{
    location_log_error::LocationLogError,
    location_record::{LocationInput, LocationRecord},
};

pub const DEFAULT_LOCATION_LOG_CAPACITY: usize = 1000;

/// Bounded, in-memory log of picked locations. Lost on restart; once full the
/// oldest record is evicted.
pub struct LocationLog {
    capacity: usize,
    records: RwLock<VecDeque<LocationRecord>>,
}

impl LocationLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Returns the stored record and the number of records now held.
    pub fn append(&self, input: LocationInput) -> Result<(LocationRecord, usize), LocationLogError> {
        let record = LocationRecord::new(input, Utc::now());

        let mut records = self
            .records
            .write()
            .map_err(|_| LocationLogError::PoisonedWrite)?;

        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());

        Ok((record, records.len()))
    }

    /// Oldest first.
    pub fn list(&self) -> Result<Vec<LocationRecord>, LocationLogError> {
        let records = self
            .records
            .read()
            .map_err(|_| LocationLogError::PoisonedRead)?;

        Ok(records.iter().cloned().collect())
    }
}

impl Default for LocationLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_LOG_CAPACITY)
    }
}
