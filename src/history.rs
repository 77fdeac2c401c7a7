use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    CycleParameters, CycleRecord, GestationalInput, GestationalResult, HistoryData,
};

/// Append-only list of past calculations, capped at `max_records`.
///
/// Once the cap is reached the oldest records are dropped. The cap is at
/// least one so the newest record always survives.
#[derive(Debug, Clone)]
pub struct History {
    data: HistoryData,
    max_records: usize,
}

impl History {
    pub fn new(max_records: usize) -> Self {
        Self::from_data(HistoryData::default(), max_records)
    }

    pub fn from_data(data: HistoryData, max_records: usize) -> Self {
        let mut history = Self {
            data,
            max_records: max_records.max(1),
        };
        history.enforce_cap();
        history
    }

    pub fn append(
        &mut self,
        calculated_on: NaiveDate,
        input: GestationalInput,
        cycle: CycleParameters,
        result: GestationalResult,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.data.records.push(CycleRecord {
            id,
            calculated_on,
            mode: input.mode(),
            input,
            cycle,
            result,
        });
        self.enforce_cap();
        id
    }

    pub fn records(&self) -> &[CycleRecord] {
        &self.data.records
    }

    pub fn latest(&self) -> Option<&CycleRecord> {
        self.data.records.last()
    }

    pub fn len(&self) -> usize {
        self.data.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.records.clear();
    }

    pub fn data(&self) -> &HistoryData {
        &self.data
    }

    fn enforce_cap(&mut self) {
        let len = self.data.records.len();
        if len > self.max_records {
            self.data.records.drain(..len - self.max_records);
        }
    }
}
