//! Host callback contract
//!
//! The editor keeps only an in-memory copy of the layout. Every committed
//! mutation is handed to the host, which persists it and reports back the
//! authoritative id or an error.

use std::collections::BTreeMap;

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::{AppError, AppResult, ErrorCode};

/// Outbound callbacks from the editor surface
pub trait LayoutHost {
    /// Persist a new table and return its id
    fn add(&mut self, draft: &DiningTableCreate) -> AppResult<i64>;

    /// Persist a partial update
    fn update(&mut self, id: i64, patch: &DiningTableUpdate) -> AppResult<()>;

    /// Persist a deletion
    fn delete(&mut self, id: i64) -> AppResult<()>;

    /// Selection changed; `None` clears it
    fn select(&mut self, id: Option<i64>);
}

/// Call received by a [`MemoryHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Add(DiningTableCreate),
    Update(i64, DiningTableUpdate),
    Delete(i64),
    Select(Option<i64>),
}

/// In-memory host: a table store with a call log.
///
/// Used by hosts without a backend (demos, offline mode) and by tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    rows: BTreeMap<i64, DiningTable>,
    calls: Vec<HostCall>,
    fail_next: Option<ErrorCode>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = DiningTable>) -> Self {
        Self {
            rows: rows.into_iter().map(|r| (r.id, r)).collect(),
            ..Default::default()
        }
    }

    pub fn rows(&self) -> Vec<DiningTable> {
        self.rows.values().cloned().collect()
    }

    pub fn row(&self, id: i64) -> Option<&DiningTable> {
        self.rows.get(&id)
    }

    /// Successful calls, in order
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Make the next add/update/delete fail with `code`
    pub fn fail_next(&mut self, code: ErrorCode) {
        self.fail_next = Some(code);
    }

    fn check_failure(&mut self) -> AppResult<()> {
        match self.fail_next.take() {
            Some(code) => Err(AppError::new(code)),
            None => Ok(()),
        }
    }
}

impl LayoutHost for MemoryHost {
    fn add(&mut self, draft: &DiningTableCreate) -> AppResult<i64> {
        self.check_failure()?;

        let mut id = shared::util::snowflake_id();
        while self.rows.contains_key(&id) {
            id += 1;
        }
        self.rows.insert(
            id,
            DiningTable {
                id,
                name: draft.name.clone(),
                zone_id: draft.zone_id,
                capacity: draft.capacity.unwrap_or(1),
                shape: draft.shape.unwrap_or_default(),
                pos_x: draft.pos_x,
                pos_y: draft.pos_y,
                is_active: true,
            },
        );
        self.calls.push(HostCall::Add(draft.clone()));
        Ok(id)
    }

    fn update(&mut self, id: i64, patch: &DiningTableUpdate) -> AppResult<()> {
        self.check_failure()?;

        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::new(ErrorCode::TableNotFound).with_detail("id", id))?;
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(zone_id) = patch.zone_id {
            row.zone_id = zone_id;
        }
        if let Some(capacity) = patch.capacity {
            row.capacity = capacity;
        }
        if let Some(shape) = patch.shape {
            row.shape = shape;
        }
        if let Some(x) = patch.pos_x {
            row.pos_x = x;
        }
        if let Some(y) = patch.pos_y {
            row.pos_y = y;
        }
        if let Some(active) = patch.is_active {
            row.is_active = active;
        }
        self.calls.push(HostCall::Update(id, patch.clone()));
        Ok(())
    }

    fn delete(&mut self, id: i64) -> AppResult<()> {
        self.check_failure()?;
        self.rows.remove(&id);
        self.calls.push(HostCall::Delete(id));
        Ok(())
    }

    fn select(&mut self, id: Option<i64>) {
        self.calls.push(HostCall::Select(id));
    }
}
