// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Result;
use crate::model::DisplayPost;
use rivulet_core::{BehaviorSubject, SubjectStream};
use tracing::debug;

/// The display list. Only the dispatcher's commit step writes to it.
///
/// Backed by a behavior subject, so a new observer first sees the current rows.
/// Clones share the same list.
#[derive(Clone)]
pub struct PostBoard {
    rows: BehaviorSubject<Vec<DisplayPost>>,
}

impl PostBoard {
    pub fn new() -> Self {
        Self {
            rows: BehaviorSubject::new(Vec::new()),
        }
    }

    /// Replaces the displayed rows.
    ///
    /// # Errors
    ///
    /// `DemoError::Lifecycle` once the board has been closed.
    pub fn commit(&self, rows: Vec<DisplayPost>) -> Result<()> {
        debug!(rows = rows.len(), "board: commit");
        self.rows.next(rows)?;
        Ok(())
    }

    /// Snapshot of the current rows.
    pub fn rows(&self) -> Vec<DisplayPost> {
        self.rows.value()
    }

    /// Observe commits, starting with the current rows.
    pub fn subscribe(&self) -> Result<SubjectStream<Vec<DisplayPost>>> {
        Ok(self.rows.subscribe()?)
    }

    pub fn close(&self) {
        self.rows.close();
    }

    pub fn is_closed(&self) -> bool {
        self.rows.is_closed()
    }
}

impl Default for PostBoard {
    fn default() -> Self {
        Self::new()
    }
}
