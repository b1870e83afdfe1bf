//! The immutable touchpoint table.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::filter::{FilterSet, SlicerOptions};
use crate::raw::RawTouchpoint;
use crate::schema::validate_rows;
use crate::touchpoint::Touchpoint;
use crate::window::ObservationWindow;

/// Validated, read-only touchpoint records.
///
/// There is no mutation API: a table is built once by [`TouchpointTable::load`]
/// and shared by reference for the rest of an analysis session.
#[derive(Debug, Clone)]
pub struct TouchpointTable {
    records: Vec<Touchpoint>,
    window: ObservationWindow,
}

impl TouchpointTable {
    /// Validate raw rows against the default observation window.
    pub fn load<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawTouchpoint>,
    {
        Self::load_with_window(rows, ObservationWindow::default())
    }

    /// Validate raw rows against `window`.
    ///
    /// Fails with [`Error::Validation`] listing every offending row; no
    /// partial table is returned.
    pub fn load_with_window<I>(rows: I, window: ObservationWindow) -> Result<Self>
    where
        I: IntoIterator<Item = RawTouchpoint>,
    {
        let rows: Vec<RawTouchpoint> = rows.into_iter().collect();

        match validate_rows(&rows, &window) {
            Ok(records) => {
                info!(rows = records.len(), %window, "Loaded touchpoint table");
                Ok(Self { records, window })
            }
            Err(violations) => {
                let err = Error::validation(violations);
                warn!(
                    rows = rows.len(),
                    rejected = err.offending_rows().len(),
                    "Rejected touchpoint rows"
                );
                Err(err)
            }
        }
    }

    pub fn records(&self) -> &[Touchpoint] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Touchpoint> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn window(&self) -> &ObservationWindow {
        &self.window
    }

    /// Records satisfying every constraint of `filters`, in table order.
    pub fn filter(&self, filters: &FilterSet) -> Vec<&Touchpoint> {
        let selected: Vec<&Touchpoint> = self
            .records
            .iter()
            .filter(|r| filters.matches(r))
            .collect();
        debug!(selected = selected.len(), total = self.records.len(), "Applied filters");
        selected
    }

    /// Number of distinct HCP identifiers.
    pub fn distinct_hcps(&self) -> usize {
        count_distinct_hcps(&self.records)
    }

    /// Distinct values offered by each slicer.
    pub fn slicer_options(&self) -> SlicerOptions {
        SlicerOptions::from_records(&self.records)
    }
}

impl<'a> IntoIterator for &'a TouchpointTable {
    type Item = &'a Touchpoint;
    type IntoIter = std::slice::Iter<'a, Touchpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Number of distinct HCP identifiers among `records`.
pub fn count_distinct_hcps<'a, I>(records: I) -> usize
where
    I: IntoIterator<Item = &'a Touchpoint>,
{
    records
        .into_iter()
        .map(|r| r.hcp_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}
