//! Shared filter state for one view tree.
//!
//! The owner of a view creates a single `FilterStore` and hands clones of it
//! to every consumer (filter panel, grid, badges). Clones share state; there
//! is no global instance, so a consumer can only reach a store it was given.

use std::sync::{Arc, PoisonError, RwLock};

use crate::filter::FilterCriteria;

#[derive(Debug, Default)]
struct StoreState {
    criteria: FilterCriteria,
    revision: u64,
}

/// Current filter criteria with a single replace-whole-object writer.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    inner: Arc<RwLock<StoreState>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreState {
                criteria,
                revision: 0,
            })),
        }
    }

    /// Snapshot of the current criteria.
    pub fn criteria(&self) -> FilterCriteria {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        state.criteria.clone()
    }

    /// Increases every time the stored criteria change.
    pub fn revision(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    /// Replace the criteria wholesale. Returns whether anything changed.
    pub fn set(&self, criteria: FilterCriteria) -> bool {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::replace(&mut state, criteria)
    }

    /// Merge-then-replace: `merge` edits a copy of the current criteria,
    /// which then replaces the stored value in one step.
    pub fn update<F>(&self, merge: F) -> bool
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = state.criteria.clone();
        merge(&mut next);
        Self::replace(&mut state, next)
    }

    /// Restore the default criteria.
    pub fn reset(&self) -> bool {
        self.set(FilterCriteria::default())
    }

    fn replace(state: &mut StoreState, criteria: FilterCriteria) -> bool {
        if state.criteria == criteria {
            return false;
        }
        state.criteria = criteria;
        state.revision += 1;
        tracing::debug!(revision = state.revision, criteria = ?state.criteria, "filters replaced");
        true
    }
}
