//! Working/backup snapshot pair for entity edit screens.
//!
//! A detail-edit screen loads an entity, keeps the server-confirmed value
//! as `backup`, and binds a mutable `working` clone to its form inputs.
//! Before issuing an update the screen asks the pair for a save decision,
//! which runs the shallow diff and tells the caller whether a network
//! call is warranted.

use serde::Serialize;

use crate::diff::{self, Comparison};

/// What a save handler should do with the current draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveDecision {
    /// Nothing changed; skip the network call entirely.
    Skip,

    /// Fields changed; issue the update. Carries the comparison so the
    /// handler can log the change summary before committing.
    Update(Comparison),

    /// The comparison is not trustworthy (non-scalar field or key-count
    /// mismatch). Callers must not treat this as "no changes".
    Indeterminate(Comparison),
}

impl SaveDecision {
    pub fn should_update(&self) -> bool {
        matches!(self, SaveDecision::Update(_))
    }
}

/// The snapshot pair for one edit screen.
///
/// Invariant: `backup` always equals the last value the server confirmed
/// persisted. `working` may diverge arbitrarily between loads; a failed
/// save leaves it untouched so the user's edits survive.
#[derive(Debug, Clone)]
pub struct DraftPair<T> {
    working: T,
    backup: T,
}

impl<T: Clone + Serialize> DraftPair<T> {
    /// Capture a freshly loaded entity as both sides of the pair.
    pub fn load(value: T) -> Self {
        Self {
            working: value.clone(),
            backup: value,
        }
    }

    pub fn working(&self) -> &T {
        &self.working
    }

    /// Mutable access for form-input binding.
    pub fn working_mut(&mut self) -> &mut T {
        &mut self.working
    }

    pub fn backup(&self) -> &T {
        &self.backup
    }

    /// Shallow comparison of `working` against `backup`.
    pub fn compare(&self) -> Comparison {
        diff::compare(&self.working, &self.backup)
    }

    /// Decide whether a save should go to the network.
    pub fn save_decision(&self) -> SaveDecision {
        let comparison = self.compare();
        if comparison.is_error() {
            SaveDecision::Indeterminate(comparison)
        } else if comparison.is_matching() {
            SaveDecision::Skip
        } else {
            SaveDecision::Update(comparison)
        }
    }

    /// Accept the server-confirmed record after a successful update.
    /// Both sides are overwritten; the next comparison starts clean.
    pub fn confirm_saved(&mut self, updated: T) {
        self.working = updated.clone();
        self.backup = updated;
    }

    /// Throw away local edits, restoring `working` from `backup`.
    pub fn revert(&mut self) {
        self.working = self.backup.clone();
    }
}
