//! Diff-gated save flow for entity edit screens.
//!
//! Each save handler runs the draft pair's save decision first: an
//! untouched form never reaches the network, an indeterminate comparison
//! is refused outright, and a real change is logged field by field before
//! the update request goes out. On success the server's response becomes
//! the draft's new baseline; on failure the draft is left alone so the
//! user's edits survive for a retry.

use std::time::Instant;

use transitops_core::model::{Bus, Conductor, Driver, ScheduledTrip, User};
use transitops_core::snapshot::{DraftPair, SaveDecision};
use transitops_core::{
    log_op_end, log_op_error, log_op_start, render_change_summary, Comparison, RequestContext,
};

use crate::client::ApiClient;
use crate::error::{ClientError, Result};

/// What a save handler did with the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Nothing changed; no request was issued
    Skipped,

    /// The update was issued and confirmed; the draft's baseline moved
    Saved,
}

/// Run the save decision and log the change summary.
///
/// `Ok(None)` means skip, `Ok(Some(_))` means proceed with the update.
fn gate<T: serde::Serialize + Clone>(
    op: &str,
    entity_kind: &str,
    draft: &DraftPair<T>,
) -> Result<Option<Comparison>> {
    match draft.save_decision() {
        SaveDecision::Skip => {
            tracing::debug!(op, entity_kind, "no changes; skipping save");
            Ok(None)
        }
        SaveDecision::Indeterminate(comparison) => Err(ClientError::Indeterminate(
            comparison
                .message()
                .unwrap_or_else(|| "comparison indeterminate".to_string()),
        )),
        SaveDecision::Update(comparison) => {
            for line in render_change_summary(&comparison) {
                tracing::info!(op, entity_kind, change = %line);
            }
            Ok(Some(comparison))
        }
    }
}

/// Expand one diff-gated save handler over an update endpoint.
macro_rules! save_handler {
    ($(#[$doc:meta])* $name:ident, $entity:ty, $entity_kind:literal, $update:ident) => {
        $(#[$doc])*
        pub async fn $name(&self, draft: &mut DraftPair<$entity>) -> Result<SaveOutcome> {
            let op = stringify!($name);
            let start = Instant::now();
            let ctx = RequestContext::new();
            let id = draft.working().id;
            log_op_start!(
                op,
                entity_kind = $entity_kind,
                entity_id = id,
                request_id = %ctx.request_id
            );

            let comparison = match gate(op, $entity_kind, draft) {
                Ok(None) => {
                    log_op_end!(
                        op,
                        duration_ms = start.elapsed().as_millis() as u64,
                        request_id = %ctx.request_id,
                        skipped = true
                    );
                    return Ok(SaveOutcome::Skipped);
                }
                Ok(Some(c)) => c,
                Err(e) => {
                    log_op_error!(
                        op,
                        &e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        request_id = %ctx.request_id
                    );
                    return Err(e);
                }
            };

            match self.$update(id, draft.working()).await {
                Ok(updated) => {
                    draft.confirm_saved(updated);
                    log_op_end!(
                        op,
                        duration_ms = start.elapsed().as_millis() as u64,
                        request_id = %ctx.request_id,
                        changed_fields = comparison.changes().len()
                    );
                    Ok(SaveOutcome::Saved)
                }
                Err(e) => {
                    log_op_error!(
                        op,
                        &e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        request_id = %ctx.request_id
                    );
                    Err(e)
                }
            }
        }
    };
}

impl ApiClient {
    save_handler!(
        /// Save a bus draft if it changed.
        save_bus, Bus, "bus", update_bus
    );
    save_handler!(
        /// Save a driver draft if it changed.
        save_driver, Driver, "driver", update_driver
    );
    save_handler!(
        /// Save a conductor draft if it changed.
        save_conductor, Conductor, "conductor", update_conductor
    );
    save_handler!(
        /// Save a scheduled-trip draft if it changed.
        save_trip, ScheduledTrip, "trip", update_trip
    );
    save_handler!(
        /// Save a console-user draft if it changed.
        save_user, User, "user", update_user
    );
}
