//! Draft pair lifecycle tests: load, edit, save decision, confirm, revert.

use transitops_core::model::{Bus, Route};
use transitops_core::snapshot::{DraftPair, SaveDecision};

fn sample_bus() -> Bus {
    Bus {
        id: 42,
        registration_number: "NB-1234".to_string(),
        model: "Ashok Leyland Viking".to_string(),
        seating_capacity: 49,
        standing_capacity: 15,
        active: true,
    }
}

#[test]
fn test_untouched_draft_skips_the_network_call() {
    let pair = DraftPair::load(sample_bus());
    assert_eq!(pair.save_decision(), SaveDecision::Skip);
}

#[test]
fn test_edited_draft_yields_update_with_change_summary() {
    let mut pair = DraftPair::load(sample_bus());
    pair.working_mut().seating_capacity = 54;
    pair.working_mut().active = false;
    match pair.save_decision() {
        SaveDecision::Update(comparison) => {
            let fields: Vec<&str> = comparison
                .changes()
                .iter()
                .map(|c| c.field.as_str())
                .collect();
            assert_eq!(fields, vec!["active", "seatingCapacity"]);
        }
        other => panic!("expected Update, got {:?}", other),
    }
}

#[test]
fn test_confirm_saved_moves_the_baseline() {
    let mut pair = DraftPair::load(sample_bus());
    pair.working_mut().model = "Tata Marcopolo".to_string();

    // Simulate the server echoing back the updated record.
    let confirmed = pair.working().clone();
    pair.confirm_saved(confirmed);

    assert_eq!(pair.backup().model, "Tata Marcopolo");
    assert_eq!(pair.save_decision(), SaveDecision::Skip);
}

#[test]
fn test_failed_save_leaves_working_untouched() {
    // A failed save simply never calls confirm_saved; the draft keeps the
    // user's edits and the decision remains Update on retry.
    let mut pair = DraftPair::load(sample_bus());
    pair.working_mut().seating_capacity = 54;
    assert!(pair.save_decision().should_update());
    assert!(pair.save_decision().should_update());
    assert_eq!(pair.working().seating_capacity, 54);
    assert_eq!(pair.backup().seating_capacity, 49);
}

#[test]
fn test_revert_discards_local_edits() {
    let mut pair = DraftPair::load(sample_bus());
    pair.working_mut().registration_number = "ND-0000".to_string();
    pair.revert();
    assert_eq!(pair.working().registration_number, "NB-1234");
    assert_eq!(pair.save_decision(), SaveDecision::Skip);
}

#[test]
fn test_route_draft_is_indeterminate_not_skip() {
    let route = Route::new(
        1,
        "138".to_string(),
        "Pettah".to_string(),
        "Homagama".to_string(),
    );
    let pair = DraftPair::load(route);
    match pair.save_decision() {
        SaveDecision::Indeterminate(comparison) => assert!(comparison.is_error()),
        other => panic!("expected Indeterminate, got {:?}", other),
    }
}
