//! Per-step validation of a [`BookingDraft`].
//!
//! Validation never fails: an invalid step is reported as a set of field
//! errors and a denied "can advance" flag. Only the requested step's fields
//! are examined.
//!
//! | Step | Checks |
//! |------|--------|
//! | 1    | event type, guest count ≥ 1, budget minimum ≥ 10 000, location |
//! | 2    | event date, time slot |
//! | 3    | detailed requirements, at least 20 characters after trimming |
//! | 4    | terms accepted, privacy policy accepted |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Step;
use crate::models::BookingDraft;

/// Smallest accepted lower bound of the budget range.
pub const MIN_BUDGET: i64 = 10_000;

/// Smallest accepted guest count.
pub const MIN_GUESTS: i64 = 1;

/// Largest guest count the event details form offers.
pub const MAX_GUESTS: i64 = 10_000;

/// Minimum length of the trimmed requirements text.
pub const MIN_REQUIREMENTS_LEN: usize = 20;

/// Draft fields that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    EventType,
    GuestCount,
    BudgetRange,
    Location,
    EventDate,
    TimeSlot,
    DetailedRequirements,
    AcceptedTerms,
    AcceptedPrivacy,
}

impl Field {
    /// The draft key this field is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventType => "eventType",
            Self::GuestCount => "guestCount",
            Self::BudgetRange => "budgetRange",
            Self::Location => "location",
            Self::EventDate => "eventDate",
            Self::TimeSlot => "timeSlot",
            Self::DetailedRequirements => "detailedRequirements",
            Self::AcceptedTerms => "acceptedTerms",
            Self::AcceptedPrivacy => "acceptedPrivacy",
        }
    }

    /// User-facing message shown when this field fails validation.
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::EventType => "Please select an event type",
            Self::GuestCount => "Please enter a valid guest count",
            Self::BudgetRange => "Please set a minimum budget",
            Self::Location => "Please select a location",
            Self::EventDate => "Please select an event date",
            Self::TimeSlot => "Please select a time slot",
            Self::DetailedRequirements => {
                "Please provide detailed requirements (minimum 20 characters)"
            }
            Self::AcceptedTerms => "Please accept the terms and conditions",
            Self::AcceptedPrivacy => "Please accept the privacy policy",
        }
    }
}

/// Field-level errors for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    /// A result with no errors.
    pub fn valid() -> Self {
        Self::default()
    }

    fn reject(
        &mut self,
        field: Field,
    ) {
        self.errors
            .insert(field, field.error_message().to_string());
    }

    /// Whether forward navigation is allowed.
    pub fn can_advance(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(
        &self,
        field: Field,
    ) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "ok");
        }
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}: {}", field.as_str(), message)?;
        }
        Ok(())
    }
}

/// Validates the fields owned by `step` against the live draft.
///
/// # Example
///
/// ```
/// use booking_core::models::BookingDraft;
/// use booking_core::validation::{Field, Step, validate_step};
///
/// let draft = BookingDraft {
///     accepted_terms: Some(true),
///     accepted_privacy: Some(false),
///     ..Default::default()
/// };
///
/// let result = validate_step(&draft, Step::Confirmation);
///
/// assert!(!result.can_advance());
/// assert!(result.error(Field::AcceptedTerms).is_none());
/// assert!(result.error(Field::AcceptedPrivacy).is_some());
/// ```
pub fn validate_step(
    draft: &BookingDraft,
    step: Step,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    match step {
        Step::EventDetails => {
            if draft.event_type.is_none() {
                result.reject(Field::EventType);
            }
            if !draft.guest_count.is_some_and(|n| n >= MIN_GUESTS) {
                result.reject(Field::GuestCount);
            }
            if !draft.budget_range.is_some_and(|b| b.min >= MIN_BUDGET) {
                result.reject(Field::BudgetRange);
            }
            if draft.location.is_none() {
                result.reject(Field::Location);
            }
        }
        Step::DateSelection => {
            if draft.event_date.is_none() {
                result.reject(Field::EventDate);
            }
            if draft.time_slot.is_none() {
                result.reject(Field::TimeSlot);
            }
        }
        Step::Requirements => {
            let long_enough = draft
                .detailed_requirements
                .as_deref()
                .is_some_and(|s| s.trim().chars().count() >= MIN_REQUIREMENTS_LEN);
            if !long_enough {
                result.reject(Field::DetailedRequirements);
            }
        }
        Step::Confirmation => {
            if draft.accepted_terms != Some(true) {
                result.reject(Field::AcceptedTerms);
            }
            if draft.accepted_privacy != Some(true) {
                result.reject(Field::AcceptedPrivacy);
            }
        }
    }

    result
}

/// Validates every step in order and returns the first one that fails,
/// together with its errors. `None` means the whole draft is complete.
pub fn validate_all(draft: &BookingDraft) -> Option<(Step, ValidationResult)> {
    Step::all()
        .iter()
        .map(|step| (*step, validate_step(draft, *step)))
        .find(|(_, result)| !result.can_advance())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{BudgetRange, EventType, Location, TimeSlot};

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            event_type: Some(EventType::Corporate),
            guest_count: Some(80),
            budget_range: Some(BudgetRange::new(50000, 200000)),
            location: Some(Location::Hinjewadi),
            event_date: Some(Utc.with_ymd_and_hms(2025, 1, 20, 0, 0, 0).unwrap()),
            time_slot: Some(TimeSlot::Afternoon),
            detailed_requirements: Some(
                "this is a sufficiently long requirement text".to_string(),
            ),
            accepted_terms: Some(true),
            accepted_privacy: Some(true),
            ..Default::default()
        }
    }

    // =========================================================================
    // Step 1: event details
    // =========================================================================

    #[test]
    fn empty_draft_fails_every_event_detail() {
        let result = validate_step(&BookingDraft::default(), Step::EventDetails);

        assert!(!result.can_advance());
        assert_eq!(
            result.errors().keys().copied().collect::<Vec<_>>(),
            vec![
                Field::EventType,
                Field::GuestCount,
                Field::BudgetRange,
                Field::Location
            ]
        );
    }

    #[test]
    fn zero_guests_is_rejected() {
        let draft = BookingDraft {
            guest_count: Some(0),
            ..complete_draft()
        };

        let result = validate_step(&draft, Step::EventDetails);

        assert_eq!(
            result.error(Field::GuestCount),
            Some("Please enter a valid guest count")
        );
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn budget_minimum_below_threshold_is_rejected() {
        let draft = BookingDraft {
            budget_range: Some(BudgetRange::new(9999, 200000)),
            ..complete_draft()
        };

        let result = validate_step(&draft, Step::EventDetails);

        assert_eq!(
            result.error(Field::BudgetRange),
            Some("Please set a minimum budget")
        );
    }

    #[test]
    fn budget_minimum_at_threshold_is_accepted() {
        let draft = BookingDraft {
            budget_range: Some(BudgetRange::new(10000, 10000)),
            ..complete_draft()
        };

        assert!(validate_step(&draft, Step::EventDetails).can_advance());
    }

    #[test]
    fn complete_event_details_pass() {
        let result = validate_step(&complete_draft(), Step::EventDetails);

        assert_eq!(result, ValidationResult::valid());
    }

    // =========================================================================
    // Step 2: date selection
    // =========================================================================

    #[test]
    fn missing_time_slot_is_reported_alone() {
        let draft = BookingDraft {
            time_slot: None,
            ..complete_draft()
        };

        let result = validate_step(&draft, Step::DateSelection);

        assert_eq!(result.len(), 1);
        assert_eq!(
            result.error(Field::TimeSlot),
            Some("Please select a time slot")
        );
    }

    #[test]
    fn date_step_ignores_other_steps_fields() {
        let draft = BookingDraft {
            event_date: complete_draft().event_date,
            time_slot: Some(TimeSlot::Night),
            ..Default::default()
        };

        assert!(validate_step(&draft, Step::DateSelection).can_advance());
    }

    // =========================================================================
    // Step 3: requirements
    // =========================================================================

    #[test]
    fn short_requirements_are_rejected() {
        let draft = BookingDraft {
            detailed_requirements: Some("short".to_string()),
            ..Default::default()
        };

        let result = validate_step(&draft, Step::Requirements);

        assert!(!result.can_advance());
        assert!(result.error(Field::DetailedRequirements).is_some());
    }

    #[test]
    fn long_requirements_are_accepted() {
        let draft = BookingDraft {
            detailed_requirements: Some(
                "this is a sufficiently long requirement text".to_string(),
            ),
            ..Default::default()
        };

        let result = validate_step(&draft, Step::Requirements);

        assert!(result.can_advance());
        assert!(result.is_empty());
    }

    #[test]
    fn padding_does_not_count_toward_length() {
        let draft = BookingDraft {
            detailed_requirements: Some(format!("{:^40}", "too short")),
            ..Default::default()
        };

        assert!(!validate_step(&draft, Step::Requirements).can_advance());
    }

    #[test]
    fn exactly_twenty_characters_pass() {
        let draft = BookingDraft {
            detailed_requirements: Some("  abcdefghijklmnopqrst  ".to_string()),
            ..Default::default()
        };

        assert!(validate_step(&draft, Step::Requirements).can_advance());
    }

    // =========================================================================
    // Step 4: confirmation
    // =========================================================================

    #[test]
    fn terms_without_privacy_reports_privacy_only() {
        let draft = BookingDraft {
            accepted_terms: Some(true),
            accepted_privacy: Some(false),
            ..Default::default()
        };

        let result = validate_step(&draft, Step::Confirmation);

        assert!(!result.can_advance());
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.error(Field::AcceptedPrivacy),
            Some("Please accept the privacy policy")
        );
    }

    #[test]
    fn unset_agreements_are_both_reported() {
        let result = validate_step(&BookingDraft::default(), Step::Confirmation);

        assert!(result.error(Field::AcceptedTerms).is_some());
        assert!(result.error(Field::AcceptedPrivacy).is_some());
    }

    // =========================================================================
    // general properties
    // =========================================================================

    #[test]
    fn validation_is_idempotent() {
        let draft = BookingDraft {
            guest_count: Some(12),
            ..Default::default()
        };

        for step in Step::all() {
            assert_eq!(validate_step(&draft, *step), validate_step(&draft, *step));
        }
    }

    #[test]
    fn each_missing_required_field_denies_its_step() {
        let cases: Vec<(Step, Field, BookingDraft)> = vec![
            (Step::EventDetails, Field::EventType, BookingDraft { event_type: None, ..complete_draft() }),
            (Step::EventDetails, Field::GuestCount, BookingDraft { guest_count: None, ..complete_draft() }),
            (Step::EventDetails, Field::BudgetRange, BookingDraft { budget_range: None, ..complete_draft() }),
            (Step::EventDetails, Field::Location, BookingDraft { location: None, ..complete_draft() }),
            (Step::DateSelection, Field::EventDate, BookingDraft { event_date: None, ..complete_draft() }),
            (Step::DateSelection, Field::TimeSlot, BookingDraft { time_slot: None, ..complete_draft() }),
            (Step::Requirements, Field::DetailedRequirements, BookingDraft { detailed_requirements: None, ..complete_draft() }),
            (Step::Confirmation, Field::AcceptedTerms, BookingDraft { accepted_terms: None, ..complete_draft() }),
            (Step::Confirmation, Field::AcceptedPrivacy, BookingDraft { accepted_privacy: None, ..complete_draft() }),
        ];

        for (step, field, draft) in cases {
            let result = validate_step(&draft, step);
            assert!(!result.can_advance(), "{step} should be denied without {field:?}");
            assert_eq!(result.error(field), Some(field.error_message()));
        }
    }

    #[test]
    fn validate_all_finds_first_incomplete_step() {
        let draft = BookingDraft {
            time_slot: None,
            accepted_privacy: None,
            ..complete_draft()
        };

        let (step, result) = validate_all(&draft).expect("draft is incomplete");

        assert_eq!(step, Step::DateSelection);
        assert!(result.error(Field::TimeSlot).is_some());
    }

    #[test]
    fn validate_all_accepts_complete_draft() {
        assert_eq!(validate_all(&complete_draft()), None);
    }

    #[test]
    fn display_lists_field_errors() {
        let draft = BookingDraft {
            accepted_terms: Some(true),
            ..Default::default()
        };

        let text = validate_step(&draft, Step::Confirmation).to_string();

        assert_eq!(text, "acceptedPrivacy: Please accept the privacy policy");
    }
}
