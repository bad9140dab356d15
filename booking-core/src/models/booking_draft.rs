use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{EventType, Location, PaymentMethod, TimeSlot, UploadedFile};

/// Declared budget, in whole currency units, inclusive at both ends.
///
/// Persisted as a two-element array `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct BudgetRange {
    pub min: i64,
    pub max: i64,
}

impl BudgetRange {
    pub fn new(
        min: i64,
        max: i64,
    ) -> Self {
        Self { min, max }
    }
}

impl From<(i64, i64)> for BudgetRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self { min, max }
    }
}

impl From<BudgetRange> for (i64, i64) {
    fn from(range: BudgetRange) -> Self {
        (range.min, range.max)
    }
}

/// The in-progress, multi-step booking request.
///
/// Every field is optional here; which fields are required, and when, is
/// decided by the step validator. The JSON shape (camelCase keys) is the one
/// stored in the durable draft slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    // Step 1: event details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_guest_count"
    )]
    pub guest_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<BudgetRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,

    // Step 2: date selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<TimeSlot>,

    // Step 3: requirements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_requirements: Option<String>,
    /// Add-on ids, each at most once.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_add_ons"
    )]
    pub selected_add_ons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspiration_images: Option<Vec<UploadedFile>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    // Step 4: confirmation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_terms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_privacy: Option<bool>,

    // Seeded from the navigation context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
}

/// A partial set of draft fields. Every `Some` field overwrites the draft's
/// value on merge; `None` fields leave the draft untouched.
pub type DraftPatch = BookingDraft;

impl BookingDraft {
    /// Returns `true` when no field has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge: fields present in `patch` replace this draft's values.
    pub fn merge(
        &mut self,
        patch: DraftPatch,
    ) {
        fn take<T>(
            slot: &mut Option<T>,
            value: Option<T>,
        ) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.event_type, patch.event_type);
        take(&mut self.guest_count, patch.guest_count);
        take(&mut self.budget_range, patch.budget_range);
        take(&mut self.location, patch.location);
        take(&mut self.venue_address, patch.venue_address);
        take(&mut self.event_description, patch.event_description);
        take(&mut self.event_date, patch.event_date);
        take(&mut self.time_slot, patch.time_slot);
        take(&mut self.detailed_requirements, patch.detailed_requirements);
        take(
            &mut self.selected_add_ons,
            patch.selected_add_ons.map(unique_add_ons),
        );
        take(&mut self.inspiration_images, patch.inspiration_images);
        take(&mut self.special_requests, patch.special_requests);
        take(&mut self.payment_method, patch.payment_method);
        take(&mut self.accepted_terms, patch.accepted_terms);
        take(&mut self.accepted_privacy, patch.accepted_privacy);
        take(&mut self.vendor_id, patch.vendor_id);
    }

    /// Returns a copy of this draft with `patch` merged in.
    pub fn merged(
        &self,
        patch: DraftPatch,
    ) -> Self {
        let mut next = self.clone();
        next.merge(patch);
        next
    }

    /// The selected payment method, falling back to the form default.
    pub fn payment_method_or_default(&self) -> PaymentMethod {
        self.payment_method.unwrap_or_default()
    }

    /// Guest count usable in price arithmetic; absent or negative counts are zero.
    pub fn billable_guests(&self) -> u32 {
        self.guest_count
            .map(|n| n.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }

    pub fn selected_add_ons(&self) -> &[String] {
        self.selected_add_ons.as_deref().unwrap_or(&[])
    }

    pub fn inspiration_images(&self) -> &[UploadedFile] {
        self.inspiration_images.as_deref().unwrap_or(&[])
    }
}

/// Drops repeated add-on ids, keeping the first occurrence of each.
pub fn unique_add_ons(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

fn deserialize_add_ons<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(ids.map(unique_add_ons))
}

/// Guest counts were historically stored as raw input text. Accept numbers and
/// numeric strings; blank or unparseable text reads as "not entered".
fn deserialize_guest_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
