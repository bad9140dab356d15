//! Command implementations for the `booking` binary.
//!
//! Each `run_*` function works on an open [`BookingFlow`] and returns the text
//! to print, so commands can be driven without a terminal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use booking_core::flow::{BookingFlow, BookingSubmitter, FlowContext, FlowError};
use booking_core::models::{
    AddOnCatalog, AvailabilityCalendar, BudgetRange, DraftPatch, EventType, Location,
    MAX_INSPIRATION_IMAGES, PaymentMethod, TimeSlot, UploadedFile, unique_add_ons,
};
use booking_core::notifications::NotificationSource;
use booking_core::storage::{MemoryStorageFactory, StorageRegistry};
use booking_core::validation::{Step, validate_all, validate_step};
use booking_db_sqlite::SqliteStorageFactory;
use chrono::{NaiveDate, Utc};
use clap::Args;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::report::{DraftSummary, NotificationBadges, QuoteSummary};
use crate::utils::{
    format_inr, parse_amount, parse_event_date, parse_event_type, parse_guest_count, parse_location,
    parse_payment_method, parse_time_slot,
};

/// Registry with every storage backend this binary ships.
pub fn build_registry() -> StorageRegistry {
    let mut registry = StorageRegistry::new();
    registry.register(Box::new(MemoryStorageFactory));
    registry.register(Box::new(SqliteStorageFactory));
    registry
}

/// Open the configured storage and resume the saved draft.
pub async fn open_flow(
    config: &AppConfig,
    context: FlowContext,
) -> Result<BookingFlow> {
    debug!(backend = %config.storage.backend, "opening draft storage");
    let storage = build_registry()
        .create(&config.storage)
        .await
        .with_context(|| format!("Failed to open '{}' storage", config.storage.backend))?;
    Ok(BookingFlow::open(storage, context).await)
}

/// Field values for a single draft update. Omitted flags leave fields as
/// they are.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateArgs {
    #[arg(long, value_parser = parse_event_type)]
    pub event_type: Option<EventType>,

    /// Number of guests (1 to 10,000)
    #[arg(long = "guests", value_parser = parse_guest_count)]
    pub guest_count: Option<i64>,

    /// Lower end of the budget in rupees; requires --budget-max
    #[arg(long, value_parser = parse_amount, requires = "budget_max")]
    pub budget_min: Option<i64>,

    /// Upper end of the budget in rupees; requires --budget-min
    #[arg(long, value_parser = parse_amount, requires = "budget_min")]
    pub budget_max: Option<i64>,

    #[arg(long, value_parser = parse_location)]
    pub location: Option<Location>,

    #[arg(long = "venue")]
    pub venue_address: Option<String>,

    #[arg(long = "description")]
    pub event_description: Option<String>,

    /// Event date as YYYY-MM-DD; must not be in the past
    #[arg(long, value_parser = parse_event_date)]
    pub date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_time_slot)]
    pub time_slot: Option<TimeSlot>,

    #[arg(long = "requirements")]
    pub detailed_requirements: Option<String>,

    /// Replace the selected add-ons; repeat for several, repeats count once
    #[arg(long = "add-on")]
    pub add_ons: Vec<String>,

    /// Select an add-on if absent, deselect it if present; repeatable
    #[arg(long = "toggle-add-on")]
    pub toggle_add_ons: Vec<String>,

    /// Attach an inspiration image; repeatable, at most 5 are kept
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,

    #[arg(long)]
    pub special_requests: Option<String>,

    #[arg(long = "payment", value_parser = parse_payment_method)]
    pub payment_method: Option<PaymentMethod>,

    /// Accept the terms; `--accept-terms=false` withdraws acceptance
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub accept_terms: Option<bool>,

    /// Accept the privacy policy; `--accept-privacy=false` withdraws acceptance
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub accept_privacy: Option<bool>,

    /// Vendor the request is addressed to
    #[arg(long = "vendor")]
    pub vendor_id: Option<String>,
}

impl UpdateArgs {
    /// The plain field changes. The date, add-on toggles and images go
    /// through the flow separately.
    pub fn to_patch(&self) -> DraftPatch {
        let budget_range = match (self.budget_min, self.budget_max) {
            (Some(min), Some(max)) => Some(BudgetRange::new(min, max)),
            _ => None,
        };

        DraftPatch {
            event_type: self.event_type,
            guest_count: self.guest_count,
            budget_range,
            location: self.location,
            venue_address: self.venue_address.clone(),
            event_description: self.event_description.clone(),
            time_slot: self.time_slot,
            detailed_requirements: self.detailed_requirements.clone(),
            selected_add_ons: (!self.add_ons.is_empty())
                .then(|| unique_add_ons(self.add_ons.clone())),
            special_requests: self.special_requests.clone(),
            payment_method: self.payment_method,
            accepted_terms: self.accept_terms,
            accepted_privacy: self.accept_privacy,
            vendor_id: self.vendor_id.clone(),
            ..Default::default()
        }
    }
}

fn image_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Describe an image file on disk as an upload.
pub fn describe_image(
    path: &Path,
    id: String,
) -> Result<UploadedFile> {
    let mime_type = image_mime_type(path)
        .with_context(|| format!("Not an image file: {}", path.display()))?;
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(UploadedFile {
        id,
        name,
        size: metadata.len(),
        mime_type: mime_type.to_string(),
        url: format!("file://{}", path.display()),
    })
}

/// Notification badges, the draft, the first incomplete step with its
/// errors, and the quote.
pub fn run_show(
    flow: &BookingFlow,
    notifications: &dyn NotificationSource,
) -> String {
    let draft = flow.draft();
    let quote = flow.quote();
    let progress = match validate_all(draft) {
        Some((step, errors)) => format!("{step}\n{errors}"),
        None => "All steps complete; ready to submit.".to_string(),
    };
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        NotificationBadges(notifications.poll()),
        DraftSummary {
            draft,
            catalog: &AddOnCatalog::standard(),
        },
        progress,
        QuoteSummary {
            breakdown: &quote,
            method: draft.payment_method_or_default(),
        }
    )
}

/// Apply `args` to the draft. A date is checked against `calendar` when one
/// is configured.
pub async fn run_update(
    flow: &mut BookingFlow,
    args: UpdateArgs,
    calendar: Option<&AvailabilityCalendar>,
) -> Result<String> {
    if let Some(date) = args.date {
        flow.select_event_date(date, calendar).await?;
    }

    let patch = args.to_patch();
    if !patch.is_empty() {
        flow.update(patch).await?;
    }

    for id in &args.toggle_add_ons {
        let selected = flow.toggle_add_on(id).await?;
        debug!(add_on = %id, selected, "toggled add-on");
    }

    let mut notes = Vec::new();
    if !args.images.is_empty() {
        let stamp = Utc::now().timestamp_millis();
        let files = args
            .images
            .iter()
            .enumerate()
            .map(|(i, path)| describe_image(path, format!("{stamp}-{i}")))
            .collect::<Result<Vec<_>>>()?;
        let offered = files.len();
        let kept = flow.add_inspiration_images(files).await?;
        if kept < offered {
            notes.push(format!(
                "Only {kept} of {offered} images were added; the limit is {MAX_INSPIRATION_IMAGES}."
            ));
        }
    }

    info!("draft updated");
    notes.push("Draft saved.".to_string());
    Ok(notes.join("\n"))
}

pub fn run_validate(
    flow: &BookingFlow,
    step_number: u8,
) -> Result<String> {
    let step = Step::from_number(step_number)?;
    let result = validate_step(flow.draft(), step);
    Ok(format!("{step}\n{result}"))
}

pub fn run_quote(flow: &BookingFlow) -> String {
    QuoteSummary {
        breakdown: &flow.quote(),
        method: flow.draft().payment_method_or_default(),
    }
    .to_string()
}

/// Walk every step and submit if the whole draft is complete.
pub async fn run_submit(
    flow: &mut BookingFlow,
    submitter: &dyn BookingSubmitter,
) -> Result<String> {
    if let Some((step, errors)) = validate_all(flow.draft()) {
        bail!("{step} is incomplete:\n{errors}");
    }

    while !flow.current_step().is_last() {
        flow.next()?;
    }

    let receipt = match flow.submit(submitter).await {
        Ok(receipt) => receipt,
        Err(FlowError::Submission(source)) => {
            let banner = flow.submit_error().unwrap_or_default().to_string();
            return Err(anyhow::Error::new(source).context(banner));
        }
        Err(other) => return Err(other.into()),
    };

    let mut text = format!(
        "Request submitted.\nBooking reference: {}\nEstimated total:   {}",
        receipt.reference,
        format_inr(receipt.pricing.total)
    );
    if !receipt.draft_cleared {
        text.push_str(
            "\nWarning: the submitted draft could not be deleted; run `booking clear` before starting a new request.",
        );
    }
    Ok(text)
}

pub async fn run_clear(flow: &mut BookingFlow) -> Result<String> {
    flow.discard().await?;
    Ok("Saved draft removed.".to_string())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn registry_has_both_backends() {
        assert_eq!(build_registry().available_backends(), vec!["memory", "sqlite"]);
    }

    #[test]
    fn empty_args_make_empty_patch() {
        assert!(UpdateArgs::default().to_patch().is_empty());
    }

    #[test]
    fn budget_needs_both_bounds() {
        let half = UpdateArgs {
            budget_min: Some(20000),
            ..Default::default()
        };
        let both = UpdateArgs {
            budget_min: Some(20000),
            budget_max: Some(50000),
            ..Default::default()
        };

        assert_eq!(half.to_patch().budget_range, None);
        assert_eq!(both.to_patch().budget_range, Some(BudgetRange::new(20000, 50000)));
    }

    #[test]
    fn date_is_left_to_the_flow() {
        let args = UpdateArgs {
            date: NaiveDate::from_ymd_opt(2099, 12, 12),
            ..Default::default()
        };

        assert!(args.to_patch().is_empty());
    }

    #[derive(Debug, Parser)]
    struct UpdateCommand {
        #[command(flatten)]
        args: UpdateArgs,
    }

    fn parse_update(flags: &[&str]) -> UpdateArgs {
        UpdateCommand::try_parse_from(std::iter::once("update").chain(flags.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn acceptance_flags_only_set_when_given() {
        let patch = parse_update(&["--accept-terms"]).to_patch();

        assert_eq!(patch.accepted_terms, Some(true));
        assert_eq!(patch.accepted_privacy, None);
    }

    #[test]
    fn acceptance_can_be_withdrawn() {
        let patch = parse_update(&["--accept-terms=false", "--accept-privacy=true"]).to_patch();

        assert_eq!(patch.accepted_terms, Some(false));
        assert_eq!(patch.accepted_privacy, Some(true));
    }

    #[test]
    fn repeated_add_on_is_selected_once() {
        let patch = parse_update(&[
            "--add-on", "catering", "--add-on", "music", "--add-on", "catering",
        ])
        .to_patch();

        assert_eq!(
            patch.selected_add_ons,
            Some(vec!["catering".to_string(), "music".to_string()])
        );
    }

    #[test]
    fn non_image_files_are_rejected() {
        assert_eq!(image_mime_type(Path::new("moodboard.PNG")), Some("image/png"));
        assert!(describe_image(Path::new("notes.txt"), "1".to_string()).is_err());
    }
}
