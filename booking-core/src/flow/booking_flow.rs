//! The four-step quote-request flow.
//!
//! [`BookingFlow`] owns the [`DraftStore`] for one session and tracks which
//! step is showing, the validation result for that step and the state of an
//! in-flight submission. Every mutation persists through the store before it
//! is visible, so reopening the flow on the same storage resumes the draft.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::{PricingBreakdown, PricingCalculator};
use crate::flow::navigation::{FlowContext, Navigator, Route};
use crate::flow::submission::{BookingSubmitter, SubmissionError};
use crate::models::{
    AvailabilityCalendar, BookingDraft, DraftPatch, MAX_INSPIRATION_IMAGES, UploadedFile,
};
use crate::storage::DraftStorage;
use crate::store::{DraftStore, StoreError};
use crate::validation::{InvalidStep, Step, ValidationResult, validate_step};

/// Banner text shown after a failed submission.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit request. Please try again.";

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    InvalidStep(#[from] InvalidStep),

    #[error("{step} is incomplete:\n{errors}")]
    StepIncomplete {
        step: Step,
        errors: ValidationResult,
    },

    #[error("already on the last step")]
    AtLastStep,

    #[error("cannot jump ahead to {requested} from {current}")]
    StepNotReached { requested: Step, current: Step },

    #[error("requests can only be submitted from the confirmation step")]
    NotOnConfirmation,

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("{0} is not available for booking")]
    DateUnavailable(NaiveDate),

    #[error("{0} is in the past")]
    DateInPast(NaiveDate),

    #[error("{}", SUBMIT_FAILED_MESSAGE)]
    Submission(#[source] SubmissionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful submission hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub pricing: PricingBreakdown,
    /// `false` when the submitted draft is still in durable storage.
    pub draft_cleared: bool,
}

/// Raises the in-flight flag until dropped, including when the submit
/// future is cancelled mid-await.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn begin(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Attempts made to remove a submitted draft before giving up.
const CLEAR_ATTEMPTS: u32 = 2;

fn check_event_date(
    date: NaiveDate,
    today: NaiveDate,
    calendar: Option<&AvailabilityCalendar>,
) -> Result<(), FlowError> {
    if date < today {
        warn!(%date, %today, "refusing past date");
        return Err(FlowError::DateInPast(date));
    }
    if let Some(calendar) = calendar.filter(|c| !c.is_bookable(date)) {
        warn!(%date, status = ?calendar.status(date).status, "refusing unavailable date");
        return Err(FlowError::DateUnavailable(date));
    }
    Ok(())
}

pub struct BookingFlow {
    store: DraftStore,
    pricing: PricingCalculator,
    step: Step,
    validation: ValidationResult,
    submitting: bool,
    submit_error: Option<String>,
    reference: Option<String>,
}

impl BookingFlow {
    /// Open the flow on `storage`, resuming any saved draft.
    ///
    /// The context's vendor and event type only fill fields the draft does
    /// not already have. The flow always starts on the first step.
    pub async fn open(
        storage: Box<dyn DraftStorage>,
        context: FlowContext,
    ) -> Self {
        let mut store = DraftStore::load(storage).await;

        let draft = store.draft();
        let seed = DraftPatch {
            vendor_id: context.vendor_id.filter(|_| draft.vendor_id.is_none()),
            event_type: context.event_type.filter(|_| draft.event_type.is_none()),
            ..Default::default()
        };
        if !seed.is_empty() {
            if let Err(error) = store.update(seed).await {
                warn!(%error, "could not persist navigation context");
            }
        }

        let step = Step::EventDetails;
        let validation = validate_step(store.draft(), step);

        Self {
            store,
            pricing: PricingCalculator::default(),
            step,
            validation,
            submitting: false,
            submit_error: None,
            reference: None,
        }
    }

    /// Replace the calculator used by [`BookingFlow::quote`].
    pub fn with_pricing(
        mut self,
        pricing: PricingCalculator,
    ) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn draft(&self) -> &BookingDraft {
        self.store.draft()
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    /// Errors for the step currently showing.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn can_advance(&self) -> bool {
        self.validation.can_advance()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Banner message left by the last failed submission.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Reference of the last successful submission.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Merge `patch` into the draft, persist it and re-validate the
    /// current step.
    pub async fn update(
        &mut self,
        patch: DraftPatch,
    ) -> Result<&ValidationResult, FlowError> {
        self.store.update(patch).await?;
        self.revalidate();
        Ok(&self.validation)
    }

    /// Advance one step if the current one is complete.
    pub fn next(&mut self) -> Result<Step, FlowError> {
        self.revalidate();
        if !self.validation.can_advance() {
            warn!(step = %self.step, errors = self.validation.len(), "refusing to advance");
            return Err(FlowError::StepIncomplete {
                step: self.step,
                errors: self.validation.clone(),
            });
        }
        let next = self.step.next().ok_or(FlowError::AtLastStep)?;
        self.enter(next);
        Ok(next)
    }

    /// Go back one step. On the first step this is a no-op.
    pub fn previous(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.enter(previous);
        }
        self.step
    }

    /// Jump to an already reached step by its 1-based number.
    pub fn go_to_step(
        &mut self,
        number: u8,
    ) -> Result<Step, FlowError> {
        let requested = Step::from_number(number)?;
        if requested > self.step {
            return Err(FlowError::StepNotReached {
                requested,
                current: self.step,
            });
        }
        self.enter(requested);
        Ok(requested)
    }

    /// Set the event date.
    ///
    /// Days before today are always refused. With a vendor calendar, days it
    /// marks unavailable (or does not list) are refused too.
    pub async fn select_event_date(
        &mut self,
        date: NaiveDate,
        calendar: Option<&AvailabilityCalendar>,
    ) -> Result<&ValidationResult, FlowError> {
        check_event_date(date, Local::now().date_naive(), calendar)?;
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        self.update(DraftPatch {
            event_date: Some(midnight),
            ..Default::default()
        })
        .await
    }

    /// Append inspiration images, dropping any beyond the cap.
    ///
    /// Returns how many of `files` were kept.
    pub async fn add_inspiration_images(
        &mut self,
        files: Vec<UploadedFile>,
    ) -> Result<usize, FlowError> {
        let mut images = self.draft().inspiration_images().to_vec();
        let room = MAX_INSPIRATION_IMAGES.saturating_sub(images.len());
        let accepted = files.len().min(room);
        if accepted < files.len() {
            debug!(dropped = files.len() - accepted, "inspiration image limit reached");
        }
        images.extend(files.into_iter().take(accepted));

        self.update(DraftPatch {
            inspiration_images: Some(images),
            ..Default::default()
        })
        .await?;
        Ok(accepted)
    }

    pub async fn remove_inspiration_image(
        &mut self,
        id: &str,
    ) -> Result<(), FlowError> {
        let images = self
            .draft()
            .inspiration_images()
            .iter()
            .filter(|image| image.id != id)
            .cloned()
            .collect();
        self.update(DraftPatch {
            inspiration_images: Some(images),
            ..Default::default()
        })
        .await?;
        Ok(())
    }

    /// Select the add-on if absent, deselect it if present.
    ///
    /// Returns whether the add-on is selected afterwards.
    pub async fn toggle_add_on(
        &mut self,
        id: &str,
    ) -> Result<bool, FlowError> {
        let mut selected = self.draft().selected_add_ons().to_vec();
        let now_selected = match selected.iter().position(|s| s == id) {
            Some(index) => {
                selected.remove(index);
                false
            }
            None => {
                selected.push(id.to_string());
                true
            }
        };
        self.update(DraftPatch {
            selected_add_ons: Some(selected),
            ..Default::default()
        })
        .await?;
        Ok(now_selected)
    }

    /// Price the live draft.
    pub fn quote(&self) -> PricingBreakdown {
        self.pricing.calculate(self.draft())
    }

    /// Submit the completed draft.
    ///
    /// Only allowed on the confirmation step once it validates. On success
    /// the saved draft is cleared and the flow returns to the first step; on
    /// failure the draft is kept and [`BookingFlow::submit_error`] is set.
    ///
    /// Dropping the returned future part way through leaves the flow able to
    /// submit again.
    pub async fn submit(
        &mut self,
        submitter: &dyn BookingSubmitter,
    ) -> Result<SubmissionReceipt, FlowError> {
        if self.submitting {
            return Err(FlowError::AlreadySubmitting);
        }
        if self.step != Step::Confirmation {
            return Err(FlowError::NotOnConfirmation);
        }
        self.revalidate();
        if !self.validation.can_advance() {
            return Err(FlowError::StepIncomplete {
                step: self.step,
                errors: self.validation.clone(),
            });
        }

        self.submit_error = None;
        let pricing = self.quote();
        let outcome = {
            let _in_flight = InFlight::begin(&mut self.submitting);
            submitter.submit(self.store.draft()).await
        };

        match outcome {
            Ok(reference) => {
                info!(%reference, total = %pricing.total, "booking request accepted");
                let draft_cleared = self.clear_submitted().await;
                self.reference = Some(reference.clone());
                self.enter(Step::EventDetails);
                Ok(SubmissionReceipt {
                    reference,
                    pricing,
                    draft_cleared,
                })
            }
            Err(error) => {
                warn!(%error, "booking request failed");
                self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                Err(FlowError::Submission(error))
            }
        }
    }

    async fn clear_submitted(&mut self) -> bool {
        for attempt in 1..=CLEAR_ATTEMPTS {
            match self.store.clear().await {
                Ok(()) => return true,
                Err(error) => {
                    warn!(%error, attempt, "submitted draft could not be removed from storage");
                }
            }
        }
        false
    }

    /// Throw the draft away and start over on the first step.
    pub async fn discard(&mut self) -> Result<(), FlowError> {
        self.store.clear().await?;
        self.submit_error = None;
        self.enter(Step::EventDetails);
        Ok(())
    }

    /// Leave the flow. The draft stays saved for next time.
    pub fn close(
        &self,
        navigator: &dyn Navigator,
    ) {
        debug!("closing booking flow");
        navigator.navigate(Route::VendorSearch);
    }

    /// Leave after a successful submission.
    pub fn finish(
        &self,
        navigator: &dyn Navigator,
        destination: Route,
    ) {
        navigator.navigate(destination);
    }

    pub fn into_storage(self) -> Box<dyn DraftStorage> {
        self.store.into_storage()
    }

    fn enter(
        &mut self,
        step: Step,
    ) {
        debug!(from = %self.step, to = %step, "changing step");
        self.step = step;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validation = validate_step(self.store.draft(), self.step);
    }
}
