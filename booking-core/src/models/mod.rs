mod add_on;
mod availability;
mod booking_draft;
mod event_type;
mod location;
mod payment_method;
mod time_slot;
mod uploaded_file;

pub use add_on::{AddOn, AddOnCatalog, PriceUnit};
pub use availability::{AvailabilityCalendar, AvailabilityStatus, DayAvailability};
pub use booking_draft::{BookingDraft, BudgetRange, DraftPatch, unique_add_ons};
pub use event_type::EventType;
pub use location::Location;
pub use payment_method::PaymentMethod;
pub use time_slot::TimeSlot;
pub use uploaded_file::{MAX_INSPIRATION_IMAGES, UploadedFile};
