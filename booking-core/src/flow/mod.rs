pub mod booking_flow;
pub mod navigation;
pub mod submission;

pub use booking_flow::{BookingFlow, FlowError, SUBMIT_FAILED_MESSAGE, SubmissionReceipt};
pub use navigation::{FlowContext, Navigator, Route};
pub use submission::{
    BookingSubmitter, DEFAULT_SUBMIT_DELAY, SimulatedSubmitter, SubmissionError, booking_reference,
};
