use serde::{Deserialize, Serialize};

use crate::models::EventType;

/// Screens the booking flow can hand control to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    VendorSearch,
    BookingManagement,
    BookingFlow,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::VendorSearch => "/vendor-search-discovery",
            Self::BookingManagement => "/customer-booking-management",
            Self::BookingFlow => "/quote-request-booking-flow",
        }
    }
}

/// Capability to move to another screen.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Context handed to the flow by the screen that opened it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowContext {
    pub vendor_id: Option<String>,
    pub event_type: Option<EventType>,
}
