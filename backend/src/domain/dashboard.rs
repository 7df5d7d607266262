//! Back-office badge counts.

use serde::{Deserialize, Serialize};

/// Work waiting for staff attention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    /// Orders still in `pending`.
    pub pending_orders: u64,
    /// Contact messages not yet marked read.
    pub unread_messages: u64,
    /// Job applications in `new`.
    pub new_applications: u64,
    /// Fabrication requests in `new`.
    pub new_fabrication_requests: u64,
    /// Recycling requests in `new`.
    pub new_recycling_requests: u64,
}

impl AdminSummary {
    /// Sum of all counts, shown on the navigation badge.
    pub fn total(&self) -> u64 {
        self.pending_orders
            + self.unread_messages
            + self.new_applications
            + self.new_fabrication_requests
            + self.new_recycling_requests
    }
}
