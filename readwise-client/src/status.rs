//! Per-view request status

use serde::Serialize;

/// Loading/error/empty status of a view
///
/// Distinct from the data the view holds: a failed refresh keeps the previous
/// data and only sets `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl ViewStatus {
    pub fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
