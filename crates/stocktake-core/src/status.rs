//! Transient status messages.
//!
//! Each `StatusRegion` shows at most one message. Posting replaces whatever
//! was there, and the expiry travels with the message, so an older message
//! can never clear a newer one. Callers pass the current time in.

use chrono::{DateTime, Duration, Utc};

/// How long a status message stays visible
pub const STATUS_DISPLAY_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Independent display areas for outcome messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRegion {
    Auth,
    Product,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, text: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: now,
            expires_at: now + Duration::seconds(STATUS_DISPLAY_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    auth: Option<StatusMessage>,
    product: Option<StatusMessage>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message in a region, replacing the previous one
    pub fn post(
        &mut self,
        region: StatusRegion,
        kind: StatusKind,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        *self.slot_mut(region) = Some(StatusMessage::new(kind, text, now));
    }

    /// The message currently visible in a region, if any
    pub fn current(&self, region: StatusRegion, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.slot(region).as_ref().filter(|m| !m.is_expired(now))
    }

    /// Drop expired messages from both regions
    pub fn clear_expired(&mut self, now: DateTime<Utc>) {
        for region in [StatusRegion::Auth, StatusRegion::Product] {
            let slot = self.slot_mut(region);
            if slot.as_ref().is_some_and(|m| m.is_expired(now)) {
                *slot = None;
            }
        }
    }

    fn slot(&self, region: StatusRegion) -> &Option<StatusMessage> {
        match region {
            StatusRegion::Auth => &self.auth,
            StatusRegion::Product => &self.product,
        }
    }

    fn slot_mut(&mut self, region: StatusRegion) -> &mut Option<StatusMessage> {
        match region {
            StatusRegion::Auth => &mut self.auth,
            StatusRegion::Product => &mut self.product,
        }
    }
}
