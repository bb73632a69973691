// Outgoing message dispatch.
// Decides what would be sent and to how many recipients; no transport.

use tracing::info;

use crate::error::Result;

use super::store::CollectionStore;
use super::types::InviteTemplate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub subject: String,
    pub body: String,
    pub recipient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteRequest {
    pub trip_name: String,
    pub invitee_count: usize,
    pub body: String,
}

/// Something that delivers reminders and invites.
pub trait Dispatcher {
    /// Returns a short human summary of what was queued.
    fn send_reminder(&mut self, request: ReminderRequest) -> Result<String>;

    fn send_invites(&mut self, request: InviteRequest) -> Result<String>;
}

/// A message queued by [`Outbox`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Reminder(ReminderRequest),
    Invites(InviteRequest),
}

/// Dispatcher that keeps every request in memory.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Vec<Outgoing>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Outgoing] {
        &self.sent
    }
}

impl Dispatcher for Outbox {
    fn send_reminder(&mut self, request: ReminderRequest) -> Result<String> {
        info!(
            recipients = request.recipient_count,
            subject = %request.subject,
            "reminder queued"
        );
        let summary = format!(
            "Sending reminder to {} participant(s): {}",
            request.recipient_count, request.subject
        );
        self.sent.push(Outgoing::Reminder(request));
        Ok(summary)
    }

    fn send_invites(&mut self, request: InviteRequest) -> Result<String> {
        info!(
            invitees = request.invitee_count,
            trip = %request.trip_name,
            body_len = request.body.len(),
            "invites queued"
        );
        let summary = format!(
            "Sending {} invite(s) for \"{}\"",
            request.invitee_count, request.trip_name
        );
        self.sent.push(Outgoing::Invites(request));
        Ok(summary)
    }
}

/// Finds the stored invite body for a trip.
pub trait InviteTemplates {
    fn invite_body(&self, trip_name: &str) -> Option<&str>;
}

impl InviteTemplates for CollectionStore<InviteTemplate> {
    fn invite_body(&self, trip_name: &str) -> Option<&str> {
        self.records()
            .iter()
            .find(|t| t.trip_name == trip_name)
            .map(|t| t.body.as_str())
    }
}
