// Editor drafts and overlay text input.
// Plain text fields with one setter per field, validated independently.

use chrono::NaiveDate;

use crate::domain::{CommunicationKind, Form, Trip};
use crate::state::table::RecordId;

use super::orchestrator::{ConfirmArgs, OverlayKind, OverlayPayload};
use super::surface::{EditorKind, EditorMode};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validation message attached to one field of a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: usize,
    pub message: String,
}

impl FieldError {
    fn new(field: usize, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn required(errors: &mut Vec<FieldError>, field: usize, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{} is required", label)));
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    /// Id of the trip being edited, `None` when creating.
    pub editing: Option<RecordId>,
}

impl TripDraft {
    pub const LABELS: [&'static str; 4] = ["Name", "Destination", "Start date", "End date"];

    pub fn from_trip(trip: &Trip) -> Self {
        Self {
            name: trip.name.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date.format(DATE_FORMAT).to_string(),
            end_date: trip.end_date.format(DATE_FORMAT).to_string(),
            editing: Some(trip.id),
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_destination(&mut self, value: impl Into<String>) {
        self.destination = value.into();
    }

    pub fn set_start_date(&mut self, value: impl Into<String>) {
        self.start_date = value.into();
    }

    pub fn set_end_date(&mut self, value: impl Into<String>) {
        self.end_date = value.into();
    }

    /// Parsed dates, once both are valid.
    pub fn dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((parse_date(&self.start_date)?, parse_date(&self.end_date)?))
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required(&mut errors, 0, Self::LABELS[0], &self.name);
        required(&mut errors, 1, Self::LABELS[1], &self.destination);

        let mut dates = [None, None];
        for (offset, value) in [&self.start_date, &self.end_date].into_iter().enumerate() {
            let field = 2 + offset;
            if value.trim().is_empty() {
                required(&mut errors, field, Self::LABELS[field], value);
            } else {
                match parse_date(value) {
                    Some(date) => dates[offset] = Some(date),
                    None => errors.push(FieldError::new(field, "Use the YYYY-MM-DD format")),
                }
            }
        }

        if let [Some(start), Some(end)] = dates {
            if end < start {
                errors.push(FieldError::new(3, "End date is before the start date"));
            }
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunicationDraft {
    pub kind: CommunicationKind,
    pub title: String,
    pub message: String,
}

impl CommunicationDraft {
    pub const LABELS: [&'static str; 2] = ["Title", "Message"];

    pub fn new(kind: CommunicationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn set_kind(&mut self, kind: CommunicationKind) {
        self.kind = kind;
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.message = value.into();
    }

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required(&mut errors, 0, Self::LABELS[0], &self.title);
        required(&mut errors, 1, Self::LABELS[1], &self.message);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub name: String,
    pub trip: String,
    pub editing: Option<RecordId>,
}

impl FormDraft {
    pub const LABELS: [&'static str; 2] = ["Name", "Trip"];

    pub fn from_form(form: &Form) -> Self {
        Self {
            name: form.name.clone(),
            trip: form.trip.clone(),
            editing: Some(form.id),
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_trip(&mut self, value: impl Into<String>) {
        self.trip = value.into();
    }

    /// `trips` are the names a form may be attached to.
    pub fn validate(&self, trips: &[Trip]) -> Vec<FieldError> {
        let mut errors = Vec::new();
        required(&mut errors, 0, Self::LABELS[0], &self.name);
        required(&mut errors, 1, Self::LABELS[1], &self.trip);
        let trip = self.trip.trim();
        if !trip.is_empty() && !trips.iter().any(|t| t.name == trip) {
            errors.push(FieldError::new(1, format!("No trip named \"{}\"", trip)));
        }
        errors
    }
}

/// The draft behind the open editor surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorDraft {
    Trip(TripDraft),
    Communication(CommunicationDraft),
    Form(FormDraft),
}

impl EditorDraft {
    pub fn kind(&self) -> EditorKind {
        match self {
            EditorDraft::Trip(_) => EditorKind::Trip,
            EditorDraft::Communication(_) => EditorKind::Communication,
            EditorDraft::Form(_) => EditorKind::Form,
        }
    }

    pub fn mode(&self) -> EditorMode {
        let editing = match self {
            EditorDraft::Trip(draft) => draft.editing,
            EditorDraft::Communication(_) => None,
            EditorDraft::Form(draft) => draft.editing,
        };
        match editing {
            Some(_) => EditorMode::Edit,
            None => EditorMode::Create,
        }
    }

    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            EditorDraft::Trip(_) => &TripDraft::LABELS,
            EditorDraft::Communication(_) => &CommunicationDraft::LABELS,
            EditorDraft::Form(_) => &FormDraft::LABELS,
        }
    }

    pub fn value(&self, field: usize) -> &str {
        match (self, field) {
            (EditorDraft::Trip(d), 0) => &d.name,
            (EditorDraft::Trip(d), 1) => &d.destination,
            (EditorDraft::Trip(d), 2) => &d.start_date,
            (EditorDraft::Trip(d), 3) => &d.end_date,
            (EditorDraft::Communication(d), 0) => &d.title,
            (EditorDraft::Communication(d), 1) => &d.message,
            (EditorDraft::Form(d), 0) => &d.name,
            (EditorDraft::Form(d), 1) => &d.trip,
            _ => "",
        }
    }

    /// Route a value to the setter of `field`.
    pub fn set(&mut self, field: usize, value: String) {
        match (self, field) {
            (EditorDraft::Trip(d), 0) => d.set_name(value),
            (EditorDraft::Trip(d), 1) => d.set_destination(value),
            (EditorDraft::Trip(d), 2) => d.set_start_date(value),
            (EditorDraft::Trip(d), 3) => d.set_end_date(value),
            (EditorDraft::Communication(d), 0) => d.set_title(value),
            (EditorDraft::Communication(d), 1) => d.set_message(value),
            (EditorDraft::Form(d), 0) => d.set_name(value),
            (EditorDraft::Form(d), 1) => d.set_trip(value),
            _ => {}
        }
    }

    pub fn validate(&self, trips: &[Trip]) -> Vec<FieldError> {
        match self {
            EditorDraft::Trip(d) => d.validate(),
            EditorDraft::Communication(d) => d.validate(),
            EditorDraft::Form(d) => d.validate(trips),
        }
    }
}

/// Editor surface state: the draft, the focused field, and the last validation result.
#[derive(Debug, Clone)]
pub struct Editor {
    pub draft: EditorDraft,
    pub focus: usize,
    pub errors: Vec<FieldError>,
}

impl Editor {
    pub fn new(draft: EditorDraft) -> Self {
        Self {
            draft,
            focus: 0,
            errors: Vec::new(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.draft.labels().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.draft.labels().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn push_char(&mut self, c: char) {
        let mut value = self.draft.value(self.focus).to_string();
        value.push(c);
        self.draft.set(self.focus, value);
    }

    pub fn pop_char(&mut self) {
        let mut value = self.draft.value(self.focus).to_string();
        value.pop();
        self.draft.set(self.focus, value);
    }

    pub fn toggle_kind(&mut self) {
        if let EditorDraft::Communication(d) = &mut self.draft {
            d.set_kind(d.kind.toggled());
        }
    }

    /// Validate every field, keeping the errors for display. True if the draft can be saved.
    pub fn check(&mut self, trips: &[Trip]) -> bool {
        self.errors = self.draft.validate(trips);
        self.errors.is_empty()
    }

    pub fn error_for(&self, field: usize) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

/// Which overlay field receives typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayField {
    Subject,
    Body,
}

/// Text the user types into an open overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayInput {
    pub kind: OverlayKind,
    pub subject: String,
    pub body: String,
    pub focus: OverlayField,
}

impl OverlayInput {
    pub fn for_payload(payload: &OverlayPayload) -> Self {
        match payload {
            OverlayPayload::Reminder { .. } => Self {
                kind: OverlayKind::Reminder,
                subject: String::new(),
                body: String::new(),
                focus: OverlayField::Subject,
            },
            OverlayPayload::Invite { body, .. } => Self {
                kind: OverlayKind::Invite,
                subject: String::new(),
                body: body.clone(),
                focus: OverlayField::Body,
            },
        }
    }

    /// Invites have no subject, so focus stays on the body.
    pub fn toggle_focus(&mut self) {
        if self.kind == OverlayKind::Reminder {
            self.focus = match self.focus {
                OverlayField::Subject => OverlayField::Body,
                OverlayField::Body => OverlayField::Subject,
            };
        }
    }

    fn focused(&mut self) -> &mut String {
        match self.focus {
            OverlayField::Subject => &mut self.subject,
            OverlayField::Body => &mut self.body,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused().pop();
    }

    pub fn args(&self) -> ConfirmArgs {
        match self.kind {
            OverlayKind::Reminder => ConfirmArgs::Reminder {
                subject: self.subject.clone(),
                body: self.body.clone(),
            },
            OverlayKind::Invite => ConfirmArgs::Invite {
                body: self.body.clone(),
            },
        }
    }
}
