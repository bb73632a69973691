// Domain record types.
// Trips, participants, contacts, forms, invites, communications, and legal documents.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::state::table::{FieldValue, Record, RecordId, TableField};

use super::store::Entity;

/// Registration status of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantStatus {
    Registered,
    Invited,
    Incomplete,
}

impl ParticipantStatus {
    pub const ALL: [ParticipantStatus; 3] = [
        ParticipantStatus::Registered,
        ParticipantStatus::Invited,
        ParticipantStatus::Incomplete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Registered => "Registered",
            ParticipantStatus::Invited => "Invited",
            ParticipantStatus::Incomplete => "Incomplete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub trip: String,
    pub group: String,
    pub status: ParticipantStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipantField {
    Id,
    Name,
    Email,
    Trip,
    Group,
    Status,
}

impl ParticipantField {
    /// Column order of the participants export.
    pub const EXPORT: [ParticipantField; 6] = [
        ParticipantField::Id,
        ParticipantField::Name,
        ParticipantField::Email,
        ParticipantField::Trip,
        ParticipantField::Group,
        ParticipantField::Status,
    ];
}

impl TableField for ParticipantField {
    fn label(self) -> &'static str {
        match self {
            ParticipantField::Id => "ID",
            ParticipantField::Name => "Name",
            ParticipantField::Email => "Email",
            ParticipantField::Trip => "Trip",
            ParticipantField::Group => "Group",
            ParticipantField::Status => "Status",
        }
    }
}

impl Record for Participant {
    type Field = ParticipantField;
    const ENTITY: &'static str = "participants";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: ParticipantField) -> FieldValue<'_> {
        match field {
            ParticipantField::Id => FieldValue::Int(self.id as i64),
            ParticipantField::Name => (&self.name).into(),
            ParticipantField::Email => (&self.email).into(),
            ParticipantField::Trip => (&self.trip).into(),
            ParticipantField::Group => (&self.group).into(),
            ParticipantField::Status => self.status.as_str().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Id,
    Name,
    Category,
    Phone,
    Email,
    Notes,
}

impl ContactField {
    pub const EXPORT: [ContactField; 6] = [
        ContactField::Id,
        ContactField::Name,
        ContactField::Category,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Notes,
    ];
}

impl TableField for ContactField {
    fn label(self) -> &'static str {
        match self {
            ContactField::Id => "ID",
            ContactField::Name => "Name",
            ContactField::Category => "Category",
            ContactField::Phone => "Phone",
            ContactField::Email => "Email",
            ContactField::Notes => "Notes",
        }
    }
}

impl Record for Contact {
    type Field = ContactField;
    const ENTITY: &'static str = "contacts";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: ContactField) -> FieldValue<'_> {
        match field {
            ContactField::Id => FieldValue::Int(self.id as i64),
            ContactField::Name => (&self.name).into(),
            ContactField::Category => (&self.category).into(),
            ContactField::Phone => (&self.phone).into(),
            ContactField::Email => (&self.email).into(),
            ContactField::Notes => (&self.notes).into(),
        }
    }
}

/// A questionnaire attached to a trip. `responses` reads like "65/80".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: RecordId,
    pub name: String,
    pub trip: String,
    pub responses: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Id,
    Name,
    Trip,
    Responses,
}

impl FormField {
    pub const EXPORT: [FormField; 4] = [
        FormField::Id,
        FormField::Name,
        FormField::Trip,
        FormField::Responses,
    ];
}

impl TableField for FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Id => "ID",
            FormField::Name => "Name",
            FormField::Trip => "Trip",
            FormField::Responses => "Responses",
        }
    }
}

impl Record for Form {
    type Field = FormField;
    const ENTITY: &'static str = "forms";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: FormField) -> FieldValue<'_> {
        match field {
            FormField::Id => FieldValue::Int(self.id as i64),
            FormField::Name => (&self.name).into(),
            FormField::Trip => (&self.trip).into(),
            FormField::Responses => (&self.responses).into(),
        }
    }
}

/// Stored invite email for a trip, used to pre-fill the invite dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteTemplate {
    pub id: RecordId,
    pub trip_name: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteField {
    Id,
    Trip,
    Subject,
    Body,
}

impl InviteField {
    pub const EXPORT: [InviteField; 4] = [
        InviteField::Id,
        InviteField::Trip,
        InviteField::Subject,
        InviteField::Body,
    ];
}

impl TableField for InviteField {
    fn label(self) -> &'static str {
        match self {
            InviteField::Id => "ID",
            InviteField::Trip => "Trip",
            InviteField::Subject => "Subject",
            InviteField::Body => "Body",
        }
    }
}

impl Record for InviteTemplate {
    type Field = InviteField;
    const ENTITY: &'static str = "invites";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: InviteField) -> FieldValue<'_> {
        match field {
            InviteField::Id => FieldValue::Int(self.id as i64),
            InviteField::Trip => (&self.trip_name).into(),
            InviteField::Subject => (&self.subject).into(),
            InviteField::Body => (&self.body).into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: RecordId,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    Id,
    Name,
    Destination,
    Start,
    End,
}

impl TableField for TripField {
    fn label(self) -> &'static str {
        match self {
            TripField::Id => "ID",
            TripField::Name => "Name",
            TripField::Destination => "Destination",
            TripField::Start => "Start",
            TripField::End => "End",
        }
    }
}

impl Record for Trip {
    type Field = TripField;
    const ENTITY: &'static str = "trips";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: TripField) -> FieldValue<'_> {
        match field {
            TripField::Id => FieldValue::Int(self.id as i64),
            TripField::Name => (&self.name).into(),
            TripField::Destination => (&self.destination).into(),
            // ISO dates sort correctly as text
            TripField::Start => FieldValue::Text(self.start_date.to_string().into()),
            TripField::End => FieldValue::Text(self.end_date.to_string().into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CommunicationKind {
    #[default]
    Information,
    Alert,
}

impl CommunicationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationKind::Information => "Information",
            CommunicationKind::Alert => "Alert",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            CommunicationKind::Information => CommunicationKind::Alert,
            CommunicationKind::Alert => CommunicationKind::Information,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    pub id: RecordId,
    pub kind: CommunicationKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommunicationField {
    Id,
    Kind,
    Title,
    Message,
}

impl TableField for CommunicationField {
    fn label(self) -> &'static str {
        match self {
            CommunicationField::Id => "ID",
            CommunicationField::Kind => "Type",
            CommunicationField::Title => "Title",
            CommunicationField::Message => "Message",
        }
    }
}

impl Record for Communication {
    type Field = CommunicationField;
    const ENTITY: &'static str = "communications";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: CommunicationField) -> FieldValue<'_> {
        match field {
            CommunicationField::Id => FieldValue::Int(self.id as i64),
            CommunicationField::Kind => self.kind.as_str().into(),
            CommunicationField::Title => (&self.title).into(),
            CommunicationField::Message => (&self.message).into(),
        }
    }
}

/// Practical information shown to participants (meeting points, documents to bring).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsefulInfo {
    pub id: RecordId,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsefulInfoField {
    Id,
    Title,
    Content,
}

impl TableField for UsefulInfoField {
    fn label(self) -> &'static str {
        match self {
            UsefulInfoField::Id => "ID",
            UsefulInfoField::Title => "Title",
            UsefulInfoField::Content => "Content",
        }
    }
}

impl Record for UsefulInfo {
    type Field = UsefulInfoField;
    const ENTITY: &'static str = "useful informations";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: UsefulInfoField) -> FieldValue<'_> {
        match field {
            UsefulInfoField::Id => FieldValue::Int(self.id as i64),
            UsefulInfoField::Title => (&self.title).into(),
            UsefulInfoField::Content => (&self.content).into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Privacy,
    Terms,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Privacy => "Privacy Policy",
            DocumentKind::Terms => "Terms & Conditions",
        }
    }
}

/// A privacy policy or terms document. The body is plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalDocument {
    pub id: RecordId,
    pub kind: DocumentKind,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentField {
    Id,
    Kind,
    Title,
}

impl TableField for DocumentField {
    fn label(self) -> &'static str {
        match self {
            DocumentField::Id => "ID",
            DocumentField::Kind => "Type",
            DocumentField::Title => "Title",
        }
    }
}

impl Record for LegalDocument {
    type Field = DocumentField;
    const ENTITY: &'static str = "documents";

    fn id(&self) -> RecordId {
        self.id
    }

    fn value(&self, field: DocumentField) -> FieldValue<'_> {
        match field {
            DocumentField::Id => FieldValue::Int(self.id as i64),
            DocumentField::Kind => self.kind.as_str().into(),
            DocumentField::Title => (&self.title).into(),
        }
    }
}

impl Entity for Participant {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for Contact {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for Form {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for InviteTemplate {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for Trip {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for Communication {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for UsefulInfo {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Entity for LegalDocument {
    fn assign_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_renders_as_text() {
        let p = Participant {
            id: 1,
            name: "Giulia Rosa".to_string(),
            email: "g.rosa@example.com".to_string(),
            trip: "Trip to Ibiza".to_string(),
            group: "VIP".to_string(),
            status: ParticipantStatus::Invited,
        };
        assert_eq!(p.value(ParticipantField::Status).to_string(), "Invited");
        assert_eq!(p.value(ParticipantField::Id), FieldValue::Int(1));
    }

    #[test]
    fn test_trip_dates_sort_as_iso_text() {
        let trip = Trip {
            id: 1,
            name: "Trip to Ibiza".to_string(),
            destination: "Ibiza".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 9).unwrap(),
        };
        assert_eq!(trip.value(TripField::Start).to_string(), "2026-06-05");
        assert!(trip.value(TripField::Start) < trip.value(TripField::End));
    }

    #[test]
    fn test_communication_kind_toggle() {
        assert_eq!(
            CommunicationKind::Information.toggled(),
            CommunicationKind::Alert
        );
        assert_eq!(
            CommunicationKind::Alert.toggled(),
            CommunicationKind::Information
        );
    }
}
