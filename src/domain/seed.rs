// Mock data loaded at session start.
// Embedded as JSON so the console runs without any external service.

use serde::Deserialize;

use crate::error::Result;

use super::types::{
    Communication, Contact, Form, InviteTemplate, LegalDocument, Participant, Trip, UsefulInfo,
};

const SEED_JSON: &str = include_str!("seed.json");

/// Initial contents of every collection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub trips: Vec<Trip>,
    pub participants: Vec<Participant>,
    pub contacts: Vec<Contact>,
    pub forms: Vec<Form>,
    pub invites: Vec<InviteTemplate>,
    pub communications: Vec<Communication>,
    pub useful_informations: Vec<UsefulInfo>,
    pub documents: Vec<LegalDocument>,
}

impl SeedData {
    /// Parse the embedded mock data.
    pub fn load() -> Result<Self> {
        Ok(serde_json::from_str(SEED_JSON)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DocumentKind, ParticipantStatus};

    #[test]
    fn test_seed_parses() {
        let seed = SeedData::load().unwrap();
        assert_eq!(seed.trips.len(), 3);
        assert_eq!(seed.participants.len(), 7);
        assert_eq!(seed.contacts.len(), 3);
        assert_eq!(seed.forms.len(), 3);
        assert_eq!(seed.invites.len(), 2);
        assert_eq!(seed.documents[0].kind, DocumentKind::Privacy);
    }

    #[test]
    fn test_seed_participants_reference_seed_trips() {
        let seed = SeedData::load().unwrap();
        for participant in &seed.participants {
            assert!(seed.trips.iter().any(|t| t.name == participant.trip));
        }
        assert_eq!(seed.participants[6].status, ParticipantStatus::Incomplete);
    }
}
