// Surface definitions.
// The single thing drawn in the main content area: a view or an editor.

use serde::{Deserialize, Serialize};

/// Primary navigation views, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    #[default]
    Dashboard,
    ManageTrip,
    ManageParticipants,
    ManageContacts,
    Invites,
    Communications,
    UsefulInformations,
    Forms,
    PrivacyPolicy,
    TermsConditions,
    Documents,
    Reports,
}

impl ViewId {
    pub const ALL: [ViewId; 12] = [
        ViewId::Dashboard,
        ViewId::ManageTrip,
        ViewId::ManageParticipants,
        ViewId::ManageContacts,
        ViewId::Invites,
        ViewId::Communications,
        ViewId::UsefulInformations,
        ViewId::Forms,
        ViewId::PrivacyPolicy,
        ViewId::TermsConditions,
        ViewId::Documents,
        ViewId::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::ManageTrip => "Manage Trip",
            ViewId::ManageParticipants => "Participants",
            ViewId::ManageContacts => "Contacts",
            ViewId::Invites => "Invites",
            ViewId::Communications => "Communications",
            ViewId::UsefulInformations => "Useful Informations",
            ViewId::Forms => "Forms",
            ViewId::PrivacyPolicy => "Privacy Policy",
            ViewId::TermsConditions => "Terms & Conditions",
            ViewId::Documents => "Documents",
            ViewId::Reports => "Reports",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    /// Next view in sidebar order, wrapping around.
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous view in sidebar order, wrapping around.
    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Full-screen editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Trip,
    Communication,
    Form,
}

impl EditorKind {
    pub fn noun(&self) -> &'static str {
        match self {
            EditorKind::Trip => "Trip",
            EditorKind::Communication => "Communication",
            EditorKind::Form => "Form",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

/// What the main content area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    View(ViewId),
    /// An editor, remembering the view it suspended.
    Editor {
        editor: EditorKind,
        mode: EditorMode,
        parent: ViewId,
    },
}

impl Surface {
    /// Get the display title for this surface.
    pub fn title(&self) -> String {
        match self {
            Surface::View(view) => view.title().to_string(),
            Surface::Editor {
                editor,
                mode: EditorMode::Create,
                ..
            } => format!("New {}", editor.noun()),
            Surface::Editor {
                editor,
                mode: EditorMode::Edit,
                ..
            } => format!("Edit {}", editor.noun()),
        }
    }

    /// The visible view, or the view suspended underneath an editor.
    pub fn view(&self) -> ViewId {
        match self {
            Surface::View(view) => *view,
            Surface::Editor { parent, .. } => *parent,
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, Surface::Editor { .. })
    }
}
