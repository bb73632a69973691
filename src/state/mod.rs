// State management module.
// Surfaces, overlays, table queries, editors, and the session workspace.

#![allow(dead_code)]

pub mod csv;
pub mod editor;
pub mod lists;
pub mod notices;
pub mod orchestrator;
pub mod surface;
pub mod table;
pub mod workspace;

pub use editor::{Editor, EditorDraft, OverlayInput};
pub use lists::TableView;
pub use notices::NoticeLevel;
pub use orchestrator::{OverlayKind, OverlayPayload, ViewOrchestrator};
pub use surface::{EditorKind, Surface, ViewId};
pub use table::{HeaderCheckbox, Record, SortDirection};
pub use workspace::{Session, TripReport, Workspace};
