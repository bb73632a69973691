// View orchestration.
// Owns the active surface and the stack of confirmation overlays above it.

use tracing::{debug, info};

use super::surface::{EditorKind, EditorMode, Surface, ViewId};

/// Domain action run when an overlay is confirmed.
pub type ConfirmFn<C> = Box<dyn FnOnce(&mut C, &ConfirmArgs)>;
/// Caller cleanup run after the domain action.
pub type CompleteFn<C> = Box<dyn FnOnce(&mut C)>;

/// Overlay kinds. At most one overlay of each kind is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Reminder,
    Invite,
}

/// Immutable snapshot handed to an overlay when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayPayload {
    Reminder {
        count: usize,
    },
    Invite {
        trip_name: String,
        invitee_count: usize,
        /// Pre-filled from the trip's invite template; empty when there is none.
        body: String,
    },
}

impl OverlayPayload {
    pub fn kind(&self) -> OverlayKind {
        match self {
            OverlayPayload::Reminder { .. } => OverlayKind::Reminder,
            OverlayPayload::Invite { .. } => OverlayKind::Invite,
        }
    }
}

/// What the user entered when confirming an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmArgs {
    Reminder { subject: String, body: String },
    Invite { body: String },
}

/// An open confirmation dialog.
pub struct Overlay<C> {
    payload: OverlayPayload,
    on_confirm: Option<ConfirmFn<C>>,
    on_complete: Option<CompleteFn<C>>,
}

impl<C> Overlay<C> {
    pub fn kind(&self) -> OverlayKind {
        self.payload.kind()
    }

    pub fn payload(&self) -> &OverlayPayload {
        &self.payload
    }
}

impl<C> std::fmt::Debug for Overlay<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Overlay")
            .field("payload", &self.payload)
            .field("on_confirm", &self.on_confirm.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

/// An editor that was just closed, returned so the caller can commit its draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedEditor {
    pub editor: EditorKind,
    pub mode: EditorMode,
    pub parent: ViewId,
}

/// Decides what is on screen: one surface plus zero or more overlays.
///
/// `C` is the context overlay callbacks mutate. It lives outside the
/// orchestrator so callbacks can borrow it mutably while the orchestrator
/// is also borrowed.
pub struct ViewOrchestrator<C> {
    active: Surface,
    /// Stacking order: last entry is drawn on top.
    overlays: Vec<Overlay<C>>,
}

impl<C> ViewOrchestrator<C> {
    pub fn new(start: ViewId) -> Self {
        Self {
            active: Surface::View(start),
            overlays: Vec::new(),
        }
    }

    pub fn active_surface(&self) -> &Surface {
        &self.active
    }

    /// Switch to a view. Any open editor is dropped without saving; overlays stay.
    pub fn navigate_to(&mut self, view: ViewId) {
        if let Surface::Editor { editor, .. } = self.active {
            debug!(?editor, "discarding open editor on navigation");
        }
        info!(?view, "navigate");
        self.active = Surface::View(view);
    }

    /// Open an editor, replacing any editor already open.
    pub fn open_editor(&mut self, editor: EditorKind, mode: EditorMode) {
        let parent = self.active.view();
        info!(?editor, ?mode, ?parent, "open editor");
        self.active = Surface::Editor {
            editor,
            mode,
            parent,
        };
    }

    /// Cancel the open editor and return to its parent view.
    pub fn close_editor(&mut self) -> Option<ClosedEditor> {
        let closed = self.leave_editor()?;
        debug!(editor = ?closed.editor, "editor cancelled");
        Some(closed)
    }

    /// Close the open editor for saving. The caller commits the draft.
    pub fn save_editor(&mut self) -> Option<ClosedEditor> {
        let closed = self.leave_editor()?;
        info!(editor = ?closed.editor, mode = ?closed.mode, "editor saved");
        Some(closed)
    }

    fn leave_editor(&mut self) -> Option<ClosedEditor> {
        match self.active {
            Surface::Editor {
                editor,
                mode,
                parent,
            } => {
                self.active = Surface::View(parent);
                Some(ClosedEditor {
                    editor,
                    mode,
                    parent,
                })
            }
            Surface::View(_) => None,
        }
    }

    /// Open an overlay. Re-opening a kind replaces its payload and callbacks
    /// and moves it to the top of the stack.
    pub fn open_overlay(
        &mut self,
        payload: OverlayPayload,
        on_confirm: Option<ConfirmFn<C>>,
        on_complete: Option<CompleteFn<C>>,
    ) {
        let kind = payload.kind();
        self.overlays.retain(|o| o.kind() != kind);
        info!(?kind, "open overlay");
        self.overlays.push(Overlay {
            payload,
            on_confirm,
            on_complete,
        });
    }

    /// Confirm an overlay: domain action, then caller cleanup, then close.
    /// Returns false if no overlay of that kind is open.
    pub fn confirm_overlay(&mut self, kind: OverlayKind, args: ConfirmArgs, ctx: &mut C) -> bool {
        let Some(index) = self.position(kind) else {
            return false;
        };
        let overlay = self.overlays.remove(index);
        info!(?kind, "confirm overlay");

        if let Some(on_confirm) = overlay.on_confirm {
            on_confirm(ctx, &args);
        }
        if let Some(on_complete) = overlay.on_complete {
            on_complete(ctx);
        }
        true
    }

    /// Dismiss an overlay without running any callback.
    pub fn close_overlay(&mut self, kind: OverlayKind) -> bool {
        match self.position(kind) {
            Some(index) => {
                self.overlays.remove(index);
                debug!(?kind, "overlay dismissed");
                true
            }
            None => false,
        }
    }

    pub fn overlay(&self, kind: OverlayKind) -> Option<&Overlay<C>> {
        self.overlays.iter().find(|o| o.kind() == kind)
    }

    /// Open overlays, bottom first.
    pub fn overlays(&self) -> impl Iterator<Item = &Overlay<C>> {
        self.overlays.iter()
    }

    /// The overlay that receives keyboard input.
    pub fn top_overlay(&self) -> Option<&Overlay<C>> {
        self.overlays.last()
    }

    fn position(&self, kind: OverlayKind) -> Option<usize> {
        self.overlays.iter().position(|o| o.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records callback invocations in order.
    #[derive(Default)]
    struct Probe {
        calls: Vec<String>,
    }

    fn reminder(count: usize) -> OverlayPayload {
        OverlayPayload::Reminder { count }
    }

    fn reminder_args() -> ConfirmArgs {
        ConfirmArgs::Reminder {
            subject: "Documents".to_string(),
            body: "Please upload your passport".to_string(),
        }
    }

    #[test]
    fn test_navigate_closes_editor() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        orch.open_editor(EditorKind::Trip, EditorMode::Create);
        assert!(orch.active_surface().is_editor());

        orch.navigate_to(ViewId::Forms);
        assert_eq!(*orch.active_surface(), Surface::View(ViewId::Forms));
        assert!(orch.close_editor().is_none());
    }

    #[test]
    fn test_editor_returns_to_parent_view() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        orch.navigate_to(ViewId::ManageTrip);
        orch.open_editor(EditorKind::Trip, EditorMode::Edit);

        let closed = orch.save_editor().unwrap();
        assert_eq!(closed.editor, EditorKind::Trip);
        assert_eq!(closed.mode, EditorMode::Edit);
        assert_eq!(*orch.active_surface(), Surface::View(ViewId::ManageTrip));
    }

    #[test]
    fn test_second_editor_replaces_first_and_keeps_parent() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Communications);
        orch.open_editor(EditorKind::Communication, EditorMode::Create);
        orch.open_editor(EditorKind::Form, EditorMode::Create);

        assert_eq!(
            *orch.active_surface(),
            Surface::Editor {
                editor: EditorKind::Form,
                mode: EditorMode::Create,
                parent: ViewId::Communications,
            }
        );

        orch.close_editor();
        assert_eq!(*orch.active_surface(), Surface::View(ViewId::Communications));
    }

    #[test]
    fn test_close_and_save_without_editor_are_noops() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Reports);
        assert!(orch.close_editor().is_none());
        assert!(orch.save_editor().is_none());
        assert_eq!(*orch.active_surface(), Surface::View(ViewId::Reports));
    }

    #[test]
    fn test_overlay_survives_navigation_and_runs_callback() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::ManageParticipants);
        let mut probe = Probe::default();

        orch.open_overlay(
            reminder(3),
            None,
            Some(Box::new(|p: &mut Probe| p.calls.push("cleared".to_string()))),
        );
        orch.navigate_to(ViewId::Reports);
        orch.open_editor(EditorKind::Form, EditorMode::Create);
        assert!(orch.overlay(OverlayKind::Reminder).is_some());

        assert!(orch.confirm_overlay(OverlayKind::Reminder, reminder_args(), &mut probe));
        assert_eq!(probe.calls, vec!["cleared"]);
        assert!(orch.overlay(OverlayKind::Reminder).is_none());
    }

    #[test]
    fn test_confirm_runs_action_before_completion() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        let mut probe = Probe::default();

        orch.open_overlay(
            reminder(2),
            Some(Box::new(|p: &mut Probe, args: &ConfirmArgs| {
                if let ConfirmArgs::Reminder { subject, .. } = args {
                    p.calls.push(format!("sent:{}", subject));
                }
            })),
            Some(Box::new(|p: &mut Probe| p.calls.push("cleanup".to_string()))),
        );

        orch.confirm_overlay(OverlayKind::Reminder, reminder_args(), &mut probe);
        assert_eq!(probe.calls, vec!["sent:Documents", "cleanup"]);
    }

    #[test]
    fn test_close_overlay_is_silent() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        let mut probe = Probe::default();
        orch.open_overlay(
            reminder(1),
            Some(Box::new(|p: &mut Probe, _: &ConfirmArgs| p.calls.push("sent".to_string()))),
            Some(Box::new(|p: &mut Probe| p.calls.push("cleanup".to_string()))),
        );

        assert!(orch.close_overlay(OverlayKind::Reminder));
        assert!(!orch.confirm_overlay(OverlayKind::Reminder, reminder_args(), &mut probe));
        assert!(probe.calls.is_empty());
    }

    #[test]
    fn test_missing_overlay_is_noop() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        let mut probe = Probe::default();
        assert!(!orch.close_overlay(OverlayKind::Invite));
        assert!(!orch.confirm_overlay(
            OverlayKind::Invite,
            ConfirmArgs::Invite {
                body: String::new()
            },
            &mut probe
        ));
    }

    #[test]
    fn test_reopen_replaces_payload_and_moves_to_top() {
        let mut orch: ViewOrchestrator<Probe> = ViewOrchestrator::new(ViewId::Dashboard);
        let mut probe = Probe::default();

        orch.open_overlay(
            reminder(5),
            None,
            Some(Box::new(|p: &mut Probe| p.calls.push("old".to_string()))),
        );
        orch.open_overlay(
            OverlayPayload::Invite {
                trip_name: "Trip to Ibiza".to_string(),
                invitee_count: 3,
                body: String::new(),
            },
            None,
            None,
        );
        assert_eq!(orch.top_overlay().unwrap().kind(), OverlayKind::Invite);

        orch.open_overlay(
            reminder(2),
            None,
            Some(Box::new(|p: &mut Probe| p.calls.push("new".to_string()))),
        );

        let kinds: Vec<OverlayKind> = orch.overlays().map(|o| o.kind()).collect();
        assert_eq!(kinds, vec![OverlayKind::Invite, OverlayKind::Reminder]);
        assert_eq!(
            orch.overlay(OverlayKind::Reminder).unwrap().payload(),
            &reminder(2)
        );

        orch.confirm_overlay(OverlayKind::Reminder, reminder_args(), &mut probe);
        assert_eq!(probe.calls, vec!["new"]);
    }
}
