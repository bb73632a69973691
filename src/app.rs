// App state and main event loop.
// Routes keyboard input to the top overlay, the open editor, or the active view.

use std::collections::HashMap;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{CommunicationKind, Outbox, SeedData};
use crate::error::Result;
use crate::state::editor::{CommunicationDraft, FormDraft, TripDraft};
use crate::state::{
    Editor, EditorDraft, OverlayInput, OverlayKind, Session, ViewId, ViewOrchestrator, Workspace,
};
use crate::ui;

/// Whether typed characters go to a view's search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Main application state.
pub struct App {
    pub orchestrator: ViewOrchestrator<Workspace>,
    pub workspace: Workspace,
    /// Draft behind the editor surface, present while an editor is open.
    pub editor: Option<Editor>,
    /// Text typed into each open overlay.
    pub overlay_inputs: HashMap<OverlayKind, OverlayInput>,
    pub input_mode: InputMode,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    /// Build the app from config with a fresh mock session.
    pub fn new(config: &Config) -> Result<Self> {
        let session = Session::from_seed(SeedData::load()?);
        let workspace = Workspace::new(
            session,
            Box::new(Outbox::new()),
            config.export_dir(),
            config.max_notices,
        );
        Ok(Self::with_workspace(workspace, config.start_view))
    }

    pub fn with_workspace(mut workspace: Workspace, start: ViewId) -> Self {
        workspace.clamp_cursors();
        Self {
            orchestrator: ViewOrchestrator::new(start),
            workspace,
            editor: None,
            overlay_inputs: HashMap::new(),
            input_mode: InputMode::Normal,
            should_quit: false,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle one key press. Only the topmost overlay sees input while any is open.
    pub fn handle_key(&mut self, key: KeyEvent) {
        debug!(code = ?key.code, modifiers = ?key.modifiers, "key");
        if let Some(kind) = self.orchestrator.top_overlay().map(|o| o.kind()) {
            self.handle_overlay_key(kind, key);
        } else if self.editor.is_some() {
            self.handle_editor_key(key);
        } else if self.input_mode == InputMode::Search {
            self.handle_search_key(key);
        } else {
            self.handle_view_key(key);
        }
    }

    pub fn active_view(&self) -> ViewId {
        self.orchestrator.active_surface().view()
    }

    /// Switch views, dropping any open editor and search input.
    pub fn navigate(&mut self, view: ViewId) {
        self.orchestrator.navigate_to(view);
        self.editor = None;
        self.input_mode = InputMode::Normal;
    }

    fn open_editor(&mut self, draft: EditorDraft) {
        self.orchestrator.open_editor(draft.kind(), draft.mode());
        self.editor = Some(Editor::new(draft));
    }

    /// Reset the typed text of an overlay that was just (re)opened.
    fn overlay_opened(&mut self, kind: OverlayKind) {
        if let Some(overlay) = self.orchestrator.overlay(kind) {
            self.overlay_inputs
                .insert(kind, OverlayInput::for_payload(overlay.payload()));
        }
    }

    fn handle_overlay_key(&mut self, kind: OverlayKind, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.orchestrator.close_overlay(kind);
                self.overlay_inputs.remove(&kind);
            }
            KeyCode::Enter => {
                let args = match self.overlay_inputs.remove(&kind) {
                    Some(input) => input.args(),
                    None => return,
                };
                self.orchestrator
                    .confirm_overlay(kind, args, &mut self.workspace);
                self.workspace.clamp_cursors();
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if let Some(input) = self.overlay_inputs.get_mut(&kind) {
                    input.toggle_focus();
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.overlay_inputs.get_mut(&kind) {
                    input.pop_char();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.overlay_inputs.get_mut(&kind) {
                    input.push_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.orchestrator.close_editor();
                self.editor = None;
            }
            KeyCode::Char('s') if ctrl => self.save_editor(),
            KeyCode::Char('t') if ctrl => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.toggle_kind();
                }
            }
            _ => {
                let Some(editor) = self.editor.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Tab | KeyCode::Down => editor.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => editor.focus_prev(),
                    KeyCode::Backspace => editor.pop_char(),
                    KeyCode::Char(c) if !ctrl => editor.push_char(c),
                    _ => {}
                }
            }
        }
    }

    /// Validate the draft; a valid one closes the editor and is committed.
    fn save_editor(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if !editor.check(self.workspace.session.trips.records()) {
            debug!(errors = editor.errors.len(), "draft has validation errors");
            return;
        }
        let Some(editor) = self.editor.take() else {
            return;
        };
        self.orchestrator.save_editor();
        match self.workspace.commit_draft(&editor.draft) {
            Ok(message) => {
                info!(%message, "draft committed");
                self.workspace.notices.info(message);
            }
            Err(e) => self.workspace.notices.error(format!("Save failed: {}", e)),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let view = self.active_view();
        let mut term = self
            .workspace
            .search_term(view)
            .unwrap_or_default()
            .to_string();
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                return;
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                term.clear();
            }
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => term.push(c),
            _ => return,
        }
        self.workspace.set_search_term(view, term);
    }

    fn handle_view_key(&mut self, key: KeyEvent) {
        let view = self.active_view();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.navigate(view.next()),
            KeyCode::BackTab => self.navigate(view.prev()),
            KeyCode::Down | KeyCode::Char('j') => self.workspace.move_cursor(view, true),
            KeyCode::Up | KeyCode::Char('k') => self.workspace.move_cursor(view, false),
            KeyCode::Char('/') if self.workspace.search_term(view).is_some() => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('x') => {
                self.workspace.export(view);
            }
            KeyCode::Char(c) => self.handle_view_char(view, c),
            _ => {}
        }
    }

    fn handle_view_char(&mut self, view: ViewId, c: char) {
        match (view, c) {
            (ViewId::Dashboard | ViewId::ManageTrip, 'n') => {
                self.open_editor(EditorDraft::Trip(TripDraft::default()));
            }
            (ViewId::Dashboard, 'm') | (ViewId::Communications, 'n') => self.open_editor(
                EditorDraft::Communication(CommunicationDraft::new(CommunicationKind::Information)),
            ),
            (ViewId::Communications, 'a') => self.open_editor(EditorDraft::Communication(
                CommunicationDraft::new(CommunicationKind::Alert),
            )),
            (ViewId::Dashboard, 'i') => {
                if let Some(trip) = self.workspace.trip_at_cursor().map(|t| t.name.clone()) {
                    self.workspace.request_invites(&mut self.orchestrator, &trip);
                    self.overlay_opened(OverlayKind::Invite);
                }
            }
            (ViewId::Dashboard, 'r') => {
                if let Some(trip) = self.workspace.trip_at_cursor().map(|t| t.name.clone()) {
                    if self
                        .workspace
                        .request_trip_reminder(&mut self.orchestrator, &trip)
                    {
                        self.overlay_opened(OverlayKind::Reminder);
                    }
                }
            }
            (ViewId::ManageTrip, 'e') => {
                if let Some(draft) = self.workspace.trip_at_cursor().map(TripDraft::from_trip) {
                    self.open_editor(EditorDraft::Trip(draft));
                }
            }
            (ViewId::Forms, 'n') => self.open_editor(EditorDraft::Form(FormDraft::default())),
            (ViewId::Forms, 'e') => {
                let forms = self.workspace.session.forms.records();
                if let Some(draft) = self.workspace.forms.cursor_record(forms).map(FormDraft::from_form)
                {
                    self.open_editor(EditorDraft::Form(draft));
                }
            }
            (ViewId::ManageParticipants, _) => self.handle_participants_char(c),
            (ViewId::ManageContacts, '1'..='3') => {
                self.workspace.sort_by_column(view, sort_column(c));
            }
            (_, 'd') => {
                self.workspace.delete_at_cursor(view);
            }
            _ => {}
        }
    }

    fn handle_participants_char(&mut self, c: char) {
        let view = ViewId::ManageParticipants;
        match c {
            't' => self.workspace.cycle_trip_filter(),
            's' => self.workspace.cycle_status_filter(),
            '1'..='5' => self.workspace.sort_by_column(view, sort_column(c)),
            ' ' => self.workspace.toggle_participant_at_cursor(),
            'a' => self.workspace.toggle_all_participants(),
            'c' => self.workspace.participants.engine.clear_selection(),
            'r' => {
                if self
                    .workspace
                    .request_participant_reminder(&mut self.orchestrator)
                {
                    self.overlay_opened(OverlayKind::Reminder);
                }
            }
            'i' => {
                let records = self.workspace.session.participants.records();
                let trip = self
                    .workspace
                    .participants
                    .cursor_record(records)
                    .map(|p| p.trip.clone());
                if let Some(trip) = trip {
                    self.workspace.request_invites(&mut self.orchestrator, &trip);
                    self.overlay_opened(OverlayKind::Invite);
                }
            }
            'd' => {
                self.workspace.delete_at_cursor(view);
            }
            _ => {}
        }
    }

    /// Title for the header: the view, or "New Trip"/"Edit Form"/… for editors.
    pub fn surface_title(&self) -> String {
        self.orchestrator.active_surface().title()
    }

    pub fn is_editing_text(&self) -> bool {
        self.input_mode == InputMode::Search
            || self.orchestrator.top_overlay().is_some()
            || self.orchestrator.active_surface().is_editor()
    }
}

/// Sort digit `1`..`9` to a 0-based column.
fn sort_column(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d.saturating_sub(1) as usize)
}
