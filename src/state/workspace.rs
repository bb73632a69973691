// Session workspace.
// Collection stores, per-view table state, dispatch, exports, and notices.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{
    CollectionStore, Communication, CommunicationField, Contact, ContactField, Dispatcher,
    DocumentField, DocumentKind, Entity, Form, FormField, InviteField, InviteRequest,
    InviteTemplate, InviteTemplates, LegalDocument, Participant, ParticipantField,
    ParticipantStatus, ReminderRequest, SeedData, Trip, TripField, UsefulInfo, UsefulInfoField,
};
use crate::error::{ConsoleError, Result};
use crate::files;

use super::editor::EditorDraft;
use super::lists::TableView;
use super::notices::NoticeLog;
use super::orchestrator::{ConfirmArgs, ConfirmFn, OverlayPayload, ViewOrchestrator};
use super::surface::ViewId;
use super::table::{Filter, Record, RecordId, SortDirection, TableEngine};

/// Every collection the console works on, created at startup.
#[derive(Debug, Default)]
pub struct Session {
    pub trips: CollectionStore<Trip>,
    pub participants: CollectionStore<Participant>,
    pub contacts: CollectionStore<Contact>,
    pub forms: CollectionStore<Form>,
    pub invites: CollectionStore<InviteTemplate>,
    pub communications: CollectionStore<Communication>,
    pub useful_informations: CollectionStore<UsefulInfo>,
    pub documents: CollectionStore<LegalDocument>,
}

/// Participant counts for one trip, by status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripReport {
    pub trip: String,
    pub registered: usize,
    pub invited: usize,
    pub incomplete: usize,
}

impl TripReport {
    pub fn total(&self) -> usize {
        self.registered + self.invited + self.incomplete
    }
}

impl Session {
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            trips: CollectionStore::new(seed.trips),
            participants: CollectionStore::new(seed.participants),
            contacts: CollectionStore::new(seed.contacts),
            forms: CollectionStore::new(seed.forms),
            invites: CollectionStore::new(seed.invites),
            communications: CollectionStore::new(seed.communications),
            useful_informations: CollectionStore::new(seed.useful_informations),
            documents: CollectionStore::new(seed.documents),
        }
    }

    fn participants_of<'a>(&'a self, trip: &'a str) -> impl Iterator<Item = &'a Participant> {
        self.participants
            .records()
            .iter()
            .filter(move |p| p.trip == trip)
    }

    pub fn participant_count(&self, trip: &str) -> usize {
        self.participants_of(trip).count()
    }

    /// Participants of `trip` who have not completed registration.
    pub fn unregistered_count(&self, trip: &str) -> usize {
        self.participants_of(trip)
            .filter(|p| p.status != ParticipantStatus::Registered)
            .count()
    }

    /// Participants of `trip` still waiting on an invite.
    pub fn invitee_count(&self, trip: &str) -> usize {
        self.participants_of(trip)
            .filter(|p| p.status == ParticipantStatus::Invited)
            .count()
    }

    /// Records that name `trip`: its participants, forms, and invite template.
    pub fn trip_dependents(&self, trip: &str) -> usize {
        self.participant_count(trip)
            + self.forms.records().iter().filter(|f| f.trip == trip).count()
            + self
                .invites
                .records()
                .iter()
                .filter(|i| i.trip_name == trip)
                .count()
    }

    /// Point every record naming trip `from` at `to`. Returns how many changed.
    pub fn rename_trip(&mut self, from: &str, to: &str) -> Result<usize> {
        let participants = ids_where(&self.participants, |p| p.trip == from);
        let forms = ids_where(&self.forms, |f| f.trip == from);
        let invites = ids_where(&self.invites, |i| i.trip_name == from);
        for &id in &participants {
            self.participants.update(id, |p| p.trip = to.to_string())?;
        }
        for &id in &forms {
            self.forms.update(id, |f| f.trip = to.to_string())?;
        }
        for &id in &invites {
            self.invites.update(id, |i| i.trip_name = to.to_string())?;
        }
        let renamed = participants.len() + forms.len() + invites.len();
        info!(from, to, renamed, "trip renamed");
        Ok(renamed)
    }

    /// Status counts per trip, in trip order.
    pub fn trip_reports(&self) -> Vec<TripReport> {
        self.trips
            .records()
            .iter()
            .map(|trip| {
                let mut report = TripReport {
                    trip: trip.name.clone(),
                    registered: 0,
                    invited: 0,
                    incomplete: 0,
                };
                for p in self.participants_of(&trip.name) {
                    match p.status {
                        ParticipantStatus::Registered => report.registered += 1,
                        ParticipantStatus::Invited => report.invited += 1,
                        ParticipantStatus::Incomplete => report.incomplete += 1,
                    }
                }
                report
            })
            .collect()
    }
}

fn ids_where<R: Entity>(store: &CollectionStore<R>, keep: impl Fn(&R) -> bool) -> Vec<RecordId> {
    store
        .records()
        .iter()
        .filter(|r| keep(r))
        .map(|r| r.id())
        .collect()
}

/// Callback context for overlays: the session plus the state of every list view.
pub struct Workspace {
    pub session: Session,
    pub trips: TableView<Trip>,
    pub participants: TableView<Participant>,
    pub contacts: TableView<Contact>,
    pub invites: TableView<InviteTemplate>,
    pub communications: TableView<Communication>,
    pub useful_informations: TableView<UsefulInfo>,
    pub forms: TableView<Form>,
    pub privacy: TableView<LegalDocument>,
    pub terms: TableView<LegalDocument>,
    pub documents: TableView<LegalDocument>,
    pub notices: NoticeLog,
    dispatcher: Box<dyn Dispatcher>,
    export_dir: PathBuf,
}

/// Engine reached by the participants bulk reminder once it completes.
pub fn participants_table(ws: &mut Workspace) -> &mut TableEngine<Participant> {
    &mut ws.participants.engine
}

fn documents_of(kind: DocumentKind) -> TableView<LegalDocument> {
    let mut engine = TableEngine::new(vec![DocumentField::Title]);
    engine.set_filter(DocumentField::Kind, Filter::Only(kind.as_str().to_string()));
    TableView::new(engine)
}

/// Next value in an All → options… → All cycle.
fn next_filter(current: Option<&str>, options: &[&str]) -> Filter {
    let next = match current {
        None => options.first(),
        Some(value) => options
            .iter()
            .position(|o| *o == value)
            .and_then(|i| options.get(i + 1)),
    };
    match next {
        Some(value) => Filter::Only(value.to_string()),
        None => Filter::All,
    }
}

fn write_export<R: Record>(
    engine: &TableEngine<R>,
    records: &[R],
    fields: &[R::Field],
    dir: &Path,
) -> Result<PathBuf> {
    let text = engine.export_csv(records, fields)?;
    let path = files::export_path(dir, R::ENTITY);
    files::write_text(&path, &text)?;
    info!(entity = R::ENTITY, path = %path.display(), "exported");
    Ok(path)
}

fn delete_cursor<R: Entity>(
    view: &mut TableView<R>,
    store: &mut CollectionStore<R>,
    notices: &mut NoticeLog,
) -> bool {
    let Some(id) = view.cursor_record(store.records()).map(|r| r.id()) else {
        return false;
    };
    if !store.remove(id) {
        return false;
    }
    view.engine.prune_selection(store.records());
    view.clamp_cursor(store.records());
    notices.info(format!("Deleted #{} from {}", id, R::ENTITY));
    true
}

impl Workspace {
    pub fn new(
        session: Session,
        dispatcher: Box<dyn Dispatcher>,
        export_dir: PathBuf,
        max_notices: usize,
    ) -> Self {
        Self {
            session,
            trips: TableView::new(TableEngine::new(vec![TripField::Name, TripField::Destination])),
            participants: TableView::new(
                TableEngine::new(vec![
                    ParticipantField::Name,
                    ParticipantField::Email,
                    ParticipantField::Trip,
                ])
                .with_sort(ParticipantField::Name, SortDirection::Ascending),
            ),
            contacts: TableView::new(TableEngine::new(vec![
                ContactField::Name,
                ContactField::Category,
                ContactField::Email,
            ])),
            invites: TableView::new(TableEngine::new(vec![
                InviteField::Trip,
                InviteField::Subject,
            ])),
            communications: TableView::new(TableEngine::new(vec![
                CommunicationField::Title,
                CommunicationField::Message,
            ])),
            useful_informations: TableView::new(TableEngine::new(vec![
                UsefulInfoField::Title,
                UsefulInfoField::Content,
            ])),
            forms: TableView::new(TableEngine::new(vec![FormField::Name, FormField::Trip])),
            privacy: documents_of(DocumentKind::Privacy),
            terms: documents_of(DocumentKind::Terms),
            documents: TableView::new(TableEngine::new(vec![DocumentField::Title])),
            notices: NoticeLog::new(max_notices),
            dispatcher,
            export_dir,
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Put every cursor back inside its derived view.
    pub fn clamp_cursors(&mut self) {
        let s = &self.session;
        self.trips.clamp_cursor(s.trips.records());
        self.participants.clamp_cursor(s.participants.records());
        self.contacts.clamp_cursor(s.contacts.records());
        self.invites.clamp_cursor(s.invites.records());
        self.communications.clamp_cursor(s.communications.records());
        self.useful_informations
            .clamp_cursor(s.useful_informations.records());
        self.forms.clamp_cursor(s.forms.records());
        self.privacy.clamp_cursor(s.documents.records());
        self.terms.clamp_cursor(s.documents.records());
        self.documents.clamp_cursor(s.documents.records());
    }

    /// Move the cursor of the list shown by `view`.
    pub fn move_cursor(&mut self, view: ViewId, down: bool) {
        macro_rules! step {
            ($list:expr, $records:expr) => {
                if down {
                    $list.select_next($records)
                } else {
                    $list.select_prev($records)
                }
            };
        }
        let s = &self.session;
        match view {
            ViewId::Dashboard | ViewId::ManageTrip => step!(self.trips, s.trips.records()),
            ViewId::ManageParticipants => step!(self.participants, s.participants.records()),
            ViewId::ManageContacts => step!(self.contacts, s.contacts.records()),
            ViewId::Invites => step!(self.invites, s.invites.records()),
            ViewId::Communications => step!(self.communications, s.communications.records()),
            ViewId::UsefulInformations => {
                step!(self.useful_informations, s.useful_informations.records())
            }
            ViewId::Forms => step!(self.forms, s.forms.records()),
            ViewId::PrivacyPolicy => step!(self.privacy, s.documents.records()),
            ViewId::TermsConditions => step!(self.terms, s.documents.records()),
            ViewId::Documents => step!(self.documents, s.documents.records()),
            ViewId::Reports => {}
        }
    }

    /// Current search term of a searchable view.
    pub fn search_term(&self, view: ViewId) -> Option<&str> {
        match view {
            ViewId::ManageParticipants => Some(self.participants.engine.search_term()),
            ViewId::ManageContacts => Some(self.contacts.engine.search_term()),
            ViewId::Invites => Some(self.invites.engine.search_term()),
            ViewId::Forms => Some(self.forms.engine.search_term()),
            _ => None,
        }
    }

    pub fn set_search_term(&mut self, view: ViewId, term: String) {
        match view {
            ViewId::ManageParticipants => self.participants.engine.set_search_term(term),
            ViewId::ManageContacts => self.contacts.engine.set_search_term(term),
            ViewId::Invites => self.invites.engine.set_search_term(term),
            ViewId::Forms => self.forms.engine.set_search_term(term),
            _ => return,
        }
        self.clamp_cursors();
    }

    /// Sort the view by its `column`-th sortable column (0-based).
    pub fn sort_by_column(&mut self, view: ViewId, column: usize) {
        match view {
            ViewId::ManageParticipants => {
                const KEYS: [ParticipantField; 5] = [
                    ParticipantField::Name,
                    ParticipantField::Email,
                    ParticipantField::Trip,
                    ParticipantField::Group,
                    ParticipantField::Status,
                ];
                if let Some(key) = KEYS.get(column) {
                    self.participants.engine.set_sort(*key);
                }
            }
            ViewId::ManageContacts => {
                const KEYS: [ContactField; 3] =
                    [ContactField::Name, ContactField::Category, ContactField::Email];
                if let Some(key) = KEYS.get(column) {
                    self.contacts.engine.set_sort(*key);
                }
            }
            _ => {}
        }
    }

    /// Step the participants trip filter through All and every trip name.
    pub fn cycle_trip_filter(&mut self) {
        let names: Vec<&str> = self
            .session
            .trips
            .records()
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        let engine = &mut self.participants.engine;
        let filter = next_filter(engine.filter(ParticipantField::Trip), &names);
        engine.set_filter(ParticipantField::Trip, filter);
        self.clamp_cursors();
    }

    /// Step the participants status filter through All and every status.
    pub fn cycle_status_filter(&mut self) {
        let statuses: Vec<&str> = ParticipantStatus::ALL.iter().map(|s| s.as_str()).collect();
        let engine = &mut self.participants.engine;
        let filter = next_filter(engine.filter(ParticipantField::Status), &statuses);
        engine.set_filter(ParticipantField::Status, filter);
        self.clamp_cursors();
    }

    /// Toggle selection of the participant under the cursor.
    pub fn toggle_participant_at_cursor(&mut self) {
        let records = self.session.participants.records();
        if let Some(id) = self.participants.cursor_record(records).map(|p| p.id) {
            self.participants.engine.toggle_select(id);
        }
    }

    /// Header checkbox click: select all visible unless already fully checked.
    pub fn toggle_all_participants(&mut self) {
        let records = self.session.participants.records();
        let engine = &mut self.participants.engine;
        let on = !engine.header_checkbox(records).checked;
        engine.select_all_visible(records, on);
    }

    /// Write the CSV of a list view. Returns the path written, if any.
    pub fn export(&mut self, view: ViewId) -> Option<PathBuf> {
        let s = &self.session;
        let dir = self.export_dir.as_path();
        let (entity, result) = match view {
            ViewId::ManageParticipants => (
                Participant::ENTITY,
                write_export(
                    &self.participants.engine,
                    s.participants.records(),
                    &ParticipantField::EXPORT,
                    dir,
                ),
            ),
            ViewId::ManageContacts => (
                Contact::ENTITY,
                write_export(
                    &self.contacts.engine,
                    s.contacts.records(),
                    &ContactField::EXPORT,
                    dir,
                ),
            ),
            ViewId::Invites => (
                InviteTemplate::ENTITY,
                write_export(
                    &self.invites.engine,
                    s.invites.records(),
                    &InviteField::EXPORT,
                    dir,
                ),
            ),
            ViewId::Forms => (
                Form::ENTITY,
                write_export(&self.forms.engine, s.forms.records(), &FormField::EXPORT, dir),
            ),
            _ => return None,
        };

        match result {
            Ok(path) => {
                self.notices
                    .info(format!("Exported {} to {}", entity, path.display()));
                Some(path)
            }
            Err(e @ ConsoleError::NothingToExport { .. }) => {
                self.notices.warn(e.to_string());
                None
            }
            Err(e) => {
                warn!(entity, error = %e, "export failed");
                self.notices.error(format!("Export failed: {}", e));
                None
            }
        }
    }

    /// Remove the record under the cursor of `view`.
    pub fn delete_at_cursor(&mut self, view: ViewId) -> bool {
        let s = &mut self.session;
        let n = &mut self.notices;
        let deleted = match view {
            ViewId::ManageTrip => {
                let linked = self
                    .trips
                    .cursor_record(s.trips.records())
                    .map(|t| (t.name.clone(), s.trip_dependents(&t.name)));
                match linked {
                    Some((name, count)) if count > 0 => {
                        n.warn(format!(
                            "\"{}\" still has {} linked record(s)",
                            name, count
                        ));
                        false
                    }
                    _ => delete_cursor(&mut self.trips, &mut s.trips, n),
                }
            }
            ViewId::ManageParticipants => {
                delete_cursor(&mut self.participants, &mut s.participants, n)
            }
            ViewId::ManageContacts => delete_cursor(&mut self.contacts, &mut s.contacts, n),
            ViewId::Invites => delete_cursor(&mut self.invites, &mut s.invites, n),
            ViewId::UsefulInformations => delete_cursor(
                &mut self.useful_informations,
                &mut s.useful_informations,
                n,
            ),
            ViewId::PrivacyPolicy => delete_cursor(&mut self.privacy, &mut s.documents, n),
            ViewId::TermsConditions => delete_cursor(&mut self.terms, &mut s.documents, n),
            _ => false,
        };
        if deleted {
            // Legal views share one store
            let docs = self.session.documents.records();
            self.privacy.engine.prune_selection(docs);
            self.terms.engine.prune_selection(docs);
            self.documents.engine.prune_selection(docs);
            self.clamp_cursors();
        }
        deleted
    }

    /// Trip under the cursor of the dashboard or the trips table.
    pub fn trip_at_cursor(&self) -> Option<&Trip> {
        self.trips.cursor_record(self.session.trips.records())
    }

    /// Run the reminder dispatch for a confirmed reminder overlay.
    pub fn dispatch_reminder(&mut self, args: &ConfirmArgs, recipient_count: usize) {
        let ConfirmArgs::Reminder { subject, body } = args else {
            warn!(?args, "reminder confirmed with invite arguments");
            return;
        };
        let request = ReminderRequest {
            subject: subject.clone(),
            body: body.clone(),
            recipient_count,
        };
        match self.dispatcher.send_reminder(request) {
            Ok(summary) => self.notices.info(summary),
            Err(e) => self.notices.error(format!("Reminder failed: {}", e)),
        }
    }

    /// Run the invite dispatch for a confirmed invite overlay.
    pub fn dispatch_invites(&mut self, trip_name: &str, invitee_count: usize, args: &ConfirmArgs) {
        let ConfirmArgs::Invite { body } = args else {
            warn!(?args, "invite confirmed with reminder arguments");
            return;
        };
        let request = InviteRequest {
            trip_name: trip_name.to_string(),
            invitee_count,
            body: body.clone(),
        };
        match self.dispatcher.send_invites(request) {
            Ok(summary) => self.notices.info(summary),
            Err(e) => self.notices.error(format!("Invites failed: {}", e)),
        }
    }

    /// Ask to remind every selected participant. The selection is cleared once sent.
    pub fn request_participant_reminder(
        &mut self,
        orchestrator: &mut ViewOrchestrator<Workspace>,
    ) -> bool {
        let count = self.participants.engine.selected_count();
        let on_confirm: ConfirmFn<Workspace> =
            Box::new(move |ws: &mut Workspace, args: &ConfirmArgs| ws.dispatch_reminder(args, count));
        let opened = self.participants.engine.request_bulk_reminder(
            orchestrator,
            Some(on_confirm),
            participants_table,
        );
        if !opened {
            self.notices.warn("Select at least one participant first");
        }
        opened
    }

    /// Ask to remind the participants of `trip` who are not registered yet.
    pub fn request_trip_reminder(
        &mut self,
        orchestrator: &mut ViewOrchestrator<Workspace>,
        trip: &str,
    ) -> bool {
        let count = self.session.unregistered_count(trip);
        if count == 0 {
            self.notices
                .warn(format!("Everyone on \"{}\" is registered", trip));
            return false;
        }
        let on_confirm: ConfirmFn<Workspace> =
            Box::new(move |ws: &mut Workspace, args: &ConfirmArgs| ws.dispatch_reminder(args, count));
        orchestrator.open_overlay(OverlayPayload::Reminder { count }, Some(on_confirm), None);
        true
    }

    /// Ask to send the invites of `trip`, pre-filled from its template.
    pub fn request_invites(&mut self, orchestrator: &mut ViewOrchestrator<Workspace>, trip: &str) {
        let invitee_count = self.session.invitee_count(trip);
        let body = self
            .session
            .invites
            .invite_body(trip)
            .unwrap_or_default()
            .to_string();
        let trip_name = trip.to_string();
        let on_confirm: ConfirmFn<Workspace> =
            Box::new(move |ws: &mut Workspace, args: &ConfirmArgs| {
                ws.dispatch_invites(&trip_name, invitee_count, args)
            });
        orchestrator.open_overlay(
            OverlayPayload::Invite {
                trip_name: trip.to_string(),
                invitee_count,
                body,
            },
            Some(on_confirm),
            None,
        );
    }

    /// Write a validated draft to its collection: add on create, update on edit.
    pub fn commit_draft(&mut self, draft: &EditorDraft) -> Result<String> {
        let s = &mut self.session;
        let message = match draft {
            EditorDraft::Trip(d) => {
                let (start_date, end_date) = d
                    .dates()
                    .ok_or_else(|| ConsoleError::Other("Trip dates are not valid".to_string()))?;
                let trip = Trip {
                    id: 0,
                    name: d.name.trim().to_string(),
                    destination: d.destination.trim().to_string(),
                    start_date,
                    end_date,
                };
                match d.editing {
                    Some(id) => {
                        let previous = s.trips.get(id).map(|t| t.name.clone());
                        let saved = s.trips.update(id, |t| *t = trip)?;
                        if let Some(previous) = previous.filter(|p| *p != saved.name) {
                            s.rename_trip(&previous, &saved.name)?;
                            let engine = &mut self.participants.engine;
                            if engine.filter(ParticipantField::Trip) == Some(previous.as_str()) {
                                engine.set_filter(
                                    ParticipantField::Trip,
                                    Filter::Only(saved.name.clone()),
                                );
                            }
                        }
                        format!("Trip \"{}\" updated", saved.name)
                    }
                    None => format!("Trip \"{}\" created", s.trips.add(trip).name),
                }
            }
            EditorDraft::Communication(d) => {
                let saved = s.communications.add(Communication {
                    id: 0,
                    kind: d.kind,
                    title: d.title.trim().to_string(),
                    message: d.message.trim().to_string(),
                });
                format!("{} \"{}\" published", saved.kind.as_str(), saved.title)
            }
            EditorDraft::Form(d) => {
                let name = d.name.trim().to_string();
                let trip = d.trip.trim().to_string();
                match d.editing {
                    Some(id) => {
                        let saved = s.forms.update(id, |f| {
                            f.name = name;
                            f.trip = trip;
                        })?;
                        format!("Form \"{}\" updated", saved.name)
                    }
                    None => {
                        let saved = s.forms.add(Form {
                            id: 0,
                            name,
                            trip,
                            responses: "0/0".to_string(),
                        });
                        format!("Form \"{}\" created", saved.name)
                    }
                }
            }
        };
        self.clamp_cursors();
        Ok(message)
    }
}
