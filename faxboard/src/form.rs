//! The form page controller.
//!
//! One [`FormController`] drives the create or edit page of any entity from its [`EntitySchema`]:
//!
//! ```text
//! create:  Idle ──submit──▶ Submitting ──▶ Success | Failed
//! edit:    Loading ──▶ Loaded | LoadFailed
//!          Loaded ──submit──▶ Submitting ──▶ Success | Failed
//! ```
//!
//! `Success` and `LoadFailed` are terminal. `Failed` keeps the error message and accepts another submit.
//! Calls to the store are the only suspension points; the session lock is never held across them.

use crate::record::{FormValues, Record, RecordId};
use crate::schema::EntitySchema;
use crate::store::RecordStore;
use crate::{debug, info, warn};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Submitting,
    Success,
    Failed,
}

impl FormState {
    fn accepts_submit(&self) -> bool {
        matches!(self, FormState::Idle | FormState::Loaded | FormState::Failed)
    }
}

/// Where the shell should go after a successful submit. `refresh` asks it to reload the destination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
    pub refresh: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
    /// Not started: create mode, a submit in flight, the same record already loading, or a terminal session.
    Ignored,
    /// The response arrived after the session was torn down or superseded by a newer load.
    Discarded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Navigate(Navigation),
    Failed(String),
    /// Not started: another submit is in flight or the current state does not accept one.
    Ignored,
    /// The response arrived after the session was torn down.
    Discarded,
}

/// Ephemeral state of one mounted form page.
#[derive(Clone, Debug)]
pub struct FormSession {
    pub mode: FormMode,
    pub state: FormState,
    pub loaded_record: Option<Record>,
    pub values: FormValues,
    pub submitting: bool,
    pub last_error: Option<String>,
    generation: u64,
    alive: bool,
}

impl FormSession {
    fn new(mode: FormMode) -> Self {
        let state = match mode {
            FormMode::Create => FormState::Idle,
            FormMode::Edit(_) => FormState::Loading,
        };
        FormSession {
            mode,
            state,
            loaded_record: None,
            values: FormValues::new(),
            submitting: false,
            last_error: None,
            generation: 0,
            alive: true,
        }
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

/// Handle to a mounted form page. Clones share the same session.
pub struct FormController<S: RecordStore + ?Sized> {
    schema: &'static EntitySchema,
    store: Arc<S>,
    session: Arc<Mutex<FormSession>>,
}

impl<S: RecordStore + ?Sized> Clone for FormController<S> {
    fn clone(&self) -> Self {
        FormController { schema: self.schema, store: Arc::clone(&self.store), session: Arc::clone(&self.session) }
    }
}

impl<S: RecordStore + ?Sized> FormController<S> {
    /// Starts in `Idle` for create mode and in `Loading` for edit mode; the caller then runs [`Self::load`].
    pub fn mount(schema: &'static EntitySchema, store: Arc<S>, mode: FormMode) -> Self {
        debug!("Mounting {} form in {:?} mode", schema.table, mode);
        FormController { schema, store, session: Arc::new(Mutex::new(FormSession::new(mode))) }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn state(&self) -> FormState {
        self.session().state
    }

    pub fn snapshot(&self) -> FormSession {
        self.session().clone()
    }

    /// Tears the session down. Responses still in flight are dropped instead of applied.
    pub fn unmount(&self) {
        let mut session = self.session();
        session.alive = false;
        debug!("Unmounted {} form in state {:?}", self.schema.table, session.state);
    }

    pub async fn load(&self, id: RecordId) -> LoadOutcome {
        let generation = {
            let mut session = self.session();
            let same_record = session.record_id() == Some(&id);
            let blocked = match session.state {
                FormState::Success => true,
                // generation 0 is the fetch a freshly mounted edit page has not started yet
                FormState::Loading => same_record && session.generation > 0,
                FormState::LoadFailed => same_record,
                _ => false,
            };
            if !session.alive || session.submitting || session.mode == FormMode::Create || blocked {
                return LoadOutcome::Ignored;
            }
            session.generation += 1;
            session.mode = FormMode::Edit(id.clone());
            session.state = FormState::Loading;
            session.loaded_record = None;
            session.values = FormValues::new();
            session.last_error = None;
            session.generation
        };

        let fetched = self.store.fetch_by_id(self.schema.table, &id).await;

        let mut session = self.session();
        if !session.alive || session.generation != generation {
            debug!("Dropping stale load of {} {}", self.schema.table, id);
            return LoadOutcome::Discarded;
        }
        match fetched {
            Ok(record) => {
                session.values = FormValues::from_record(self.schema, &record);
                session.loaded_record = Some(record);
                session.state = FormState::Loaded;
                debug!("Loaded {} {}", self.schema.table, id);
                LoadOutcome::Loaded
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Loading {} {} failed: {}", self.schema.table, id, message);
                session.state = FormState::LoadFailed;
                session.last_error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Sends the whole coerced form as one insert (create) or one update (edit).
    pub async fn submit(&self, values: FormValues) -> SubmitOutcome {
        let mode = {
            let mut session = self.session();
            if !session.alive || session.submitting || !session.state.accepts_submit() {
                return SubmitOutcome::Ignored;
            }
            session.submitting = true;
            session.state = FormState::Submitting;
            session.last_error = None;
            session.values = values.clone();
            session.mode.clone()
        };

        let mut payload = coerce(self.schema, &values);
        let written = match &mode {
            FormMode::Create => {
                self.inject_current_user(&mut payload).await;
                self.store.insert(self.schema.table, payload).await.map(Some)
            }
            FormMode::Edit(id) => self.store.update(self.schema.table, id, payload).await.map(|_| None),
        };

        let mut session = self.session();
        if !session.alive {
            debug!("Dropping late submit result for torn down {} form", self.schema.table);
            return SubmitOutcome::Discarded;
        }
        session.submitting = false;
        match written {
            Ok(created) => {
                session.state = FormState::Success;
                let navigation = Navigation { to: self.schema.list_route(), refresh: true };
                match created.as_ref().or(session.record_id()) {
                    Some(id) => info!("Saved {} {}, navigating to {}", self.schema.table, id, navigation.to),
                    None => info!("Saved {}, navigating to {}", self.schema.table, navigation.to),
                }
                SubmitOutcome::Navigate(navigation)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Saving {} failed: {}", self.schema.table, message);
                session.state = FormState::Failed;
                session.last_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    async fn inject_current_user(&self, payload: &mut Record) {
        if self.schema.current_user_fields().next().is_none() {
            return;
        }
        let user = self.store.current_user().await;
        if user.is_none() {
            warn!("No signed-in user for {} insert", self.schema.table);
        }
        for field in self.schema.current_user_fields() {
            let value = user.as_ref().map_or(Value::Null, |u| Value::String(u.0.clone()));
            payload.insert(field.name.to_string(), value);
        }
    }

    fn session(&self) -> MutexGuard<'_, FormSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Applies each input field's coercion rule. Fields filled from the current user are never read from input.
pub fn coerce(schema: &EntitySchema, values: &FormValues) -> Record {
    schema
        .input_fields()
        .map(|field| (field.name.to_string(), field.kind.coerce(values.get(field.name))))
        .collect()
}
