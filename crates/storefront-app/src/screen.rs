// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info, warn};

use crate::{ApiError, CollectionClient, DraftField, FormDraft, Resource, ScreenError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Session and presentation settings handed to every screen by its owner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenContext {
    pub user: Option<String>,
    pub theme: Theme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    List,
    Create,
    Edit,
}

impl ScreenMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

/// An open form. The draft only exists while a form is open.
#[derive(Debug, Clone, PartialEq)]
pub enum Form<R: Resource> {
    Create(R::Draft),
    Edit { id: R::Id, draft: R::Draft },
}

impl<R: Resource> Form<R> {
    pub fn draft(&self) -> &R::Draft {
        match self {
            Self::Create(draft) | Self::Edit { draft, .. } => draft,
        }
    }

    fn draft_mut(&mut self) -> &mut R::Draft {
        match self {
            Self::Create(draft) | Self::Edit { draft, .. } => draft,
        }
    }

    pub const fn mode(&self) -> ScreenMode {
        match self {
            Self::Create(_) => ScreenMode::Create,
            Self::Edit { .. } => ScreenMode::Edit,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenState<R: Resource> {
    pub items: Vec<R>,
    pub form: Option<Form<R>>,
    pub search_term: String,
    pub loading: bool,
    pub error: Option<String>,
    pub pending_delete: Option<R::Id>,
    pub status: Option<String>,
}

impl<R: Resource> Default for ScreenState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            form: None,
            search_term: String::new(),
            loading: false,
            error: None,
            pending_delete: None,
            status: None,
        }
    }
}

impl<R: Resource> ScreenState<R> {
    pub fn mode(&self) -> ScreenMode {
        self.form.as_ref().map_or(ScreenMode::List, Form::mode)
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        self.form.as_ref().map(Form::draft)
    }

    /// Items whose display field contains the search term, ignoring case.
    pub fn visible_items(&self) -> Vec<&R> {
        let needle = self.search_term.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.display_field().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn find(&self, id: R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }
}

/// Handle for one list fetch. Only the most recently issued ticket may
/// update the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

/// List/search/create/edit/delete controller for one remote collection.
///
/// Remote failures never escape as panics: they are recorded in
/// [`ScreenState::error`] and also returned so callers can react.
pub struct ResourceScreen<R: Resource, C> {
    client: C,
    context: ScreenContext,
    state: ScreenState<R>,
    generation: u64,
}

impl<R: Resource, C: CollectionClient<R>> ResourceScreen<R, C> {
    pub fn new(client: C, context: ScreenContext) -> Self {
        Self {
            client,
            context,
            state: ScreenState::default(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ScreenState<R> {
        &self.state
    }

    pub fn context(&self) -> &ScreenContext {
        &self.context
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut C {
        &mut self.client
    }

    pub fn mode(&self) -> ScreenMode {
        self.state.mode()
    }

    pub fn visible_items(&self) -> Vec<&R> {
        self.state.visible_items()
    }

    pub fn enter_list(&mut self) -> Result<(), ScreenError> {
        let ticket = self.begin_list();
        let result = self.client.list();
        self.finish_list(ticket, result).map(|_| ())
    }

    /// Starts a list fetch: closes any open form and marks the screen busy.
    pub fn begin_list(&mut self) -> RequestTicket {
        self.generation = self.generation.saturating_add(1);
        self.state.form = None;
        self.state.loading = true;
        debug!(
            resource = R::KIND.as_str(),
            generation = self.generation,
            "list requested"
        );
        RequestTicket {
            generation: self.generation,
        }
    }

    /// Applies a list result. Returns `Ok(false)` when a newer fetch has
    /// been started since `ticket` was issued; the result is then dropped.
    pub fn finish_list(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<R>, ApiError>,
    ) -> Result<bool, ScreenError> {
        if ticket.generation != self.generation {
            debug!(
                resource = R::KIND.as_str(),
                stale = ticket.generation,
                current = self.generation,
                "dropping superseded list result"
            );
            return Ok(false);
        }

        self.state.loading = false;
        match result {
            Ok(items) => {
                debug!(resource = R::KIND.as_str(), count = items.len(), "list loaded");
                self.state.items = items;
                self.state.error = None;
                if let Some(id) = self.state.pending_delete
                    && self.state.find(id).is_none()
                {
                    self.state.pending_delete = None;
                }
                Ok(true)
            }
            Err(error) => Err(self.record_failure("list", error)),
        }
    }

    pub fn enter_create(&mut self) {
        self.state.form = Some(Form::Create(R::Draft::default()));
        self.state.pending_delete = None;
        self.state.error = None;
    }

    pub fn enter_edit(&mut self, item: &R) {
        self.state.form = Some(Form::Edit {
            id: item.id(),
            draft: item.to_draft(),
        });
        self.state.pending_delete = None;
        self.state.error = None;
    }

    pub fn enter_edit_by_id(&mut self, id: R::Id) -> Result<(), ScreenError> {
        let item = self
            .state
            .find(id)
            .cloned()
            .ok_or_else(|| unknown_item::<R>(id))?;
        self.enter_edit(&item);
        Ok(())
    }

    /// Drops the open form without saving.
    pub fn cancel_form(&mut self) -> bool {
        self.state.form.take().is_some()
    }

    pub fn update_draft_field(
        &mut self,
        field: <R::Draft as FormDraft>::Field,
        value: impl Into<String>,
    ) -> Result<(), ScreenError> {
        let form = self.state.form.as_mut().ok_or(ScreenError::NotReady(
            "edit",
            "start a draft with `new` or `edit <id>`",
        ))?;
        form.draft_mut().set(field, value);
        Ok(())
    }

    /// Same as [`Self::update_draft_field`], addressing the field by its wire key.
    pub fn update_draft_key(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), ScreenError> {
        let field = <R::Draft as FormDraft>::Field::from_key(key).ok_or_else(|| {
            let expected: Vec<&str> = <R::Draft as FormDraft>::Field::ALL
                .iter()
                .map(|field| field.key())
                .collect();
            ScreenError::UnknownField {
                kind: R::KIND.singular(),
                key: key.to_owned(),
                expected: expected.join(", "),
            }
        })?;
        self.update_draft_field(field, value)
    }

    /// Validates the open draft and sends it as a create or an update.
    /// On success the draft is dropped and the list is fetched again; on
    /// failure the draft stays open so it can be corrected.
    pub fn submit(&mut self) -> Result<(), ScreenError> {
        let form = self.state.form.as_ref().ok_or(ScreenError::NotReady(
            "submit",
            "start a draft with `new` or `edit <id>`",
        ))?;

        let input = match form.draft().validate() {
            Ok(input) => input,
            Err(error) => {
                debug!(resource = R::KIND.as_str(), %error, "draft rejected");
                self.state.error = Some(error.to_string());
                return Err(error.into());
            }
        };

        self.state.loading = true;
        let (verb, result) = match form {
            Form::Create(_) => ("created", self.client.create(&input)),
            Form::Edit { id, .. } => ("updated", self.client.update(&R::from_input(*id, input))),
        };
        self.state.loading = false;

        match result {
            Ok(message) => {
                info!(resource = R::KIND.as_str(), verb, "draft saved");
                self.state.form = None;
                self.state.status = Some(confirmation::<R>(message, verb));
                self.enter_list()
            }
            Err(error) => Err(self.record_failure("save", error)),
        }
    }

    /// First phase of a delete: remembers the id until it is confirmed or
    /// cancelled. Nothing is sent to the server yet.
    pub fn request_remove(&mut self, id: R::Id) -> Result<(), ScreenError> {
        if self.state.find(id).is_none() {
            return Err(unknown_item::<R>(id));
        }
        self.state.pending_delete = Some(id);
        self.state.error = None;
        self.state.status = Some(format!(
            "delete {} {id}? confirm or cancel",
            R::KIND.singular()
        ));
        Ok(())
    }

    pub fn confirm_remove(&mut self) -> Result<(), ScreenError> {
        let id = self
            .state
            .pending_delete
            .take()
            .ok_or(ScreenError::NotReady("delete", "request a delete first"))?;

        self.state.loading = true;
        let result = self.client.delete(id);
        self.state.loading = false;

        match result {
            Ok(message) => {
                info!(resource = R::KIND.as_str(), %id, "record deleted");
                self.state.status = Some(confirmation::<R>(message, "deleted"));
                self.enter_list()
            }
            Err(error) => Err(self.record_failure("delete", error)),
        }
    }

    pub fn cancel_remove(&mut self) -> bool {
        let cancelled = self.state.pending_delete.take().is_some();
        if cancelled {
            self.state.error = None;
            self.state.status = Some("delete cancelled".to_owned());
        }
        cancelled
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    fn record_failure(&mut self, action: &'static str, error: ApiError) -> ScreenError {
        warn!(resource = R::KIND.as_str(), action, %error, "remote call failed");
        self.state.loading = false;
        self.state.error = Some(error.to_string());
        error.into()
    }
}

fn unknown_item<R: Resource>(id: R::Id) -> ScreenError {
    ScreenError::UnknownItem {
        kind: R::KIND.singular(),
        id: id.to_string(),
    }
}

fn confirmation<R: Resource>(message: String, verb: &str) -> String {
    let message = message.trim();
    if message.is_empty() {
        format!("{} {verb}", R::KIND.singular())
    } else {
        message.to_owned()
    }
}
