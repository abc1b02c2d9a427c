//! The transient new-point form.

use chrono::{DateTime, Duration, Utc};
use shared::domain::{PointDetails, PointType};
use tracing::debug;

use crate::{
    catalog::Catalog,
    draft::{apply_edit, validate, DraftEdit},
    error::BoardError,
    render::{Component, ComponentKey, Container, PointForm, RenderPosition, Renderer, ViewState},
};

/// Holds a draft with no id. Exists only while the creation form is open; a failed submit keeps
/// the draft exactly as the user entered it.
pub struct CreationPresenter {
    draft: PointDetails,
    state: ViewState,
    abort_generation: u64,
}

impl CreationPresenter {
    pub fn new(catalog: &Catalog, now: DateTime<Utc>) -> Self {
        Self {
            draft: blank_draft(catalog, now),
            state: ViewState::Idle,
            abort_generation: 0,
        }
    }

    pub fn draft(&self) -> &PointDetails {
        &self.draft
    }

    pub fn view_state(&self) -> ViewState {
        self.state
    }

    pub fn init(&self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        renderer.mount(
            Container::List,
            self.component(catalog),
            RenderPosition::AfterBegin,
        );
    }

    pub fn edit_draft(
        &mut self,
        edit: DraftEdit,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<(), BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        apply_edit(&mut self.draft, edit, catalog)?;
        self.render(renderer, catalog);
        Ok(())
    }

    pub fn prepare_submit(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<PointDetails, BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        validate(&self.draft, catalog)?;
        Ok(self.draft.clone())
    }

    pub fn set_saving(&mut self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        self.set_state(ViewState::Saving, renderer, catalog);
    }

    /// Starts the failure cue; the revert timer must present the same `generation`.
    pub fn set_aborting(
        &mut self,
        generation: u64,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) {
        self.abort_generation = generation;
        self.set_state(ViewState::Aborting, renderer, catalog);
    }

    pub fn finish_abort(
        &mut self,
        generation: u64,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> bool {
        if self.state != ViewState::Aborting || generation != self.abort_generation {
            return false;
        }
        self.set_state(ViewState::Idle, renderer, catalog);
        true
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_pending()
    }

    pub fn destroy(&self, renderer: &mut dyn Renderer) {
        renderer.unmount(ComponentKey::CreationForm);
    }

    fn ensure_interactive(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<(), BoardError> {
        match self.state {
            ViewState::Saving | ViewState::Deleting => Err(BoardError::CreationBusy),
            ViewState::Aborting => {
                self.set_state(ViewState::Idle, renderer, catalog);
                Ok(())
            }
            ViewState::Idle => Ok(()),
        }
    }

    fn set_state(&mut self, state: ViewState, renderer: &mut dyn Renderer, catalog: &Catalog) {
        debug!(from = ?self.state, to = ?state, "creation form state");
        self.state = state;
        self.render(renderer, catalog);
    }

    fn render(&self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        renderer.mount(
            Container::List,
            self.component(catalog),
            RenderPosition::AfterBegin,
        );
    }

    fn component(&self, catalog: &Catalog) -> Component {
        Component::CreationForm(PointForm {
            id: None,
            draft: self.draft.clone(),
            state: self.state,
            destinations: catalog.destination_names(),
            available_offers: catalog.offers_for(self.draft.point_type).to_vec(),
        })
    }
}

fn blank_draft(catalog: &Catalog, now: DateTime<Utc>) -> PointDetails {
    PointDetails {
        point_type: PointType::Flight,
        destination: catalog
            .first_destination()
            .map(|destination| destination.name.clone())
            .unwrap_or_default(),
        date_from: now,
        date_to: now + Duration::hours(1),
        base_price: 0,
        offers: Vec::new(),
        is_favorite: false,
    }
}
