//! Lifecycle of one trip point's view: display mode × pending state, with rollback.

use shared::domain::{PointDetails, PointId, TripPoint};
use tracing::debug;

use crate::{
    catalog::Catalog,
    draft::{apply_edit, rebase, validate, DraftEdit},
    error::BoardError,
    render::{
        Component, ComponentKey, Container, DisplayMode, PointForm, RenderPosition, Renderer,
        ViewState,
    },
};

/// In-flight state the board carries over when it rebuilds a presenter mid-operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingView {
    pub state: ViewState,
    pub mode: DisplayMode,
    pub draft: PointDetails,
}

pub struct PointPresenter {
    point: TripPoint,
    draft: PointDetails,
    mode: DisplayMode,
    state: ViewState,
    /// Display mode captured when a pending operation started; restored after it fails.
    rollback_mode: Option<DisplayMode>,
    abort_generation: u64,
}

impl PointPresenter {
    pub fn new(point: TripPoint) -> Self {
        let draft = point.details.clone();
        Self {
            point,
            draft,
            mode: DisplayMode::Default,
            state: ViewState::Idle,
            rollback_mode: None,
            abort_generation: 0,
        }
    }

    pub fn id(&self) -> PointId {
        self.point.id
    }

    /// Last store-confirmed value.
    pub fn point(&self) -> &TripPoint {
        &self.point
    }

    pub fn draft(&self) -> &PointDetails {
        &self.draft
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn view_state(&self) -> ViewState {
        self.state
    }

    pub fn init(&self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        renderer.mount(
            Container::List,
            self.component(catalog),
            RenderPosition::BeforeEnd,
        );
    }

    /// Replaces the confirmed point without rebuilding. An open form stays open and keeps the
    /// fields the user has edited.
    pub fn refresh(&mut self, point: TripPoint, renderer: &mut dyn Renderer, catalog: &Catalog) {
        if self.mode == DisplayMode::Editing {
            rebase(&mut self.draft, &self.point.details, &point.details);
        } else {
            self.draft = point.details.clone();
        }
        self.point = point;
        self.state = ViewState::Idle;
        self.rollback_mode = None;
        self.render(renderer, catalog);
    }

    /// Opens the edit form. Returns `true` when the mode actually changed.
    pub fn start_edit(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<bool, BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        if self.mode == DisplayMode::Editing {
            return Ok(false);
        }
        self.mode = DisplayMode::Editing;
        self.draft = self.point.details.clone();
        self.render(renderer, catalog);
        Ok(true)
    }

    /// Closes the edit form and discards the working copy.
    pub fn reset_view(&mut self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        if self.rollback_mode.is_some() {
            self.rollback_mode = Some(DisplayMode::Default);
        }
        if self.mode == DisplayMode::Default {
            return;
        }
        self.mode = DisplayMode::Default;
        self.draft = self.point.details.clone();
        self.render(renderer, catalog);
    }

    pub fn edit_draft(
        &mut self,
        edit: DraftEdit,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<(), BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        if self.mode != DisplayMode::Editing {
            return Err(BoardError::NotEditing(self.id()));
        }
        apply_edit(&mut self.draft, edit, catalog)?;
        self.render(renderer, catalog);
        Ok(())
    }

    /// The working copy as a point ready to dispatch as an update.
    pub fn prepare_save(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<TripPoint, BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        if self.mode != DisplayMode::Editing {
            return Err(BoardError::NotEditing(self.id()));
        }
        validate(&self.draft, catalog)?;
        Ok(TripPoint::new(self.id(), self.draft.clone()))
    }

    /// The confirmed point with its favorite flag flipped.
    pub fn prepare_favorite_toggle(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<TripPoint, BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        let mut point = self.point.clone();
        point.details.is_favorite = !point.details.is_favorite;
        Ok(point)
    }

    pub fn prepare_delete(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<TripPoint, BoardError> {
        self.ensure_interactive(renderer, catalog)?;
        Ok(self.point.clone())
    }

    /// Moves to `state`. Entering a pending state captures the display mode to roll back to;
    /// entering [`ViewState::Aborting`] reverts the working copy to the confirmed point.
    pub fn set_view_state(
        &mut self,
        state: ViewState,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) {
        match state {
            ViewState::Saving | ViewState::Deleting => {
                if !self.state.is_pending() {
                    self.rollback_mode = Some(self.mode);
                }
            }
            ViewState::Aborting => {
                self.draft = self.point.details.clone();
            }
            ViewState::Idle => {
                if let Some(mode) = self.rollback_mode.take() {
                    self.mode = mode;
                }
            }
        }
        debug!(point_id = %self.id(), from = ?self.state, to = ?state, "point view state");
        self.state = state;
        self.render(renderer, catalog);
    }

    /// Starts the failure cue. Only a revert timer presenting the same `generation` ends it;
    /// the board hands out generations that are never reused.
    pub fn abort(&mut self, generation: u64, renderer: &mut dyn Renderer, catalog: &Catalog) {
        self.abort_generation = generation;
        self.set_view_state(ViewState::Aborting, renderer, catalog);
    }

    pub fn pending_view(&self) -> Option<PendingView> {
        self.state.is_pending().then(|| PendingView {
            state: self.state,
            mode: self.mode,
            draft: self.draft.clone(),
        })
    }

    /// Puts a freshly built presenter back into the pending operation its predecessor had
    /// started. Call before [`Self::init`].
    pub fn resume(&mut self, pending: PendingView) {
        self.mode = pending.mode;
        self.rollback_mode = Some(pending.mode);
        self.state = pending.state;
        if pending.mode == DisplayMode::Editing {
            self.draft = pending.draft;
        }
    }

    /// Ends the failure cue if `generation` is still current. Returns whether it did.
    pub fn finish_abort(
        &mut self,
        generation: u64,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> bool {
        if self.state != ViewState::Aborting || generation != self.abort_generation {
            return false;
        }
        self.set_view_state(ViewState::Idle, renderer, catalog);
        true
    }

    pub fn destroy(&self, renderer: &mut dyn Renderer) {
        renderer.unmount(ComponentKey::Point(self.id()));
    }

    /// Any interaction ends a running failure cue; pending operations block interaction.
    fn ensure_interactive(
        &mut self,
        renderer: &mut dyn Renderer,
        catalog: &Catalog,
    ) -> Result<(), BoardError> {
        match self.state {
            ViewState::Saving | ViewState::Deleting => Err(BoardError::PointBusy(self.id())),
            ViewState::Aborting => {
                self.set_view_state(ViewState::Idle, renderer, catalog);
                Ok(())
            }
            ViewState::Idle => Ok(()),
        }
    }

    fn render(&self, renderer: &mut dyn Renderer, catalog: &Catalog) {
        renderer.mount(
            Container::List,
            self.component(catalog),
            RenderPosition::BeforeEnd,
        );
    }

    fn component(&self, catalog: &Catalog) -> Component {
        match self.mode {
            DisplayMode::Default => Component::PointCard {
                point: self.point.clone(),
                state: self.state,
            },
            DisplayMode::Editing => Component::PointForm(PointForm {
                id: Some(self.id()),
                draft: self.draft.clone(),
                state: self.state,
                destinations: catalog.destination_names(),
                available_offers: catalog.offers_for(self.draft.point_type).to_vec(),
            }),
        }
    }
}
