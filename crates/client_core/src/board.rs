//! Board orchestrator: derives the visible list from the stores, owns one presenter per listed
//! point plus the optional creation form, and routes user actions through the persistence
//! service.
//!
//! Everything runs on the caller's logical thread. Persistence calls and failure-cue timers are
//! spawned onto tokio and report back over a channel; [`Board::next_event`], [`Board::settle`]
//! and [`Board::pump`] apply those reports one at a time. Store notifications are queued by the
//! observer callbacks and drained right after every mutation the board performs, before any
//! further input is handled.

use std::{collections::HashMap, future::Future, sync::Arc};

use shared::{
    domain::{PointDetails, PointId, TripPoint},
    error::ApiException,
    protocol::{FilterKind, SortKind, UpdateKind},
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::{
    catalog::Catalog,
    creation_presenter::CreationPresenter,
    draft::DraftEdit,
    error::BoardError,
    filter_store::FilterStore,
    observer::{Observable, ObserverId},
    pipeline::{derive_view, Clock, SystemClock},
    point_presenter::{PendingView, PointPresenter},
    points_store::PointsStore,
    render::{Component, ComponentKey, Container, DisplayMode, RenderPosition, Renderer, ViewState},
    settings::BoardSettings,
    summary::summarize,
    PointsApi,
};

/// A user-initiated change, carrying exactly what its persistence call needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    UpdatePoint { kind: UpdateKind, point: TripPoint },
    AddPoint { kind: UpdateKind, draft: PointDetails },
    DeletePoint { kind: UpdateKind, point: TripPoint },
}

/// Which view unit is in edit mode. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Point(PointId),
    Creation,
}

struct StoreSignal {
    kind: UpdateKind,
    point: Option<TripPoint>,
}

enum TaskSignal {
    Updated {
        kind: UpdateKind,
        id: PointId,
        result: anyhow::Result<TripPoint>,
    },
    Created {
        kind: UpdateKind,
        result: anyhow::Result<TripPoint>,
    },
    Deleted {
        kind: UpdateKind,
        point: TripPoint,
        result: anyhow::Result<()>,
    },
    AbortElapsed {
        target: EditTarget,
        generation: u64,
    },
}

struct Subscriptions {
    points: ObserverId,
    filter: ObserverId,
}

pub struct Board<R: Renderer> {
    points: Arc<PointsStore>,
    filter: Arc<FilterStore>,
    api: Arc<dyn PointsApi>,
    clock: Arc<dyn Clock>,
    renderer: R,
    settings: BoardSettings,
    catalog: Catalog,
    current_sort: SortKind,
    is_loading: bool,
    hidden: bool,
    presenters: HashMap<PointId, PointPresenter>,
    view_order: Vec<PointId>,
    creation: Option<CreationPresenter>,
    editing: Option<EditTarget>,
    /// Points with a save or delete in flight, carried across rebuilds of the list.
    pending: HashMap<PointId, PendingView>,
    abort_generations: u64,
    subscriptions: Option<Subscriptions>,
    store_tx: UnboundedSender<StoreSignal>,
    store_rx: UnboundedReceiver<StoreSignal>,
    task_tx: UnboundedSender<TaskSignal>,
    task_rx: UnboundedReceiver<TaskSignal>,
    outstanding_tasks: usize,
}

impl<R: Renderer> Board<R> {
    pub fn new(
        points: Arc<PointsStore>,
        filter: Arc<FilterStore>,
        api: Arc<dyn PointsApi>,
        renderer: R,
        settings: BoardSettings,
    ) -> Self {
        let (store_tx, store_rx) = mpsc::unbounded_channel();
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        Self {
            points,
            filter,
            api,
            clock: Arc::new(SystemClock),
            renderer,
            settings,
            catalog: Catalog::default(),
            current_sort: SortKind::default(),
            is_loading: true,
            hidden: false,
            presenters: HashMap::new(),
            view_order: Vec::new(),
            creation: None,
            editing: None,
            pending: HashMap::new(),
            abort_generations: 0,
            subscriptions: None,
            store_tx,
            store_rx,
            task_tx,
            task_rx,
            outstanding_tasks: 0,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_sort(&self) -> SortKind {
        self.current_sort
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    pub fn presenter(&self, id: PointId) -> Option<&PointPresenter> {
        self.presenters.get(&id)
    }

    pub fn creation(&self) -> Option<&CreationPresenter> {
        self.creation.as_ref()
    }

    /// Ids of the listed points in display order.
    pub fn view_order(&self) -> &[PointId] {
        &self.view_order
    }

    /// Mounts the list, subscribes to both stores and shows the loading placeholder.
    pub fn initialize(&mut self) {
        self.renderer
            .mount(Container::Board, Component::List, RenderPosition::AfterBegin);
        self.subscribe();
        self.render_board();
    }

    /// Fetches points and the catalog. A failed fetch still completes the initial load, with an
    /// empty collection.
    pub async fn load(&mut self) -> Result<(), BoardError> {
        let api = Arc::clone(&self.api);
        let fetched = async {
            let points = api.fetch_points().await?;
            let destinations = api.fetch_destinations().await?;
            let offers = api.fetch_offers().await?;
            Ok::<_, anyhow::Error>((points, destinations, offers))
        }
        .await;

        let points = match fetched {
            Ok((points, destinations, offers)) => {
                info!(
                    points = points.len(),
                    destinations = destinations.len(),
                    "trip points loaded"
                );
                self.catalog = Catalog::new(destinations, offers);
                points
            }
            Err(error) => {
                warn!(%error, "initial load failed; continuing with an empty board");
                Vec::new()
            }
        };
        self.points.set_points(UpdateKind::Init, points)?;
        self.drain_store_signals();
        Ok(())
    }

    /// Store points passing the active filter, ordered by the active sort.
    pub fn derive_view(&self) -> Vec<TripPoint> {
        derive_view(
            &self.points.points(),
            self.filter.filter(),
            self.current_sort,
            self.clock.now(),
        )
    }

    pub fn change_sort(&mut self, sort: SortKind) -> Result<(), BoardError> {
        self.ensure_visible()?;
        if self.current_sort == sort {
            return Ok(());
        }
        debug!(sort = sort.label(), "sort changed");
        self.current_sort = sort;
        self.clear_board(false);
        self.render_board();
        Ok(())
    }

    /// Switches the active filter, which resets the whole view.
    pub fn set_filter(&mut self, filter: FilterKind) -> Result<(), BoardError> {
        self.ensure_visible()?;
        self.filter.set_filter(UpdateKind::Major, filter);
        self.drain_store_signals();
        Ok(())
    }

    /// Opens the creation form on a default-sorted, unfiltered view.
    pub fn begin_create(&mut self) -> Result<(), BoardError> {
        self.ensure_visible()?;
        if self.is_loading {
            return Err(BoardError::Loading);
        }
        if self.creation.is_some() {
            return Ok(());
        }
        self.current_sort = SortKind::default();
        self.filter
            .set_filter(UpdateKind::Major, FilterKind::Everything);
        self.drain_store_signals();
        self.on_mode_change(EditTarget::Creation);

        let presenter = CreationPresenter::new(&self.catalog, self.clock.now());
        self.renderer.unmount(ComponentKey::Empty);
        self.renderer
            .mount(Container::Board, Component::List, RenderPosition::BeforeEnd);
        presenter.init(&mut self.renderer, &self.catalog);
        self.creation = Some(presenter);
        self.editing = Some(EditTarget::Creation);
        self.render_add_button();
        info!("creation form opened");
        Ok(())
    }

    pub fn edit_creation(&mut self, edit: DraftEdit) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let creation = self.creation.as_mut().ok_or(BoardError::NoCreationForm)?;
        creation.edit_draft(edit, &mut self.renderer, &self.catalog)
    }

    pub fn submit_creation(&mut self) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let creation = self.creation.as_mut().ok_or(BoardError::NoCreationForm)?;
        let draft = creation.prepare_submit(&mut self.renderer, &self.catalog)?;
        self.handle_user_action(UserAction::AddPoint {
            kind: UpdateKind::Major,
            draft,
        })
    }

    pub fn cancel_creation(&mut self) -> Result<(), BoardError> {
        self.ensure_visible()?;
        match &self.creation {
            None => return Err(BoardError::NoCreationForm),
            Some(creation) if creation.is_busy() => return Err(BoardError::CreationBusy),
            Some(_) => {}
        }
        self.close_creation();
        if self.presenters.is_empty() {
            self.render_board();
        }
        Ok(())
    }

    pub fn edit_point(&mut self, id: PointId) -> Result<(), BoardError> {
        self.ensure_visible()?;
        if self.creation.as_ref().is_some_and(CreationPresenter::is_busy) {
            return Err(BoardError::CreationBusy);
        }
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        if presenter.start_edit(&mut self.renderer, &self.catalog)? {
            self.on_mode_change(EditTarget::Point(id));
        }
        Ok(())
    }

    pub fn cancel_edit(&mut self, id: PointId) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        if presenter.view_state().is_pending() {
            return Err(BoardError::PointBusy(id));
        }
        presenter.reset_view(&mut self.renderer, &self.catalog);
        if self.editing == Some(EditTarget::Point(id)) {
            self.editing = None;
        }
        Ok(())
    }

    pub fn edit_draft(&mut self, id: PointId, edit: DraftEdit) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        presenter.edit_draft(edit, &mut self.renderer, &self.catalog)
    }

    /// Submits the open edit form.
    pub fn save_point(&mut self, id: PointId) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        let point = presenter.prepare_save(&mut self.renderer, &self.catalog)?;
        self.handle_user_action(UserAction::UpdatePoint {
            kind: UpdateKind::Minor,
            point,
        })
    }

    /// Flips the favorite flag; the presenter is refreshed in place on success.
    pub fn toggle_favorite(&mut self, id: PointId) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        let point = presenter.prepare_favorite_toggle(&mut self.renderer, &self.catalog)?;
        self.handle_user_action(UserAction::UpdatePoint {
            kind: UpdateKind::Patch,
            point,
        })
    }

    pub fn delete_point(&mut self, id: PointId) -> Result<(), BoardError> {
        self.ensure_visible()?;
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        let point = presenter.prepare_delete(&mut self.renderer, &self.catalog)?;
        self.handle_user_action(UserAction::DeletePoint {
            kind: UpdateKind::Minor,
            point,
        })
    }

    /// Puts the originating view unit into its pending state and starts the persistence call.
    /// The store is only touched once the call succeeds.
    pub fn handle_user_action(&mut self, action: UserAction) -> Result<(), BoardError> {
        self.ensure_visible()?;
        match action {
            UserAction::UpdatePoint { kind, point } => {
                let id = point.id;
                self.enter_pending(id, ViewState::Saving)?;
                info!(point_id = %id, update_kind = ?kind, "dispatching point update");
                let api = Arc::clone(&self.api);
                self.spawn_task(async move {
                    TaskSignal::Updated {
                        kind,
                        id,
                        result: api.update_point(point).await,
                    }
                });
            }
            UserAction::AddPoint { kind, draft } => {
                let creation = self.creation.as_mut().ok_or(BoardError::NoCreationForm)?;
                if creation.is_busy() {
                    return Err(BoardError::CreationBusy);
                }
                creation.set_saving(&mut self.renderer, &self.catalog);
                info!(update_kind = ?kind, "dispatching point creation");
                let api = Arc::clone(&self.api);
                self.spawn_task(async move {
                    TaskSignal::Created {
                        kind,
                        result: api.create_point(draft).await,
                    }
                });
            }
            UserAction::DeletePoint { kind, point } => {
                self.enter_pending(point.id, ViewState::Deleting)?;
                info!(point_id = %point.id, update_kind = ?kind, "dispatching point deletion");
                let api = Arc::clone(&self.api);
                self.spawn_task(async move {
                    let result = api.delete_point(point.clone()).await;
                    TaskSignal::Deleted {
                        kind,
                        point,
                        result,
                    }
                });
            }
        }
        Ok(())
    }

    /// Applies a store notification to the view.
    pub fn handle_store_notification(&mut self, kind: UpdateKind, point: Option<&TripPoint>) {
        if self.hidden {
            return;
        }
        debug!(update_kind = ?kind, point_id = ?point.map(|point| point.id), "store notification");
        match kind {
            UpdateKind::Patch => {
                let Some(point) = point else {
                    return;
                };
                let Some(presenter) = self.presenters.get_mut(&point.id) else {
                    debug!(point_id = %point.id, "patched point is not listed");
                    return;
                };
                presenter.refresh(point.clone(), &mut self.renderer, &self.catalog);
                self.render_summary();
            }
            UpdateKind::Minor => {
                self.clear_board(false);
                self.render_board();
            }
            UpdateKind::Major => {
                self.clear_board(true);
                self.render_board();
            }
            UpdateKind::Init => {
                self.is_loading = false;
                self.renderer.unmount(ComponentKey::Loading);
                self.render_board();
            }
        }
    }

    /// Called whenever a view unit enters edit mode: closes the creation form unless it is the
    /// one opening or its submit is in flight, and returns every other point to its card.
    pub fn on_mode_change(&mut self, target: EditTarget) {
        if target != EditTarget::Creation {
            self.release_creation();
        }
        for (id, presenter) in self.presenters.iter_mut() {
            if EditTarget::Point(*id) != target {
                presenter.reset_view(&mut self.renderer, &self.catalog);
            }
        }
        self.editing = Some(target);
    }

    /// Unmounts the list and stops listening to the stores.
    pub fn hide(&mut self) {
        if self.hidden {
            return;
        }
        self.unsubscribe();
        self.clear_board(false);
        self.renderer.unmount(ComponentKey::List);
        self.hidden = true;
        self.render_add_button();
        info!("board hidden");
    }

    /// Re-renders from current store state with the default sort and listens again.
    pub fn show(&mut self) {
        if !self.hidden {
            return;
        }
        self.hidden = false;
        self.renderer
            .mount(Container::Board, Component::List, RenderPosition::BeforeEnd);
        self.clear_board(true);
        self.render_board();
        self.subscribe();
        info!("board shown");
    }

    /// Applies every queued notification and finished task without waiting.
    pub fn pump(&mut self) -> Result<(), BoardError> {
        self.drain_store_signals();
        while let Ok(signal) = self.task_rx.try_recv() {
            self.handle_task_signal(signal)?;
        }
        Ok(())
    }

    /// Applies the next finished task, waiting for one if any is outstanding. Returns `false`
    /// once nothing is left to wait for.
    pub async fn next_event(&mut self) -> Result<bool, BoardError> {
        self.drain_store_signals();
        let signal = match self.task_rx.try_recv() {
            Ok(signal) => signal,
            Err(_) if self.outstanding_tasks == 0 => return Ok(false),
            Err(_) => match self.task_rx.recv().await {
                Some(signal) => signal,
                None => return Ok(false),
            },
        };
        self.handle_task_signal(signal)?;
        Ok(true)
    }

    /// Waits until every persistence call and failure cue has resolved.
    pub async fn settle(&mut self) -> Result<(), BoardError> {
        while self.next_event().await? {}
        Ok(())
    }

    fn handle_task_signal(&mut self, signal: TaskSignal) -> Result<(), BoardError> {
        self.outstanding_tasks = self.outstanding_tasks.saturating_sub(1);
        match signal {
            TaskSignal::Updated { kind, id, result } => {
                self.pending.remove(&id);
                match result {
                    Ok(point) => {
                        info!(point_id = %id, "point update confirmed");
                        self.mutate_store(|points| points.update_point(kind, point))?;
                    }
                    Err(error) => {
                        warn!(
                            point_id = %id,
                            %error,
                            transient = is_transient(&error),
                            "point update rejected"
                        );
                        self.abort_point(id);
                    }
                }
            }
            TaskSignal::Created { kind, result } => match result {
                Ok(point) => {
                    info!(point_id = %point.id, "point creation confirmed");
                    self.close_creation();
                    self.mutate_store(|points| points.add_point(kind, point))?;
                }
                Err(error) => {
                    warn!(%error, transient = is_transient(&error), "point creation rejected");
                    self.abort_creation();
                }
            },
            TaskSignal::Deleted {
                kind,
                point,
                result,
            } => {
                self.pending.remove(&point.id);
                match result {
                    Ok(()) => {
                        info!(point_id = %point.id, "point deletion confirmed");
                        self.mutate_store(|points| points.delete_point(kind, &point))?;
                    }
                    Err(error) => {
                        warn!(
                            point_id = %point.id,
                            %error,
                            transient = is_transient(&error),
                            "point deletion rejected"
                        );
                        self.abort_point(point.id);
                    }
                }
            }
            TaskSignal::AbortElapsed { target, generation } => match target {
                EditTarget::Point(id) => {
                    if let Some(presenter) = self.presenters.get_mut(&id) {
                        presenter.finish_abort(generation, &mut self.renderer, &self.catalog);
                    }
                }
                EditTarget::Creation => {
                    if let Some(creation) = self.creation.as_mut() {
                        creation.finish_abort(generation, &mut self.renderer, &self.catalog);
                    }
                }
            },
        }
        Ok(())
    }

    fn mutate_store<F>(&mut self, mutate: F) -> Result<(), BoardError>
    where
        F: FnOnce(&PointsStore) -> Result<(), crate::error::StoreError>,
    {
        if let Err(err) = mutate(&self.points) {
            error!(%err, "store rejected a confirmed persistence result");
            return Err(err.into());
        }
        self.drain_store_signals();
        Ok(())
    }

    fn drain_store_signals(&mut self) {
        while let Ok(signal) = self.store_rx.try_recv() {
            self.handle_store_notification(signal.kind, signal.point.as_ref());
        }
    }

    fn enter_pending(&mut self, id: PointId, state: ViewState) -> Result<(), BoardError> {
        let presenter = self
            .presenters
            .get_mut(&id)
            .ok_or(BoardError::UnknownPoint(id))?;
        if presenter.view_state().is_pending() {
            return Err(BoardError::PointBusy(id));
        }
        presenter.set_view_state(state, &mut self.renderer, &self.catalog);
        if let Some(pending) = presenter.pending_view() {
            self.pending.insert(id, pending);
        }
        Ok(())
    }

    fn abort_point(&mut self, id: PointId) {
        let generation = self.next_abort_generation();
        let Some(presenter) = self.presenters.get_mut(&id) else {
            debug!(point_id = %id, "rejected point is no longer listed");
            return;
        };
        presenter.abort(generation, &mut self.renderer, &self.catalog);
        self.schedule_abort_revert(EditTarget::Point(id), generation);
    }

    fn abort_creation(&mut self) {
        let generation = self.next_abort_generation();
        let Some(creation) = self.creation.as_mut() else {
            debug!("creation form closed before its submit was rejected");
            return;
        };
        creation.set_aborting(generation, &mut self.renderer, &self.catalog);
        self.schedule_abort_revert(EditTarget::Creation, generation);
    }

    /// Generations are unique for the board's lifetime, so a timer left by a destroyed
    /// presenter never ends its replacement's cue.
    fn next_abort_generation(&mut self) -> u64 {
        self.abort_generations += 1;
        self.abort_generations
    }

    fn schedule_abort_revert(&mut self, target: EditTarget, generation: u64) {
        let delay = self.settings.abort_feedback();
        self.spawn_task(async move {
            tokio::time::sleep(delay).await;
            TaskSignal::AbortElapsed { target, generation }
        });
    }

    fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = TaskSignal> + Send + 'static,
    {
        self.outstanding_tasks += 1;
        let task_tx = self.task_tx.clone();
        tokio::spawn(async move {
            let _ = task_tx.send(task.await);
        });
    }

    fn subscribe(&mut self) {
        if self.subscriptions.is_some() {
            return;
        }
        let store_tx = self.store_tx.clone();
        let points = self
            .points
            .add_observer(move |kind, point: Option<&TripPoint>| {
                let _ = store_tx.send(StoreSignal {
                    kind,
                    point: point.cloned(),
                });
            });
        let store_tx = self.store_tx.clone();
        let filter = self
            .filter
            .add_observer(move |kind, _filter: Option<&FilterKind>| {
                let _ = store_tx.send(StoreSignal { kind, point: None });
            });
        self.subscriptions = Some(Subscriptions { points, filter });
    }

    fn unsubscribe(&mut self) {
        if let Some(subscriptions) = self.subscriptions.take() {
            self.points.remove_observer(subscriptions.points);
            self.filter.remove_observer(subscriptions.filter);
        }
    }

    fn ensure_visible(&self) -> Result<(), BoardError> {
        if self.hidden {
            Err(BoardError::Hidden)
        } else {
            Ok(())
        }
    }

    fn close_creation(&mut self) {
        let Some(creation) = self.creation.take() else {
            return;
        };
        creation.destroy(&mut self.renderer);
        if self.editing == Some(EditTarget::Creation) {
            self.editing = None;
        }
        self.render_add_button();
        debug!("creation form closed");
    }

    /// Closes the creation form unless its submit is in flight; a rejected submit must still
    /// find the draft.
    fn release_creation(&mut self) {
        if self.creation.as_ref().is_some_and(CreationPresenter::is_busy) {
            debug!("keeping creation form with a submit in flight");
            return;
        }
        self.close_creation();
    }

    fn clear_board(&mut self, reset_sort: bool) {
        self.release_creation();
        for (id, presenter) in self.presenters.drain() {
            if let Some(pending) = presenter.pending_view() {
                self.pending.insert(id, pending);
            }
            presenter.destroy(&mut self.renderer);
        }
        self.view_order.clear();
        self.editing = self.creation.as_ref().map(|_| EditTarget::Creation);
        for key in [
            ComponentKey::Sort,
            ComponentKey::Empty,
            ComponentKey::Loading,
            ComponentKey::TripSummary,
        ] {
            self.renderer.unmount(key);
        }
        if reset_sort {
            self.current_sort = SortKind::default();
        }
    }

    fn render_board(&mut self) {
        if self.hidden {
            return;
        }
        self.render_add_button();
        if self.is_loading {
            self.renderer
                .mount(Container::Board, Component::Loading, RenderPosition::AfterBegin);
            return;
        }

        let view = self.derive_view();
        if view.is_empty() {
            self.renderer.unmount(ComponentKey::Sort);
            self.renderer.unmount(ComponentKey::TripSummary);
            if self.creation.is_none() {
                self.renderer.unmount(ComponentKey::List);
                self.renderer.mount(
                    Container::Board,
                    Component::Empty {
                        filter: self.filter.filter(),
                    },
                    RenderPosition::AfterBegin,
                );
            }
            debug!("board rendered empty");
            return;
        }

        self.renderer.unmount(ComponentKey::Empty);
        self.render_summary();
        self.renderer
            .mount(Container::Board, Component::List, RenderPosition::BeforeEnd);
        self.renderer.mount(
            Container::Board,
            Component::Sort {
                active: self.current_sort,
            },
            RenderPosition::AfterBegin,
        );
        for point in view {
            let mut presenter = PointPresenter::new(point);
            if let Some(pending) = self.pending.get(&presenter.id()) {
                presenter.resume(pending.clone());
                if presenter.mode() == DisplayMode::Editing && self.editing.is_none() {
                    self.editing = Some(EditTarget::Point(presenter.id()));
                }
            }
            presenter.init(&mut self.renderer, &self.catalog);
            self.view_order.push(presenter.id());
            self.presenters.insert(presenter.id(), presenter);
        }
        debug!(
            count = self.view_order.len(),
            sort = self.current_sort.label(),
            "board rendered"
        );
    }

    fn render_summary(&mut self) {
        let summary = if self.settings.show_trip_summary {
            summarize(
                &self.points.points(),
                self.settings.trip_summary_max_cities,
            )
        } else {
            None
        };
        match summary {
            Some(summary) => self.renderer.mount(
                Container::Header,
                Component::TripSummary(summary),
                RenderPosition::AfterBegin,
            ),
            None => self.renderer.unmount(ComponentKey::TripSummary),
        }
    }

    fn render_add_button(&mut self) {
        let enabled = self.creation.is_none() && !self.is_loading && !self.hidden;
        self.renderer.mount(
            Container::Header,
            Component::AddButton { enabled },
            RenderPosition::BeforeEnd,
        );
    }
}

fn is_transient(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApiException>()
        .is_some_and(ApiException::is_transient)
}
