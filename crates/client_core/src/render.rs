//! Render collaborator interface and an in-memory screen.
//!
//! Presenters and the board describe what to show as [`Component`] values and hand them to a
//! [`Renderer`]; they never look at what the renderer does with them. Mounting a component whose
//! [`ComponentKey`] is already mounted replaces it in place.

use std::fmt::Write as _;

use shared::{
    domain::{Offer, PointDetails, PointId, TripPoint},
    protocol::{FilterKind, SortKind},
};

use crate::summary::TripSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    /// Trip summary and the add trigger.
    Header,
    /// Loading/empty placeholders, sort control and the list itself.
    Board,
    /// One entry per point plus the creation form.
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPosition {
    AfterBegin,
    BeforeEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    Default,
    Editing,
}

/// Pending-operation state of a presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewState {
    Idle,
    Saving,
    Deleting,
    /// Transient failure cue; never persists.
    Aborting,
}

impl ViewState {
    pub fn is_pending(self) -> bool {
        matches!(self, ViewState::Saving | ViewState::Deleting)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKey {
    Loading,
    Empty,
    Sort,
    List,
    TripSummary,
    AddButton,
    Point(PointId),
    CreationForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointForm {
    pub id: Option<PointId>,
    pub draft: PointDetails,
    pub state: ViewState,
    pub destinations: Vec<String>,
    pub available_offers: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Loading,
    Empty { filter: FilterKind },
    Sort { active: SortKind },
    List,
    TripSummary(TripSummary),
    AddButton { enabled: bool },
    PointCard { point: TripPoint, state: ViewState },
    PointForm(PointForm),
    CreationForm(PointForm),
}

impl Component {
    pub fn key(&self) -> ComponentKey {
        match self {
            Component::Loading => ComponentKey::Loading,
            Component::Empty { .. } => ComponentKey::Empty,
            Component::Sort { .. } => ComponentKey::Sort,
            Component::List => ComponentKey::List,
            Component::TripSummary(_) => ComponentKey::TripSummary,
            Component::AddButton { .. } => ComponentKey::AddButton,
            Component::PointCard { point, .. } => ComponentKey::Point(point.id),
            Component::PointForm(form) => match form.id {
                Some(id) => ComponentKey::Point(id),
                None => ComponentKey::CreationForm,
            },
            Component::CreationForm(_) => ComponentKey::CreationForm,
        }
    }
}

pub trait Renderer: Send {
    fn mount(&mut self, container: Container, component: Component, position: RenderPosition);
    fn unmount(&mut self, key: ComponentKey);
}

/// Renderer that keeps mounted components in memory, per container, in display order.
#[derive(Debug, Default)]
pub struct Screen {
    header: Vec<Component>,
    board: Vec<Component>,
    list: Vec<Component>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn components(&self, container: Container) -> &[Component] {
        match container {
            Container::Header => &self.header,
            Container::Board => &self.board,
            Container::List => &self.list,
        }
    }

    pub fn get(&self, key: ComponentKey) -> Option<&Component> {
        [&self.header, &self.board, &self.list]
            .into_iter()
            .flat_map(|components| components.iter())
            .find(|component| component.key() == key)
    }

    pub fn is_mounted(&self, key: ComponentKey) -> bool {
        self.get(key).is_some()
    }

    /// Point ids in list order.
    pub fn listed_points(&self) -> Vec<PointId> {
        self.list
            .iter()
            .filter_map(|component| match component.key() {
                ComponentKey::Point(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Plain-text rendering used by the terminal front end.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for component in self.header.iter().chain(&self.board) {
            if *component == Component::List {
                for item in &self.list {
                    describe(&mut out, item);
                }
            } else {
                describe(&mut out, component);
            }
        }
        out
    }

    fn container_mut(&mut self, container: Container) -> &mut Vec<Component> {
        match container {
            Container::Header => &mut self.header,
            Container::Board => &mut self.board,
            Container::List => &mut self.list,
        }
    }
}

impl Renderer for Screen {
    fn mount(&mut self, container: Container, component: Component, position: RenderPosition) {
        let key = component.key();
        let components = self.container_mut(container);
        if let Some(slot) = components.iter_mut().find(|mounted| mounted.key() == key) {
            *slot = component;
            return;
        }
        self.unmount(key);
        let components = self.container_mut(container);
        match position {
            RenderPosition::AfterBegin => components.insert(0, component),
            RenderPosition::BeforeEnd => components.push(component),
        }
    }

    fn unmount(&mut self, key: ComponentKey) {
        for components in [&mut self.header, &mut self.board, &mut self.list] {
            components.retain(|mounted| mounted.key() != key);
        }
    }
}

fn state_badge(state: ViewState) -> &'static str {
    match state {
        ViewState::Idle => "",
        ViewState::Saving => " [saving…]",
        ViewState::Deleting => " [deleting…]",
        ViewState::Aborting => " [failed!]",
    }
}

fn describe(out: &mut String, component: &Component) {
    let _ = match component {
        Component::Loading => writeln!(out, "Loading…"),
        Component::Empty { filter } => match filter {
            FilterKind::Everything => writeln!(out, "Click New Event to create your first point"),
            FilterKind::Future => writeln!(out, "There are no future events now"),
            FilterKind::Past => writeln!(out, "There are no past events now"),
        },
        Component::Sort { active } => writeln!(out, "Sort: {}", active.label()),
        Component::List => Ok(()),
        Component::TripSummary(summary) => writeln!(
            out,
            "{} | {} — {} | Total: €{}",
            summary.route,
            summary.date_from.format("%b %d"),
            summary.date_to.format("%b %d"),
            summary.total_cost
        ),
        Component::AddButton { enabled } => {
            writeln!(out, "[New event]{}", if *enabled { "" } else { " (disabled)" })
        }
        Component::PointCard { point, state } => writeln!(
            out,
            "#{} {} {} {} — {} €{}{}{}",
            point.id,
            point.details.point_type.label(),
            point.details.destination,
            point.details.date_from.format("%b %d %H:%M"),
            point.details.date_to.format("%H:%M"),
            point.details.base_price,
            if point.details.is_favorite { " ★" } else { "" },
            state_badge(*state)
        ),
        Component::PointForm(form) | Component::CreationForm(form) => {
            let title = match form.id {
                Some(id) => format!("Edit #{id}"),
                None => "New point".to_string(),
            };
            let offers: Vec<&str> = form
                .draft
                .offers
                .iter()
                .map(|offer| offer.title.as_str())
                .collect();
            writeln!(
                out,
                "{title}: {} {} {} — {} €{} offers=[{}]{}",
                form.draft.point_type.label(),
                form.draft.destination,
                form.draft.date_from.format("%b %d %H:%M"),
                form.draft.date_to.format("%b %d %H:%M"),
                form.draft.base_price,
                offers.join(", "),
                state_badge(form.state)
            )
        }
    };
}
