// SPDX-License-Identifier: BUSL-1.1
//! # Dashboard Controller
//!
//! Owns the current [`SelectionState`] and the last applied [`Snapshot`].
//!
//! Every fetch is issued a [`FetchTicket`] carrying a monotonically
//! increasing [`RequestToken`]. [`DashboardController::complete`] applies a
//! result only if its ticket is the newest one issued; anything older is
//! reported as [`Completion::Discarded`] and leaves the state untouched.
//! This makes the outcome independent of the order in which responses
//! arrive.
//!
//! Search changes re-derive from the current snapshot without a fetch.
//! Once state or disease change, the view is `Pending` until a result for
//! the new selection is applied.

use std::sync::Arc;

use serde::Serialize;
use wbd_core::{DashboardError, DiseaseKey, StateId};
use wbd_dataset::Gazetteer;

use crate::aggregate::{aggregate, AggregateStats};
use crate::markers::{derive_markers, MapMarker};
use crate::selection::SelectionState;
use crate::source::{DataSource, Snapshot};
use crate::table::{derive_table, TableRow};

/// Sequence number of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Handed out when a fetch starts; returned with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub selection: SelectionState,
}

/// Outcome of [`DashboardController::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// What the current view-model represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewStatus {
    /// Nothing fetched yet.
    Pending,
    Ready,
    NotFound,
    Unavailable,
}

impl ViewStatus {
    fn from_error(err: &DashboardError) -> Self {
        match err {
            DashboardError::NotFound(_) => Self::NotFound,
            DashboardError::Transport(_) | DashboardError::MalformedResponse(_) => {
                Self::Unavailable
            }
        }
    }
}

/// Everything a renderer needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub selection: SelectionState,
    pub status: ViewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub table: Vec<TableRow>,
    pub stats: AggregateStats,
    pub markers: Vec<MapMarker>,
}

impl DashboardView {
    /// Derive the view for `selection` from `snapshot`.
    pub fn derive(selection: SelectionState, snapshot: &Snapshot, gazetteer: &Gazetteer) -> Self {
        Self {
            table: derive_table(&snapshot.records, &selection.search_term),
            stats: aggregate(&snapshot.records, snapshot.delegated_total),
            markers: derive_markers(&snapshot.state, &snapshot.records, gazetteer),
            selection,
            status: ViewStatus::Ready,
            message: None,
        }
    }

    /// Empty view for a selection with nothing applied yet.
    pub fn pending(selection: SelectionState) -> Self {
        Self {
            selection,
            status: ViewStatus::Pending,
            message: None,
            table: Vec::new(),
            stats: AggregateStats::default(),
            markers: Vec::new(),
        }
    }

    /// Empty view reporting `err`.
    pub fn failed(selection: SelectionState, err: &DashboardError) -> Self {
        Self {
            selection,
            status: ViewStatus::from_error(err),
            message: Some(err.to_string()),
            table: Vec::new(),
            stats: AggregateStats::default(),
            markers: Vec::new(),
        }
    }
}

/// Last applied result, tagged with the selection it was fetched for.
#[derive(Debug, Clone)]
enum Loaded {
    Pending,
    Data(SelectionState, Snapshot),
    Failed(SelectionState, DashboardError),
}

impl Loaded {
    fn fetched_for(&self) -> Option<&SelectionState> {
        match self {
            Loaded::Pending => None,
            Loaded::Data(selection, _) | Loaded::Failed(selection, _) => Some(selection),
        }
    }
}

/// Selection state plus the data fetched for it.
#[derive(Debug)]
pub struct DashboardController<S> {
    source: S,
    gazetteer: Arc<Gazetteer>,
    selection: SelectionState,
    loaded: Loaded,
    issued: u64,
}

impl<S: DataSource> DashboardController<S> {
    pub fn new(source: S, gazetteer: Arc<Gazetteer>, selection: SelectionState) -> Self {
        Self {
            source,
            gazetteer,
            selection,
            loaded: Loaded::Pending,
            issued: 0,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Newest token issued so far.
    pub fn latest_token(&self) -> Option<RequestToken> {
        (self.issued > 0).then_some(RequestToken(self.issued))
    }

    /// Start a fetch for the current selection.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            token: RequestToken(self.issued),
            selection: self.selection.clone(),
        }
    }

    /// Change state and disease. The search term is kept.
    pub fn select(&mut self, state: StateId, disease: DiseaseKey) -> FetchTicket {
        self.selection.state = state;
        self.selection.disease = disease;
        self.begin_fetch()
    }

    /// Change the table filter. No fetch is needed.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.selection.search_term = term.into();
    }

    /// Apply `result` if `ticket` is the newest fetch.
    ///
    /// A failure clears the previous snapshot.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Snapshot, DashboardError>,
    ) -> Completion {
        if Some(ticket.token) != self.latest_token() {
            tracing::debug!(
                token = ticket.token.value(),
                latest = self.issued,
                "discarding stale fetch result"
            );
            return Completion::Discarded;
        }
        self.loaded = match result {
            Ok(snapshot) => Loaded::Data(ticket.selection, snapshot),
            Err(err) => {
                tracing::warn!(
                    state = %ticket.selection.state,
                    disease = %ticket.selection.disease,
                    error = %err,
                    "fetch failed"
                );
                Loaded::Failed(ticket.selection, err)
            }
        };
        Completion::Applied
    }

    /// Fetch for the current selection and apply the result.
    pub async fn refresh(&mut self) -> Completion {
        let ticket = self.begin_fetch();
        let result = self.source.fetch(&ticket.selection).await;
        self.complete(ticket, result)
    }

    /// View-model for the current selection.
    ///
    /// Data fetched for another state or disease is never shown; the current
    /// search term is applied to the retained snapshot.
    pub fn view(&self) -> DashboardView {
        let selection = self.selection.clone();
        let current = self
            .loaded
            .fetched_for()
            .is_some_and(|f| f.state == selection.state && f.disease == selection.disease);
        if !current {
            return DashboardView::pending(selection);
        }
        match &self.loaded {
            Loaded::Data(_, snapshot) => DashboardView::derive(selection, snapshot, &self.gazetteer),
            Loaded::Failed(_, err) => DashboardView::failed(selection, err),
            Loaded::Pending => DashboardView::pending(selection),
        }
    }
}
