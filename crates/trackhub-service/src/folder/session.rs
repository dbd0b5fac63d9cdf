//! Navigation state with response supersession.
//!
//! Every change to the current path bumps a generation counter and issues a
//! [`ListingTicket`]. A listing fetched for a ticket is only accepted while
//! that ticket is still current, so a slow response for an earlier path can
//! never overwrite the listing of a later one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use trackhub_core::path;
use trackhub_core::result::AppResult;

use super::navigator::{Listing, Navigator};

/// Tag for one in-flight listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTicket {
    /// Generation the request was issued at.
    pub generation: u64,
    /// Directory the request is for.
    pub path: String,
}

/// One breadcrumb: a folder name and the path it links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
}

/// Breadcrumb stack for one browsing client.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    stack: Vec<String>,
    generation: u64,
}

impl NavigationState {
    /// Start at the root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment names from the root down.
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Absolute path of the current directory.
    pub fn current_path(&self) -> String {
        if self.stack.is_empty() {
            path::ROOT.to_string()
        } else {
            format!("/{}", self.stack.join("/"))
        }
    }

    fn issue(&mut self) -> ListingTicket {
        self.generation += 1;
        ListingTicket {
            generation: self.generation,
            path: self.current_path(),
        }
    }

    /// Descend into a child folder. Names containing `/` descend several
    /// levels at once.
    pub fn navigate_into(&mut self, name: &str) -> ListingTicket {
        self.stack.extend(path::segments(name).map(str::to_string));
        self.issue()
    }

    /// Go up one level. At the root this only re-issues a ticket.
    pub fn navigate_up(&mut self) -> ListingTicket {
        self.stack.pop();
        self.issue()
    }

    /// Return to the root.
    pub fn navigate_home(&mut self) -> ListingTicket {
        self.stack.clear();
        self.issue()
    }

    /// Jump to an absolute path.
    pub fn navigate_to(&mut self, target: &str) -> ListingTicket {
        self.stack = path::segments(target).map(str::to_string).collect();
        self.issue()
    }

    /// Re-request the current directory.
    pub fn refresh(&mut self) -> ListingTicket {
        self.issue()
    }

    /// Whether `ticket` belongs to the latest request.
    pub fn is_current(&self, ticket: &ListingTicket) -> bool {
        ticket.generation == self.generation && ticket.path == self.current_path()
    }

    /// Keep `listing` only if its ticket is still current.
    pub fn accept(&self, ticket: &ListingTicket, listing: Listing) -> Option<Listing> {
        if self.is_current(ticket) {
            Some(listing)
        } else {
            debug!(
                path = %ticket.path,
                generation = ticket.generation,
                current = self.generation,
                "Discarding superseded listing"
            );
            None
        }
    }

    /// Links from the root to the current directory.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        let mut current = String::new();
        self.stack
            .iter()
            .map(|name| {
                current.push('/');
                current.push_str(name);
                Breadcrumb {
                    name: name.clone(),
                    path: current.clone(),
                }
            })
            .collect()
    }
}

/// A browsing client bound to a shared navigator.
///
/// Calls may overlap; each returns `Ok(None)` when a later call superseded
/// it before its listing arrived.
#[derive(Debug)]
pub struct BrowseSession {
    navigator: Arc<Navigator>,
    collection: Option<String>,
    state: Mutex<NavigationState>,
}

impl BrowseSession {
    /// Start a session at the root.
    pub fn new(navigator: Arc<Navigator>, collection: Option<String>) -> Self {
        Self {
            navigator,
            collection,
            state: Mutex::new(NavigationState::new()),
        }
    }

    /// Descend into `name`.
    pub async fn open(&self, name: &str) -> AppResult<Option<Listing>> {
        let ticket = self.state.lock().await.navigate_into(name);
        self.fetch(ticket).await
    }

    /// Go up one level.
    pub async fn up(&self) -> AppResult<Option<Listing>> {
        let ticket = self.state.lock().await.navigate_up();
        self.fetch(ticket).await
    }

    /// Return to the root.
    pub async fn home(&self) -> AppResult<Option<Listing>> {
        let ticket = self.state.lock().await.navigate_home();
        self.fetch(ticket).await
    }

    /// Jump to an absolute path.
    pub async fn goto(&self, target: &str) -> AppResult<Option<Listing>> {
        let ticket = self.state.lock().await.navigate_to(target);
        self.fetch(ticket).await
    }

    /// Reload the current directory.
    pub async fn refresh(&self) -> AppResult<Option<Listing>> {
        let ticket = self.state.lock().await.refresh();
        self.fetch(ticket).await
    }

    /// Current directory.
    pub async fn current_path(&self) -> String {
        self.state.lock().await.current_path()
    }

    /// Breadcrumbs for the current directory.
    pub async fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.state.lock().await.breadcrumbs()
    }

    async fn fetch(&self, ticket: ListingTicket) -> AppResult<Option<Listing>> {
        let result = self
            .navigator
            .list_scoped(self.collection.as_deref(), &ticket.path)
            .await;
        let state = self.state.lock().await;
        match result {
            Ok(listing) => Ok(state.accept(&ticket, listing)),
            Err(_) if !state.is_current(&ticket) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
