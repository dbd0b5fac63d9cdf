//! # trackhub-service
//!
//! Business logic for TrackHub: building the folder index from path
//! records, navigating the derived tree, and the catalog operations around
//! it (search, collections, listing import).
//!
//! Services take their stores as `Arc<dyn ...>` at construction time and
//! hold no global state.

pub mod folder;
pub mod scope;
pub mod track;

#[cfg(test)]
mod testing;

pub use folder::{
    BrowseSession, BuildReport, ContentVisibility, FolderComparator, FolderIndexAuditor,
    FolderIndexBuilder, IndexAudit, Listing, ListingTicket, MixedContentPolicy, NavigationState,
    Navigator,
};
pub use track::{CatalogService, ImportReport, ListingImporter};
