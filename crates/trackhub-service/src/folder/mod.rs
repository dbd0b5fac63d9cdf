//! Folder index construction and hierarchical navigation.

pub mod audit;
pub mod builder;
pub mod navigator;
pub mod policy;
pub mod session;
pub mod sort;

pub use audit::{FolderIndexAuditor, IndexAudit, SkipScan};
pub use builder::{BuildReport, FolderIndexBuilder, derive_folders};
pub use navigator::{Listing, Navigator};
pub use policy::{ContentVisibility, FoldersThenFiles, FoldersWin, MixedContentPolicy, policy_for};
pub use session::{Breadcrumb, BrowseSession, ListingTicket, NavigationState};
pub use sort::FolderComparator;
