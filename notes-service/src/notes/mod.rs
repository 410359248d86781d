//! Notes subsystem: remote API client, drawer session state, derived
//! folder tree, and export/import helpers.

pub mod api_client;
pub mod folder_tree;
pub mod session;
pub mod transfer;

pub use api_client::{NotesApiClient, NotesBackend};
pub use session::DrawerSession;
