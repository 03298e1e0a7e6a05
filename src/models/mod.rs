//! Domain models for Board Checker.

pub mod page;
pub mod photo;
pub mod user;
pub mod worksheet;

// Re-export commonly used types
pub use page::{ListQuery, PageInfo, Pagination, DEFAULT_MAX_RESULTS};
pub use photo::{PhotoResponse, store_path};
pub use user::{CurrentUser, LoginResponse, TokenClaims};
pub use worksheet::{
    WorksheetDetail, WorksheetInput, WorksheetListResponse, WorksheetShowResponse,
    WorksheetSummary, WorksheetView,
};
