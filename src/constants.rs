//! Application constants and configuration

pub const ARTWORKS_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Rows per page. The catalog view is fixed at 12; the selection logic only
/// assumes pages arrive as ordered id lists.
pub const PAGE_SIZE: u32 = 12;

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
