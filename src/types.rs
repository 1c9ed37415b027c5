//! Common types and data structures

use serde::Deserialize;

/// One artwork record from the catalog API. The API routinely omits or nulls
/// fields, so everything except the id is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Artwork {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i32>,
    #[serde(default)]
    pub date_end: Option<i32>,
}

/// Pagination metadata accompanying each page response. The wire body also
/// carries `limit`, `offset` and `current_page`; nothing here depends on
/// them, so they are left to serde's unknown-field handling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// One page of the artworks endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ArtworksPage {
    #[serde(default)]
    pub data: Vec<Artwork>,
    #[serde(default)]
    pub pagination: PageInfo,
}

/// Result of a background page fetch, handed back to the UI thread.
/// `token` identifies which request produced it; stale tokens are discarded.
pub struct PageFetch {
    pub token: u64,
    pub page: u32,
    pub result: Result<ArtworksPage, String>,
}
