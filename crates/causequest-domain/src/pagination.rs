//! Pagination types shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Pagination parameters shared by all list endpoints.
///
/// - `per_page`: 1–100, default 25
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page", rename = "per-page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    25
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` to 1–100 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, 100),
            page: self.page.max(1),
        }
    }

    /// Row offset of the first item on this page.
    ///
    /// Computed in u64: `page` is caller-supplied and `clamped()` only bounds
    /// it below, so u32 arithmetic could overflow on a huge page number. The
    /// saturating subtraction keeps an unclamped `page: 0` at offset zero.
    pub fn offset(self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.per_page as u64
    }
}
