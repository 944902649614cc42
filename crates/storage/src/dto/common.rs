use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_TOP_LIMIT: i64 = 10;
pub const MAX_TOP_LIMIT: i64 = 100;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 100;
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Clamp a leaderboard size into `[1, MAX_TOP_LIMIT]`.
pub fn clamp_top_limit(limit: i64) -> u32 {
    limit.clamp(1, MAX_TOP_LIMIT) as u32
}

/// Parse the leading integer of a query value the way browsers' `parseInt`
/// does: `"25"`, `" 25"` and `"25abc"` all give 25, `"abc"` gives nothing.
/// Zero is reported as absent so that it falls back to the default.
pub fn parse_leading_int(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }

    // too many digits for i64: saturate, clamping happens later anyway
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(magnitude * sign).filter(|n| *n != 0)
}

/// One page of a ranked listing, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.clamp(1, u32::MAX as i64) as u32,
            limit: limit.clamp(1, MAX_PAGE_LIMIT) as u32,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    pub fn limit(&self) -> u64 {
        self.limit as u64
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopParams {
    /// Number of entries, clamped to 1..=100 (default 10)
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

impl TopParams {
    pub fn limit(&self) -> u32 {
        clamp_top_limit(parse_leading_int(self.limit.as_deref()).unwrap_or(DEFAULT_TOP_LIMIT))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// 1-based page number (default 1)
    #[param(value_type = Option<u32>)]
    pub page: Option<String>,
    /// Page size, clamped to 1..=1000 (default 100)
    #[param(value_type = Option<u32>)]
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(
            parse_leading_int(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            parse_leading_int(self.limit.as_deref()).unwrap_or(DEFAULT_PAGE_LIMIT),
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
