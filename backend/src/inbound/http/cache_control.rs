//! Cache-Control policies shared by handlers.

/// Static public files: robots.txt and the sitemap.
pub const PUBLIC_ONE_DAY: &str = "public, max-age=86400";

/// Admin and session-bound responses.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

pub const fn public_one_day_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_ONE_DAY)
}

pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
