//! Application route table
//!
//! Maps public paths to pages. Only the admin panel is gated; the guard
//! decision itself lives in [`crate::auth::RouteGuard`].

use serde::Serialize;

use crate::auth::Access;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    LiveTv,
    Movies,
    Sports,
    Favorites,
    MyPlaylists,
    DirectStream,
    Auth,
    Admin,
    NotFound,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::LiveTv => "Live TV",
            Page::Movies => "Movies",
            Page::Sports => "Sports",
            Page::Favorites => "Favorites",
            Page::MyPlaylists => "My Playlists",
            Page::DirectStream => "Direct Stream",
            Page::Auth => "Sign In",
            Page::Admin => "Admin",
            Page::NotFound => "Not Found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
}

const fn route(path: &'static str, page: Page, access: Access) -> RouteEntry {
    RouteEntry { path, page, access }
}

pub const ROUTES: &[RouteEntry] = &[
    route("/", Page::Home, Access::Public),
    route("/live", Page::LiveTv, Access::Public),
    route("/movies", Page::Movies, Access::Public),
    route("/sports", Page::Sports, Access::Public),
    route("/favorites", Page::Favorites, Access::Public),
    route("/playlists", Page::MyPlaylists, Access::Public),
    route("/direct", Page::DirectStream, Access::Public),
    route("/auth", Page::Auth, Access::Public),
    route("/admin", Page::Admin, Access::AdminOnly),
];

const NOT_FOUND: RouteEntry = route("*", Page::NotFound, Access::Public);

/// Entry for `path`; unknown paths resolve to the not-found page
pub fn resolve(path: &str) -> RouteEntry {
    let normalized = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES
        .iter()
        .copied()
        .find(|entry| entry.path == normalized)
        .unwrap_or(NOT_FOUND)
}
