//! Page routes
//!
//! Paths resolve through the application route table. Gated pages check the
//! visitor's session first and redirect when the guard refuses.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::auth::{Access, GuardDecision, RouteGuard};
use crate::backend::AdminRepository;
use crate::routes::{resolve, Page};
use crate::web::{extractors::AccessToken, AppState};

/// Used when the settings row cannot be read
const FALLBACK_SITE_TITLE: &str = "StreamVibe";

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

async fn site_title(state: &AppState) -> String {
    match AdminRepository::new(state.backend.clone()).site_settings().await {
        Ok(settings) => settings.title,
        Err(e) => {
            debug!(error = %e, "Site settings unavailable; using fallback title");
            FALLBACK_SITE_TITLE.to_string()
        }
    }
}

fn render_shell(page: Page, site_title: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} | {}</title></head>\n<body data-page=\"{:?}\"><div id=\"root\"></div></body>\n</html>\n",
        page.title(),
        escape_html(site_title),
        page
    ))
}

pub async fn page(
    State(state): State<AppState>,
    uri: Uri,
    token: Option<AccessToken>,
) -> Response {
    let entry = resolve(uri.path());

    if entry.access != Access::Public {
        let session = match token {
            Some(AccessToken(token)) => state.session_context().restore(&token).await.ok(),
            None => None,
        };
        if let GuardDecision::Redirect(target) =
            RouteGuard::check(session.as_deref(), entry.access, uri.path())
        {
            debug!(path = %uri.path(), target = %target, "Guard redirected page request");
            return Redirect::to(&target).into_response();
        }
    }

    let status = if entry.page == Page::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    let title = site_title(&state).await;
    (status, render_shell(entry.page, &title)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_escapes_site_title() {
        let Html(body) = render_shell(Page::Home, "Tom & Jerry <TV>");
        assert!(body.contains("<title>Home | Tom &amp; Jerry &lt;TV&gt;</title>"));
        assert!(body.contains("data-page=\"Home\""));
    }
}
