//! Server-rendered HTML pages.
//!
//! Every page goes through [`render`], which wraps the body in the shared
//! layout (navigation, flash message). All dynamic text is passed through
//! [`escape`].

mod auth;
mod catalog;
mod worksheets;

pub use auth::login_page;
pub use catalog::{Catalog, catalog_form, catalog_index};
pub use worksheets::{
    home_page, photo_form, worksheet_form, worksheet_list, worksheet_show, WorksheetChoices,
};

use chrono::{DateTime, Duration, Utc};
use std::fmt::Write;

use crate::models::{CurrentUser, PageInfo};

/// Offset applied to timestamps shown in pages (UTC+7).
const DISPLAY_OFFSET_HOURS: i64 = 7;

/// Per-page layout inputs.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub title: &'a str,
    pub user: Option<&'a CurrentUser>,
    pub flash: Option<&'a str>,
}

impl<'a> Layout<'a> {
    pub fn new(title: &'a str) -> Self {
        Layout {
            title,
            user: None,
            flash: None,
        }
    }
}

/// Escape text for use in HTML content and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `02 Jan 2006 at 15:04`, shifted to local display time.
pub fn human_date(ts: DateTime<Utc>) -> String {
    (ts + Duration::hours(DISPLAY_OFFSET_HOURS))
        .format("%d %b %Y at %H:%M")
        .to_string()
}

/// Wrap `body` in the site layout.
pub fn render(layout: &Layout<'_>, body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} - Board Checker</title>\n\
         <link rel=\"stylesheet\" href=\"/static/css/main.css\">\n</head>\n<body>\n",
        escape(layout.title)
    );

    html.push_str("<header><nav>\n<a class=\"brand\" href=\"/\">Board Checker</a>\n");
    match layout.user {
        Some(user) => {
            html.push_str(
                "<a href=\"/\">Home</a>\n<a href=\"/teams\">Teams</a>\n\
                 <a href=\"/zones\">Zones</a>\n<a href=\"/worksheet/new\">New worksheet</a>\n",
            );
            let _ = write!(
                html,
                "<form class=\"logout\" action=\"/user/logout\" method=\"POST\">\
                 <span>{}</span> <button type=\"submit\">Logout</button></form>\n",
                escape(&user.name)
            );
        }
        None => html.push_str("<a href=\"/user/login\">Login</a>\n"),
    }
    html.push_str("</nav></header>\n<main>\n");

    if let Some(flash) = layout.flash {
        let _ = writeln!(html, "<div class=\"flash\">{}</div>", escape(flash));
    }

    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

/// Standalone error page.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p><a href=\"/\">Back to home</a></p>",
        escape(title),
        escape(message)
    );
    render(&Layout::new(title), &body)
}

/// Page links for a listing; empty when everything fits on one page.
fn pagination(info: &PageInfo) -> String {
    if info.paginations.len() < 2 {
        return String::new();
    }

    let mut html = String::from("<ul class=\"pagination\">\n");
    for p in &info.paginations {
        if p.is_current() {
            let _ = writeln!(html, "<li class=\"current\">{}</li>", p.page);
        } else {
            let _ = writeln!(
                html,
                "<li><a href=\"{}\">{}</a></li>",
                escape(&p.url),
                p.page
            );
        }
    }
    html.push_str("</ul>\n");
    html
}

/// GET search box that keeps the current filter.
fn search_form(action: &str, q: &str, placeholder: &str) -> String {
    format!(
        "<form class=\"search\" action=\"{}\" method=\"GET\">\
         <input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{}\">\
         <button type=\"submit\">Search</button></form>\n",
        escape(action),
        escape(q),
        escape(placeholder)
    )
}
