//! Worksheet and photo pages.

use std::fmt::Write;

use super::{Layout, escape, human_date, pagination, render, search_form};
use crate::entity::{photo, team, worksheet, zone};
use crate::models::{ListQuery, PageInfo, WorksheetDetail, store_path};

/// Options for the zone and team selects.
#[derive(Debug, Clone, Copy)]
pub struct WorksheetChoices<'a> {
    pub teams: &'a [team::Model],
    pub zones: &'a [zone::Model],
}

fn worksheet_table(worksheets: &[worksheet::Model]) -> String {
    if worksheets.is_empty() {
        return "<p>There's nothing to see here yet!</p>\n".to_string();
    }

    let mut html =
        String::from("<table>\n<tr><th>Number</th><th>Name</th><th>Created</th></tr>\n");
    for ws in worksheets {
        let _ = writeln!(
            html,
            "<tr><td><a href=\"/worksheet/{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
            ws.id,
            escape(&ws.number),
            escape(&ws.name),
            human_date(ws.created)
        );
    }
    html.push_str("</table>\n");
    html
}

/// Home: creation dates, then the paginated worksheet listing.
pub fn home_page(
    layout: &Layout<'_>,
    dates: &[String],
    worksheets: &[worksheet::Model],
    info: &PageInfo,
    query: &ListQuery,
) -> String {
    let mut body = String::from("<h2>Worksheets</h2>\n");
    body.push_str(&search_form("/", &query.q, "Worksheet number"));

    if !dates.is_empty() {
        body.push_str("<ul class=\"dates\">\n");
        for date in dates {
            let _ = writeln!(
                body,
                "<li><a href=\"/worksheet/date/{0}\">{0}</a></li>",
                escape(date)
            );
        }
        body.push_str("</ul>\n");
    }

    body.push_str(&worksheet_table(worksheets));
    body.push_str(&pagination(info));
    render(layout, &body)
}

/// Unpaginated listing by date, zone or team.
pub fn worksheet_list(layout: &Layout<'_>, worksheets: &[worksheet::Model]) -> String {
    let mut body = format!("<h2>{}</h2>\n", escape(layout.title));
    body.push_str(&worksheet_table(worksheets));
    render(layout, &body)
}

fn navbar(detail: &WorksheetDetail) -> String {
    format!(
        "<nav class=\"worksheet\">\
         <a href=\"/worksheet/{id}\">Photos</a> \
         <a href=\"/worksheet/{id}/edit\">Edit</a> \
         <a href=\"/worksheet/{id}/photo/new\">Upload photo</a> \
         <a href=\"/worksheet/{id}/download\">Download</a> \
         <form action=\"/worksheet/{id}/delete\" method=\"POST\" class=\"inline\">\
         <button type=\"submit\">Delete</button></form></nav>\n",
        id = detail.id
    )
}

fn summary(detail: &WorksheetDetail) -> String {
    format!(
        "<h2>Worksheet {}</h2>\n<dl>\n<dt>Name</dt><dd>{}</dd>\n\
         <dt>Zone</dt><dd>{}</dd>\n<dt>Team</dt><dd>{}</dd>\n\
         <dt>Created</dt><dd>{}</dd>\n</dl>\n",
        escape(&detail.number),
        escape(&detail.name),
        escape(detail.zone_name.as_deref().unwrap_or("-")),
        escape(detail.team_name.as_deref().unwrap_or("-")),
        human_date(detail.created)
    )
}

/// Worksheet details and its photo gallery.
pub fn worksheet_show(
    layout: &Layout<'_>,
    detail: &WorksheetDetail,
    photos: &[photo::Model],
    info: &PageInfo,
    query: &ListQuery,
) -> String {
    let mut body = navbar(detail);
    body.push_str(&summary(detail));
    body.push_str(&search_form(
        &format!("/worksheet/{}", detail.id),
        &query.q,
        "File name",
    ));

    if photos.is_empty() {
        body.push_str("<p>No photos yet.</p>\n");
    } else {
        body.push_str("<div class=\"photos\">\n");
        for p in photos {
            let src = store_path(p.worksheet_id, &p.file_name);
            let _ = writeln!(
                body,
                "<figure><a href=\"{src}\"><img src=\"{src}\" alt=\"{name}\"></a>\
                 <figcaption>#{num} {name}<br>{created}</figcaption></figure>",
                src = escape(&src),
                name = escape(&p.file_name),
                num = p.running_number,
                created = human_date(p.created)
            );
        }
        body.push_str("</div>\n");
    }

    body.push_str(&pagination(info));
    render(layout, &body)
}

fn options<'a>(items: impl Iterator<Item = (i32, &'a str)>, selected: Option<i32>) -> String {
    let mut html = String::from("<option value=\"0\">--</option>");
    for (id, name) in items {
        let marker = if selected == Some(id) { " selected" } else { "" };
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            id,
            marker,
            escape(name)
        );
    }
    html
}

/// Create form when `existing` is `None`, edit form otherwise.
pub fn worksheet_form(
    layout: &Layout<'_>,
    existing: Option<&WorksheetDetail>,
    choices: WorksheetChoices<'_>,
) -> String {
    let mut body = String::new();
    let action = match existing {
        Some(detail) => {
            body.push_str(&navbar(detail));
            let _ = writeln!(body, "<h2>Edit Worksheet {}</h2>", escape(&detail.number));
            format!("/worksheet/{}/edit", detail.id)
        }
        None => {
            body.push_str("<h2>New Worksheet</h2>\n");
            "/worksheet/new".to_string()
        }
    };

    let number = existing.map(|d| d.number.as_str()).unwrap_or_default();
    let name = existing.map(|d| d.name.as_str()).unwrap_or_default();
    let zone_id = existing.and_then(|d| d.zone_id);
    let team_id = existing.and_then(|d| d.team_id);

    let _ = write!(
        body,
        "<form action=\"{action}\" method=\"POST\">\n\
         <div><label>Number:</label><input type=\"text\" name=\"worksheet_number\" value=\"{number}\"></div>\n\
         <div><label>Name:</label><input type=\"text\" name=\"worksheet_name\" value=\"{name}\"></div>\n\
         <div><label>Zone:</label><select name=\"worksheet_zone_id\">{zones}</select></div>\n\
         <div><label>Team:</label><select name=\"worksheet_team_id\">{teams}</select></div>\n\
         <div><button type=\"submit\">Save</button></div>\n</form>\n",
        action = escape(&action),
        number = escape(number),
        name = escape(name),
        zones = options(
            choices.zones.iter().map(|z| (z.id, z.name.as_str())),
            zone_id
        ),
        teams = options(
            choices.teams.iter().map(|t| (t.id, t.name.as_str())),
            team_id
        ),
    );

    render(layout, &body)
}

/// Multipart upload form for one photo.
pub fn photo_form(layout: &Layout<'_>, detail: &WorksheetDetail) -> String {
    let mut body = navbar(detail);
    let _ = write!(
        body,
        "<h2>Upload photo to {number}</h2>\n\
         <form action=\"/worksheet/{id}/photo/new\" method=\"POST\" enctype=\"multipart/form-data\">\n\
         <div><label>Running number:</label><input type=\"number\" name=\"running_number\" min=\"1\"></div>\n\
         <div><label>File:</label><input type=\"file\" name=\"uploadFile\" accept=\"image/*\"></div>\n\
         <div><button type=\"submit\">Upload</button></div>\n</form>\n",
        number = escape(&detail.number),
        id = detail.id
    );
    render(layout, &body)
}
