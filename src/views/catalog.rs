//! Team and zone pages; both are plain id/name lists.

use std::fmt::Write;

use super::{Layout, escape, render};

/// Which reference list a page is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Team,
    Zone,
}

impl Catalog {
    pub fn label(self) -> &'static str {
        match self {
            Catalog::Team => "Team",
            Catalog::Zone => "Zone",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Catalog::Team => "team",
            Catalog::Zone => "zone",
        }
    }

    /// Listing path, `/teams` or `/zones`.
    pub fn index_path(self) -> &'static str {
        match self {
            Catalog::Team => "/teams",
            Catalog::Zone => "/zones",
        }
    }

    /// Form field carrying the name.
    pub fn name_field(self) -> &'static str {
        match self {
            Catalog::Team => "team_name",
            Catalog::Zone => "zone_name",
        }
    }

    pub fn saved_message(self) -> &'static str {
        match self {
            Catalog::Team => "Team was saved successfully!",
            Catalog::Zone => "Zone was saved successfully!",
        }
    }
}

/// Listing with edit links and a link to each entry's worksheets.
pub fn catalog_index(layout: &Layout<'_>, kind: Catalog, items: &[(i32, String)]) -> String {
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h2>{}s</h2>\n<p><a href=\"/{}/new\">New {}</a></p>",
        kind.label(),
        kind.slug(),
        kind.label().to_lowercase()
    );

    if items.is_empty() {
        let _ = writeln!(body, "<p>There's nothing to see here yet!</p>");
        return render(layout, &body);
    }

    body.push_str("<table>\n<tr><th>ID</th><th>Name</th><th></th></tr>\n");
    for (id, name) in items {
        let _ = writeln!(
            body,
            "<tr><td>{id}</td><td><a href=\"/worksheet/{slug}/{id}\">{name}</a></td>\
             <td><a href=\"/{slug}/{id}/edit\">Edit</a></td></tr>",
            id = id,
            slug = kind.slug(),
            name = escape(name)
        );
    }
    body.push_str("</table>\n");

    render(layout, &body)
}

/// Create form when `existing` is `None`, edit form otherwise.
pub fn catalog_form(layout: &Layout<'_>, kind: Catalog, existing: Option<(i32, &str)>) -> String {
    let (heading, action, value) = match existing {
        Some((id, name)) => (
            format!("Edit {}", kind.label()),
            format!("/{}/{}/edit", kind.slug(), id),
            name,
        ),
        None => (
            format!("New {}", kind.label()),
            format!("/{}/new", kind.slug()),
            "",
        ),
    };

    let body = format!(
        "<h2>{heading}</h2>\n<form action=\"{action}\" method=\"POST\">\n\
         <div><label>Name:</label><input type=\"text\" name=\"{field}\" value=\"{value}\"></div>\n\
         <div><button type=\"submit\">Save</button> <a href=\"{back}\">Cancel</a></div>\n</form>\n",
        heading = escape(&heading),
        action = escape(&action),
        field = kind.name_field(),
        value = escape(value),
        back = kind.index_path()
    );

    render(layout, &body)
}
