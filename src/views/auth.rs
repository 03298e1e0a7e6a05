use std::fmt::Write;

use super::{Layout, escape, render};
use crate::forms::{Failures, LoginForm};

/// Login form, with inline failures from a rejected attempt.
pub fn login_page(layout: &Layout<'_>, form: &LoginForm, failures: &Failures) -> String {
    let mut body = String::from("<h2>Login</h2>\n");

    if let Some(generic) = failures.get("Generic") {
        let _ = writeln!(body, "<div class=\"error\">{}</div>", escape(generic));
    }

    body.push_str("<form action=\"/user/login\" method=\"POST\" novalidate>\n");
    let _ = writeln!(
        body,
        "<div><label>Username:</label>{}<input type=\"text\" name=\"username\" value=\"{}\"></div>",
        field_error(failures, "Username"),
        escape(&form.username)
    );
    let _ = writeln!(
        body,
        "<div><label>Password:</label>{}<input type=\"password\" name=\"password\"></div>",
        field_error(failures, "Password")
    );
    body.push_str("<div><button type=\"submit\">Login</button></div>\n</form>\n");

    render(layout, &body)
}

fn field_error(failures: &Failures, field: &str) -> String {
    failures
        .get(field)
        .map(|msg| format!("<label class=\"error\">{}</label>", escape(msg)))
        .unwrap_or_default()
}
