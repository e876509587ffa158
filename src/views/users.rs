use std::fmt::Write;

use crate::app::users::{filter_users, login_distribution, unverified_count};
use crate::domain::user::ManagedUser;
use crate::views::layout::state;
use crate::views::{avatar_parts, escape, format_opt, Links, Section, DATE};

pub fn users_table(users: &Section<Vec<ManagedUser>>, query: &str, logged_in: bool, links: &Links) -> String {
    let mut html = String::from("<section class=\"card users\"><div class=\"card-header\"><h2>User Management</h2>");
    writeln!(
        html,
        "<form method=\"get\" action=\"/users\"><input type=\"search\" name=\"q\" \
         placeholder=\"Search users...\" value=\"{}\"><button type=\"submit\">Search</button></form>",
        escape(query)
    )
    .ok();

    let users = match users {
        Err(message) => {
            html.push_str("</div>");
            html.push_str(&state(message));
            html.push_str("</section>");
            return html;
        }
        Ok(users) => users,
    };

    html.push_str(&remove_unverified_control(unverified_count(users), logged_in));
    html.push_str("</div>");

    let rows = filter_users(users, query);
    if rows.is_empty() {
        html.push_str(&state("No users found"));
        html.push_str("</section>");
        return html;
    }

    html.push_str(
        "<table><thead><tr><th>User</th><th>Email</th><th>Verified</th>\
         <th>Login</th><th>Sessions</th><th>Joined</th></tr></thead><tbody>",
    );
    for user in rows {
        writeln!(
            html,
            "<tr><td><a href=\"{}\" target=\"_blank\">{}{}</a></td><td>{}</td>\
             <td>{}</td><td><span class=\"badge\">{}</span></td><td>{}</td><td class=\"muted\">{}</td></tr>",
            escape(&links.profile(&user.username)),
            avatar_parts(&user.avatar, &user.username, ""),
            escape(&user.username),
            escape(&user.email),
            if user.is_mail_verified { "Verified" } else { "Unverified" },
            user.login_type.label(),
            user.sessions,
            format_opt(user.created_at, DATE)
        )
        .ok();
    }
    html.push_str("</tbody></table></section>");
    html
}

/// Logged-out admins get a button that leads to the login page; logged-in
/// admins only see it while unverified accounts exist.
fn remove_unverified_control(unverified: usize, logged_in: bool) -> String {
    if !logged_in {
        return "<form method=\"post\" action=\"/users/unverified/delete\">\
                <button type=\"submit\">Remove unverified users</button></form>"
            .to_string();
    }
    if unverified == 0 {
        return String::new();
    }

    format!(
        "<details class=\"confirm\"><summary>Remove unverified users ({unverified})</summary>\
         <p>Are you sure you want to remove all unverified users?</p>\
         <form method=\"post\" action=\"/users/unverified/delete\">\
         <button type=\"submit\">Remove</button></form></details>"
    )
}

pub fn login_types(users: &Section<Vec<ManagedUser>>) -> String {
    let mut html = String::from("<section class=\"card\"><h3>Login Type</h3>");
    match users {
        Err(message) => html.push_str(&state(message)),
        Ok(users) => {
            let distribution = login_distribution(users);
            writeln!(
                html,
                "<table><tbody><tr><td>Local</td><td>{}</td></tr>\
                 <tr><td>Google</td><td>{}</td></tr></tbody>\
                 <tfoot><tr><th>Total</th><th>{}</th></tr></tfoot></table>",
                distribution.local,
                distribution.google,
                distribution.total()
            )
            .ok();
        }
    }
    html.push_str("</section>");
    html
}
