//! Upstream payload fixtures.

use serde_json::{Value, json};

/// Session token the fake session layer attaches.
#[allow(dead_code)]
pub const SESSION_TOKEN: &str = "gho_test_session_token";

/// A GitHub repository listing entry.
#[allow(dead_code)]
pub fn github_repo(owner: &str, name: &str) -> Value {
    json!({
        "id": 1296269,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": { "login": owner },
        "private": false,
        "html_url": format!("https://github.com/{owner}/{name}"),
        "url": format!("https://api.github.com/repos/{owner}/{name}"),
    })
}

/// A GitHub user.
#[allow(dead_code)]
pub fn github_user() -> Value {
    json!({
        "login": "anowner",
        "id": 1,
        "name": "An Owner",
        "type": "User",
        "site_admin": false,
    })
}

/// A Link header covering a middle page of three.
#[allow(dead_code)]
pub fn link_header() -> String {
    [
        r#"<https://api.github.com/user/repos?affiliation=owner&page=1>; rel="first""#,
        r#"<https://api.github.com/user/repos?affiliation=owner&page=1>; rel="prev""#,
        r#"<https://api.github.com/user/repos?affiliation=owner&page=3>; rel="next""#,
        r#"<https://api.github.com/user/repos?affiliation=owner&page=3>; rel="last""#,
    ]
    .join(", ")
}
