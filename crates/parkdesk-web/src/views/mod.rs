//! Pure rendering: snapshots in, escaped HTML out.

pub mod admin;
pub mod dashboard;
pub mod expiry;
pub mod filter;
pub mod format;
pub mod public;

use askama::Template;
use axum::response::Html;

use crate::error::AppResult;

pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

/// Placeholder shown in place of a container whose fetch failed.
#[derive(Template)]
#[template(path = "partials/placeholder.html")]
pub struct Placeholder<'a> {
    pub icon: &'a str,
    pub message: &'a str,
}

pub fn error_placeholder(message: &str) -> AppResult<String> {
    Ok(Placeholder {
        icon: "fa-exclamation-circle",
        message,
    }
    .render()?)
}

/// A yes/no gate in front of a state-changing action.
#[derive(Template)]
#[template(path = "partials/confirm.html")]
pub struct ConfirmDialog<'a> {
    pub message: &'a str,
    pub action: String,
    pub confirm_label: &'a str,
    pub with_reason: bool,
}

impl ConfirmDialog<'_> {
    pub fn to_html(&self) -> AppResult<String> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_escapes_message() {
        let html = error_placeholder("<b>down</b>").unwrap();
        assert!(html.contains("&lt;b&gt;down&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn confirm_dialog_posts_to_action() {
        let html = ConfirmDialog {
            message: "Approve this parking space?",
            action: "/admin/parking/p1/approve".to_string(),
            confirm_label: "Approve",
            with_reason: false,
        }
        .to_html()
        .unwrap();
        assert!(html.contains(r#"method="post""#));
        assert!(html.contains("p1"));
        assert!(html.contains("Approve this parking space?"));
        assert!(!html.contains("textarea"));
    }
}
