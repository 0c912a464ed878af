use askama::Template;
use axum::response::IntoResponse;

use crate::tabs::Tab;

pub struct TabLink {
    pub slug: &'static str,
    pub title: &'static str,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub tabs: Vec<TabLink>,
    pub initial: &'static str,
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        tabs: Tab::ALL
            .iter()
            .map(|tab| TabLink {
                slug: tab.slug(),
                title: tab.title(),
            })
            .collect(),
        initial: Tab::Transactions.slug(),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
