use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub currency: String,
    pub company_name: String,
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.read().await;
    IndexTemplate {
        currency: state.settings.render.currency.clone(),
        company_name: session.company.name.clone(),
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}
