use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use super::failure;
use crate::financials::SettingsForm;
use crate::render::{self, notice, NoticeLevel};
use crate::tabs::Tab;
use crate::AppState;

pub async fn financials_handler(State(state): State<AppState>) -> Response {
    match state.financials.load().await {
        Ok(snapshot) => Html(render::financials_panel(&snapshot)).into_response(),
        Err(err) => failure(Tab::Financials.load_failure(), err),
    }
}

pub async fn save_settings_handler(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Response {
    match state.financials.save_settings(&form).await {
        Ok(_) => Html(notice(
            NoticeLevel::Success,
            "Οι παράμετροι αποθηκεύτηκαν επιτυχώς",
            "",
        ))
        .into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "Financial settings not saved");
            failure("Αποτυχία αποθήκευσης παραμέτρων", err)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CostQuery {
    pub square_meters: Option<String>,
}

pub async fn cost_per_sqm_handler(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> Response {
    match state
        .financials
        .cost_per_square_meter(query.square_meters.as_deref())
        .await
    {
        Ok(cost) => Html(render::cost_result(cost)).into_response(),
        Err(err) => failure("Αδύνατος ο υπολογισμός κόστους ανά τετραγωνικό μέτρο", err),
    }
}
