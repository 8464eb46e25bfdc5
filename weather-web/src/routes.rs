use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::{
    app::AppState,
    error::AppResult,
    page::Notice,
};

#[derive(Debug, Deserialize)]
pub struct AddCityForm {
    pub city_name: String,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, None).await
}

pub async fn add_city(
    State(state): State<AppState>,
    Form(form): Form<AddCityForm>,
) -> AppResult<Html<String>> {
    let outcome = state.tracker.add_city(&form.city_name).await?;
    render(&state, Notice::from_outcome(&outcome)).await
}

pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Redirect> {
    state.tracker.remove_city(id)?;
    Ok(Redirect::to("/"))
}

/// Re-fetch weather for every stored city and render the list.
async fn render(state: &AppState, notice: Option<Notice>) -> AppResult<Html<String>> {
    let cities = state.tracker.snapshots().await?;
    let html = state.pages.index(&cities, notice)?;
    Ok(Html(html))
}
