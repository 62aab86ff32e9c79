use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post, put},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::token::SessionUser,
    error::AppError,
    flash,
    state::AppState,
    views,
};

use super::dto::RacketForm;
use super::repo::Racket;

/// Public catalog browsing: list and detail need no token.
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/raquetas", get(list_rackets))
        .route("/raquetas/:id", get(racket_detail))
}

/// Every form-rendering and state-mutating route sits behind the gate.
pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/raquetas", post(create_racket))
        .route("/raquetas/nueva", get(new_racket_form))
        .route("/raquetas/edit/:id", get(edit_racket_form))
        .route("/raquetas/:id", put(update_racket).delete(delete_racket))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Validation("id no valido".into()))
}

#[instrument(skip(state, jar))]
pub async fn list_rackets(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let rackets = Racket::find_all(&state.db).await?;
    let (sid, jar) = flash::session_id(jar);
    let message = state.flash.take(sid);
    Ok((jar, views::racket_list(&rackets, message.as_deref())))
}

#[instrument(skip(state))]
pub async fn racket_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let racket = Racket::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Raqueta no encontrada"))?;
    Ok(views::racket_detail(&racket))
}

#[instrument(skip_all)]
pub async fn new_racket_form(SessionUser(_claims): SessionUser) -> Html<String> {
    views::racket_new_form()
}

#[instrument(skip(state))]
pub async fn edit_racket_form(
    State(state): State<AppState>,
    SessionUser(_claims): SessionUser,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_id(&id)?;
    let racket = Racket::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("Raqueta no encontrada"))?;
    Ok(views::racket_edit_form(&racket))
}

#[instrument(skip(state, jar, form))]
pub async fn create_racket(
    State(state): State<AppState>,
    SessionUser(claims): SessionUser,
    jar: CookieJar,
    Form(form): Form<RacketForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    form.validate()?;
    let racket = Racket::create(&state.db, &form).await?;
    info!(racket_id = %racket.id, user_id = %claims.sub, "racket created");

    let jar = flash::stash(&state.flash, jar, "Raqueta creada");
    Ok((jar, Redirect::to("/raquetas")))
}

#[instrument(skip(state, jar, form))]
pub async fn update_racket(
    State(state): State<AppState>,
    SessionUser(claims): SessionUser,
    Path(id): Path<String>,
    jar: CookieJar,
    Form(form): Form<RacketForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let id = parse_id(&id)?;
    form.validate()?;
    Racket::update(&state.db, id, &form)
        .await?
        .ok_or(AppError::NotFound("Raqueta no encontrada"))?;
    info!(racket_id = %id, user_id = %claims.sub, "racket updated");

    let jar = flash::stash(&state.flash, jar, "Raqueta actualizada");
    Ok((jar, Redirect::to("/raquetas")))
}

#[instrument(skip(state, jar))]
pub async fn delete_racket(
    State(state): State<AppState>,
    SessionUser(claims): SessionUser,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let id = parse_id(&id)?;
    Racket::delete(&state.db, id).await?;
    info!(racket_id = %id, user_id = %claims.sub, "racket deleted");

    let jar = flash::stash(&state.flash, jar, "Raqueta eliminada");
    Ok((jar, Redirect::to("/raquetas")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_a_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn parse_id_maps_malformed_text_to_validation() {
        assert!(matches!(
            parse_id("not-an-id"),
            Err(AppError::Validation(_))
        ));
    }
}
