use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Redirect,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument};

use crate::{auth::token::SessionUser, error::AppError, flash, state::AppState};

const FILE_FIELD: &str = "archivo";

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/subir", post(upload))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

/// Accepts exactly one file under the `archivo` field, writes it through the
/// upload store and redirects to the listing. The file is never linked to a
/// racket record.
#[instrument(skip(state, jar, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    SessionUser(claims): SessionUser,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), AppError> {
    let mut stored = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Upload("archivo no recibido"))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original = field.file_name().unwrap_or(FILE_FIELD).to_string();
        let body = field
            .bytes()
            .await
            .map_err(|_| AppError::Upload("archivo no recibido"))?;
        stored = Some(state.storage.save(&original, body).await?);
        break;
    }

    let name = stored.ok_or(AppError::Upload("archivo no recibido"))?;
    info!(file = %name, user_id = %claims.sub, "file uploaded");

    let jar = flash::stash(&state.flash, jar, "Archivo subido");
    Ok((jar, Redirect::to("/raquetas")))
}
