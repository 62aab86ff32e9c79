use axum::{
    extract::{FromRef, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginOk, LoginRequest, RegisterForm},
        password,
        repo::{normalize_email, User},
        token::{TokenKeys, TOKEN_COOKIE},
    },
    error::AppError,
    flash,
    state::AppState,
    views,
};

pub fn register_routes() -> Router<AppState> {
    Router::new().route("/registro", post(register))
}

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_page).post(login))
}

#[instrument(skip(state, jar, form))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let user = User::create(&state.db, &form.name, &form.email, &form.password).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");

    let jar = flash::stash(
        &state.flash,
        jar,
        "Usuario registrado, ya puedes iniciar sesión",
    );
    Ok((jar, Redirect::to("/login")))
}

#[instrument(skip(state, jar))]
pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (sid, jar) = flash::session_id(jar);
    let message = state.flash.take(sid);
    (jar, views::login_page(message.as_deref()))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginOk>), AppError> {
    let email = normalize_email(&payload.email);

    // Distinct messages for unknown user and wrong password are the
    // established behavior of this surface; see DESIGN.md before changing.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            AppError::Validation("Usuario no encontrado".into())
        })?;

    let ok = password::verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Validation("Contraseña incorrecta".into()));
    }

    let keys = TokenKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(state.config.production)
        .max_age(keys.ttl())
        .path("/")
        .build();

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        jar.add(cookie),
        Json(LoginOk {
            message: "Login exitoso",
        }),
    ))
}
