use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::session::{self, Realm};
use crate::error::SessionDenied;
use crate::models::User;
use crate::routes::AppState;
use crate::state::{AdminState, UserState};

#[derive(Clone)]
pub struct UserSession {
    pub token: String,
    pub profile: User,
    pub state: Arc<UserState>,
}

#[derive(Clone)]
pub struct AdminSession {
    pub token: String,
    pub state: Arc<AdminState>,
}

/// Redirects to the public page when no user token is stored. Any handler
/// answering with [`SessionDenied`] gets the session cleared the same way.
pub async fn require_user(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session::token(&jar, Realm::User) else {
        return Redirect::to(Realm::User.entry_path()).into_response();
    };

    let profile = session::profile(&jar, Realm::User).unwrap_or_default();
    request.extensions_mut().insert(UserSession {
        token: token.clone(),
        profile,
        state: state.sessions.user(&token),
    });

    let response = next.run(request).await;
    if response.extensions().get::<SessionDenied>().is_some() {
        state.sessions.forget_user(&token);
        return denied(jar, Realm::User);
    }
    response
}

pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = session::token(&jar, Realm::Admin) else {
        return Redirect::to(Realm::Admin.entry_path()).into_response();
    };

    request.extensions_mut().insert(AdminSession {
        token: token.clone(),
        state: state.sessions.admin(&token),
    });

    let response = next.run(request).await;
    if response.extensions().get::<SessionDenied>().is_some() {
        state.sessions.forget_admin(&token);
        return denied(jar, Realm::Admin);
    }
    response
}

fn denied(jar: CookieJar, realm: Realm) -> Response {
    tracing::info!("Backend denied {realm:?} session, signing out");
    let jar = session::flash(session::sign_out(jar, realm), "Session expired. Please login again.");
    (jar, Redirect::to(realm.entry_path())).into_response()
}
