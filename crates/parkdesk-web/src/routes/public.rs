use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::api::Registration;
use crate::auth::session::{self, Realm};
use crate::error::AppResult;
use crate::routes::AppState;
use crate::views::admin::AdminLoginPage;
use crate::views::public::{Modal, PublicPage};
use crate::views::render;

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub modal: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

pub async fn index(
    jar: CookieJar,
    Query(query): Query<IndexQuery>,
) -> AppResult<Response> {
    let (jar, notice) = session::take_flash(jar);
    let signed_in = session::token(&jar, Realm::User).is_some();
    let mut page = PublicPage::new(
        query.modal.as_deref().and_then(Modal::from_key),
        query.email.unwrap_or_default(),
        signed_in,
    );
    page.notice = notice;
    Ok((jar, render(&page)?).into_response())
}

fn public_page(modal: Modal, email: String, notice: String) -> AppResult<Response> {
    let mut page = PublicPage::new(Some(modal), email, false);
    page.notice = Some(notice);
    Ok(render(&page)?.into_response())
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        return public_page(Modal::Login, email, "Email and password are required".to_string());
    }

    match state.api.login(&email, &form.password).await {
        Ok(login) => {
            tracing::info!("User signed in: {email}");
            let jar = session::sign_in(
                jar,
                Realm::User,
                login.token,
                &login.user,
                state.config.secure_cookies,
            );
            let jar = session::flash(jar, "Login successful!");
            Ok((jar, Redirect::to("/dashboard")).into_response())
        }
        Err(e) => {
            tracing::debug!("Login failed for {email}: {e}");
            public_page(Modal::Login, email, e.notice_or("Login failed"))
        }
    }
}

pub async fn register(
    State(state): State<AppState>,
    Form(mut form): Form<Registration>,
) -> AppResult<Response> {
    form.full_name = form.full_name.trim().to_string();
    form.email = form.email.trim().to_string();
    if form.full_name.is_empty() || form.email.is_empty() || form.password.is_empty() {
        return public_page(
            Modal::Register,
            String::new(),
            "Name, email and password are required".to_string(),
        );
    }

    match state.api.register(&form).await {
        Ok(()) => {
            tracing::info!("Registered account for {}", form.email);
            public_page(
                Modal::Login,
                form.email,
                "Registration successful! Please login.".to_string(),
            )
        }
        Err(e) => {
            tracing::debug!("Registration failed for {}: {e}", form.email);
            public_page(Modal::Register, String::new(), e.notice_or("Registration failed"))
        }
    }
}

/// The contact form has no backend endpoint; it only acknowledges.
pub async fn contact(jar: CookieJar, Form(form): Form<ContactForm>) -> Response {
    tracing::debug!(
        "Contact message from {} <{}> ({} chars)",
        form.name,
        form.email,
        form.message.len()
    );
    let jar = session::flash(
        jar,
        "Thank you for your message! We will get back to you soon.",
    );
    (jar, Redirect::to("/#contact")).into_response()
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session::token(&jar, Realm::User) {
        state.sessions.forget_user(&token);
    }
    let jar = session::sign_out(jar, Realm::User);
    (jar, Redirect::to(Realm::User.entry_path())).into_response()
}

// Admin sign-in

pub async fn admin_login_page(jar: CookieJar) -> AppResult<Response> {
    let (jar, notice) = session::take_flash(jar);
    Ok((jar, render(&AdminLoginPage { notice })?).into_response())
}

pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim().to_string();
    let page = |notice: String| -> AppResult<Response> {
        Ok(render(&AdminLoginPage {
            notice: Some(notice),
        })?
        .into_response())
    };
    if email.is_empty() || form.password.is_empty() {
        return page("Email and password are required".to_string());
    }

    match state.api.login(&email, &form.password).await {
        Ok(login) if login.user.is_admin() => {
            tracing::info!("Admin signed in: {email}");
            let jar = session::sign_in(
                jar,
                Realm::Admin,
                login.token,
                &login.user,
                state.config.secure_cookies,
            );
            Ok((jar, Redirect::to("/admin")).into_response())
        }
        Ok(_) => {
            tracing::warn!("Non-admin account attempted admin sign-in: {email}");
            page("Access denied".to_string())
        }
        Err(e) => page(e.notice_or("Login failed")),
    }
}

pub async fn admin_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session::token(&jar, Realm::Admin) {
        state.sessions.forget_admin(&token);
    }
    let jar = session::sign_out(jar, Realm::Admin);
    (jar, Redirect::to(Realm::Admin.entry_path())).into_response()
}
