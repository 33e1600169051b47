use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, post, web};
use std::time::Duration;

use boavila::views::{Dashboard, LoginOutcome, LoginView, ROOT_PATH, RootController};

use crate::web::forms::LoginForm;
use crate::web::helpers::{
    SESSION_COOKIE, client_ip, removal_cookie, render, render_with_status, session_cookie,
    session_from,
};
use crate::web::state::AppState;
use crate::web::templates::LoginTemplate;

const LOGIN_ATTEMPTS: usize = 5;
const LOGIN_WINDOW: Duration = Duration::from_secs(300);

#[post("/login")]
pub async fn login_submit(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let mut view = LoginView::new(form.email.trim(), form.password.as_str());

    if !state.rate_limiter.check_rate_limit(
        &format!("login:{}", client_ip(&req)),
        LOGIN_ATTEMPTS,
        LOGIN_WINDOW,
    ) {
        view.reject("Demasiados intentos. Inténtalo de nuevo más tarde.");
        return render_with_status(StatusCode::TOO_MANY_REQUESTS, LoginTemplate::new(&view));
    }

    let client = state.clients.connect(None);
    let mut controller = RootController::new(true);

    let outcome = view
        .submit(client.as_ref(), || controller.on_login_success())
        .await;
    if outcome != LoginOutcome::SignedIn {
        return render(LoginTemplate::new(&view));
    }

    let session = match client.get_session().await {
        Ok(Some(session)) => session,
        Ok(None) => {
            view.reject("Error al iniciar sesión");
            return render(LoginTemplate::new(&view));
        }
        Err(e) => {
            log::error!("Session lookup after sign-in failed: {}", e);
            view.reject(e.to_string());
            return render(LoginTemplate::new(&view));
        }
    };

    log::info!("Admin signed in, next screen {:?}", controller.screen());

    HttpResponse::SeeOther()
        .cookie(session_cookie(&session, state.cookie_secure))
        .insert_header(("Location", ROOT_PATH))
        .finish()
}

#[post("/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let client = state.clients.connect(session_from(&req));
    let mut controller = RootController::new(false);

    Dashboard::default()
        .logout(client.as_ref(), || controller.on_logout())
        .await;
    log::info!("Admin signed out, next screen {:?}", controller.screen());

    HttpResponse::SeeOther()
        .cookie(removal_cookie(SESSION_COOKIE, state.cookie_secure))
        .insert_header(("Location", ROOT_PATH))
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_submit).service(logout);
}
