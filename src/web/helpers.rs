use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use askama::Template;

use boavila::models::Session;

pub const SESSION_COOKIE: &str = "bv_session";
pub const ADMIN_LOGIN_COOKIE: &str = "bv_admin_login";

pub fn render<T: Template>(t: T) -> HttpResponse {
    render_with_status(StatusCode::OK, t)
}

pub fn render_with_status<T: Template>(status: StatusCode, t: T) -> HttpResponse {
    match t.render() {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Template error: {}", e);
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Template error: {e}"))
        }
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Session carried by the request cookie, if it decodes.
pub fn session_from(req: &HttpRequest) -> Option<Session> {
    req.cookie(SESSION_COOKIE)
        .and_then(|c| Session::decode(c.value().trim()))
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(SESSION_COOKIE, session.encode(), secure);
    cookie.set_max_age(actix_web::cookie::time::Duration::days(7));
    cookie
}

/// One-shot marker surviving the `/admin` redirect.
pub fn admin_login_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(ADMIN_LOGIN_COOKIE, "1".to_string(), secure);
    cookie.set_max_age(actix_web::cookie::time::Duration::minutes(5));
    cookie
}

pub fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(name, String::new(), secure);
    cookie.make_removal();
    cookie
}

fn add_cookie(resp: &mut HttpResponse, cookie: &Cookie<'_>) {
    if let Err(e) = resp.add_cookie(cookie) {
        log::error!("Failed to set cookie {}: {}", cookie.name(), e);
    }
}

/// Brings the session cookie in line with the session the client ended up
/// with (refreshed, dropped, or unchanged).
pub fn sync_session_cookie(
    resp: &mut HttpResponse,
    before: Option<&Session>,
    after: Option<&Session>,
    secure: bool,
) {
    match (before, after) {
        (_, Some(now)) if before != Some(now) => {
            add_cookie(resp, &session_cookie(now, secure));
        }
        (Some(_), None) => {
            add_cookie(resp, &removal_cookie(SESSION_COOKIE, secure));
        }
        _ => {}
    }
}

pub fn clear_admin_login(resp: &mut HttpResponse, secure: bool) {
    add_cookie(resp, &removal_cookie(ADMIN_LOGIN_COOKIE, secure));
}
