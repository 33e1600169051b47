use actix_web::{HttpRequest, HttpResponse, get, web};

use boavila::views::{
    Dashboard, LoginView, Navigation, PublicSite, ROOT_PATH, RootController, Screen, Section,
};

use crate::web::forms::RootQuery;
use crate::web::helpers::{
    ADMIN_LOGIN_COOKIE, admin_login_cookie, clear_admin_login, render, see_other, session_from,
    sync_session_cookie,
};
use crate::web::state::AppState;
use crate::web::templates::{DashboardTemplate, LoginTemplate, PublicSiteTemplate};

/// Reserved entry point: swaps the location for `/` (a 303 adds no history
/// entry) and remembers that the login should be shown there.
#[get("/admin")]
pub async fn admin_entry(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let mut controller = RootController::default();

    match controller.route(req.path()) {
        Navigation::Replace(target) => HttpResponse::SeeOther()
            .cookie(admin_login_cookie(state.cookie_secure))
            .insert_header(("Location", target))
            .finish(),
        Navigation::Stay => see_other(ROOT_PATH),
    }
}

#[get("/")]
pub async fn index(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<RootQuery>,
) -> HttpResponse {
    let show_admin_login = req.cookie(ADMIN_LOGIN_COOKIE).is_some();
    let cookie_session = session_from(&req);
    let client = state.clients.connect(cookie_session.clone());

    let mut controller = RootController::new(show_admin_login);
    controller.mount(client.as_ref(), req.path()).await;

    let mut resp = match controller.screen() {
        Screen::AdminLogin => render(LoginTemplate::new(&LoginView::default())),
        Screen::Dashboard => dashboard_page(Dashboard::from_site(controller.site()), &query),
        Screen::PublicSite => public_page(controller.site_mut(), &query),
    };

    if show_admin_login {
        clear_admin_login(&mut resp, state.cookie_secure);
    }
    if !controller.session_unknown() {
        sync_session_cookie(
            &mut resp,
            cookie_session.as_ref(),
            controller.session(),
            state.cookie_secure,
        );
    }
    resp
}

fn public_page(site: &mut PublicSite, query: &RootQuery) -> HttpResponse {
    if let Some(section) = query.go.as_deref().and_then(Section::from_id) {
        let anchor = site.navigate(section);
        return see_other(&format!("{ROOT_PATH}#{anchor}"));
    }

    if query.menu_open() {
        site.toggle_menu();
    }

    render(PublicSiteTemplate::new(site))
}

fn dashboard_page(mut dashboard: Dashboard, query: &RootQuery) -> HttpResponse {
    if query.creating() {
        dashboard.start_create();
    } else if let Some(id) = query.edit_id() {
        dashboard.start_edit(id);
    } else if let Some(id) = query.delete_id() {
        dashboard.request_delete(id);
    }

    render(DashboardTemplate::new(&dashboard))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(admin_entry);
}
