use actix_web::{HttpRequest, HttpResponse, post, web};
use uuid::Uuid;

use boavila::client::CatalogClient;
use boavila::models::Session;
use boavila::views::{Dashboard, DeleteOutcome, ROOT_PATH, SaveOutcome};

use crate::web::forms::{DeleteForm, ProductForm};
use crate::web::helpers::{render, see_other, session_from, sync_session_cookie};
use crate::web::state::AppState;
use crate::web::templates::DashboardTemplate;

/// Client for a signed-in visitor plus the cookie session it came with.
/// Anyone else is sent back to the public site.
async fn require_session(
    state: &AppState,
    req: &HttpRequest,
) -> Result<(Box<dyn CatalogClient>, Option<Session>), HttpResponse> {
    let cookie_session = session_from(req);
    let client = state.clients.connect(cookie_session.clone());

    match client.get_session().await {
        Ok(Some(_)) => Ok((client, cookie_session)),
        Ok(None) => Err(see_other(ROOT_PATH)),
        Err(e) => {
            log::error!("Session check failed: {}", e);
            Err(see_other(ROOT_PATH))
        }
    }
}

async fn finish(
    state: &AppState,
    client: &dyn CatalogClient,
    before: Option<&Session>,
    mut resp: HttpResponse,
) -> HttpResponse {
    match client.get_session().await {
        Ok(after) => sync_session_cookie(&mut resp, before, after.as_ref(), state.cookie_secure),
        // An unanswered check leaves the cookie alone.
        Err(e) => log::error!("Session check after write failed: {}", e),
    }
    resp
}

async fn save_response(dashboard: &mut Dashboard, client: &dyn CatalogClient) -> HttpResponse {
    match dashboard.save(client).await {
        SaveOutcome::Saved => see_other(ROOT_PATH),
        SaveOutcome::Invalid | SaveOutcome::Failed => render(DashboardTemplate::new(dashboard)),
    }
}

#[post("/products")]
pub async fn create_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<ProductForm>,
) -> HttpResponse {
    let (client, before) = match require_session(&state, &req).await {
        Ok(found) => found,
        Err(resp) => return resp,
    };

    let mut dashboard = Dashboard::default();
    dashboard.load(client.as_ref()).await;
    dashboard.start_create();
    form.apply(dashboard.draft_mut());

    let resp = save_response(&mut dashboard, client.as_ref()).await;
    finish(&state, client.as_ref(), before.as_ref(), resp).await
}

#[post("/products/{id}")]
pub async fn update_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<ProductForm>,
) -> HttpResponse {
    let (client, before) = match require_session(&state, &req).await {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let id = path.into_inner();

    let mut dashboard = Dashboard::default();
    dashboard.load(client.as_ref()).await;

    let resp = if dashboard.start_edit(id) {
        form.apply(dashboard.draft_mut());
        save_response(&mut dashboard, client.as_ref()).await
    } else {
        render(DashboardTemplate::new(&dashboard))
    };
    finish(&state, client.as_ref(), before.as_ref(), resp).await
}

#[post("/products/{id}/delete")]
pub async fn delete_product(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    form: web::Form<DeleteForm>,
) -> HttpResponse {
    let (client, before) = match require_session(&state, &req).await {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let id = path.into_inner();

    let mut dashboard = Dashboard::default();
    dashboard.load(client.as_ref()).await;

    let resp = match dashboard
        .delete(client.as_ref(), id, form.is_confirmed())
        .await
    {
        DeleteOutcome::Deleted | DeleteOutcome::Declined => see_other(ROOT_PATH),
        DeleteOutcome::Failed => render(DashboardTemplate::new(&dashboard)),
    };
    finish(&state, client.as_ref(), before.as_ref(), resp).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_product)
        .service(update_product)
        .service(delete_product);
}
