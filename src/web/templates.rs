use askama::Template;
use chrono::{Datelike, Utc};

use boavila::models::{Product, ProductDraft};
use boavila::views::{
    BRAND, CONTACT_EMAIL, Dashboard, Grid, INSTAGRAM_HANDLE, INSTAGRAM_URL, LoginView, Mode,
    PROCESS_STEPS, PublicSite, Section, VALUES,
};

pub struct NavLink {
    pub id: &'static str,
    pub label: &'static str,
}

pub struct Step {
    pub number: usize,
    pub name: &'static str,
    pub description: &'static str,
}

pub struct ProductCard {
    pub title: String,
    pub description: String,
    pub has_image: bool,
    pub image_url: String,
    pub has_instagram: bool,
    pub instagram_link: String,
    pub hovered: bool,
}

#[derive(Template)]
#[template(path = "public/index.html")]
pub struct PublicSiteTemplate {
    pub brand: &'static str,
    pub nav: Vec<NavLink>,
    pub menu_open: bool,
    pub loading: bool,
    pub cards: Vec<ProductCard>,
    pub values: Vec<&'static str>,
    pub steps: Vec<Step>,
    pub instagram_url: &'static str,
    pub instagram_handle: &'static str,
    pub contact_email: &'static str,
    pub year: i32,
}

impl PublicSiteTemplate {
    pub fn new(site: &PublicSite) -> Self {
        let (loading, cards) = match site.grid() {
            Grid::Loading => (true, Vec::new()),
            Grid::Empty => (false, Vec::new()),
            Grid::Products(products) => (
                false,
                products
                    .iter()
                    .map(|p| ProductCard {
                        title: p.title.clone(),
                        description: p.description.clone(),
                        has_image: p.image().is_some(),
                        image_url: p.image().unwrap_or_default().to_string(),
                        has_instagram: p.instagram().is_some(),
                        instagram_link: p.instagram().unwrap_or_default().to_string(),
                        hovered: site.call_to_action(p).is_some(),
                    })
                    .collect(),
            ),
        };

        Self {
            brand: BRAND,
            nav: Section::NAV
                .iter()
                .map(|s| NavLink {
                    id: s.id(),
                    label: s.label(),
                })
                .collect(),
            menu_open: site.is_menu_open(),
            loading,
            cards,
            values: VALUES.to_vec(),
            steps: PROCESS_STEPS
                .iter()
                .enumerate()
                .map(|(i, &(name, description))| Step {
                    number: i + 1,
                    name,
                    description,
                })
                .collect(),
            instagram_url: INSTAGRAM_URL,
            instagram_handle: INSTAGRAM_HANDLE,
            contact_email: CONTACT_EMAIL,
            year: Utc::now().year(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub brand: &'static str,
    pub email: String,
    pub error: String,
    pub loading: bool,
}

impl LoginTemplate {
    pub fn new(view: &LoginView) -> Self {
        Self {
            brand: BRAND,
            email: view.email.clone(),
            error: view.error().unwrap_or_default().to_string(),
            loading: view.is_loading(),
        }
    }
}

/// Values bound to the shared form fields.
pub struct DraftFields {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub instagram_link: String,
    pub order_position: i32,
}

impl From<&ProductDraft> for DraftFields {
    fn from(draft: &ProductDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            image_url: draft.image_url.clone(),
            instagram_link: draft.instagram_link.clone(),
            order_position: draft.order_position,
        }
    }
}

pub struct AdminRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub has_image: bool,
    pub image_url: String,
    pub has_instagram: bool,
    pub instagram_link: String,
    pub order_position: i32,
    pub editing: bool,
}

impl AdminRow {
    fn new(product: &Product, mode: Mode) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            has_image: product.image().is_some(),
            image_url: product.image().unwrap_or_default().to_string(),
            has_instagram: product.instagram().is_some(),
            instagram_link: product.instagram().unwrap_or_default().to_string(),
            order_position: product.order_position,
            editing: mode == Mode::Editing(product.id),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub brand: &'static str,
    pub rows: Vec<AdminRow>,
    pub creating: bool,
    pub draft: DraftFields,
    pub error: String,
    pub empty_state: bool,
    pub pending_delete: bool,
    pub pending_id: String,
    pub pending_title: String,
}

impl DashboardTemplate {
    pub fn new(dashboard: &Dashboard) -> Self {
        let mode = dashboard.mode();
        let pending = dashboard.pending_delete();

        Self {
            brand: BRAND,
            rows: dashboard
                .products()
                .iter()
                .map(|p| AdminRow::new(p, mode))
                .collect(),
            creating: mode == Mode::Creating,
            draft: DraftFields::from(dashboard.draft()),
            error: dashboard.error().unwrap_or_default().to_string(),
            empty_state: dashboard.is_empty_state(),
            pending_delete: pending.is_some(),
            pending_id: pending.map(|p| p.id.to_string()).unwrap_or_default(),
            pending_title: pending.map(|p| p.title.clone()).unwrap_or_default(),
        }
    }
}
