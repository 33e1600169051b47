use serde::Deserialize;
use uuid::Uuid;

use boavila::models::ProductDraft;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Fields of the shared product form.
#[derive(Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub instagram_link: String,
    #[serde(default)]
    pub order_position: String,
}

impl ProductForm {
    pub fn apply(&self, draft: &mut ProductDraft) {
        draft.title = self.title.clone();
        draft.description = self.description.clone();
        draft.image_url = self.image_url.clone();
        draft.instagram_link = self.instagram_link.clone();
        draft.set_order_position(&self.order_position);
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("true")
    }
}

/// Query string of `/`.
#[derive(Deserialize, Default)]
pub struct RootQuery {
    pub menu: Option<String>,
    pub go: Option<String>,
    pub mode: Option<String>,
    pub edit: Option<String>,
    pub delete: Option<String>,
}

impl RootQuery {
    pub fn menu_open(&self) -> bool {
        self.menu.as_deref() == Some("open")
    }

    pub fn creating(&self) -> bool {
        self.mode.as_deref() == Some("new")
    }

    pub fn edit_id(&self) -> Option<Uuid> {
        self.edit.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }

    pub fn delete_id(&self) -> Option<Uuid> {
        self.delete.as_deref().and_then(|s| Uuid::parse_str(s).ok())
    }
}
