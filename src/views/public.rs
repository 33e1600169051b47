use crate::client::CatalogClient;
use crate::log_err;
use crate::models::{OrderBy, Product, ProductId};

pub const BRAND: &str = "Boa Vila Design";
pub const INSTAGRAM_HANDLE: &str = "@boaviladesign";
pub const INSTAGRAM_URL: &str = "https://instagram.com/boaviladesign";
pub const CONTACT_EMAIL: &str = "contacto@boaviladesign.com";

/// Steps of the "Proceso Artesanal" block: (name, description).
pub const PROCESS_STEPS: [(&str, &str); 3] = [
    ("Diseño", "Conceptualización única de cada pieza"),
    ("Elaboración", "Trabajo manual y dedicado"),
    ("Acabado", "Control de calidad exhaustivo"),
];

pub const VALUES: [&str; 4] = [
    "Artesanía de calidad",
    "Diseño contemporáneo",
    "Materiales seleccionados",
    "Sostenibilidad",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Collection,
    About,
    Contact,
}

impl Section {
    pub const NAV: [Section; 3] = [Section::Collection, Section::About, Section::Contact];

    /// Element id of the section on the page.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Collection => "coleccion",
            Section::About => "sobre",
            Section::Contact => "contacto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Collection => "Colección",
            Section::About => "Sobre",
            Section::Contact => "Contacto",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::NAV.into_iter().find(|s| s.id() == id)
    }
}

/// What the collection block shows.
#[derive(Debug, PartialEq)]
pub enum Grid<'a> {
    Loading,
    Products(&'a [Product]),
    Empty,
}

/// Read-only landing page state.
#[derive(Debug)]
pub struct PublicSite {
    loading: bool,
    products: Vec<Product>,
    hovered: Option<ProductId>,
    menu_open: bool,
    load_error: Option<String>,
}

impl Default for PublicSite {
    fn default() -> Self {
        Self {
            loading: true,
            products: Vec::new(),
            hovered: None,
            menu_open: false,
            load_error: None,
        }
    }
}

impl PublicSite {
    /// Fetches the catalog. A failure is logged and leaves an empty grid.
    pub async fn load(&mut self, client: &dyn CatalogClient) {
        match client.list_products(OrderBy::POSITION).await {
            Ok(mut products) => {
                OrderBy::POSITION.sort(&mut products);
                self.products = products;
                self.load_error = None;
            }
            Err(e) => {
                log_err!("loading products", e);
                self.products.clear();
                self.load_error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Message of the last failed load. The grid itself just shows empty.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn grid(&self) -> Grid<'_> {
        if self.loading {
            Grid::Loading
        } else if self.products.is_empty() {
            Grid::Empty
        } else {
            Grid::Products(&self.products)
        }
    }

    pub fn hover(&mut self, id: ProductId) {
        self.hovered = Some(id);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn is_hovered(&self, id: ProductId) -> bool {
        self.hovered == Some(id)
    }

    /// Instagram link shown under a card while it is hovered.
    pub fn call_to_action<'a>(&self, product: &'a Product) -> Option<&'a str> {
        if self.is_hovered(product.id) {
            product.instagram()
        } else {
            None
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Closes the mobile menu and returns the anchor to scroll to.
    pub fn navigate(&mut self, section: Section) -> &'static str {
        self.menu_open = false;
        section.id()
    }
}
