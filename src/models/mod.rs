pub use draft::*;
pub use product::*;
pub use session::*;

mod draft;
mod product;
mod session;
