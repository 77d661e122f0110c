//! Record types persisted by the catalog and carried in sessions.

pub mod product;
pub mod session;
pub mod user;

pub use product::{Product, ProductFields};
pub use session::{Identity, session_keys};
pub use user::User;
