//! Fixed initial dataset written when a collection is first touched.

use slooze_core::{ProductId, Role};

use super::{Collection, StoreError};
use crate::models::{Product, ProductFields, User};

/// Records written into empty collections by seeding and by reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    /// Initial `users` collection.
    pub users: Vec<User>,
    /// Initial `products` collection.
    pub products: Vec<Product>,
}

impl SeedData {
    /// Seed with no records at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            users: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Serialized seed value for one collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if encoding fails.
    pub fn json_for(&self, collection: Collection) -> Result<String, StoreError> {
        let json = match collection {
            Collection::Users => serde_json::to_string(&self.users)?,
            Collection::Products => serde_json::to_string(&self.products)?,
        };
        Ok(json)
    }
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            users: initial_users(),
            products: initial_products(),
        }
    }
}

fn initial_users() -> Vec<User> {
    vec![
        User::new("manager@slooze.xyz", "Manager@123", "Maya Manager", Role::Manager),
        User::new("admin@slooze.xyz", "Admin@123", "Arjun Admin", Role::Admin),
        User::new("keeper@slooze.xyz", "Keeper@123", "Kavin Keeper", Role::User),
    ]
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    quantity: i64,
    weight: f64,
    price: f64,
) -> Product {
    Product::new(
        ProductId::new(id),
        ProductFields {
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            weight,
            price,
            description: None,
        },
    )
}

fn initial_products() -> Vec<Product> {
    vec![
        product("a1b2", "Basmati Rice", "Grocery", 120, 5.0, 12.5),
        product("c3d4", "Olive Oil", "Grocery", 64, 1.0, 9.99),
        product("e5f6", "Desk Lamp", "Home", 35, 1.4, 24.0),
        product("0789", "Office Chair", "Furniture", 12, 14.5, 149.0),
        product("1a2b", "Notebook A5", "Stationery", 300, 0.3, 3.25),
        product("3c4d", "Wireless Mouse", "Electronics", 48, 0.1, 19.99),
        product("5e6f", "Steel Bottle", "Kitchen", 80, 0.4, 14.0),
        product("7a8b", "Cotton Towel", "Home", 150, 0.6, 7.5),
    ]
}
