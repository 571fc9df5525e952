//! In-memory store behind the fake API.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use rand::distr::Alphanumeric;
use serverest_core::{
    AdminFlag, Cart, CartId, CartItem, DEFAULT_USER_ID, Price, Product, ProductId, User, UserId,
};
use tokio::sync::Mutex;
use uuid::Uuid;

const ID_LENGTH: usize = 16;

/// Shared handle to the store; cheap to clone.
#[derive(Clone)]
pub struct FakeState {
    inner: Arc<Mutex<Store>>,
}

impl FakeState {
    /// State holding the data the real API ships with.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::from_store(Store::with_defaults())
    }

    #[must_use]
    pub fn from_store(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Store> {
        self.inner.lock().await
    }
}

/// Users, products, carts and issued tokens.
#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub carts: Vec<Cart>,
    tokens: HashMap<String, UserId>,
}

impl Store {
    /// One admin user, two products and a cart of that user.
    #[must_use]
    pub fn with_defaults() -> Self {
        let user = User {
            id: UserId::new(DEFAULT_USER_ID),
            name: "Fulano da Silva".to_string(),
            email: "fulano@qa.com".to_string(),
            password: "teste".to_string(),
            admin: AdminFlag::Admin,
        };

        let mouse = Product {
            id: ProductId::new("BeeJh5lz3k6kSIzA"),
            name: "Logitech MX Vertical".to_string(),
            price: Price::new(470),
            description: "Mouse".to_string(),
            quantity: 382,
        };
        let tv = Product {
            id: ProductId::new("K6leHdftCeOJj8BJ"),
            name: "Samsung 60 polegadas".to_string(),
            price: Price::new(5240),
            description: "TV".to_string(),
            quantity: 49977,
        };

        let items = vec![line(&mouse, 1), line(&tv, 2)];
        let cart = Cart {
            id: CartId::new("qbMqntef4iTOwWfg"),
            total_price: total_price(&items),
            total_quantity: total_quantity(&items),
            products: items,
            user_id: user.id.clone(),
        };

        Self {
            users: vec![user],
            products: vec![mouse, tv],
            carts: vec![cart],
            tokens: HashMap::new(),
        }
    }

    /// Issue a token for `user`, as sent back in `authorization`.
    pub fn issue_token(&mut self, user: &UserId) -> String {
        let token = format!("Bearer {}", Uuid::new_v4());
        self.tokens.insert(token.clone(), user.clone());
        token
    }

    /// The user a token was issued to, if it still exists.
    #[must_use]
    pub fn token_user(&self, token: &str) -> Option<&User> {
        let id = self.tokens.get(token)?;
        self.user(id)
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    #[must_use]
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|user| user.email == email)
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    #[must_use]
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }

    #[must_use]
    pub fn cart(&self, id: &CartId) -> Option<&Cart> {
        self.carts.iter().find(|cart| &cart.id == id)
    }

    #[must_use]
    pub fn cart_of(&self, user: &UserId) -> Option<&Cart> {
        self.carts.iter().find(|cart| &cart.user_id == user)
    }

    /// Ids of every cart referencing `product`.
    #[must_use]
    pub fn carts_with(&self, product: &ProductId) -> Vec<CartId> {
        self.carts
            .iter()
            .filter(|cart| cart.contains(product))
            .map(|cart| cart.id.clone())
            .collect()
    }

    /// Remove the cart of `user`, returning it.
    pub fn take_cart_of(&mut self, user: &UserId) -> Option<Cart> {
        let index = self.carts.iter().position(|cart| &cart.user_id == user)?;
        Some(self.carts.remove(index))
    }

    /// Put the items of a canceled cart back in stock.
    pub fn restock(&mut self, cart: &Cart) {
        for item in &cart.products {
            if let Some(product) = self
                .products
                .iter_mut()
                .find(|product| product.id == item.product_id)
            {
                product.quantity = product.quantity.saturating_add(item.quantity);
            }
        }
    }
}

/// Fresh random identifier, same shape as the real API's.
#[must_use]
pub fn new_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Cart line for `quantity` units of `product`, priced at its current price.
#[must_use]
pub fn line(product: &Product, quantity: u64) -> CartItem {
    CartItem {
        product_id: product.id.clone(),
        quantity,
        unit_price: Some(product.price),
    }
}

#[must_use]
pub fn total_price(items: &[CartItem]) -> Price {
    items
        .iter()
        .map(|item| item.unit_price.unwrap_or_default().times(item.quantity))
        .sum()
}

#[must_use]
pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|item| item.quantity).sum()
}
