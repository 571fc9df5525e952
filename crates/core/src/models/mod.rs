//! Wire payloads exchanged with the API.
//!
//! Rust field names are English; serde renames map them onto the
//! Portuguese keys the server uses (`nome`, `preco`, `idProduto`, ...).

pub mod cart;
pub mod login;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, ItemDescriptor, NewCart};
pub use login::{Credentials, LoginResponse};
pub use product::{NewProduct, Product};
pub use user::{NewUser, User};

/// A collection exposed by the API.
///
/// Listing a collection returns `{"quantidade": n, "<key>": [...]}`; the
/// key and route differ per resource.
pub trait Resource {
    /// Route of the collection, e.g. `/usuarios`.
    const PATH: &'static str;
    /// Key of the array in a list response, e.g. `usuarios`.
    const COLLECTION: &'static str;
}

impl Resource for User {
    const PATH: &'static str = "/usuarios";
    const COLLECTION: &'static str = "usuarios";
}

impl Resource for Product {
    const PATH: &'static str = "/produtos";
    const COLLECTION: &'static str = "produtos";
}

impl Resource for Cart {
    const PATH: &'static str = "/carrinhos";
    const COLLECTION: &'static str = "carrinhos";
}
