//! Scenario fixtures.
//!
//! Each resource suite has one JSON file: `user.json`, `login.json`,
//! `produtos.json` and `cart.json`. Valid payloads are typed; payloads
//! that exist to be rejected by the API stay raw [`Value`]s so they can
//! carry wrong types and missing fields.
//!
//! The files are bundled into the crate. Setting `SERVEREST_FIXTURES_DIR`
//! (see [`ClientConfig`]) reads them from a directory instead.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use serverest_client::ClientConfig;
use serverest_core::{Credentials, ItemDescriptor, NewProduct, NewUser};

use crate::error::FixtureError;

const USER_FILE: &str = "user.json";
const LOGIN_FILE: &str = "login.json";
const PRODUCTS_FILE: &str = "produtos.json";
const CART_FILE: &str = "cart.json";

const BUNDLED_USER: &str = include_str!("../fixtures/user.json");
const BUNDLED_LOGIN: &str = include_str!("../fixtures/login.json");
const BUNDLED_PRODUCTS: &str = include_str!("../fixtures/produtos.json");
const BUNDLED_CART: &str = include_str!("../fixtures/cart.json");

/// Every fixture file, parsed.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub users: UserFixtures,
    pub login: LoginFixtures,
    pub products: ProductFixtures,
    pub carts: CartFixtures,
}

/// A pair of values keyed by role.
#[derive(Debug, Clone, Deserialize)]
pub struct Roles<T> {
    pub admin: T,
    pub not_admin: T,
}

/// A user owning a cart of one product.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedCart {
    pub user: NewUser,
    pub product: NewProduct,
    pub items: Vec<ItemDescriptor>,
}

/// A user and the items of the cart they open.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCart {
    pub user: NewUser,
    pub items: Vec<ItemDescriptor>,
}

/// Entity edited in place, then checked for the new values.
#[derive(Debug, Clone, Deserialize)]
pub struct EditSuccess<T> {
    pub original: T,
    pub updated: T,
}

/// Updates aimed at an id that does not exist.
#[derive(Debug, Clone, Deserialize)]
pub struct EditNotFound<T> {
    /// Upserted through the unknown id.
    pub created: T,
    /// Created first so the upsert collides with it.
    pub duplicated: T,
}

/// Entity that exists plus updates the API must reject.
#[derive(Debug, Clone, Deserialize)]
pub struct EditFail<T> {
    pub original: T,
    pub invalid: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditFixtures<T> {
    pub success: EditSuccess<T>,
    pub not_found: EditNotFound<T>,
    pub fail: EditFail<T>,
}

// ---------------------------------------------------------------------------
// user.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct UserFixtures {
    pub list: UserList,
    pub create: UserCreate,
    pub edit: EditFixtures<NewUser>,
    pub delete: UserDelete,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserList {
    pub data: Vec<NewUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub success: Roles<NewUser>,
    pub duplicated: NewUser,
    pub invalid: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDelete {
    pub success: NewUser,
    pub fail: UserDeleteFail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDeleteFail {
    /// Owner of an open cart; must be an admin to create its own product.
    pub has_cart: OwnedCart,
}

// ---------------------------------------------------------------------------
// login.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginFixtures {
    pub data: Roles<NewUser>,
    pub success: Roles<Credentials>,
    /// Registered email with the wrong password.
    pub fail: Credentials,
    pub invalid: Vec<Value>,
}

// ---------------------------------------------------------------------------
// produtos.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ProductFixtures {
    /// An admin and a regular user, in that order.
    pub users: Vec<NewUser>,
    pub login: Roles<Credentials>,
    pub list: Vec<NewProduct>,
    pub create: ProductCreate,
    pub edit: EditFixtures<NewProduct>,
    pub delete: NewProduct,
    /// Product referenced by an open cart, so deletion is refused.
    pub in_cart: OwnedCart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub success: NewProduct,
    pub duplicated: NewProduct,
    pub invalid: Vec<Value>,
}

// ---------------------------------------------------------------------------
// cart.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CartFixtures {
    /// Creates the products cart scenarios buy.
    pub admin: NewUser,
    pub create: CartCreate,
    pub list: CartList,
    pub delete: CartDelete,
    /// Stock bookkeeping across create and cancel.
    pub stock: OwnedCart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartCreate {
    pub success: CartCase,
    pub duplicated_cart: CartCase,
    pub duplicated_product: CartCase,
    pub insufficient_product: CartCase,
    pub inexistent_product: RawCartCase,
    pub fail: RawCartCase,
}

/// Products to create and the cart a user opens with them.
#[derive(Debug, Clone, Deserialize)]
pub struct CartCase {
    pub data: CartCaseData,
    pub items: Vec<ItemDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartCaseData {
    pub user: NewUser,
    pub products: Vec<NewProduct>,
}

/// A user and a cart body submitted as is.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCartCase {
    pub data: CartOwner,
    pub cart: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartOwner {
    pub user: NewUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartList {
    pub data: CartListData,
    /// Fixture carts listed without a filter, default cart excluded.
    pub all: Expected,
    pub filtered: CartFilters,
    pub find: FindParam,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartListData {
    pub products: Vec<NewProduct>,
    pub carts: Vec<UserCart>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Expected {
    pub quantity: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartFilters {
    pub success: ParamCases,
    pub not_found: ParamCases,
    pub fail: FilterFailure,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParamCases {
    pub params: Vec<ParamCase>,
}

/// A query filter and how many carts it should match.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamCase {
    pub input: Value,
    pub output: Expected,
}

/// A malformed filter and the field messages it produces.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterFailure {
    pub params: Value,
    pub output: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindParam {
    pub param: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartDelete {
    pub cancel: CartSetup,
    pub finish: CartSetup,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartSetup {
    pub products: Vec<NewProduct>,
    pub cart: UserCart,
}

impl Fixtures {
    /// Fixtures compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError::Parse` if a bundled file is malformed.
    pub fn bundled() -> Result<Self, FixtureError> {
        Ok(Self {
            users: parse(USER_FILE, BUNDLED_USER)?,
            login: parse(LOGIN_FILE, BUNDLED_LOGIN)?,
            products: parse(PRODUCTS_FILE, BUNDLED_PRODUCTS)?,
            carts: parse(CART_FILE, BUNDLED_CART)?,
        })
    }

    /// Read every fixture file from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if a file is missing or malformed.
    pub fn load(dir: &Path) -> Result<Self, FixtureError> {
        Ok(Self {
            users: read(dir, USER_FILE)?,
            login: read(dir, LOGIN_FILE)?,
            products: read(dir, PRODUCTS_FILE)?,
            carts: read(dir, CART_FILE)?,
        })
    }

    /// Fixtures from the configured directory, or the bundled ones.
    ///
    /// # Errors
    ///
    /// Returns `FixtureError` if the fixtures cannot be read or parsed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FixtureError> {
        match &config.fixtures_dir {
            Some(dir) => Self::load(dir),
            None => Self::bundled(),
        }
    }

    /// Every user any fixture file declares, first occurrence per email.
    #[must_use]
    pub fn all_users(&self) -> Vec<&NewUser> {
        let users = &self.users;
        let products = &self.products;
        let carts = &self.carts;

        let declared = users
            .list
            .data
            .iter()
            .chain([
                &users.create.success.admin,
                &users.create.success.not_admin,
                &users.create.duplicated,
                &users.edit.success.original,
                &users.edit.success.updated,
                &users.edit.not_found.created,
                &users.edit.not_found.duplicated,
                &users.edit.fail.original,
                &users.delete.success,
                &users.delete.fail.has_cart.user,
                &self.login.data.admin,
                &self.login.data.not_admin,
            ])
            .chain(&products.users)
            .chain([
                &products.in_cart.user,
                &carts.admin,
                &carts.create.success.data.user,
                &carts.create.duplicated_cart.data.user,
                &carts.create.duplicated_product.data.user,
                &carts.create.insufficient_product.data.user,
                &carts.create.inexistent_product.data.user,
                &carts.create.fail.data.user,
            ])
            .chain(carts.list.data.carts.iter().map(|cart| &cart.user))
            .chain([
                &carts.delete.cancel.cart.user,
                &carts.delete.finish.cart.user,
                &carts.stock.user,
            ]);

        let mut seen = HashSet::new();
        declared
            .filter(|user| seen.insert(user.email.clone()))
            .collect()
    }

    /// Every product any fixture file declares, first occurrence per name.
    #[must_use]
    pub fn all_products(&self) -> Vec<&NewProduct> {
        let products = &self.products;
        let carts = &self.carts;

        let declared = products
            .list
            .iter()
            .chain([
                &products.create.success,
                &products.create.duplicated,
                &products.edit.success.original,
                &products.edit.success.updated,
                &products.edit.not_found.created,
                &products.edit.not_found.duplicated,
                &products.edit.fail.original,
                &products.delete,
                &products.in_cart.product,
                &self.users.delete.fail.has_cart.product,
                &carts.stock.product,
            ])
            .chain(&carts.create.success.data.products)
            .chain(&carts.create.duplicated_cart.data.products)
            .chain(&carts.create.duplicated_product.data.products)
            .chain(&carts.create.insufficient_product.data.products)
            .chain(&carts.list.data.products)
            .chain(&carts.delete.cancel.products)
            .chain(&carts.delete.finish.products);

        let mut seen = HashSet::new();
        declared
            .filter(|product| seen.insert(product.name.clone()))
            .collect()
    }
}

fn parse<T: DeserializeOwned>(name: &'static str, content: &str) -> Result<T, FixtureError> {
    serde_json::from_str(content).map_err(|source| FixtureError::Parse { name, source })
}

fn read<T: DeserializeOwned>(dir: &Path, name: &'static str) -> Result<T, FixtureError> {
    let path = dir.join(name);
    let content =
        std::fs::read_to_string(&path).map_err(|source| FixtureError::Read { path, source })?;
    parse(name, &content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serverest_core::{AdminFlag, Email};

    use super::*;

    #[test]
    fn test_bundled_fixtures_parse() {
        let fixtures = Fixtures::bundled().unwrap();
        assert_eq!(fixtures.users.list.data.len(), 3);
        assert_eq!(fixtures.carts.list.all.quantity, 2);
        assert!(!fixtures.login.invalid.is_empty());
    }

    #[test]
    fn test_declared_emails_are_valid() {
        let fixtures = Fixtures::bundled().unwrap();
        for user in fixtures.all_users() {
            assert!(Email::parse(&user.email).is_ok(), "{}", user.email);
        }
    }

    #[test]
    fn test_all_users_is_deduplicated() {
        let fixtures = Fixtures::bundled().unwrap();
        let users = fixtures.all_users();
        let emails: HashSet<_> = users.iter().map(|user| &user.email).collect();
        assert_eq!(emails.len(), users.len());
        assert!(users.iter().any(|user| user.email == fixtures.carts.admin.email));
    }

    #[test]
    fn test_product_owners_are_admins() {
        let fixtures = Fixtures::bundled().unwrap();
        assert_eq!(fixtures.carts.admin.admin, AdminFlag::Admin);
        assert_eq!(fixtures.products.users[0].admin, AdminFlag::Admin);
        assert_eq!(
            fixtures.users.delete.fail.has_cart.user.admin,
            AdminFlag::Admin
        );
    }

    #[test]
    fn test_cart_items_name_declared_products() {
        let fixtures = Fixtures::bundled().unwrap();
        let names: HashSet<_> = fixtures
            .all_products()
            .into_iter()
            .map(|product| product.name.as_str())
            .collect();

        let carts = &fixtures.carts;
        let items = carts
            .create
            .success
            .items
            .iter()
            .chain(&carts.create.duplicated_product.items)
            .chain(carts.list.data.carts.iter().flat_map(|cart| &cart.items))
            .chain(&carts.delete.cancel.cart.items)
            .chain(&carts.stock.items);

        for item in items {
            assert!(names.contains(item.name.as_str()), "{}", item.name);
        }
    }

    #[test]
    fn test_missing_directory_is_read_error() {
        let err = Fixtures::load(Path::new("/nonexistent/fixtures")).unwrap_err();
        assert!(matches!(err, FixtureError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_names_the_file() {
        let err = parse::<LoginFixtures>(LOGIN_FILE, "{\"data\": 1}").unwrap_err();
        assert!(err.to_string().contains("login.json"));
    }
}
