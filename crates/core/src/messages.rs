//! Messages the server answers with.
//!
//! Scenario assertions and teardown routines compare `message` fields
//! against these constants instead of repeating literals.

/// `201` on any successful create (including create-through-PUT).
pub const CREATED: &str = "Cadastro realizado com sucesso";
/// `200` on a successful PUT of an existing entity.
pub const UPDATED: &str = "Registro alterado com sucesso";
/// `200` on a successful delete, and on closing a cart.
pub const DELETED: &str = "Registro excluído com sucesso";
/// Suffix the server appends to [`DELETED`] when a canceled cart restocks.
pub const RESTOCKED_SUFFIX: &str = "Estoque dos produtos reabastecido";
/// `200` when deleting an id that does not exist.
pub const NOTHING_DELETED: &str = "Nenhum registro excluído";

/// `200` on a successful login.
pub const LOGIN_OK: &str = "Login realizado com sucesso";
/// `401` on wrong email or password.
pub const LOGIN_FAILED: &str = "Email e/ou senha inválidos";

/// `401` on privileged routes without a usable token.
pub const TOKEN_INVALID: &str =
    "Token de acesso ausente, inválido, expirado ou usuário do token não existe mais";
/// `403` when a regular user calls an admin route.
pub const ADMIN_ONLY: &str = "Rota exclusiva para administradores";

/// `400` when the email is already registered.
pub const EMAIL_TAKEN: &str = "Este email já está sendo usado";
/// `400` from `GET /usuarios/{id}` for an unknown id.
pub const USER_NOT_FOUND: &str = "Usuário não encontrado";
/// `400` when deleting a user that still owns a cart.
pub const USER_HAS_CART: &str = "Não é permitido excluir usuário com carrinho cadastrado";

/// `400` when the product name is already registered.
pub const PRODUCT_NAME_TAKEN: &str = "Já existe produto com esse nome";
/// `400` for an unknown product id (lookup or cart line).
pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";
/// `400` when deleting a product referenced by a cart.
pub const PRODUCT_IN_CART: &str = "Não é permitido excluir produto que faz parte de carrinho";

/// `400` when the user already has an open cart.
pub const CART_ALREADY_OPEN: &str = "Não é permitido ter mais de 1 carrinho";
/// `400` when a cart lists the same product twice.
pub const CART_DUPLICATED_PRODUCT: &str = "Não é permitido possuir produto duplicado";
/// `400` when a cart line asks for more than the stock.
pub const CART_INSUFFICIENT_STOCK: &str = "Produto não possui quantidade suficiente";
/// `400` from `GET /carrinhos/{id}` for an unknown id.
pub const CART_NOT_FOUND: &str = "Carrinho não encontrado";
/// `200` when closing a cart the user does not have.
pub const NO_CART_FOR_USER: &str = "Não foi encontrado carrinho para esse usuário";

/// Message returned by `DELETE /carrinhos/cancelar-compra` on success.
#[must_use]
pub fn cart_canceled() -> String {
    format!("{DELETED}. {RESTOCKED_SUFFIX}")
}

/// Per-field validation messages, keyed by field path in `400` bodies.
pub mod field {
    /// `"<field> é obrigatório"`
    #[must_use]
    pub fn required(field: &str) -> String {
        format!("{field} é obrigatório")
    }

    /// `"<field> não pode ficar em branco"`
    #[must_use]
    pub fn blank(field: &str) -> String {
        format!("{field} não pode ficar em branco")
    }

    /// `"<field> deve ser uma string"`
    #[must_use]
    pub fn not_string(field: &str) -> String {
        format!("{field} deve ser uma string")
    }

    /// `"<field> deve ser um número"`
    #[must_use]
    pub fn not_number(field: &str) -> String {
        format!("{field} deve ser um número")
    }

    /// `"<field> deve ser um número positivo"`
    #[must_use]
    pub fn not_positive(field: &str) -> String {
        format!("{field} deve ser um número positivo")
    }

    /// `"<field> deve ser maior ou igual a 0"`
    #[must_use]
    pub fn negative(field: &str) -> String {
        format!("{field} deve ser maior ou igual a 0")
    }

    /// `"<field> deve ser um inteiro"`
    #[must_use]
    pub fn not_integer(field: &str) -> String {
        format!("{field} deve ser um inteiro")
    }

    /// `"<field> deve ser um email válido"`
    #[must_use]
    pub fn invalid_email(field: &str) -> String {
        format!("{field} deve ser um email válido")
    }

    /// `"<field> não é permitido"`
    #[must_use]
    pub fn not_allowed(field: &str) -> String {
        format!("{field} não é permitido")
    }

    /// `"<field> deve ser um array"`
    #[must_use]
    pub fn not_array(field: &str) -> String {
        format!("{field} deve ser um array")
    }

    /// `"<field> não contém 1 valor obrigatório"`
    #[must_use]
    pub fn missing_required_value(field: &str) -> String {
        format!("{field} não contém 1 valor obrigatório")
    }

    /// `"administrador deve ser 'true' ou 'false'"`
    #[must_use]
    pub fn admin_flag(field: &str) -> String {
        format!("{field} deve ser 'true' ou 'false'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_messages_use_path() {
        assert_eq!(
            field::blank("produtos[0].idProduto"),
            "produtos[0].idProduto não pode ficar em branco"
        );
        assert_eq!(
            field::missing_required_value("produtos"),
            "produtos não contém 1 valor obrigatório"
        );
        assert!(cart_canceled().starts_with(DELETED));
    }
}
