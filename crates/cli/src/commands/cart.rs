//! Cart commands.
//!
//! Plays the part of the storefront's UI event handlers: each invocation
//! loads the persisted cart, runs one operation, and prints the result.
//!
//! # Environment Variables
//!
//! - `ROCKETSHOES_API_URL` - Catalog/stock service base URL
//! - `ROCKETSHOES_STORAGE_PATH` - File backing the cart snapshot
//! - `ROCKETSHOES_STORAGE_KEY` - Key the cart is stored under

use std::fmt::Write as _;
use std::io::{self, Write};

use rocketshoes_cart::{
    CartConfig, CartError, CartStore, CatalogError, ErrorKind, FileStorage, HttpCatalog,
    StorageError, UpdateProductAmount,
};
use rocketshoes_core::{Cart, ProductId};
use thiserror::Error;

/// Errors from running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Catalog client error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{}", .0.notice())]
    Cart(#[from] CartError),
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Whether the shopper's request was refused (out of stock, not in the
    /// cart) rather than the command breaking.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Cart(e) if e.kind() != ErrorKind::Failure)
    }
}

/// A single cart operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Show,
    Add(ProductId),
    Remove(ProductId),
    Update { product_id: ProductId, amount: u32 },
}

/// Run one action against the configured catalog and storage, then print
/// the cart.
///
/// # Errors
///
/// Returns an error if the catalog client or storage cannot be set up, or if
/// the operation is rejected. A rejected operation prints its notice first.
pub async fn run(action: Action, config: &CartConfig) -> Result<(), CommandError> {
    let catalog = HttpCatalog::new(&config.catalog)?;
    let storage = FileStorage::new(&config.storage_path);
    let mut store = CartStore::load(catalog, storage, config.storage_key.as_str())?;

    let outcome = match action {
        Action::Show => Ok(()),
        Action::Add(product_id) => store.add_product(product_id).await,
        Action::Remove(product_id) => store.remove_product(product_id),
        Action::Update { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = &outcome {
        writeln!(stdout, "! {}", e.notice())?;
    }
    stdout.write_all(render(store.cart()).as_bytes())?;
    stdout.flush()?;

    outcome.map_err(CommandError::from)
}

/// Render the cart as a table with line subtotals and the cart total.
#[must_use]
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Carrinho vazio\n".to_string();
    }

    let mut out = String::new();
    for line in cart {
        let _ = writeln!(
            out,
            "{:>4}  {:<40} {:>3} x {:>12} = {:>12}",
            line.id,
            line.title,
            line.amount,
            line.price.display(),
            line.subtotal().display(),
        );
    }
    let _ = writeln!(
        out,
        "{} {} / {} {}  Total: {}",
        cart.len(),
        if cart.len() == 1 { "produto" } else { "produtos" },
        cart.total_amount(),
        if cart.total_amount() == 1 { "item" } else { "itens" },
        cart.total().display()
    );
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rocketshoes_core::Product;

    use super::*;

    fn cart() -> Cart {
        Cart::try_from(vec![
            Product {
                id: ProductId::new(1),
                title: "Tênis de Caminhada".to_string(),
                price: "179.9".parse().unwrap(),
                image: String::new(),
                amount: 2,
            },
            Product {
                id: ProductId::new(2),
                title: "Tênis VR".to_string(),
                price: "139.9".parse().unwrap(),
                image: String::new(),
                amount: 1,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render(&Cart::new()), "Carrinho vazio\n");
    }

    #[test]
    fn test_render_lists_lines_and_total() {
        let out = render(&cart());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines.first().unwrap().contains("Tênis de Caminhada"));
        assert!(lines.first().unwrap().contains("R$ 359,80"));
        assert_eq!(
            lines.last().unwrap(),
            &"2 produtos / 3 itens  Total: R$ 499,70"
        );
    }

    #[test]
    fn test_cart_error_displays_notice() {
        let err = CommandError::from(CartError::SoldOut(ProductId::new(3)));
        assert_eq!(err.to_string(), "Produto sem estoque");
    }

    #[test]
    fn test_only_shopper_errors_are_rejections() {
        assert!(CommandError::from(CartError::SoldOut(ProductId::new(3))).is_rejection());
        assert!(CommandError::from(CartError::NotInCart(ProductId::new(3))).is_rejection());
        assert!(
            CommandError::from(CartError::OutOfStock {
                product_id: ProductId::new(1),
                available: 2,
            })
            .is_rejection()
        );

        let failed = CartError::AddFailed {
            product_id: ProductId::new(1),
            source: StorageError::Io(io::Error::other("disk full")).into(),
        };
        assert!(!CommandError::from(failed).is_rejection());
        assert!(!CommandError::from(io::Error::other("broken pipe")).is_rejection());
    }
}
