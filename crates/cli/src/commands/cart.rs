//! Cart commands.

use shopshifter_core::ProductId;
use shopshifter_storefront::error::{AppError, add_breadcrumb};
use shopshifter_storefront::state::Storefront;

/// Print the cart with line totals and the subtotal.
#[allow(clippy::print_stdout)]
pub fn show(shop: &Storefront) {
    let session = shop.session();
    let Some(user) = session.user() else {
        println!("Not logged in. Your cart is empty.");
        return;
    };

    let cart = session.cart();
    if cart.is_empty() {
        println!("{user}'s cart is empty.");
        return;
    }

    println!("{user}'s cart:");
    for item in cart.items() {
        println!(
            "{:>4}  {:>3} x {:>9}  {:>9}  {}",
            item.id,
            item.quantity,
            item.price.display(),
            item.line_total().display(),
            item.title
        );
    }
    println!(
        "Subtotal ({} item(s)): {}",
        session.item_count(),
        session.subtotal().display()
    );
}

/// Add a catalog product to the cart.
#[allow(clippy::print_stdout)]
pub async fn add(shop: &mut Storefront, id: ProductId, quantity: u32) -> Result<(), AppError> {
    let item = shop.add_product_to_cart(id, quantity).await?;
    let total = shop
        .session()
        .cart()
        .get(id)
        .map_or(item.quantity, |line| line.quantity);
    println!("Added {} x {} (now {total} in cart).", item.quantity, item.title);
    Ok(())
}

/// Remove a line from the cart.
#[allow(clippy::print_stdout)]
pub fn remove(shop: &mut Storefront, id: ProductId) {
    let session = shop.session_mut();
    if session.cart().get(id).is_none() {
        println!("Product {id} is not in the cart.");
        return;
    }
    session.remove_from_cart(id);
    add_breadcrumb("cart", "Removed from cart", None);
    println!("Removed product {id}.");
}

/// Set a line's quantity; 0 removes it.
#[allow(clippy::print_stdout)]
pub fn update(shop: &mut Storefront, id: ProductId, quantity: u32) {
    let session = shop.session_mut();
    if session.cart().get(id).is_none() {
        println!("Product {id} is not in the cart.");
        return;
    }
    session.update_quantity(id, quantity);
    if quantity == 0 {
        println!("Removed product {id}.");
    } else {
        println!("Product {id} quantity set to {quantity}.");
    }
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(shop: &mut Storefront) {
    shop.session_mut().clear_cart();
    add_breadcrumb("cart", "Cleared cart", None);
    println!("Cart cleared.");
}
