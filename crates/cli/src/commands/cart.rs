//! Cart and checkout commands.

use bosanoga_core::ProductId;
use bosanoga_storefront::store::{
    AppState, CheckoutForm, MAX_QUANTITY, MIN_QUANTITY, SubmitStatus,
};

/// `bosanoga cart list`
pub fn list(app: &AppState) -> bool {
    if app.cart.is_empty() {
        println!("the cart is empty");
        return true;
    }
    for line in app.cart.lines() {
        println!(
            "{:>6}  {:<36}  size {:<8}  x{:<3}  {}",
            line.id.as_i32(),
            line.title,
            line.size,
            line.count,
            line.line_total()
        );
    }
    println!("Total: {}", app.cart.total());
    true
}

/// `bosanoga cart add <id> --size --count`
///
/// Fetches the product card first so the line carries the real title,
/// price, and image, and so the size can be checked against the stock.
pub async fn add(app: &mut AppState, id: ProductId, size: &str, count: u32) -> bool {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&count) {
        eprintln!("count must be between {MIN_QUANTITY} and {MAX_QUANTITY}");
        return false;
    }

    app.product.load(&app.client, id).await;
    if let Some(err) = app.product.error() {
        eprintln!("{err}");
        return false;
    }
    let Some(product) = app.product.product() else {
        return false;
    };

    if !product.available_sizes().any(|s| s.size == size) {
        let in_stock: Vec<&str> = product.available_sizes().map(|s| s.size.as_str()).collect();
        if in_stock.is_empty() {
            eprintln!("size {size} is not in stock (nothing is)");
        } else {
            eprintln!("size {size} is not in stock; available: {}", in_stock.join(", "));
        }
        return false;
    }

    app.product.select_size(size);
    app.product.set_quantity(count);
    if !app.add_selection_to_cart() {
        return false;
    }

    println!("added {size} x{count} to the cart ({} lines)", app.cart.line_count());
    true
}

/// `bosanoga cart remove <id> --size`
pub fn remove(app: &mut AppState, id: ProductId, size: &str) -> bool {
    let before = app.cart.line_count();
    app.cart.remove(id, size);
    if app.cart.line_count() == before {
        eprintln!("no such line in the cart");
        return false;
    }
    println!("removed ({} lines left)", app.cart.line_count());
    true
}

/// `bosanoga cart set-count <id> --size --count`
pub fn set_count(app: &mut AppState, id: ProductId, size: &str, count: u32) -> bool {
    if !app.cart.lines().iter().any(|line| line.matches(id, size)) {
        eprintln!("no such line in the cart");
        return false;
    }
    app.cart.set_count(id, size, count);
    if count == 0 {
        println!("removed ({} lines left)", app.cart.line_count());
    } else {
        println!("count set to {count}");
    }
    true
}

/// `bosanoga cart clear`
pub fn clear(app: &mut AppState) -> bool {
    app.cart.clear();
    println!("the cart is empty");
    true
}

/// `bosanoga order --phone --address --agree`
pub async fn order(app: &mut AppState, phone: String, address: String, agree: bool) -> bool {
    if app.cart.is_empty() {
        eprintln!("the cart is empty; nothing to order");
        return false;
    }

    let form = CheckoutForm {
        phone,
        address,
        agreement: agree,
    };
    if let Err(errors) = app.cart.submit_order(&app.client, &form).await {
        if let Some(msg) = &errors.phone {
            eprintln!("phone: {msg}");
        }
        if let Some(msg) = &errors.address {
            eprintln!("address: {msg}");
        }
        if let Some(msg) = &errors.agreement {
            eprintln!("agreement: {msg}");
        }
        return false;
    }

    match app.cart.status() {
        SubmitStatus::Succeeded => {
            println!("order accepted, the cart has been cleared");
            true
        }
        SubmitStatus::Failed(msg) => {
            eprintln!("{msg}");
            false
        }
        // submit_order always lands in a terminal status.
        SubmitStatus::Idle | SubmitStatus::Submitting => false,
    }
}
