//! Browsing commands: top sales, categories, the listing, product cards.

use bosanoga_core::{CategoryId, ProductId};
use bosanoga_storefront::store::AppState;

use super::print_item_row;

/// `bosanoga top-sales`
pub async fn top_sales(app: &mut AppState) -> bool {
    app.top_sales.load(&app.client).await;

    if let Some(err) = app.top_sales.error() {
        eprintln!("{err}");
        return false;
    }
    for item in app.top_sales.items() {
        print_item_row(item);
    }
    true
}

/// `bosanoga categories`
pub async fn categories(app: &mut AppState) -> bool {
    app.catalog.load_categories(&app.client).await;

    if app.catalog.categories().is_empty() {
        eprintln!("no categories available");
        return false;
    }
    for category in app.catalog.categories() {
        println!("{:>6}  {}", category.id.as_i32(), category.title);
    }
    true
}

/// `bosanoga items [--category] [--search] [--all]`
pub async fn items(
    app: &mut AppState,
    category: Option<CategoryId>,
    search: Option<String>,
    all: bool,
) -> bool {
    // Both filters travel together; only the last issued request is run,
    // earlier tickets are simply dropped.
    let mut request = app.catalog.select_category(category);
    if let Some(query) = search {
        request = app.catalog.set_search_query(query);
    }
    app.catalog.load_page(&app.client, request).await;

    while all && app.catalog.error().is_none() {
        let Some(more) = app.catalog.next_page() else {
            break;
        };
        app.catalog.load_page(&app.client, more).await;
    }

    if let Some(err) = app.catalog.error() {
        eprintln!("{err}");
        return false;
    }
    for item in app.catalog.items() {
        print_item_row(item);
    }
    if app.catalog.has_more() {
        println!("... more available (pass --all to fetch everything)");
    }
    true
}

/// `bosanoga item <id>`
pub async fn item(app: &mut AppState, id: ProductId) -> bool {
    app.product.load(&app.client, id).await;

    if let Some(err) = app.product.error() {
        eprintln!("{err}");
        return false;
    }
    let Some(product) = app.product.product() else {
        return false;
    };

    println!("{}  ({})", product.title, product.price);
    print_attr("SKU", product.sku.as_deref());
    print_attr("Manufacturer", product.manufacturer.as_deref());
    print_attr("Color", product.color.as_deref());
    print_attr("Material", product.material.as_deref());
    print_attr("Reason", product.reason.as_deref());
    print_attr("Season", product.season.as_deref());

    if product.has_available_sizes() {
        let sizes: Vec<&str> = product.available_sizes().map(|s| s.size.as_str()).collect();
        println!("Sizes: {}", sizes.join(", "));
    } else {
        println!("Sizes: none in stock");
    }
    true
}

fn print_attr(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("{label}: {value}");
    }
}
