//! Catalog browsing commands.

use shopshifter_core::{Product, ProductId};
use shopshifter_storefront::catalog::{RELATED_PRODUCT_LIMIT, featured_products};
use shopshifter_storefront::error::AppError;
use shopshifter_storefront::state::Storefront;

/// List products, optionally limited to one category.
#[allow(clippy::print_stdout)]
pub async fn products(shop: &Storefront, category: Option<&str>) -> Result<(), AppError> {
    let products = match category {
        Some(category) => shop.catalog().products_in_category(category).await?,
        None => shop.catalog().products().await?,
    };

    if products.is_empty() {
        println!("No products found.");
        return Ok(());
    }
    for product in &products {
        println!("{}", summary_line(product));
    }
    Ok(())
}

/// Show one product with up to four related products.
#[allow(clippy::print_stdout)]
pub async fn product(shop: &Storefront, id: ProductId) -> Result<(), AppError> {
    let catalog = shop.catalog();
    let product = catalog.product(id).await?;

    println!("{}", product.title);
    println!("{}", product.price.display());
    if !product.category.is_empty() {
        println!("Category: {}", product.category);
    }
    if product.rating.count > 0 {
        println!(
            "Rating: {:.1} ({} reviews)",
            product.rating.rate, product.rating.count
        );
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }

    // Related products are a nice-to-have; the product itself loaded fine.
    match catalog
        .related_products(&product, RELATED_PRODUCT_LIMIT)
        .await
    {
        Ok(related) if !related.is_empty() => {
            println!();
            println!("You may also like:");
            for product in &related {
                println!("  {}", summary_line(product));
            }
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load related products"),
    }
    Ok(())
}

/// List the catalog's categories.
#[allow(clippy::print_stdout)]
pub async fn categories(shop: &Storefront) -> Result<(), AppError> {
    for category in shop.catalog().categories().await? {
        println!("{category}");
    }
    Ok(())
}

/// Show the featured products.
#[allow(clippy::print_stdout)]
pub fn featured() {
    for item in featured_products() {
        println!("{:>2}. {:<20} {}", item.serial_number, item.name, item.price);
    }
}

fn summary_line(product: &Product) -> String {
    format!(
        "{:>4}  {:>9}  {}",
        product.id,
        product.price.display(),
        product.title
    )
}
