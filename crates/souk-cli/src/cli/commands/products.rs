//! Product catalog commands.

use anyhow::Result;
use std::path::PathBuf;

use souk_core::{Marketplace, Product, ProductDraft};

pub async fn list(market: &Marketplace, page: Option<u32>, limit: Option<u32>) -> Result<()> {
    let listing = market.catalog().list(page, limit).await?;

    if listing.data.is_empty() {
        println!("No products");
        return Ok(());
    }

    for product in &listing.data {
        println!(
            "{}  {:>10.2}  {}  (by {})",
            product.id, product.price, product.name, product.seller.name
        );
    }

    if let Some(total) = listing.total {
        println!("\n{} of {} products", listing.data.len(), total);
    }
    Ok(())
}

pub async fn show(market: &Marketplace, id: &str) -> Result<()> {
    let product = market.catalog().get(id).await?;
    print_product(&product);
    Ok(())
}

pub async fn create(
    market: &Marketplace,
    name: String,
    description: String,
    price: f64,
    image: Option<PathBuf>,
) -> Result<()> {
    let draft = ProductDraft::new(name, description, price).with_image(image);
    let product = market.catalog().create(&draft).await?;

    println!("Created product {}", product.id);
    print_product(&product);
    Ok(())
}

pub async fn edit(
    market: &Marketplace,
    id: &str,
    name: String,
    description: String,
    price: f64,
    image: Option<PathBuf>,
) -> Result<()> {
    let draft = ProductDraft::new(name, description, price).with_image(image);
    let product = market.catalog().update(id, &draft).await?;

    println!("Updated product {}", product.id);
    print_product(&product);
    Ok(())
}

pub async fn delete(market: &Marketplace, id: &str) -> Result<()> {
    market.catalog().delete(id).await?;
    println!("Deleted product {id}");
    Ok(())
}

fn print_product(product: &Product) {
    println!("{}", product.name);
    println!("  id:     {}", product.id);
    println!("  price:  {:.2}", product.price);
    println!("  seller: {}", product.seller.name);
    if let Some(url) = &product.image_url {
        println!("  image:  {url}");
    }
    if let Some(created) = &product.created_at {
        println!("  listed: {}", created.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("  {}", product.description);
}
