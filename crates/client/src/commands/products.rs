//! Catalog browsing, reservation, and catalog management commands.

use babylist_client::models::{Product, ProductInput};

use super::{require_session, CommandError, Context};

pub async fn list(ctx: &Context, all: bool) -> Result<(), CommandError> {
    let products = if all {
        require_session(ctx.client.fetch_all_products(&ctx.session).await?)?
    } else {
        ctx.client.fetch_products().await?
    };

    if products.is_empty() {
        println!("No products");
        return Ok(());
    }
    let me = ctx.session.user().map(|u| u.id);
    for product in &products {
        println!("{}", describe(product, me));
    }
    Ok(())
}

pub async fn reserve(ctx: &Context, id: i64) -> Result<(), CommandError> {
    let product = require_session(ctx.client.reserve_product(&ctx.session, id).await?)?;
    println!("Reserved \"{}\"", product.name);
    Ok(())
}

pub async fn add(ctx: &Context, input: &ProductInput) -> Result<(), CommandError> {
    let product = require_session(ctx.client.create_product(&ctx.session, input).await?)?;
    println!("Created product {} \"{}\"", product.id, product.name);
    Ok(())
}

pub async fn update(ctx: &Context, id: i64, input: &ProductInput) -> Result<(), CommandError> {
    let product = require_session(ctx.client.update_product(&ctx.session, id, input).await?)?;
    println!("Updated product {} \"{}\"", product.id, product.name);
    Ok(())
}

/// `--active` / `--inactive` to an optional flag; neither leaves it alone.
pub fn active_flag(active: bool, inactive: bool) -> Option<bool> {
    match (active, inactive) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// One listing line: id, name, availability, and the link if there is one.
fn describe(product: &Product, me: Option<i64>) -> String {
    let status = match product.reserved_by {
        None => "available".to_string(),
        Some(id) if Some(id) == me => "reserved by you".to_string(),
        Some(_) => "reserved".to_string(),
    };
    let mut line = format!("[{}] {} ({status})", product.id, product.name);
    if !product.active {
        line.push_str(" [hidden]");
    }
    if !product.url.is_empty() {
        line.push_str(&format!(" {}", product.url));
    }
    line
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn product(reserved_by: Option<i64>, active: bool) -> Product {
        Product {
            id: 4,
            name: "Stroller".into(),
            description: String::new(),
            url: String::new(),
            image_url: String::new(),
            active,
            reserved_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn describe_marks_reservation_owner() {
        assert_eq!(describe(&product(None, true), Some(1)), "[4] Stroller (available)");
        assert_eq!(describe(&product(Some(1), true), Some(1)), "[4] Stroller (reserved by you)");
        assert_eq!(describe(&product(Some(2), true), Some(1)), "[4] Stroller (reserved)");
        assert_eq!(describe(&product(None, false), None), "[4] Stroller (available) [hidden]");
    }

    #[test]
    fn active_flag_is_optional() {
        assert_eq!(active_flag(false, false), None);
        assert_eq!(active_flag(true, false), Some(true));
        assert_eq!(active_flag(false, true), Some(false));
    }
}
