//! User management commands.

use babylist_client::models::UserUpdate;

use super::{require_session, CommandError, Context};

pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let users = require_session(ctx.client.list_users(&ctx.session).await?)?;
    for user in &users {
        println!("[{}] {} <{}> {}", user.id, user.name, user.email, user.role);
    }
    println!("{} user(s)", users.len());
    Ok(())
}

pub async fn show(ctx: &Context, id: i64) -> Result<(), CommandError> {
    let user = require_session(ctx.client.get_user(&ctx.session, id).await?)?;
    println!(
        "[{}] {} <{}> {} since {}",
        user.id,
        user.name,
        user.email,
        user.role,
        user.created_at.format("%Y-%m-%d")
    );
    Ok(())
}

/// Edits the stored session too when the edited user is the one logged in.
pub async fn update(ctx: &mut Context, id: i64, update: &UserUpdate) -> Result<(), CommandError> {
    let user = require_session(ctx.client.update_user(&ctx.session, id, update).await?)?;
    ctx.store.update_user(&mut ctx.session, &user)?;
    println!("Updated {} <{}>", user.name, user.email);
    Ok(())
}

pub async fn delete(ctx: &Context, id: i64) -> Result<(), CommandError> {
    let message = require_session(ctx.client.delete_user(&ctx.session, id).await?)?;
    println!("{message}");
    Ok(())
}
