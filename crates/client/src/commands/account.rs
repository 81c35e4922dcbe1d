//! Login, logout, signup, and identity commands.

use babylist_client::models::NewUser;

use super::{require_session, CommandError, Context};

pub async fn login(ctx: &mut Context, email: &str, password: &str) -> Result<(), CommandError> {
    let user = ctx.client.login(email, password).await?;
    let name = user.name.clone();
    ctx.store.login(&mut ctx.session, user)?;
    println!("Logged in as {name} <{email}>");
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<(), CommandError> {
    ctx.store.logout(&mut ctx.session)?;
    println!("Logged out");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<(), CommandError> {
    let user = require_session(ctx.client.current_user(&ctx.session).await?)?;
    println!("{} <{}> (id {}, {})", user.name, user.email, user.id, user.role);
    Ok(())
}

pub async fn signup(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
    age: Option<i32>,
) -> Result<(), CommandError> {
    let user = NewUser {
        name,
        email,
        password,
        age,
    };
    let created = ctx.client.signup(&user).await?;
    println!("Account created for {} (id {})", created.email, created.id);
    Ok(())
}
