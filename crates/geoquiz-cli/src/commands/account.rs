//! The `geoquiz signup` and `geoquiz login` commands.

use anyhow::Result;

use geoquiz_core::account::Accounts;

use super::{read_password, require_backend, GlobalArgs, Input};

pub async fn signup(global: &GlobalArgs, email: String, handle: String) -> Result<()> {
    let config = global.load_config()?;
    let backend = require_backend(&config)?;
    let mut input = Input::stdin();
    let password = read_password(&mut input).await?;

    let mut accounts = Accounts::new(backend);
    let session = accounts.sign_up(&email, &password, &handle).await?;
    println!("Compte créé pour {handle} ({})", session.email);
    Ok(())
}

pub async fn login(global: &GlobalArgs, identifier: String) -> Result<()> {
    let config = global.load_config()?;
    let backend = require_backend(&config)?;
    let mut input = Input::stdin();
    let password = read_password(&mut input).await?;

    let mut accounts = Accounts::new(backend);
    accounts.sign_in(&identifier, &password).await?;
    let profile = accounts.profile().await?;
    println!(
        "Connecté : {} ({})",
        profile.handle.as_deref().unwrap_or("sans pseudo"),
        profile.email.as_deref().unwrap_or("-")
    );
    Ok(())
}
