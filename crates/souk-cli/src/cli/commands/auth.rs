//! Session commands: register, login, logout, whoami.

use anyhow::Result;

use souk_core::{Credentials, Marketplace, Registration};

pub async fn register(
    market: &Marketplace,
    email: String,
    name: String,
    password: String,
) -> Result<()> {
    let registration = Registration::new(email, password, name)
        .with_device_token(market.config().device_token.clone());

    let session = market.register(&registration).await?;
    println!(
        "Registered and logged in as {} <{}>",
        session.user.name, session.user.email
    );
    Ok(())
}

pub async fn login(market: &Marketplace, email: String, password: String) -> Result<()> {
    let credentials =
        Credentials::new(email, password).with_device_token(market.config().device_token.clone());

    let session = market.login(&credentials).await?;
    println!("Logged in as {} <{}>", session.user.name, session.user.email);
    Ok(())
}

pub async fn logout(market: &Marketplace) -> Result<()> {
    if !market.is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    market.logout().await?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(market: &Marketplace) -> Result<()> {
    match market.current_session() {
        Some(session) => {
            println!("{} <{}>", session.user.name, session.user.email);
            println!("User id: {}", session.user.id);
        }
        None => println!("Not logged in"),
    }
    Ok(())
}
