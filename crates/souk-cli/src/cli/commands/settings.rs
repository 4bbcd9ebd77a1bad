//! Settings commands.

use anyhow::Result;

use souk_core::Marketplace;

pub fn show(market: &Marketplace) -> Result<()> {
    match market.current_session() {
        Some(session) => {
            println!("Account");
            println!("  name:  {}", session.user.name);
            println!("  email: {}", session.user.email);
            println!("  id:    {}", session.user.id);
        }
        None => println!("Account\n  not logged in"),
    }

    let entries = market.list_settings()?;
    println!("\nSettings");
    if entries.is_empty() {
        println!("  (none)");
    }
    for (key, value) in entries {
        println!("  {key} = {value}");
    }
    Ok(())
}

pub fn get(market: &Marketplace, key: &str) -> Result<()> {
    match market.get_setting(key)? {
        Some(value) => println!("{value}"),
        None => println!("(unset)"),
    }
    Ok(())
}

pub fn set(market: &Marketplace, key: &str, value: &str) -> Result<()> {
    market.set_setting(key, value)?;
    println!("{key} = {value}");
    Ok(())
}
