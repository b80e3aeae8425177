//! Login, registration, and logout flows.
//!
//! Form checks run before anything touches the network; a validation
//! failure never produces a request.

use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::PathBuf;

use tally_api::{ApiClient, RegisterForm};

use crate::session::{self, Session};

fn prompt_secret(label: &str) -> Result<String> {
    // Minimal portable secret prompt: just stdin.
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

/// Shape check only; the server is the authority on whether it exists.
pub fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
        && !domain.contains('@')
}

/// At least 8 characters with an uppercase letter, a lowercase letter, a
/// digit, and a special character.
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

pub async fn login(client: &ApiClient, email: &str, password: Option<String>) -> Result<()> {
    if email.trim().is_empty() {
        bail!("email is required");
    }
    let password = match password {
        Some(p) => p,
        None => prompt_secret("Password")?,
    };
    if password.is_empty() {
        bail!("password is required");
    }

    let res = client.login(email, &password).await?;
    session::save_session(&Session {
        token: Some(res.token),
        user: Some(res.user),
    })?;
    println!("{}", res.message.as_deref().unwrap_or("Login successful!"));
    Ok(())
}

pub async fn register(
    client: &ApiClient,
    username: String,
    email: String,
    password: Option<String>,
    profile_image: Option<PathBuf>,
) -> Result<()> {
    if username.trim().is_empty() {
        bail!("username is required");
    }
    if !valid_email(&email) {
        bail!("enter a valid email address");
    }
    let password = match password {
        Some(p) => p,
        None => prompt_secret("Password")?,
    };
    if !valid_password(&password) {
        bail!("password must be at least 8 chars with uppercase, lowercase, number & special char");
    }

    let res = client
        .register(RegisterForm {
            username,
            email,
            password,
            profile_image,
        })
        .await?;

    // Registration returns only a token; the profile arrives on first login.
    let mut stored = session::load_session()?;
    stored.token = Some(res.token);
    stored.user = None;
    session::save_session(&stored)?;
    println!(
        "{}",
        res.message.as_deref().unwrap_or("Registration successful!")
    );
    Ok(())
}

pub fn logout() -> Result<()> {
    session::clear_session()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami() -> Result<()> {
    let stored = session::load_session()?;
    match stored.user {
        Some(user) => println!("{} <{}>", user.username, user.email),
        None if stored.token.is_some() => {
            println!("Logged in, but no profile stored. Run: tally login")
        }
        None => println!("Not logged in. Run: tally login <email>"),
    }
    Ok(())
}
