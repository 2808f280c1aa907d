//! Login, logout, whoami and registration.

use clap::Args;
use farm_direct_client::{AuthResult, ClientError, Registration, SessionStore};
use farm_direct_core::{Email, UserType};
use secrecy::SecretString;

use super::print_line;

/// Fields for `fd-cli register`.
#[derive(Args)]
pub struct RegisterArgs {
    /// Login name
    #[arg(short, long)]
    username: String,

    /// Contact email
    #[arg(short, long)]
    email: Email,

    /// Account password
    #[arg(short, long, env = "FARM_DIRECT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Account kind (`customer`, `seller`, `business`)
    #[arg(short = 't', long, default_value = "customer")]
    user_type: UserType,
}

/// Log in and persist the session.
///
/// # Errors
///
/// Returns the server's message if the login is refused.
pub async fn login(
    store: &SessionStore,
    username: &str,
    password: String,
) -> Result<(), ClientError> {
    let password = SecretString::from(password);

    let user = store
        .login(username, &password)
        .await
        .into_result()
        .map_err(ClientError::Auth)?;

    print_line(&format!("Logged in as {} ({})", user.username, user.user_type));
    Ok(())
}

/// Drop the session, in memory and on disk.
pub fn logout(store: &SessionStore) {
    let was_logged_in = store.is_authenticated();
    store.logout();

    if was_logged_in {
        print_line("Logged out");
    } else {
        print_line("Not logged in");
    }
}

/// Show the user restored from the session file.
pub fn whoami(store: &SessionStore) {
    match store.user() {
        Some(user) => print_line(&format!("{} ({}, id {})", user.username, user.user_type, user.id)),
        None => print_line("Not logged in"),
    }
}

/// Create an account. Does not log in.
///
/// # Errors
///
/// Returns the server's message if registration is refused.
pub async fn register(store: &SessionStore, args: RegisterArgs) -> Result<(), ClientError> {
    let registration = Registration {
        username: args.username,
        email: args.email,
        password: SecretString::from(args.password),
        user_type: args.user_type,
    };

    match store.register(&registration).await {
        AuthResult::Success(registered) => {
            let message = registered
                .message
                .unwrap_or_else(|| format!("Registered {}", registration.username));
            print_line(&message);
            Ok(())
        }
        AuthResult::Failure { error } => Err(ClientError::Auth(error)),
    }
}
