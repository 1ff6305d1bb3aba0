use std::io::{self, Write};

use clap::Args;
use storefront::{
    catalog::auth::{LoginRequest, login_failure_message},
    session::Secret,
};
use tracing::warn;

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email address
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: LoginArgs, context: &Context) -> Result<(), String> {
    let request = LoginRequest::new(&args.email, Secret::new(args.password));

    request.validate().map_err(|error| error.to_string())?;

    let user = context.http().login(&request).await.map_err(|error| {
        warn!(%error, "login failed");
        login_failure_message(&error)
    })?;

    if user.access_token.is_none() {
        return Err("Login failed. No access token received.".to_string());
    }

    context
        .session()
        .sign_in(&user)
        .map_err(|error| format!("failed to store session: {error}"))?;

    writeln!(io::stdout().lock(), "Signed in as {}.", user.name)
        .map_err(|error| output_error(&error))
}
