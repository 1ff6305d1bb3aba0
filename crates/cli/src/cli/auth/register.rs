use std::io::{self, Write};

use clap::Args;
use storefront::{
    catalog::auth::{Registration, registration_failure_message},
    session::Secret,
};
use tracing::warn;

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct RegisterArgs {
    /// User name: letters, numbers and underscores
    #[arg(long)]
    name: String,

    /// Student email address
    #[arg(long)]
    email: String,

    /// Password, at least eight characters
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn run(args: RegisterArgs, context: &Context) -> Result<(), String> {
    let registration = Registration::new(&args.name, &args.email, Secret::new(args.password));

    registration.validate().map_err(|error| error.to_string())?;

    let user = context
        .http()
        .register(&registration)
        .await
        .map_err(|error| {
            warn!(%error, "registration failed");
            registration_failure_message(&error)
        })?;

    writeln!(
        io::stdout().lock(),
        "Registration successful for {}! Please log in.",
        user.email
    )
    .map_err(|error| output_error(&error))
}
