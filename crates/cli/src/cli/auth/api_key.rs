use std::io::{self, Write};

use clap::Args;

use crate::context::{Context, output_error};

#[derive(Debug, Args)]
pub(crate) struct ApiKeyArgs {
    /// Label for the key
    #[arg(long)]
    name: Option<String>,
}

pub(crate) async fn run(args: &ApiKeyArgs, context: &Context) -> Result<(), String> {
    let http = context.http();

    if http.config().credentials.access_token().is_none() {
        return Err("sign in before creating an API key".to_string());
    }

    let key = http
        .create_api_key(args.name.as_deref())
        .await
        .map_err(|error| format!("failed to create API key: {error}"))?;

    let mut out = io::stdout().lock();

    writeln!(out, "name: {}", key.name)
        .and_then(|()| writeln!(out, "status: {}", key.status))
        .and_then(|()| writeln!(out, "key: {}", key.key.expose()))
        .and_then(|()| writeln!(out, "store this key now; it is only shown once"))
        .map_err(|error| output_error(&error))
}
