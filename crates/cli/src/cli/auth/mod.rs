use clap::{Args, Subcommand};

use crate::context::Context;

mod api_key;
mod login;
mod logout;
mod register;
mod status;

#[derive(Debug, Args)]
pub(crate) struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Debug, Subcommand)]
enum AuthSubcommand {
    /// Sign in and store the access token
    Login(login::LoginArgs),

    /// Create a new account
    Register(register::RegisterArgs),

    /// Forget the stored token and profile
    Logout,

    /// Show who is signed in
    Status,

    /// Issue an API key for the signed-in user
    ApiKey(api_key::ApiKeyArgs),
}

pub(crate) async fn run(command: AuthCommand, context: &Context) -> Result<(), String> {
    match command.command {
        AuthSubcommand::Login(args) => login::run(args, context).await,
        AuthSubcommand::Register(args) => register::run(args, context).await,
        AuthSubcommand::Logout => logout::run(context),
        AuthSubcommand::Status => status::run(context),
        AuthSubcommand::ApiKey(args) => api_key::run(&args, context).await,
    }
}
