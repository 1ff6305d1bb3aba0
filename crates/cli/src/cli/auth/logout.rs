use std::io::{self, Write};

use crate::context::{Context, output_error};

pub(crate) fn run(context: &Context) -> Result<(), String> {
    context
        .session()
        .sign_out()
        .map_err(|error| format!("failed to sign out: {error}"))?;

    writeln!(io::stdout().lock(), "Signed out.").map_err(|error| output_error(&error))
}
