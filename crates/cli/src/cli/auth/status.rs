use std::io::{self, Write};

use crate::context::{Context, output_error};

pub(crate) fn run(context: &Context) -> Result<(), String> {
    let session = context.session();
    let mut out = io::stdout().lock();

    let line = match session.user() {
        Some(user) if session.is_authenticated() => {
            format!("Signed in as {} <{}>.", user.name, user.email)
        }
        _ => "Not signed in.".to_string(),
    };

    writeln!(out, "{line}").map_err(|error| output_error(&error))
}
