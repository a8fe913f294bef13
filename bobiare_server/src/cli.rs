use std::{env, env::VarError};

use bobiare_common::Secret;

/// Environment variables shown by the help screen. Values of the ones flagged `true` are masked.
const DISPLAY_ENVS: [(&str, bool); 12] = [
    ("RUST_LOG", false),
    ("BOBIARE_HOST", false),
    ("BOBIARE_PORT", false),
    ("BOBIARE_DATABASE_URL", false),
    ("BOBIARE_PUBLIC_URL", false),
    ("BOBIARE_CARTS_DIR", false),
    ("BOBIARE_SIMULATED_LOGIN", false),
    ("BOBIARE_LOGIN_DELAY_MS", false),
    ("BOBIARE_SESSION_IDLE_MINUTES", false),
    ("BOBIARE_MAX_SESSIONS", false),
    ("BOBIARE_ADMIN_EMAIL", false),
    ("BOBIARE_ADMIN_PASSWORD", true),
];

/// The server has no options. Any argument at all prints the help text and the current configuration, and tells the
/// caller to exit.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        println!("\n{}\n", include_str!("./cli-help.txt"));
        println!("Current environment values:");
        DISPLAY_ENVS.iter().for_each(|&(name, secret)| println!("  {name:<35} {}", env_value(name, secret)));
    }
    has_cli_args
}

fn env_value(name: &str, secret: bool) -> String {
    match env::var(name) {
        Ok(s) if secret => Secret::new(s).to_string(),
        Ok(s) => s,
        Err(VarError::NotPresent) => "Not set".into(),
        Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
    }
}
