use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // TMA_BOT_TOKEN is deliberately absent from this list
    const DISPLAY_ENVS: [&str; 7] = [
        "RUST_LOG",
        "TMA_HOST",
        "TMA_PORT",
        "TMA_MAX_AGE_SECONDS",
        "TMA_ALLOWS_WRITE_TO_PM",
        "TMA_QUERY_TOKEN_PARAM",
        "TMA_QUERY_TOKEN_PATHS",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    });
    let token_set = env::var("TMA_BOT_TOKEN").map(|s| !s.is_empty()).unwrap_or(false);
    println!("  {:<35} {:<15}", "TMA_BOT_TOKEN", if token_set { "****" } else { "Not set" });
}
