use std::env;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand};

mod sign;
mod verify;

use sign::print_signed_init_data;
use verify::print_verification;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Tools for working with Telegram Mini App init data")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "sign", about = "Produce signed init data, as the Telegram client would")]
    Sign(SignParams),
    #[clap(name = "verify", about = "Check init data against a bot token and print the identity it carries")]
    Verify(VerifyParams),
}

#[derive(Debug, Args)]
pub struct SignParams {
    /// The bot token. Falls back to TMA_BOT_TOKEN
    #[arg(short = 'b', long = "bot-token")]
    bot_token: Option<String>,
    /// The Telegram user id
    #[arg(short = 'i', long = "id")]
    id: i64,
    #[arg(short = 'u', long = "username")]
    username: Option<String>,
    #[arg(short = 'f', long = "first-name")]
    first_name: Option<String>,
    #[arg(short = 'l', long = "last-name")]
    last_name: Option<String>,
    /// IETF language tag of the user's client, e.g. "en"
    #[arg(long = "language")]
    language_code: Option<String>,
    #[arg(short = 'p', long = "premium")]
    is_premium: bool,
    #[arg(long = "allows-write-to-pm")]
    allows_write_to_pm: bool,
    /// Unix timestamp for auth_date. Defaults to now
    #[arg(short = 'd', long = "auth-date")]
    auth_date: Option<i64>,
    /// Extra fields to sign, as key=value. May be repeated
    #[arg(short = 'x', long = "field")]
    fields: Vec<String>,
}

#[derive(Debug, Args)]
pub struct VerifyParams {
    /// The bot token. Falls back to TMA_BOT_TOKEN
    #[arg(short = 'b', long = "bot-token")]
    bot_token: Option<String>,
    /// Maximum age of the init data in seconds. 0 disables the expiry check
    #[arg(short = 'm', long = "max-age", default_value = "86400")]
    max_age: i64,
    #[arg(long = "allows-write-to-pm")]
    allows_write_to_pm: bool,
    /// The init data, either bare or as an Authorization header value ("tma ...")
    init_data: String,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::Sign(params) => print_signed_init_data(params),
        Command::Verify(params) => print_verification(params),
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn bot_token(arg: Option<String>) -> anyhow::Result<String> {
    arg.or_else(|| env::var("TMA_BOT_TOKEN").ok())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| anyhow!("No bot token was given. Use --bot-token or set TMA_BOT_TOKEN."))
}
