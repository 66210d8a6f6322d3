use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::Serialize;
use tma_auth::{BotSecret, InitDataBuilder};

use crate::{bot_token, SignParams};

#[derive(Serialize)]
struct User<'a> {
    id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_premium: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    allows_write_to_pm: bool,
}

pub fn print_signed_init_data(params: SignParams) -> Result<()> {
    let secret = BotSecret::new(bot_token(params.bot_token.clone())?)?;
    let auth_date = params.auth_date.unwrap_or_else(|| Utc::now().timestamp());
    let user = User {
        id: params.id,
        username: params.username.as_deref(),
        first_name: params.first_name.as_deref(),
        last_name: params.last_name.as_deref(),
        language_code: params.language_code.as_deref(),
        is_premium: params.is_premium,
        allows_write_to_pm: params.allows_write_to_pm,
    };
    let mut builder = InitDataBuilder::new(auth_date).user(&user)?;
    for field in &params.fields {
        let (key, value) = parse_field(field)?;
        builder = builder.field(key, value);
    }
    let init_data = builder.sign(&secret);
    println!("----------------------------- Init Data -----------------------------");
    println!("auth_date    : {auth_date}");
    println!("hash         : {}", builder.hash(&secret));
    println!("init data    : {init_data}");
    println!("Authorization: tma {init_data}");
    println!("---------------------------------------------------------------------");
    Ok(())
}

fn parse_field(field: &str) -> Result<(&str, &str)> {
    field
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| anyhow!("Extra fields must look like key=value. Got '{field}'"))
}
