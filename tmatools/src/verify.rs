use anyhow::{anyhow, Result};
use log::debug;
use tma_auth::{token_from_header, TmaValidator, ValidationResult, ValidatorConfig};

use crate::{bot_token, VerifyParams};

pub fn print_verification(params: VerifyParams) -> Result<()> {
    let config = ValidatorConfig::new(bot_token(params.bot_token.clone())?)?
        .with_max_age(params.max_age)
        .with_allows_write_to_pm(params.allows_write_to_pm);
    let validator = TmaValidator::new(config);
    let raw = token_from_header(params.init_data.trim()).unwrap_or(params.init_data.trim());
    debug!("Verifying {raw}");
    match validator.validate(raw) {
        ValidationResult::Success(identity) => {
            println!("----------------------------- Valid init data -----------------------------");
            for (name, value) in identity.claims() {
                println!("{name:<20}: {value}");
            }
            println!("---------------------------------------------------------------------------");
            Ok(())
        },
        ValidationResult::Failure(reason) => Err(anyhow!("❌️ Invalid init data. {reason}")),
        ValidationResult::NotAttempted => Err(anyhow!("No init data was given")),
    }
}
