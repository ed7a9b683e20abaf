//! Config command handler.

use anyhow::Result;
use techsphere_core::{Settings, SettingsUpdate, format_price};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::presentation::format_optional;

/// Execute the config command.
pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let settings = ctx.settings_service().get().await?;
            print_settings(&settings);
        }
        ConfigCommand::Set {
            session_key,
            flat_shipping,
            tax_rate,
            max_concurrent_uploads,
            progress_interval_ms,
            public_base_url,
            clear_public_base_url,
            currency,
        } => {
            let update = SettingsUpdate {
                session_key: session_key.map(Some),
                flat_shipping: flat_shipping.map(Some),
                tax_rate: tax_rate.map(Some),
                max_concurrent_uploads: max_concurrent_uploads.map(Some),
                progress_interval_ms: progress_interval_ms.map(Some),
                public_base_url: if clear_public_base_url {
                    Some(None)
                } else {
                    public_base_url.map(Some)
                },
                currency: currency.map(Some),
            };
            let settings = ctx.settings_service().update(update).await?;
            println!("✓ Settings updated.");
            print_settings(&settings);
        }
        ConfigCommand::Reset { force } => {
            if !force {
                println!("This resets every storefront setting to its default.");
                println!("Re-run with --force to confirm.");
                return Ok(());
            }
            let settings = ctx.settings_service().reset().await?;
            println!("✓ Settings reset to defaults.");
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    let currency = settings.effective_currency();
    let policy = settings.checkout_policy();
    println!("Current storefront settings:");
    println!("  session_key:            {}", settings.effective_session_key());
    println!(
        "  flat_shipping:          {}",
        format_price(policy.flat_shipping, currency)
    );
    println!("  tax_rate:               {}", policy.tax_rate);
    println!(
        "  max_concurrent_uploads: {}",
        settings.effective_max_concurrent_uploads()
    );
    println!(
        "  progress_interval_ms:   {}",
        settings.effective_progress_interval().as_millis()
    );
    println!(
        "  public_base_url:        {}",
        format_optional(settings.public_base_url.as_ref(), "(local uploads directory)")
    );
    println!("  currency:               {}", currency.code());
}
