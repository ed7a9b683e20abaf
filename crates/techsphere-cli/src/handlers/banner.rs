//! Banner command handler.

use anyhow::Result;
use chrono::Utc;
use techsphere_core::{Banner, BannerDraft};

use crate::bootstrap::CliContext;
use crate::commands::{BannerAddArgs, BannerCommand, BannerEditArgs};
use crate::handlers::assets::resolve_source;
use crate::presentation::{print_separator, truncate_string};

/// Execute a banner command.
pub async fn execute(ctx: &CliContext, command: BannerCommand) -> Result<()> {
    match command {
        BannerCommand::Add(args) => add(ctx, args).await,
        BannerCommand::Edit(args) => edit(ctx, args).await,
        BannerCommand::Delete { id } => {
            ctx.cms().delete::<Banner>(&id).await?;
            println!("✓ Deleted banner {id}");
            Ok(())
        }
        BannerCommand::List { active } => list(ctx, active).await,
    }
}

async fn add(ctx: &CliContext, args: BannerAddArgs) -> Result<()> {
    let draft = BannerDraft {
        alt_text: args.alt,
        link_url: args.link,
        image: Some(resolve_source(&args.image).await?),
        priority: args.priority,
        start_date: args.start,
        end_date: args.end,
    };

    let banner = ctx.cms().submit(draft, None).await?;
    println!("✓ Created banner {}", banner.id);
    print_banner(&banner);
    Ok(())
}

async fn edit(ctx: &CliContext, args: BannerEditArgs) -> Result<()> {
    let existing: Banner = ctx.cms().get(&args.id).await?;

    let image = match args.image {
        Some(arg) => Some(resolve_source(&arg).await?),
        None => None,
    };
    let draft = BannerDraft {
        alt_text: args.alt.unwrap_or_else(|| existing.alt_text.clone()),
        link_url: args.link.unwrap_or_else(|| existing.link_url.clone()),
        image,
        priority: args.priority,
        start_date: args.start,
        end_date: args.end,
    };

    let banner = ctx.cms().submit(draft, Some(&existing)).await?;
    println!("✓ Updated banner {}", banner.id);
    print_banner(&banner);
    Ok(())
}

async fn list(ctx: &CliContext, active_only: bool) -> Result<()> {
    let now = Utc::now();
    let mut banners: Vec<Banner> = ctx.cms().list().await?;
    if active_only {
        banners.retain(|b| b.is_active_at(now));
    }
    // Highest priority first; stable, so ties keep creation order.
    banners.sort_by(|a, b| b.priority.cmp(&a.priority));

    if banners.is_empty() {
        println!("No banners found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<24} {:>8} {:<10} {:<10} {:<6}",
        "ID", "Alt text", "Priority", "Start", "End", "Active"
    );
    print_separator(101);
    for banner in &banners {
        println!(
            "{:<38} {:<24} {:>8} {:<10} {:<10} {:<6}",
            banner.id,
            truncate_string(&banner.alt_text, 24),
            banner.priority,
            banner.start_date.format("%Y-%m-%d"),
            banner.end_date.format("%Y-%m-%d"),
            if banner.is_active_at(now) { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn print_banner(banner: &Banner) {
    println!("  id:       {}", banner.id);
    println!("  alt:      {}", banner.alt_text);
    println!("  link:     {}", banner.link_url);
    println!("  image:    {}", banner.image_url);
    println!("  priority: {}", banner.priority);
    println!(
        "  window:   {} .. {}",
        banner.start_date.to_rfc3339(),
        banner.end_date.to_rfc3339()
    );
}
