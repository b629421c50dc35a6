//! Rookery CLI - Main entry point
//!
//! Thin terminal front end over the browser core. All interesting behavior
//! (caching, filtering, pagination, location encoding) lives in the library
//! crates; this binary just renders snapshots and profiles as text.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rookery_data::ChessComClient;
use rookery_foundation::{format_date, format_elapsed, now_unix, BrowseConfig};
use rookery_view::{DetailReturn, ViewController, DEFAULT_PAGE_SIZE};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Rookery - titled-player directory browser
#[derive(Parser, Debug)]
#[command(name = "rookery")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the remote service
    #[arg(long)]
    base_url: Option<String>,

    /// Title code of the collection (e.g. GM, IM, WGM)
    #[arg(long)]
    title: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the directory, one page at a time
    List {
        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Case-insensitive substring filter on usernames
        #[arg(short, long, default_value = "")]
        search: String,

        /// Items per page (snapped to 12, 24, 48 or 96)
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// Resume from a bookmarked location query string instead of flags
        #[arg(long)]
        location: Option<String>,
    },

    /// Show one player's profile
    Show {
        /// Username as listed in the directory
        username: String,

        /// List page this detail view was entered from (for back navigation)
        #[arg(long, default_value_t = 1)]
        from: u32,

        /// List search this detail view was entered from
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = BrowseConfig::default();
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(title) = args.title {
        config.title = title;
    }

    let source = Arc::new(ChessComClient::from_config(&config));
    let mut controller = ViewController::new(source, &config);

    match args.command {
        Command::List {
            page,
            search,
            page_size,
            location,
        } => {
            if let Err(e) = controller.load().await {
                if e.is_retryable() {
                    anyhow::bail!("{e} (temporary failure, try again)");
                }
                return Err(e.into());
            }

            match location {
                Some(query) => {
                    let state = rookery_view::ViewState::from_query(&query);
                    controller.apply_location(&state.encode());
                }
                None => {
                    controller.set_page_size(page_size);
                    controller.set_search(search);
                    controller.set_page(page);
                }
            }

            print_list(&controller);
        }

        Command::Show {
            username,
            from,
            search,
        } => {
            let profile = controller.profile(&username).await?;
            print_profile(&profile);

            let back = DetailReturn { from, search };
            let back_query = back.to_view_state(DEFAULT_PAGE_SIZE).to_query();
            if back_query.is_empty() {
                println!("\nBack to list: /");
            } else {
                println!("\nBack to list: /?{}", back_query);
            }
        }
    }

    Ok(())
}

fn print_list(controller: &ViewController) {
    let snap = controller.snapshot();

    if snap.total_items == 0 {
        println!("No players match.");
        return;
    }

    for username in &snap.items {
        println!("{username}");
    }

    println!(
        "\nPage {} of {} ({}-{} of {})",
        snap.state.page, snap.total_pages, snap.start_index, snap.end_index, snap.total_items
    );

    let query = snap.state.to_query();
    if !query.is_empty() {
        println!("Location: /?{}", query);
    }
}

fn print_profile(profile: &rookery_data::PlayerProfile) {
    let now = now_unix();

    println!("{}", profile.display_name());
    println!("@{}", profile.username);
    if let Some(title) = &profile.title {
        println!("Title:       {title}");
    }
    println!("Status:      {}", profile.status);
    println!("Followers:   {}", profile.followers);
    println!("Joined:      {}", format_date(profile.joined));
    println!(
        "Last online: {} ({} ago)",
        format_date(profile.last_online),
        format_elapsed(profile.last_online, now)
    );
    if let Some(location) = &profile.location {
        println!("Location:    {location}");
    }
    if let Some(fide) = profile.fide {
        println!("FIDE:        {fide}");
    }
    if let Some(twitch) = &profile.twitch_url {
        println!("Twitch:      {twitch}");
    }
    println!("Profile:     {}", profile.url);
}
