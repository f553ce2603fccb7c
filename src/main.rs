use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use rustls::crypto::ring::default_provider;
use rustls::crypto::CryptoProvider;
use tokio::time::timeout;
use tracing::{info, warn};

use character_roster::{
    fetch_detail, Character, CharacterDetail, Config, Roster, RosterClient, RosterEvent,
    SortDirection, SortDirective, SortField,
};

const DEFAULT_PAGE_GOAL: u32 = 2;
const FETCH_WAIT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "character_roster=info".into()),
        )
        .init();

    CryptoProvider::install_default(default_provider())
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    let config = Config::from_env()?;
    let client = RosterClient::new(config.api_url.clone(), config.request_timeout)?;
    let roster = Roster::new(client.clone());

    let page_goal = env::var("ROSTER_PAGES")
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE_GOAL);

    let mut events = roster.subscribe();
    let mut fetched = 0u32;
    while fetched < page_goal {
        if !roster.ensure_next().await {
            info!(fetched, "collection exhausted");
            break;
        }
        match timeout(FETCH_WAIT, events.recv()).await {
            Ok(Ok(RosterEvent::PageLoaded(page))) => {
                info!(page, "page loaded");
                fetched += 1;
            }
            Ok(Ok(RosterEvent::PageFailed(page))) => {
                warn!(page, "page failed; stopping early");
                break;
            }
            Ok(Err(_)) => break,
            Err(_) => return Err(anyhow!("timed out waiting for page {}", fetched + 1)),
        }
    }

    if let Ok(value) = env::var("ROSTER_SORT") {
        match parse_sort(&value) {
            Some(directive) => roster.set_sort(directive).await,
            None => warn!(sort = %value, "unrecognized sort; keeping fetch order"),
        }
    }

    // Auto mode shows the whole ordered view.
    roster.toggle_mode().await;

    let snapshot = roster.snapshot().await;
    if let Some(error) = &snapshot.error {
        warn!(%error, "finished with a failed page");
    }
    info!(total = snapshot.entities.len(), "roster ready");
    print_table(snapshot.visible_slice());

    if let Some(id) = env::var("ROSTER_DETAIL")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    {
        let detail = fetch_detail(&client, id)
            .await
            .context("Failed to fetch character detail")?;
        print_detail(&detail);
    }

    Ok(())
}

fn parse_sort(value: &str) -> Option<SortDirective> {
    let mut parts = value.splitn(2, ':');
    let field = parts.next().unwrap_or("").trim().to_ascii_lowercase();
    let direction = match parts.next().map(|part| part.trim().to_ascii_lowercase()) {
        Some(part) if part == "desc" || part == "descending" => SortDirection::Descending,
        _ => SortDirection::Ascending,
    };
    let field = match field.as_str() {
        "none" | "" => None,
        "name" => Some(SortField::Name),
        "status" => Some(SortField::Status),
        "species" => Some(SortField::Species),
        "gender" => Some(SortField::Gender),
        "origin" => Some(SortField::Origin),
        "created" => Some(SortField::Created),
        _ => return None,
    };
    Some(SortDirective { field, direction })
}

fn print_table(characters: &[Character]) {
    println!(
        "{:<4} {:<28} {:<10} {:<16} {:<20} {}",
        "ID", "NAME", "STATUS", "SPECIES", "ORIGIN", "CREATED"
    );
    for character in characters {
        println!(
            "{:<4} {:<28} {:<10} {:<16} {:<20} {}",
            character.id,
            character.name,
            character.status,
            character.species,
            character.origin.display_name(),
            character.created.format("%Y-%m-%d"),
        );
    }
}

fn print_detail(detail: &CharacterDetail) {
    println!();
    println!(
        "{} - {} {} ({})",
        detail.character.name,
        detail.character.status,
        detail.character.species,
        detail.character.gender
    );
    println!("origin:   {}", detail.character.origin.display_name());
    println!("location: {}", detail.character.location.display_name());
    println!("episodes:");
    for episode in &detail.episodes {
        println!(
            "  {:<8} {} ({})",
            episode.episode, episode.name, episode.air_date
        );
    }
}
