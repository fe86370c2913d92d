use gomach::config::Settings;
use gomach::core::CompatibilityFilter;
use gomach::models::Sender;
use gomach::seed;
use gomach::services::{ChatConfig, ChatSimulator, ProfileStore, Session};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        Settings::default()
    });

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }

    info!("Starting Gomach core demo...");

    let store = match ProfileStore::from_settings(&settings.storage) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open storage ({}), running in memory", e);
            Arc::new(ProfileStore::in_memory())
        }
    };

    // Restore or create the signed-in user
    let filter = CompatibilityFilter::from_settings(&settings.matching);
    let mut session = Session::bootstrap(Arc::clone(&store));
    if !session.is_authenticated() {
        if let Err(e) = session.onboard("ゲスト", filter.default_area(), filter.groups()) {
            warn!("Onboarding failed: {}", e);
        }
    }

    let result = filter.find_matches_from_store(&store, &seed::match_pool());
    info!(
        "{} of {} candidates visible",
        result.matches.len(),
        result.total_candidates
    );

    match serde_json::to_string_pretty(&result.matches) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize matches: {}", e),
    }

    // Exercise the simulated chat with the first visible match
    let Some(first) = result.matches.first() else {
        return;
    };

    let chat = ChatSimulator::new(
        Arc::clone(&store),
        ChatConfig::from(&settings.chat),
        tokio::runtime::Handle::current(),
    );
    let thread_id = first.candidate.id.clone();

    if let Err(e) = chat.send(&thread_id, seed::QUICK_MESSAGES[0].1[0], Sender::User) {
        warn!("Send failed: {}", e);
        return;
    }

    tokio::time::sleep(settings.chat.reply_delay() + std::time::Duration::from_millis(100)).await;

    for message in chat.thread(&thread_id) {
        info!("[{:?}] {}", message.sender, message.text);
    }
}
