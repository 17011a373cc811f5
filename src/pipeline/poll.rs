// src/pipeline/poll.rs

//! Poll pipeline.
//!
//! For each configured topic: search, diff against the seen state, fetch
//! details for new identifiers, notify, and persist after every article.

use tokio::time::{Duration, Instant, sleep};

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::diff::new_identifiers;
use crate::services::{DiscordNotifier, PubmedClient};
use crate::storage::CacheStore;

/// Minimum wall-clock time spent per topic. Paces requests to the upstream
/// service; not a failure backoff.
const TOPIC_FLOOR: Duration = Duration::from_millis(500);

/// Run one full poll over all configured topics.
///
/// Network failures are logged and replaced with empty results; the loop
/// always drains every topic. Only state-file writes can abort the run.
pub async fn run_poll(
    config: &Config,
    store: &CacheStore,
    pubmed: &PubmedClient,
    notifier: &DiscordNotifier,
) -> Result<()> {
    let mut state = store.load_state(&config.topics).await?;

    log::info!(
        "Starting search for topics: {}",
        config.topics.join(", ")
    );
    log::info!("Max search results set to {}", config.max_search);

    for topic in &config.topics {
        let started = Instant::now();

        let pmids = match pubmed.search(topic, config.max_search).await {
            Ok(ids) => ids,
            Err(error) => {
                log::error!("{error}");
                store.append_error_line(&error.to_string()).await?;
                Vec::new()
            }
        };

        state.ensure_topic(topic);
        let new_pmids = new_identifiers(&state, topic, &pmids);
        store.append_run_line(topic, &new_pmids).await?;

        if new_pmids.is_empty() {
            log::info!("{topic}: no new articles found");
        } else {
            log::info!("{topic}: found {} new articles", new_pmids.len());

            let articles = match pubmed.fetch_details(&new_pmids).await {
                Ok(articles) => articles,
                Err(error) => {
                    log::error!("{error}");
                    store.append_error_line(&error.to_string()).await?;
                    Vec::new()
                }
            };

            for article in articles {
                let pmid = article.pmid.clone();

                // Persist before the notification attempt so a crash or hang
                // in the webhook call never causes a re-fetch of this id.
                state.record(topic, article.clone());
                store.save_state(&state).await?;

                let display_name = format!("{} - {}", config.username, topic);
                match notifier.send(&article, &display_name).await {
                    Ok(true) => log::info!("Embed sent {pmid} to Discord webhook"),
                    Ok(false) => {
                        log::warn!("Discord webhook URL is not set in the config file")
                    }
                    Err(error) => {
                        log::error!("{error}");
                        store.append_error_line(&error.to_string()).await?;
                    }
                }
            }
        }

        let elapsed = started.elapsed();
        if elapsed < TOPIC_FLOOR {
            sleep(TOPIC_FLOOR - elapsed).await;
        }
    }

    Ok(())
}
