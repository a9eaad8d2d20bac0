//! Expo admin command-line dashboard.
//!
//! Loads the conference schedule and the exhibitor, organizer and room tables
//! for one project, then logs the first page of each.
//!
//! # Usage
//!
//! ```bash
//! EXPO_API_URL=https://expo.example/api \
//! EXPO_API_TOKEN=... EXPO_PROJECT_ID=salon-2024 \
//! EXPO_FILTER_KEYWORD=logistics \
//! cargo run --bin expo-admin
//! ```

use anyhow::Context;
use expo_admin_core::Filterable;
use expo_admin_core::view::ListAction;
use expo_admin_dashboard::config::{self, Config};
use expo_admin_dashboard::screens::{self, ListStore};
use expo_admin_dashboard::{Conference, DashboardClient, Exhibitor, Organizer, Room};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("invalid configuration")?;
    let filter = config::filter_from_lookup(|key| std::env::var(key).ok())
        .context("invalid conference filter")?;
    info!(
        api = %config.api.base_url,
        project = %config.api.project_id,
        participant = ?config.participant_id,
        "Configuration loaded"
    );

    let client = DashboardClient::new(&config.api).context("failed to build HTTP client")?;

    let conferences = screens::conference_store(&client, config.pages.conferences, config.participant_id.as_deref());
    let exhibitors = screens::table_store::<Exhibitor>(&client, config.pages.exhibitors);
    let organizers = screens::table_store::<Organizer>(&client, config.pages.organizers);
    let rooms = screens::table_store::<Room>(&client, config.pages.rooms);

    futures::join!(
        conferences.send(ListAction::Load),
        exhibitors.send(ListAction::Load),
        organizers.send(ListAction::Load),
        rooms.send(ListAction::Load),
    );

    if let Some(keyword) = filter.keyword.clone() {
        conferences.send(ListAction::SetKeyword(keyword)).await;
    }
    conferences
        .send(ListAction::SetDateRange {
            start: filter.date_start,
            end: filter.date_end,
        })
        .await;

    report_schedule(&conferences).await;
    report_table("exhibitors", &exhibitors, |e| e.company_name.clone()).await;
    report_table("organizers", &organizers, |o| o.name.clone()).await;
    report_table("rooms", &rooms, |r| r.name.clone()).await;

    Ok(())
}

async fn report_schedule(store: &ListStore<Conference>) {
    store
        .state(|state| {
            if let Some(error) = &state.last_error {
                warn!(%error, "conference schedule unavailable");
                return;
            }
            if let Some(error) = &state.flags_error {
                warn!(%error, "reservations unavailable, reserved marks may be stale");
            }
            for record in &state.records {
                if let Err(error) = record.validate() {
                    warn!(%error, "inconsistent conference record");
                }
            }

            let days = screens::schedule(state);
            if days.is_empty() {
                info!("No conferences match the current filter");
            }
            for day in days {
                info!(date = %day.date, conferences = day.rows.len(), "schedule day");
                for row in day.rows {
                    info!(
                        id = %row.conference.id,
                        title = %row.conference.title,
                        start = %row.conference.start_time.format("%H:%M"),
                        room = row.conference.location_name().unwrap_or("-"),
                        remaining = row.conference.remaining_seats,
                        reserved = row.reserved,
                        bookable = row.bookable,
                        "  conference"
                    );
                }
            }
        })
        .await;
}

async fn report_table<T, F>(name: &str, store: &ListStore<T>, label: F)
where
    T: Filterable<Key = String> + Send + Sync + 'static,
    F: Fn(&T) -> String,
{
    store
        .state(|state| {
            if let Some(error) = &state.last_error {
                warn!(table = name, %error, "table unavailable");
                return;
            }

            let page = state.render_table();
            info!(
                table = name,
                total = page.total_records,
                unique = page.unique_records,
                page = page.window.current_page,
                total_pages = page.window.total_pages,
                pages = ?page.window.pages,
                "table page"
            );
            for row in page.rows {
                info!(table = name, key = %row.key(), label = %label(row), "  row");
            }
        })
        .await;
}
