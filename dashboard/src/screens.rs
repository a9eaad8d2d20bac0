//! List screens of the dashboard.
//!
//! Each screen is a [`Store`] over the shared list reducer, wired to the
//! remote API through [`ApiSource`]. The conference schedule additionally
//! loads the participant's reservations as flags and renders date sections.

use crate::client::{ApiSource, DashboardClient, ReservationFlags, Resource};
use crate::error::ApiError;
use crate::types::{Conference, Exhibitor, Organizer, Room};
use chrono::NaiveDate;
use expo_admin_core::Filterable;
use expo_admin_core::view::{ListAction, ListEnvironment, ListReducer, ListState};
use expo_admin_runtime::Store;
use std::sync::Arc;

/// Store driving one list screen
pub type ListStore<T> = Store<ListState<T>, ListAction<T>, ListEnvironment<T>, ListReducer<T>>;

/// Conference schedule screen
pub type ConferenceStore = ListStore<Conference>;
/// Exhibitor table screen
pub type ExhibitorStore = ListStore<Exhibitor>;
/// Organizer table screen
pub type OrganizerStore = ListStore<Organizer>;
/// Room table screen
pub type RoomStore = ListStore<Room>;

/// Store for a flat table screen over `T`'s collection
#[must_use]
pub fn table_store<T>(client: &DashboardClient, page_size: usize) -> ListStore<T>
where
    T: Resource + Filterable<Key = String> + Sync,
{
    let env = ListEnvironment::<T>::new(Arc::new(ApiSource::<T>::new(client.clone())));
    Store::new(ListState::new(page_size), ListReducer::new(), env)
}

/// Store for the conference schedule.
///
/// With a participant, the participant's reservations are loaded as flags so
/// the "only show reserved" switch and the reserved badges work.
#[must_use]
pub fn conference_store(client: &DashboardClient, page_size: usize, participant_id: Option<&str>) -> ConferenceStore {
    let mut env = ListEnvironment::<Conference>::new(Arc::new(ApiSource::<Conference>::new(client.clone())));
    if let Some(participant_id) = participant_id {
        env = env.with_flags(Arc::new(ReservationFlags::new(client.clone(), participant_id)));
    }
    Store::new(ListState::new(page_size), ListReducer::new(), env)
}

/// One conference as shown in the schedule
#[derive(Clone, Debug)]
pub struct ScheduleRow<'a> {
    /// The conference
    pub conference: &'a Conference,
    /// The participant holds a seat
    pub reserved: bool,
    /// A seat can still be reserved
    pub bookable: bool,
}

/// All matching conferences of one day
#[derive(Clone, Debug)]
pub struct ScheduleDay<'a> {
    /// Show date
    pub date: NaiveDate,
    /// Conferences in fetch order
    pub rows: Vec<ScheduleRow<'a>>,
}

/// Matching conferences grouped by show date, earliest day first.
///
/// An empty result means the screen shows its "no conferences" state.
#[must_use]
pub fn schedule(state: &ListState<Conference>) -> Vec<ScheduleDay<'_>> {
    state
        .render_sections(|conference| conference.show_date)
        .into_iter()
        .map(|section| ScheduleDay {
            date: section.key,
            rows: section
                .rows
                .into_iter()
                .map(|conference| ScheduleRow {
                    conference,
                    reserved: state.flagged.contains_key(&conference.id),
                    bookable: conference.is_bookable(),
                })
                .collect(),
        })
        .collect()
}

/// Reserve or cancel a seat, then reload the schedule.
///
/// The server is the only judge of quotas and double booking; a refusal comes
/// back as [`ApiError::Conflict`] and leaves the screen untouched.
///
/// # Errors
///
/// Returns the API error of the reserve or cancel call
pub async fn toggle_reservation(
    store: &ConferenceStore,
    client: &DashboardClient,
    participant_id: &str,
    conference_id: &str,
) -> Result<(), ApiError> {
    let reserved = store
        .state(|s| s.flagged.contains_key(&conference_id.to_string()))
        .await;

    if reserved {
        client.cancel_reservation(participant_id, conference_id).await?;
    } else {
        client.reserve(participant_id, conference_id).await?;
    }

    store.send(ListAction::Load).await;
    Ok(())
}
