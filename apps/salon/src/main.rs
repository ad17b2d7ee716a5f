use chrono::{Duration, Local};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_cell::SpecialistSelection;
use localization_cell::{translate_fields, AuthoringForm};
use salon_app::{seed_demo_data, SalonError};
use shared_config::AppConfig;
use shared_models::{BookingStatus, Language, TimeOfDay};
use specialist_cell::ScheduleDecision;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting salon booking demo");

    let config = AppConfig::from_env();
    let now = Local::now().naive_local();
    let today = now.date();

    let (mut state, ids) = seed_demo_data(config, today)?;
    let en = state.localizer(Language::En);

    // Browse: the first day of the coming week with something free for a facial
    let service = state
        .catalog()
        .get(ids.facial_cleansing)
        .ok_or(booking_cell::BookingError::ServiceNotFound(ids.facial_cleansing))?
        .clone();
    info!(
        "{} - {}",
        en.lt(&service.name),
        en.t("bookingDurationInfo", &[("duration", &service.duration_minutes.to_string())])
    );

    let mut choice = None;
    for offset in 2..9 {
        let day = today + Duration::days(offset);
        let slots = state.available_slots(service.id, SpecialistSelection::Any, day, TimeOfDay::Any)?;
        if let Some(first) = slots.first() {
            info!("{}: {} free slots with {}", day, slots.len(), en.t("anySpecialist", &[]));
            choice = Some((day, *first));
            break;
        }
        info!("{}: {}", day, en.t("noAvailableSlots", &[]));
    }

    // Book with "any specialist", then try to cancel
    if let Some((day, time)) = choice {
        let booking = state.book(ids.customer, service.id, SpecialistSelection::Any, day, time)?;
        let specialist = state.directory().require(booking.specialist_id)?;
        info!(
            "{}",
            en.t(
                "bookingConfirmed",
                &[
                    ("specialist", specialist.name.as_str()),
                    ("date", &booking.date.to_string()),
                    ("time", &booking.time.to_string()),
                ],
            )
        );

        // Within the notice window the proposal is refused
        let late = booking.starts_at() - Duration::hours(2);
        if let Err(err) = state.propose_cancellation(ids.customer, booking.id, late) {
            warn!("Two hours before the start: {}", err);
        }

        match state.propose_cancellation(ids.customer, booking.id, now) {
            Ok(proposal) => {
                info!("{}", en.t("confirmCancellation", &[]));
                let cancelled = state.confirm_cancellation(ids.customer, proposal, now)?;
                info!("Booking {} is now {}", cancelled.id, cancelled.status);
            }
            Err(SalonError::Booking(err)) => warn!("{}: {}", en.t("cancellationPolicy", &[]), err),
            Err(err) => return Err(err.into()),
        }
    } else {
        warn!("{}", en.t("noAvailableSlots", &[]));
    }

    // Complete the past visit and review it
    let past = state
        .bookings()
        .history_for_user(ids.customer, now)
        .into_iter()
        .find(|b| !b.review_submitted && b.status == BookingStatus::Completed)
        .map(|b| b.id);
    if let Some(booking_id) = past {
        let review_id = state.submit_review(ids.customer, booking_id, 5, "Lovely as always")?;
        info!("Review {} waiting for moderation", review_id);
    }

    let rating = state.approve_review(ids.admin, ids.marko, ids.pending_review)?;
    info!("Marko Ivanović is now rated {:.1}", rating);

    // Schedule change request, approved by the admin
    if let Some(request_id) = ids.schedule_request {
        let resolved = state.resolve_schedule_request(ids.admin, request_id, ScheduleDecision::Approve)?;
        let declared = state
            .directory()
            .require(resolved.specialist_id)?
            .work_schedule
            .slots_on(resolved.date)
            .map(|slots| slots.len())
            .unwrap_or_default();
        info!(
            "Request {} {}: {} now has {} slots on {}",
            resolved.id, resolved.status, resolved.specialist_name, declared, resolved.date
        );
    }

    // Translation assist for a new service description
    let translator = state.translator();
    let mut form = AuthoringForm::new();
    let applied = translate_fields(
        &mut form,
        &translator,
        Language::Sr,
        &[("name", "Masaža lica"), ("description", "Opuštajuća masaža lica.")],
    )
    .await;
    if let Some(name) = form.field("name") {
        info!("Translated {} fields, name in English: {}", applied, name.en);
    }

    info!("Demo finished");
    Ok(())
}
