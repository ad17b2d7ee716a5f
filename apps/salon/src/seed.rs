use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::{debug, info};
use uuid::Uuid;

use booking_cell::SpecialistSelection;
use catalog_cell::{PromoPeriod, PublicationDraft, PublicationKind, ServiceDraft};
use shared_config::AppConfig;
use shared_models::{Booking, BookingStatus, LocalizedString, ModelError, SlotTime, User};
use specialist_cell::{Review, Specialist, WorkSchedule};

use crate::error::SalonError;
use crate::state::SalonState;

const ANNA_WEEKDAY: [&str; 6] = ["08:00", "09:00", "10:00", "11:00", "12:00", "13:00"];
const ANNA_SATURDAY: [&str; 5] = ["08:00", "09:00", "10:00", "11:00", "12:00"];
const MARKO_WEEKDAY: [&str; 7] = ["13:00", "14:00", "15:00", "16:00", "17:00", "18:00", "19:00"];

/// Ids of the demo records, for walkthroughs and tests.
#[derive(Debug, Clone)]
pub struct SeedHandles {
    pub customer: Uuid,
    pub admin: Uuid,
    pub anna_user: Uuid,
    pub marko_user: Uuid,
    pub anna: Uuid,
    pub marko: Uuid,
    pub facial_cleansing: Uuid,
    pub peeling: Uuid,
    pub back_massage: Uuid,
    pub anti_cellulite: Uuid,
    pub pending_review: Uuid,
    pub schedule_request: Option<Uuid>,
    pub upcoming_booking: Option<Uuid>,
}

fn slots(times: &[&str]) -> Result<Vec<SlotTime>, ModelError> {
    times.iter().map(|t| t.parse()).collect()
}

/// Working days of the month containing `today`. Sundays are off; Marko
/// does not work Saturdays.
fn month_schedules(today: NaiveDate) -> Result<(WorkSchedule, WorkSchedule), ModelError> {
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
        .ok_or_else(|| ModelError::InvalidDate(today.to_string()))?;
    let (anna_weekday, anna_saturday, marko_weekday) =
        (slots(&ANNA_WEEKDAY)?, slots(&ANNA_SATURDAY)?, slots(&MARKO_WEEKDAY)?);

    let mut anna = WorkSchedule::new();
    let mut marko = WorkSchedule::new();
    for day in first.iter_days().take_while(|d| d.month() == today.month()) {
        match day.weekday() {
            Weekday::Sun => {}
            Weekday::Sat => anna = anna.with_day(day, anna_saturday.clone()),
            _ => {
                anna = anna.with_day(day, anna_weekday.clone());
                marko = marko.with_day(day, marko_weekday.clone());
            }
        }
    }
    Ok((anna, marko))
}

fn service_draft(
    name: LocalizedString,
    description: LocalizedString,
    category: LocalizedString,
    price: u32,
    duration_minutes: u32,
    specialist: Uuid,
    image: &str,
) -> ServiceDraft {
    ServiceDraft {
        name,
        description,
        category,
        price,
        duration_minutes,
        specialist_ids: vec![specialist],
        image: Some(image.to_string()),
    }
}

/// Build a salon with two specialists, four services, a few reviews and
/// publications, one past and one upcoming booking, and a pending schedule
/// request. Schedules cover the month of `today`.
pub fn seed_demo_data(config: AppConfig, today: NaiveDate) -> Result<(SalonState, SeedHandles), SalonError> {
    let mut state = SalonState::new(config);

    let customer = state.add_user(User::customer("Elena", "testuser", "+79123456789"));
    let admin = state.add_user(User::admin("Admin", "admin", "+79999999999"));

    let (anna_schedule, marko_schedule) = month_schedules(today)?;

    let anna_review = Review::new(customer, None, 5, "Amazing service, Dr. Petrova is very professional!")?.approved();
    let anna = state.add_specialist(
        admin,
        Specialist::new(
            "Dr. Anna Petrova",
            LocalizedString::new(
                "Ведущий косметолог с 10-летним опытом.",
                "Leading cosmetologist with 10 years of experience.",
                "Водећи козметолог са 10 година искуства.",
            ),
            "anna_pass",
        )
        .with_avatar("https://picsum.photos/id/1027/200/200")
        .with_schedule(anna_schedule)
        .with_reviews(vec![anna_review]),
    )?;

    let pending_review = Review::new(customer, None, 4, "Good massage, but the room was a bit cold.")?;
    let pending_review_id = pending_review.id;
    let marko = state.add_specialist(
        admin,
        Specialist::new(
            "Marko Ivanović",
            LocalizedString::new(
                "Специалист по массажу и спа-процедурам.",
                "Specialist in massage and spa treatments.",
                "Специјалиста за масажу и спа третмане.",
            ),
            "marko_pass",
        )
        .with_avatar("https://picsum.photos/id/1005/200/200")
        .with_schedule(marko_schedule)
        .with_reviews(vec![
            pending_review,
            Review::new(customer, None, 5, "Marko is the best masseur in town!")?.approved(),
        ]),
    )?;

    let anna_user = state.add_user(User::specialist("Dr. Anna Petrova", "dr_anna", "+79876543210", anna));
    let marko_user = state.add_user(User::specialist("Marko Ivanović", "marko_masseur", "+38161234567", marko));

    let cosmetology = LocalizedString::new("Косметология", "Cosmetology", "Козметологија");
    let massage = LocalizedString::new("Массаж", "Massage", "Масажа");

    let facial_cleansing = state.add_service(
        admin,
        service_draft(
            LocalizedString::new("Чистка лица", "Facial Cleansing", "Чишћење лица"),
            LocalizedString::new(
                "Глубокое очищение кожи лица.",
                "Deep cleansing of the facial skin.",
                "Дубинско чишћење коже лица.",
            ),
            cosmetology.clone(),
            3000,
            60,
            anna,
            "https://picsum.photos/id/103/400/300",
        ),
    )?;
    let peeling = state.add_service(
        admin,
        service_draft(
            LocalizedString::new("Пилинг", "Peeling", "Пилинг"),
            LocalizedString::new(
                "Химический пилинг для обновления кожи.",
                "Chemical peel for skin renewal.",
                "Хемијски пилинг за обнову коже.",
            ),
            cosmetology,
            4500,
            45,
            anna,
            "https://picsum.photos/id/201/400/300",
        ),
    )?;
    let back_massage = state.add_service(
        admin,
        service_draft(
            LocalizedString::new("Массаж спины", "Back Massage", "Масажа леђа"),
            LocalizedString::new(
                "Классический расслабляющий массаж спины.",
                "Classic relaxing back massage.",
                "Класична опуштајућа масажа леђа.",
            ),
            massage.clone(),
            2500,
            50,
            marko,
            "https://picsum.photos/id/145/400/300",
        ),
    )?;
    let anti_cellulite = state.add_service(
        admin,
        service_draft(
            LocalizedString::new("Антицеллюлитный массаж", "Anti-cellulite Massage", "Антицелулит масажа"),
            LocalizedString::new(
                "Интенсивный массаж для коррекции фигуры.",
                "Intensive massage for body shaping.",
                "Интензивна масажа за обликовање тела.",
            ),
            massage,
            3500,
            60,
            marko,
            "https://picsum.photos/id/31/400/300",
        ),
    )?;

    state.publish(
        admin,
        PublicationDraft {
            kind: PublicationKind::News,
            title: LocalizedString::new(
                "Новый аппарат для лазерной эпиляции",
                "New device for laser hair removal",
                "Нови апарат за ласерску епилацију",
            ),
            content: LocalizedString::new(
                "Мы рады сообщить о поступлении нового диодного лазера...",
                "We are pleased to announce the arrival of a new diode laser...",
                "Са задовољством објављујемо долазак новог диодног ласера...",
            ),
            image: Some("https://picsum.photos/id/431/400/300".to_string()),
            publish_date: today - Duration::days(5),
            promo_period: None,
        },
    )?;
    state.publish(
        admin,
        PublicationDraft {
            kind: PublicationKind::Promotion,
            title: LocalizedString::new(
                "Скидка 20% на все виды массажа",
                "20% discount on all types of massage",
                "20% попуста на све врсте масажа",
            ),
            content: LocalizedString::new(
                "Только до конца месяца! Запишитесь на любой массаж и получите скидку 20%.",
                "Only until the end of the month! Book any massage and get a 20% discount.",
                "Само до краја месеца! Резервишите било коју масажу и остварите 20% попуста.",
            ),
            image: Some("https://picsum.photos/id/211/400/300".to_string()),
            publish_date: today,
            promo_period: Some(PromoPeriod {
                start: today,
                end: today + Duration::days(21),
            }),
        },
    )?;

    let ten = SlotTime::new(10, 0)?;
    state.restore_bookings(vec![Booking {
        id: Uuid::new_v4(),
        user_id: customer,
        service_id: facial_cleansing.id,
        specialist_id: anna,
        date: today - Duration::days(30),
        time: ten,
        status: BookingStatus::Completed,
        review_submitted: false,
    }]);

    // Marko's next working day after tomorrow, if it falls in the seeded month.
    let next_marko_day = state
        .directory()
        .require(marko)?
        .work_schedule
        .dates()
        .copied()
        .find(|day| *day > today + Duration::days(1));

    let upcoming_booking = match next_marko_day {
        Some(day) => {
            let booking = state.book(
                customer,
                back_massage.id,
                SpecialistSelection::Specific(marko),
                day,
                SlotTime::new(14, 0)?,
            )?;
            Some(booking.id)
        }
        None => {
            debug!("No working day left this month, skipping the upcoming booking");
            None
        }
    };

    let schedule_request = match next_marko_day {
        Some(day) => Some(
            state
                .submit_schedule_request(
                    marko_user,
                    day + Duration::days(1),
                    "10:00, 11:00, 12:00, 14:00, 15:00",
                    "Need to adjust my schedule for a personal appointment in the afternoon.",
                )?
                .id,
        ),
        None => None,
    };

    info!(
        "Seeded {} specialists, {} services, {} bookings",
        state.directory().all().len(),
        state.catalog().all().len(),
        state.bookings().all().len()
    );

    Ok((
        state,
        SeedHandles {
            customer,
            admin,
            anna_user,
            marko_user,
            anna,
            marko,
            facial_cleansing: facial_cleansing.id,
            peeling: peeling.id,
            back_massage: back_massage.id,
            anti_cellulite: anti_cellulite.id,
            pending_review: pending_review_id,
            schedule_request,
            upcoming_booking,
        },
    ))
}
