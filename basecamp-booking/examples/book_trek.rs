// basecamp-booking/examples/book_trek.rs
// Book a trek end to end against a running backend.
// Requires a saved session (run the otp_login example first).

use basecamp_booking::{AutoApproveGateway, BookingFlow, BookingForm, SubmitOutcome};
use basecamp_client::{ClientConfig, FileSessionStore, SessionManager};
use chrono::NaiveDate;
use shared::models::PaymentMethod;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 5 {
        println!(
            "Usage: {} <base_url> <slug> <travel_date> <travelers> [online|offline]",
            args[0]
        );
        println!(
            "  Example: {} http://localhost:5000 annapurna-base-camp 2026-11-05 3 offline",
            args[0]
        );
        return Ok(());
    }

    let base_url = &args[1];
    let slug = &args[2];
    let travel_date: NaiveDate = args[3].parse()?;
    let travelers: u32 = args[4].parse()?;
    let payment_method = match args.get(5).map(String::as_str) {
        Some("offline") => PaymentMethod::Offline,
        _ => PaymentMethod::Online,
    };

    let session_dir =
        std::env::var("BASECAMP_SESSION_DIR").unwrap_or_else(|_| "./session".to_string());

    let client = ClientConfig::new(base_url).build()?;
    let store = FileSessionStore::new(&session_dir);
    let session = SessionManager::hydrate(client.clone(), store);
    let Some(user) = session.current_user() else {
        anyhow::bail!("No saved session; sign in first");
    };
    tracing::info!("Booking as customer {}", user.id);

    let package = client.package_by_slug(slug).await?;
    let mut form = BookingForm::prefill_from(user);
    form.travel_date = Some(travel_date);
    form.travelers = travelers;
    form.payment_method = payment_method;
    tracing::info!(
        "{} for {} traveler(s), total {}",
        package.name,
        travelers,
        shared::format(form.total(package.price), shared::BASE_CURRENCY)
    );

    let mut flow = BookingFlow::new(client, AutoApproveGateway);
    match flow.submit(Some(user), &form, &package).await? {
        SubmitOutcome::Confirmed(booking) => {
            println!("Booking {} registered, pay at the office", booking.id);
        }
        SubmitOutcome::Paid { booking, payment } => {
            println!("Booking {} paid, payment {}", booking.id, payment.id);
        }
        SubmitOutcome::CheckoutDismissed { booking } => {
            println!("Checkout closed, booking {} is held for you", booking.id);
        }
    }

    Ok(())
}
