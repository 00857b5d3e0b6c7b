// basecamp-client/examples/otp_login.rs
// OTP sign-in against a running backend

use basecamp_client::{ClientConfig, FileSessionStore, SessionManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <base_url> <phone>", args[0]);
        println!("  Example: {} http://localhost:5000 9999999999", args[0]);
        return Ok(());
    }

    let base_url = &args[1];
    let phone = &args[2];

    let session_dir =
        std::env::var("BASECAMP_SESSION_DIR").unwrap_or_else(|_| "./session".to_string());

    let client = ClientConfig::new(base_url).build()?;
    let store = FileSessionStore::new(&session_dir);
    let mut session = SessionManager::hydrate(client.clone(), store);

    if let Some(user) = session.current_user() {
        tracing::info!("Already signed in as {}", user.id);
        return Ok(());
    }

    let challenge = session.send_login_otp(phone).await?;
    tracing::info!("OTP sent, challenge id: {}", challenge.otp_id);

    println!("Enter the OTP code:");
    let mut code = String::new();
    std::io::stdin().read_line(&mut code)?;

    let user = session
        .verify_login_otp(&challenge.otp_id, code.trim())
        .await?;
    tracing::info!("Signed in as customer {}", user.id);

    let bookings = client.my_bookings().await?;
    tracing::info!("You have {} booking(s)", bookings.len());

    Ok(())
}
