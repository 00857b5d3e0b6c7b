//! Booking form state and validation
//!
//! The form is plain local state. Validation runs before any network
//! call and reports per-field errors in wire casing so the UI can place
//! them inline. The total is never stored: it is derived from the
//! package price and traveler count at the moment it is needed.

use chrono::NaiveDate;
use shared::models::{BookingCreate, CustomerProfile, PaymentMethod, TrekPackage};
use validator::{Validate, ValidationErrors};

use crate::error::FieldError;

pub const MIN_TRAVELERS: u32 = 1;
pub const MAX_TRAVELERS: u32 = 20;

/// Booking form draft.
///
/// Lives only until submission succeeds; the server-assigned booking
/// replaces it.
#[derive(Debug, Clone, Validate)]
pub struct BookingForm {
    pub travel_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 20, message = "Traveler count must be between 1 and 20"))]
    pub travelers: u32,
    #[validate(length(max = 100, message = "Name is too long"))]
    pub customer_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub customer_email: String,
    pub customer_phone: String,
    #[validate(length(max = 500, message = "Note is too long"))]
    pub note: Option<String>,
    pub payment_method: PaymentMethod,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            travel_date: None,
            travelers: MIN_TRAVELERS,
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            note: None,
            payment_method: PaymentMethod::Online,
        }
    }
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a form with the contact fields taken from the signed-in
    /// customer's profile
    pub fn prefill_from(profile: &CustomerProfile) -> Self {
        Self {
            customer_name: profile.name.clone().unwrap_or_default(),
            customer_email: profile.email.clone().unwrap_or_default(),
            customer_phone: profile.phone.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Total due: package unit price times traveler count.
    ///
    /// Recomputed from current state on every call, never cached.
    pub fn total(&self, unit_price: i64) -> i64 {
        unit_price * i64::from(self.travelers)
    }

    /// Validate the draft against the rules the backend will also apply.
    ///
    /// `today` is passed in so the date rule stays testable. Same-day
    /// departures are allowed; only dates already behind `today` fail.
    pub fn validate_for(&self, today: NaiveDate) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Err(derive_errors) = Validate::validate(self) {
            errors.extend(collect_field_errors(&derive_errors));
        }

        match self.travel_date {
            None => errors.push(FieldError::new("travelDate", "Select a travel date")),
            Some(date) if date < today => {
                errors.push(FieldError::new("travelDate", "Travel date cannot be in the past"))
            }
            Some(_) => {}
        }
        if self.customer_name.trim().is_empty() {
            errors.push(FieldError::new("customerName", "Name is required"));
        }
        if !is_valid_phone(self.customer_phone.trim()) {
            errors.push(FieldError::new(
                "customerPhone",
                "Enter a 10-digit mobile number",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the create payload, deriving the total from the package
    /// price at this moment. `None` only when no travel date is set.
    pub(crate) fn booking_create(&self, package: &TrekPackage) -> Option<BookingCreate> {
        let travel_date = self.travel_date?;
        Some(BookingCreate {
            package_id: package.id.clone(),
            travel_date,
            travelers: self.travelers,
            customer_name: self.customer_name.trim().to_string(),
            customer_email: self.customer_email.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            note: self
                .note
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            total_amount: self.total(package.price),
            payment_method: self.payment_method,
        })
    }
}

fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let message = error.message.as_deref().unwrap_or("Invalid value");
            out.push(FieldError::new(wire_field(field.as_ref()), message));
        }
    }
    // Map iteration order is unstable; keep reporting deterministic
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn wire_field(field: &str) -> &str {
    match field {
        "travel_date" => "travelDate",
        "travelers" => "travelers",
        "customer_name" => "customerName",
        "customer_email" => "customerEmail",
        "customer_phone" => "customerPhone",
        "note" => "note",
        other => other,
    }
}
