//! Booking submission flow
//!
//! One attempt runs strictly in order: local checks, create the
//! booking, and for online payment create a payment order, open the
//! widget, verify the completion. The state field mirrors where the
//! attempt stands so a UI can render progress and disable the submit
//! control while one is in flight.

use chrono::{NaiveDate, Utc};
use shared::BASE_CURRENCY;
use shared::models::{
    Booking, BookingCreate, CustomerProfile, PaymentDetail, PaymentMethod, PaymentOrderRequest,
    PaymentVerification, TrekPackage,
};
use uuid::Uuid;

use crate::api::BookingApi;
use crate::error::{BookingError, FieldError};
use crate::form::BookingForm;
use crate::gateway::{CheckoutOutcome, PaymentGateway};

/// Where the current booking attempt stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// Form is editable; nothing in flight
    Editing,
    /// Creating the booking
    Submitting,
    /// Booking exists; waiting on the payment widget
    AwaitingPayment,
    /// Widget completed; confirming with the backend
    Verifying,
    /// Attempt finished successfully
    Complete,
    /// Attempt failed; message is ready to display
    Error(String),
}

impl FlowState {
    /// Whether an attempt is in flight and the submit control should be
    /// disabled
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            FlowState::Submitting | FlowState::AwaitingPayment | FlowState::Verifying
        )
    }
}

/// How a submission attempt ended
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Offline booking registered; payment happens out of band
    Confirmed(Booking),
    /// Online payment captured and verified
    Paid {
        booking: Booking,
        payment: PaymentDetail,
    },
    /// The customer closed the checkout; the booking is retained so an
    /// unchanged resubmission does not create a duplicate
    CheckoutDismissed { booking: Booking },
}

/// Drives a booking form through submission and payment
pub struct BookingFlow<A, G> {
    api: A,
    gateway: G,
    today: fn() -> NaiveDate,
    state: FlowState,
    pending: Option<Booking>,
}

impl<A, G> BookingFlow<A, G>
where
    A: BookingApi,
    G: PaymentGateway,
{
    pub fn new(api: A, gateway: G) -> Self {
        Self {
            api,
            gateway,
            today: current_date,
            state: FlowState::Editing,
            pending: None,
        }
    }

    /// Override the source of "today" used for travel-date validation.
    ///
    /// Defaults to the current UTC date; tests pin a fixed date.
    pub fn with_today_source(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Booking held from a dismissed checkout, if any
    pub fn pending_booking(&self) -> Option<&Booking> {
        self.pending.as_ref()
    }

    /// Acknowledge a displayed error and return to editing
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FlowState::Error(_)) {
            self.state = FlowState::Editing;
        }
    }

    /// Drop any held booking and return to a clean editing state
    pub fn reset(&mut self) {
        self.state = FlowState::Editing;
        self.pending = None;
    }

    /// Submit the form for the given package.
    ///
    /// Rejections for a missing user or an invalid form happen before
    /// any network call and leave the flow in `Editing`.
    pub async fn submit(
        &mut self,
        user: Option<&CustomerProfile>,
        form: &BookingForm,
        package: &TrekPackage,
    ) -> Result<SubmitOutcome, BookingError> {
        let user = user.ok_or(BookingError::NotAuthenticated)?;
        form.validate_for((self.today)())
            .map_err(BookingError::Invalid)?;

        let attempt = Uuid::new_v4();
        self.state = FlowState::Submitting;
        tracing::info!(%attempt, package = %package.id, customer = %user.id, "Submitting booking");

        let Some(request) = form.booking_create(package) else {
            self.state = FlowState::Editing;
            return Err(BookingError::Invalid(vec![FieldError::new(
                "travelDate",
                "Select a travel date",
            )]));
        };

        let booking = match self.reusable_booking(&request) {
            Some(held) => {
                tracing::info!(%attempt, booking = %held.id, "Reusing booking from dismissed checkout");
                held
            }
            None => match self.api.create_booking(&request).await {
                Ok(created) => created,
                Err(err) => {
                    self.fail(format!("Could not create booking: {err}"));
                    return Err(err.into());
                }
            },
        };

        if request.payment_method == PaymentMethod::Offline {
            self.state = FlowState::Complete;
            self.pending = None;
            tracing::info!(%attempt, booking = %booking.id, "Booking registered, payment offline");
            return Ok(SubmitOutcome::Confirmed(booking));
        }

        // Hold the booking across the payment leg; a dismissal or a
        // pre-charge failure must not orphan it into a duplicate.
        self.state = FlowState::AwaitingPayment;
        self.pending = Some(booking.clone());

        let order_request = PaymentOrderRequest {
            booking_id: booking.id.clone(),
            amount: booking.total_amount,
            currency: BASE_CURRENCY,
        };
        let order = match self.api.create_payment_order(&order_request).await {
            Ok(order) => order,
            Err(err) => {
                self.fail(format!("Could not start payment: {err}"));
                return Err(err.into());
            }
        };

        let outcome = match self.gateway.open(&order).await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.fail(err.to_string());
                return Err(err.into());
            }
        };

        let completion = match outcome {
            CheckoutOutcome::Dismissed => {
                tracing::info!(%attempt, booking = %booking.id, "Checkout dismissed, back to editing");
                self.state = FlowState::Editing;
                return Ok(SubmitOutcome::CheckoutDismissed { booking });
            }
            CheckoutOutcome::Completed(completion) => completion,
        };

        self.state = FlowState::Verifying;
        let verification = PaymentVerification::new(booking.id.clone(), completion);
        match self.api.verify_payment(&verification).await {
            Ok(payment) => {
                self.state = FlowState::Complete;
                self.pending = None;
                tracing::info!(%attempt, booking = %booking.id, payment = %payment.id, "Payment verified");
                Ok(SubmitOutcome::Paid { booking, payment })
            }
            Err(err) => {
                // The charge may have gone through; never retry it
                // against the same booking automatically.
                self.pending = None;
                self.fail(format!(
                    "We could not confirm your payment. Contact support with booking reference {}.",
                    booking.id
                ));
                Err(BookingError::VerificationFailed {
                    booking_id: booking.id,
                    source: err,
                })
            }
        }
    }

    /// Take the held booking if the draft still matches it exactly;
    /// otherwise abandon it so a fresh one gets created.
    fn reusable_booking(&mut self, request: &BookingCreate) -> Option<Booking> {
        let held = self.pending.take()?;
        if draft_matches(&held, request) {
            Some(held)
        } else {
            tracing::debug!(booking = %held.id, "Draft changed since dismissal, not reusing booking");
            None
        }
    }

    fn fail(&mut self, message: String) {
        tracing::warn!(%message, "Booking attempt failed");
        self.state = FlowState::Error(message);
    }
}

fn current_date() -> NaiveDate {
    Utc::now().date_naive()
}

fn draft_matches(booking: &Booking, request: &BookingCreate) -> bool {
    booking.package_id == request.package_id
        && booking.travel_date == request.travel_date
        && booking.travelers == request.travelers
        && booking.customer_name == request.customer_name
        && booking.customer_email == request.customer_email
        && booking.customer_phone == request.customer_phone
        && booking.note == request.note
        && booking.total_amount == request.total_amount
        && booking.payment_method == request.payment_method
}
