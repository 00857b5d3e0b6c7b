// basecamp-booking/tests/booking_flow.rs
// Booking flow against a scripted backend and payment widget

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use basecamp_booking::{
    BookingApi, BookingError, BookingFlow, BookingForm, CheckoutOutcome, FlowState, GatewayError,
    PaymentGateway, SubmitOutcome,
};
use basecamp_client::{ClientError, ClientResult};
use chrono::NaiveDate;
use shared::Currency;
use shared::models::{
    Booking, BookingCreate, BookingStatus, CustomerProfile, Difficulty, MembershipTier,
    PaymentCompletion, PaymentDetail, PaymentMethod, PaymentOrder, PaymentOrderRequest,
    PaymentState, PaymentVerification, TrekPackage,
};

/// Scripted backend. Clones share state so tests can count calls after
/// handing one clone to the flow.
#[derive(Clone, Default)]
struct MockBookingApi {
    inner: Arc<ApiState>,
}

#[derive(Default)]
struct ApiState {
    create_calls: Mutex<u32>,
    order_calls: Mutex<u32>,
    verify_calls: Mutex<u32>,
    reject_create: Mutex<Option<String>>,
    reject_verify: Mutex<bool>,
    last_create: Mutex<Option<BookingCreate>>,
    last_verification: Mutex<Option<PaymentVerification>>,
}

impl MockBookingApi {
    fn rejecting_create(message: &str) -> Self {
        let api = Self::default();
        *api.inner.reject_create.lock().unwrap() = Some(message.to_string());
        api
    }

    fn rejecting_verify() -> Self {
        let api = Self::default();
        *api.inner.reject_verify.lock().unwrap() = true;
        api
    }

    fn create_calls(&self) -> u32 {
        *self.inner.create_calls.lock().unwrap()
    }

    fn order_calls(&self) -> u32 {
        *self.inner.order_calls.lock().unwrap()
    }

    fn verify_calls(&self) -> u32 {
        *self.inner.verify_calls.lock().unwrap()
    }

    fn last_create(&self) -> Option<BookingCreate> {
        self.inner.last_create.lock().unwrap().clone()
    }

    fn last_verification(&self) -> Option<PaymentVerification> {
        self.inner.last_verification.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingApi for MockBookingApi {
    async fn create_booking(&self, request: &BookingCreate) -> ClientResult<Booking> {
        let n = {
            let mut calls = self.inner.create_calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        *self.inner.last_create.lock().unwrap() = Some(request.clone());
        if let Some(message) = self.inner.reject_create.lock().unwrap().clone() {
            return Err(ClientError::Api(message));
        }
        Ok(Booking {
            id: format!("B-{n}"),
            package_id: request.package_id.clone(),
            travel_date: request.travel_date,
            travelers: request.travelers,
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone(),
            note: request.note.clone(),
            total_amount: request.total_amount,
            payment_method: request.payment_method,
            status: BookingStatus::Pending,
            created_at: shared::util::now_millis(),
            updated_at: shared::util::now_millis(),
        })
    }

    async fn create_payment_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> ClientResult<PaymentOrder> {
        *self.inner.order_calls.lock().unwrap() += 1;
        Ok(PaymentOrder {
            id: format!("order-{}", request.booking_id),
            amount: request.amount,
            currency: request.currency,
            key_id: "rzp_test_k1".to_string(),
        })
    }

    async fn verify_payment(&self, request: &PaymentVerification) -> ClientResult<PaymentDetail> {
        *self.inner.verify_calls.lock().unwrap() += 1;
        *self.inner.last_verification.lock().unwrap() = Some(request.clone());
        if *self.inner.reject_verify.lock().unwrap() {
            return Err(ClientError::Api("Signature mismatch".to_string()));
        }
        Ok(PaymentDetail {
            id: format!("pay-{}", request.booking_id),
            order_id: request.completion.order_id.clone(),
            booking_id: request.booking_id.clone(),
            amount: 0,
            currency: Currency::Inr,
            status: PaymentState::Captured,
            created_at: shared::util::now_millis(),
        })
    }
}

#[derive(Clone, Copy)]
enum WidgetScript {
    Approve,
    Dismiss,
    Fail,
}

/// Scripted payment widget
#[derive(Clone)]
struct MockGateway {
    script: Arc<Mutex<WidgetScript>>,
    opens: Arc<Mutex<u32>>,
}

impl MockGateway {
    fn new(script: WidgetScript) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            opens: Arc::new(Mutex::new(0)),
        }
    }

    fn set_script(&self, script: WidgetScript) {
        *self.script.lock().unwrap() = script;
    }

    fn opens(&self) -> u32 {
        *self.opens.lock().unwrap()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn open(&self, order: &PaymentOrder) -> Result<CheckoutOutcome, GatewayError> {
        *self.opens.lock().unwrap() += 1;
        match *self.script.lock().unwrap() {
            WidgetScript::Approve => Ok(CheckoutOutcome::Completed(PaymentCompletion {
                payment_id: format!("pay_{}", order.id),
                order_id: order.id.clone(),
                signature: "sig==".to_string(),
            })),
            WidgetScript::Dismiss => Ok(CheckoutOutcome::Dismissed),
            WidgetScript::Fail => Err(GatewayError::Failed("Card declined".to_string())),
        }
    }
}

fn sample_package() -> TrekPackage {
    TrekPackage {
        id: "T-42".into(),
        slug: "annapurna-base-camp".into(),
        name: "Annapurna Base Camp".into(),
        description: String::new(),
        price: 12999,
        duration_days: 7,
        location: "Nepal".into(),
        difficulty: Difficulty::Moderate,
        max_group_size: 12,
        images: vec![],
        inclusions: vec![],
        exclusions: vec![],
        itinerary: vec![],
        category: None,
        tags: vec![],
    }
}

fn signed_in_customer() -> CustomerProfile {
    CustomerProfile {
        id: "C-1".into(),
        name: Some("Asha Rao".into()),
        email: Some("asha@example.com".into()),
        phone: Some("9999999999".into()),
        is_verified: true,
        tier: MembershipTier::Basic,
    }
}

fn valid_form(method: PaymentMethod) -> BookingForm {
    BookingForm {
        travel_date: NaiveDate::from_ymd_opt(2026, 11, 5),
        travelers: 3,
        customer_name: "Asha Rao".into(),
        customer_email: "asha@example.com".into(),
        customer_phone: "9999999999".into(),
        note: None,
        payment_method: method,
    }
}

/// Every flow under test validates dates against this fixed day, not
/// the wall clock
fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

#[tokio::test]
async fn test_unauthenticated_submit_makes_no_network_calls() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);

    let err = flow
        .submit(None, &valid_form(PaymentMethod::Online), &sample_package())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::NotAuthenticated));
    assert_eq!(*flow.state(), FlowState::Editing);
    assert_eq!(api.create_calls(), 0);
    assert_eq!(api.order_calls(), 0);
    assert_eq!(api.verify_calls(), 0);
    assert_eq!(gateway.opens(), 0);
}

#[tokio::test]
async fn test_invalid_form_is_rejected_before_any_request() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();

    let err = flow
        .submit(Some(&customer), &BookingForm::new(), &sample_package())
        .await
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"travelDate"));
    assert!(fields.contains(&"customerName"));
    assert_eq!(*flow.state(), FlowState::Editing);
    assert_eq!(api.create_calls(), 0);
    assert_eq!(gateway.opens(), 0);
}

#[tokio::test]
async fn test_travel_date_is_checked_against_injected_today() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let mut form = valid_form(PaymentMethod::Offline);

    // Same-day departure relative to the injected date is accepted
    form.travel_date = NaiveDate::from_ymd_opt(2026, 8, 24);
    flow.submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();
    assert_eq!(api.create_calls(), 1);

    // A date behind the injected today is rejected locally
    flow.reset();
    form.travel_date = NaiveDate::from_ymd_opt(2026, 8, 23);
    let err = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap_err();
    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["travelDate"]);
    assert_eq!(*flow.state(), FlowState::Editing);
    assert_eq!(api.create_calls(), 1);
}

#[tokio::test]
async fn test_offline_booking_skips_payment_entirely() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();

    let outcome = flow
        .submit(
            Some(&customer),
            &valid_form(PaymentMethod::Offline),
            &sample_package(),
        )
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Confirmed(booking) => {
            assert_eq!(booking.id, "B-1");
            assert_eq!(booking.total_amount, 38997);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(*flow.state(), FlowState::Complete);
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.order_calls(), 0);
    assert_eq!(api.verify_calls(), 0);
    assert_eq!(gateway.opens(), 0);

    // Total was derived from unit price times travelers at submission
    assert_eq!(api.last_create().unwrap().total_amount, 12999 * 3);
}

#[tokio::test]
async fn test_online_flow_orders_opens_widget_then_verifies() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();

    let outcome = flow
        .submit(
            Some(&customer),
            &valid_form(PaymentMethod::Online),
            &sample_package(),
        )
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Paid { booking, payment } => {
            assert_eq!(booking.id, "B-1");
            assert_eq!(payment.status, PaymentState::Captured);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(*flow.state(), FlowState::Complete);
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.order_calls(), 1);
    assert_eq!(gateway.opens(), 1);
    assert_eq!(api.verify_calls(), 1);

    // The widget payload was forwarded verbatim plus the booking id
    let verification = api.last_verification().unwrap();
    assert_eq!(verification.booking_id, "B-1");
    assert_eq!(verification.completion.order_id, "order-B-1");
    assert_eq!(verification.completion.payment_id, "pay_order-B-1");
    assert_eq!(verification.completion.signature, "sig==");
}

#[tokio::test]
async fn test_server_rejection_surfaces_message_and_keeps_total() {
    let api = MockBookingApi::rejecting_create("X");
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let form = valid_form(PaymentMethod::Online);

    let err = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap_err();

    match err {
        BookingError::Client(ClientError::Api(message)) => assert_eq!(message, "X"),
        other => panic!("unexpected error: {other:?}"),
    }
    match flow.state() {
        FlowState::Error(message) => assert!(message.contains('X')),
        other => panic!("unexpected state: {other:?}"),
    }
    // The displayed total is untouched by the failure
    assert_eq!(form.total(sample_package().price), 38997);
    assert_eq!(gateway.opens(), 0);

    // Dismissing the error returns to editing
    flow.dismiss_error();
    assert_eq!(*flow.state(), FlowState::Editing);
}

#[tokio::test]
async fn test_dismissed_checkout_returns_to_editing_and_reuses_booking() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Dismiss);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let form = valid_form(PaymentMethod::Online);

    let outcome = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::CheckoutDismissed { booking } => assert_eq!(booking.id, "B-1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(*flow.state(), FlowState::Editing);
    assert_eq!(flow.pending_booking().unwrap().id, "B-1");

    // Resubmitting the unchanged draft does not create a second booking
    gateway.set_script(WidgetScript::Approve);
    let outcome = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Paid { booking, .. } => assert_eq!(booking.id, "B-1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(api.create_calls(), 1);
    assert_eq!(api.order_calls(), 2);
    assert_eq!(gateway.opens(), 2);
    assert_eq!(api.verify_calls(), 1);
}

#[tokio::test]
async fn test_edited_draft_after_dismissal_creates_fresh_booking() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Dismiss);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let mut form = valid_form(PaymentMethod::Online);

    flow.submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();
    assert_eq!(flow.pending_booking().unwrap().travelers, 3);

    // The customer changes the party size before trying again
    form.travelers = 4;
    gateway.set_script(WidgetScript::Approve);
    let outcome = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Paid { booking, .. } => {
            assert_eq!(booking.id, "B-2");
            assert_eq!(booking.travelers, 4);
            assert_eq!(booking.total_amount, 12999 * 4);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(api.create_calls(), 2);
}

#[tokio::test]
async fn test_contact_edit_after_dismissal_creates_fresh_booking() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Dismiss);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let mut form = valid_form(PaymentMethod::Online);

    flow.submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();
    assert_eq!(flow.pending_booking().unwrap().customer_phone, "9999999999");

    // Same trip, new contact number; the booking on file must carry it
    form.customer_phone = "8888888888".into();
    gateway.set_script(WidgetScript::Approve);
    let outcome = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();

    match outcome {
        SubmitOutcome::Paid { booking, .. } => {
            assert_eq!(booking.id, "B-2");
            assert_eq!(booking.customer_phone, "8888888888");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(api.create_calls(), 2);
}

#[tokio::test]
async fn test_verification_failure_reports_support_reference() {
    let api = MockBookingApi::rejecting_verify();
    let gateway = MockGateway::new(WidgetScript::Approve);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let form = valid_form(PaymentMethod::Online);

    let err = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap_err();

    match err {
        BookingError::VerificationFailed { booking_id, .. } => assert_eq!(booking_id, "B-1"),
        other => panic!("unexpected error: {other:?}"),
    }
    match flow.state() {
        FlowState::Error(message) => {
            assert!(message.contains("B-1"));
            assert!(message.to_lowercase().contains("support"));
        }
        other => panic!("unexpected state: {other:?}"),
    }

    // The possibly-charged booking is never silently re-run
    assert_eq!(flow.pending_booking(), None);
}

#[tokio::test]
async fn test_widget_failure_keeps_booking_for_retry() {
    let api = MockBookingApi::default();
    let gateway = MockGateway::new(WidgetScript::Fail);
    let mut flow = BookingFlow::new(api.clone(), gateway.clone()).with_today_source(fixed_today);
    let customer = signed_in_customer();
    let form = valid_form(PaymentMethod::Online);

    let err = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Gateway(GatewayError::Failed(_))));
    match flow.state() {
        FlowState::Error(message) => assert!(message.contains("Card declined")),
        other => panic!("unexpected state: {other:?}"),
    }

    // No charge happened, so a retry reuses the booking
    flow.dismiss_error();
    gateway.set_script(WidgetScript::Approve);
    let outcome = flow
        .submit(Some(&customer), &form, &sample_package())
        .await
        .unwrap();
    match outcome {
        SubmitOutcome::Paid { booking, .. } => assert_eq!(booking.id, "B-1"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(api.create_calls(), 1);
}
