//! Booking Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How the customer intends to pay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Pay now through the payment widget
    Online,
    /// Pay at the office or on arrival
    Offline,
}

/// Lifecycle status assigned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "bookingId")]
    pub id: String,
    pub package_id: String,
    pub travel_date: NaiveDate,
    pub travelers: u32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create booking payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub package_id: String,
    pub travel_date: NaiveDate,
    pub travelers: u32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub total_amount: i64,
    pub payment_method: PaymentMethod,
}

/// Update booking payload; unset fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Expense line recorded against a booking (trip accounting)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingExpense {
    #[serde(rename = "expenseId")]
    pub id: String,
    pub label: String,
    pub amount: i64,
    #[serde(default)]
    pub incurred_at: i64,
}

/// Payment recorded against a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayment {
    #[serde(rename = "paymentId")]
    pub id: String,
    pub amount: i64,
    pub method: PaymentMethod,
    pub status: String,
    #[serde(default)]
    pub paid_at: i64,
}
