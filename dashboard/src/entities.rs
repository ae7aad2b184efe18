//! The fax service tables managed by the dashboard. Field order is display order.

use faxboard::{Deserialize, Form, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct Account {
    pub owner_id: String,
    pub subscription_plan: Option<String>,
    pub subscription_status: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub stripe_subscription_id: Option<String>,
    pub pages_sent_this_month: Option<i32>,
    pub pages_received_this_month: Option<i32>,
    #[field(datetime)]
    pub billing_period_start: Option<String>,
    #[field(datetime)]
    pub billing_period_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct FaxNumber {
    pub account_id: String,
    pub number: String,
    pub label: Option<String>,
    pub assigned_user_id: Option<String>,
    pub status: Option<String>,
    pub vendor_number_id: Option<String>,
    pub area_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
#[form(table = "faxes", plural = "Faxes")]
pub struct Fax {
    pub account_id: String,
    /// Sender; always the signed-in user.
    #[field(current_user)]
    pub user_id: String,
    pub direction: String,
    pub to_number: Option<String>,
    pub from_number: Option<String>,
    pub status: Option<String>,
    pub failure_reason: Option<String>,
    pub page_count: Option<i32>,
    #[field(url)]
    pub document_url: Option<String>,
    pub cover_page_text: Option<String>,
    pub vendor_fax_id: Option<String>,
    #[field(datetime)]
    pub sent_at: Option<String>,
    #[field(datetime)]
    pub delivered_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct UsageLog {
    pub account_id: String,
    #[field(datetime)]
    pub period_start: String,
    #[field(datetime)]
    pub period_end: String,
    pub pages_sent: Option<i32>,
    pub pages_received: Option<i32>,
    pub total_faxes_sent: Option<i32>,
    pub total_faxes_received: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct Contact {
    pub account_id: String,
    #[field(current_user)]
    pub user_id: String,
    pub name: String,
    pub fax_number: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct CoverPageTemplate {
    pub account_id: String,
    #[field(current_user)]
    pub user_id: String,
    pub name: String,
    pub content: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Form)]
pub struct Profile {
    pub full_name: String,
    pub role: Option<String>,
    pub account_id: Option<String>,
}
