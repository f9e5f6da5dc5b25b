//! Request payloads and response records exchanged with the booking backend.
//!
//! Resource calls return raw JSON bodies; [`decode`] and [`decode_field`] turn them into these
//! records when a typed view is wanted.

// self
use crate::{
	_prelude::*,
	auth::{Session, TokenSecret},
};

/// Decodes a response body into `T`, reporting the failing JSON path on mismatch.
pub fn decode<T>(body: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(body).map_err(|source| Error::Decode { source, status: None })
}

/// Decodes the `field` member of a response envelope such as `{"booking": {...}}`.
pub fn decode_field<T>(mut body: Value, field: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	decode(body.get_mut(field).map(Value::take).unwrap_or(Value::Null))
}

/// Credentials submitted to `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
}
impl LoginRequest {
	/// Builds a login payload.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Account details submitted to `POST /auth/signup`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SignupRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// IANA timezone used to schedule midnight bookings; the backend defaults to UTC.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,
}
impl Debug for SignupRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SignupRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.field("first_name", &self.first_name)
			.field("last_name", &self.last_name)
			.field("timezone", &self.timezone)
			.finish()
	}
}

/// Tokens issued by login and signup.
///
/// Only the credentials are read; the accompanying `user` record stays in the response body so
/// an unexpected user shape never costs the session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthTokens {
	/// Access token for subsequent requests.
	pub access_token: TokenSecret,
	/// Refresh token, when issued.
	#[serde(default)]
	pub refresh_token: Option<TokenSecret>,
}
impl From<AuthTokens> for Session {
	fn from(tokens: AuthTokens) -> Self {
		Session { access_token: tokens.access_token, refresh_token: tokens.refresh_token }
	}
}

/// User record as returned by profile and admin endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	pub id: u64,
	/// Account email.
	pub email: String,
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	/// IANA timezone.
	#[serde(default)]
	pub timezone: Option<String>,
	/// Administrator flag.
	#[serde(default)]
	pub is_admin: bool,
	/// Whether the account may sign in.
	#[serde(default = "enabled")]
	pub is_active: bool,
	/// Creation timestamp (ISO 8601).
	#[serde(default)]
	pub created_at: Option<String>,
	/// Last update timestamp (ISO 8601).
	#[serde(default)]
	pub updated_at: Option<String>,
}

/// Fields accepted by `PUT /users/profile`; unset fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
	/// New given name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// New family name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// New IANA timezone.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timezone: Option<String>,
}

/// Third-party travel site credentials submitted to `POST /users/credentials`.
#[derive(Clone, Serialize, Deserialize)]
pub struct TravelCredentials {
	/// Travel site username.
	pub username: String,
	/// Travel site password.
	pub password: String,
}
impl Debug for TravelCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TravelCredentials")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Answer of `GET /users/credentials`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStatus {
	/// Whether credentials are on file.
	pub has_credentials: bool,
}

/// Lifecycle of a booking request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
	/// Waiting for its scheduled midnight run.
	Pending,
	/// Currently being booked.
	Processing,
	/// Booked.
	Success,
	/// Booking attempt failed.
	Failed,
	/// Canceled by the user.
	Canceled,
}
impl BookingStatus {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			BookingStatus::Pending => "pending",
			BookingStatus::Processing => "processing",
			BookingStatus::Success => "success",
			BookingStatus::Failed => "failed",
			BookingStatus::Canceled => "canceled",
		}
	}
}
impl Display for BookingStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Booking request submitted to `POST /bookings`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
	/// Departure location.
	pub origin: String,
	/// Arrival location.
	pub destination: String,
	/// Departure date (`YYYY-MM-DD`).
	pub departure_date: String,
	/// Return date (`YYYY-MM-DD`).
	#[serde(skip_serializing_if = "Option::is_none")]
	pub return_date: Option<String>,
	/// Number of travelers; the backend defaults to one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub passengers: Option<u32>,
	/// Preferred option, free-form.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub primary_option: Option<Value>,
	/// Fallback option, free-form.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub backup_option: Option<Value>,
	/// Price ceiling.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_price: Option<f64>,
}

/// Fields accepted by `PUT /bookings/:id`; only pending bookings can be updated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingUpdate {
	/// New departure location.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub origin: Option<String>,
	/// New arrival location.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub destination: Option<String>,
	/// New departure date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub departure_date: Option<String>,
	/// New return date.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub return_date: Option<String>,
	/// New traveler count.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub passengers: Option<u32>,
	/// New price ceiling.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_price: Option<f64>,
}

/// Booking record as returned by booking and admin endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
	/// Booking identifier.
	pub id: u64,
	/// Owning user.
	#[serde(default)]
	pub user_id: Option<u64>,
	/// Current status.
	pub status: BookingStatus,
	/// Departure location.
	#[serde(default)]
	pub origin: Option<String>,
	/// Arrival location.
	pub destination: String,
	/// Departure date (`YYYY-MM-DD`).
	#[serde(default)]
	pub departure_date: Option<String>,
	/// Return date.
	#[serde(default)]
	pub return_date: Option<String>,
	/// Number of travelers.
	#[serde(default)]
	pub passengers: Option<u32>,
	/// Price ceiling.
	#[serde(default)]
	pub max_price: Option<f64>,
	/// Instant the automated booking runs (ISO 8601).
	#[serde(default)]
	pub scheduled_time: Option<String>,
	/// Instant the booking ran.
	#[serde(default)]
	pub executed_at: Option<String>,
	/// Outcome message from the booking run.
	#[serde(default)]
	pub result_message: Option<String>,
	/// Confirmation reference from the travel site.
	#[serde(default)]
	pub booking_reference: Option<String>,
}

/// Subscription plans offered at checkout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
	/// Entry plan.
	#[default]
	Basic,
	/// Mid plan.
	Standard,
	/// Top plan.
	Premium,
}

/// Billing state of a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
	/// Paid and usable.
	Active,
	/// Never activated or lapsed.
	Inactive,
	/// Canceled by the user.
	Canceled,
	/// Payment failed.
	PastDue,
}

/// Subscription record returned by `GET /subscriptions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
	/// Subscription identifier.
	pub id: u64,
	/// Plan.
	pub tier: SubscriptionTier,
	/// Billing state.
	pub status: SubscriptionStatus,
	/// Start of the current billing period.
	#[serde(default)]
	pub current_period_start: Option<String>,
	/// End of the current billing period.
	#[serde(default)]
	pub current_period_end: Option<String>,
}

/// Payload of `POST /subscriptions/create-checkout-session`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
	/// Plan to purchase.
	pub tier: SubscriptionTier,
	/// Email to prefill at checkout.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}

/// Checkout session the user is redirected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
	/// Hosted checkout page.
	pub checkout_url: String,
	/// Payment provider session identifier.
	pub session_id: String,
}

/// Fields accepted by `PUT /admin/users/:id`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUserUpdate {
	/// Enables or disables the account.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_active: Option<bool>,
	/// Grants or revokes administrator rights.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_admin: Option<bool>,
}

/// Audit trail entry returned by `GET /admin/audit-logs`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
	/// Entry identifier.
	pub id: u64,
	/// Acting user, if any.
	#[serde(default)]
	pub user_id: Option<u64>,
	/// Action label.
	pub action: String,
	/// Affected resource.
	#[serde(default)]
	pub resource: Option<String>,
	/// Free-form details.
	#[serde(default)]
	pub details: Option<String>,
	/// Client address.
	#[serde(default)]
	pub ip_address: Option<String>,
	/// Creation timestamp (ISO 8601).
	#[serde(default)]
	pub created_at: Option<String>,
}

/// Page selection for admin listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
	/// One-based page number.
	pub page: u32,
	/// Items per page.
	pub per_page: u32,
}
impl Pagination {
	/// Default page size for user and booking listings.
	pub const DEFAULT_PER_PAGE: u32 = 20;
	/// Default page size for audit logs.
	pub const AUDIT_LOG_PER_PAGE: u32 = 50;

	/// Selects `page` with `per_page` items.
	pub const fn new(page: u32, per_page: u32) -> Self {
		Self { page, per_page }
	}

	/// First page with the audit-log page size.
	pub const fn audit_logs() -> Self {
		Self::new(1, Self::AUDIT_LOG_PER_PAGE)
	}
}
impl Default for Pagination {
	fn default() -> Self {
		Self::new(1, Self::DEFAULT_PER_PAGE)
	}
}

fn enabled() -> bool {
	true
}
