use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::flows::{require_email, require_fields};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use villa_shared::date::StayDates;
use villa_shared::protocol::CreateBookingByCategory;
use villa_shared::{BOOKABLE_CATEGORIES, BookingStatus, CalendarDate};

pub const NO_AVAILABILITY_MESSAGE: &str =
    "No rooms available in this category for the selected dates. Please try different dates.";
const BOOKING_FAILED_MESSAGE: &str = "Booking failed. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`，来自日期输入框
    pub check_in: String,
    pub check_out: String,
    pub guests: String,
    pub category: String,
    pub special_requests: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            check_in: String::new(),
            check_out: String::new(),
            guests: "1".to_string(),
            category: String::new(),
            special_requests: String::new(),
        }
    }
}

/// 本地校验通过后的预订内容
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBooking {
    pub request: CreateBookingByCategory,
    pub stay: StayDates,
    pub guests: u32,
}

impl BookingForm {
    pub fn validate(&self, today: CalendarDate) -> ClientResult<ValidBooking> {
        require_fields(&[
            ("Name", &self.name),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Check-in date", &self.check_in),
            ("Check-out date", &self.check_out),
        ])?;
        require_email(&self.email)?;

        let category = BOOKABLE_CATEGORIES
            .iter()
            .find(|c| c.eq_ignore_ascii_case(self.category.trim()))
            .ok_or_else(|| ClientError::validation("Please select a room category"))?;

        let guests = self
            .guests
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|g| *g >= 1)
            .ok_or_else(|| ClientError::validation("Guests must be at least 1"))?;

        let (Some(check_in), Some(check_out)) = (
            CalendarDate::parse(&self.check_in),
            CalendarDate::parse(&self.check_out),
        ) else {
            return Err(ClientError::validation("Please enter valid dates"));
        };
        let stay = StayDates::new(check_in, check_out, today)?;

        Ok(ValidBooking {
            request: CreateBookingByCategory {
                category: category.to_string(),
                start: stay.check_in(),
                end: stay.check_out(),
                notes: self.notes(guests),
            },
            stay,
            guests,
        })
    }

    /// 客人信息随备注一起发送（后端预订记录不单独存联系方式）
    fn notes(&self, guests: u32) -> String {
        let mut lines = vec![
            format!("Name: {}", self.name.trim()),
            format!("Email: {}", self.email.trim()),
            format!("Phone: {}", self.phone.trim()),
            format!("Guests: {}", guests),
        ];
        let requests = self.special_requests.trim();
        if !requests.is_empty() {
            lines.push(format!("Special requests: {}", requests));
        }
        lines.join("\n")
    }
}

/// 确认页展示的预订回执
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReceipt {
    pub booking_id: u64,
    pub room_id: Option<u64>,
    pub category: String,
    pub check_in: CalendarDate,
    pub check_out: CalendarDate,
    pub nights: i64,
    pub guests: u32,
    pub guest_name: String,
    pub email: String,
    pub status: BookingStatus,
}

pub async fn submit<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    form: &BookingForm,
    today: CalendarDate,
) -> ClientResult<BookingReceipt> {
    let valid = form.validate(today)?;
    let booking = api
        .send(&valid.request)
        .await
        .map_err(|e| e.in_op_with("booking.submit", valid.request.category.clone()))?;

    log_info!(
        "[Booking] Booking {} created for {}",
        booking.booking_id,
        valid.request.category
    );
    Ok(BookingReceipt {
        booking_id: booking.booking_id,
        room_id: booking.room_id,
        category: valid.request.category,
        check_in: valid.stay.check_in(),
        check_out: valid.stay.check_out(),
        nights: valid.stay.nights(),
        guests: valid.guests,
        guest_name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        status: booking.status,
    })
}

pub fn failure_message(err: &ClientError) -> String {
    match err.kind {
        ErrorKind::Validation => err.message().to_string(),
        ErrorKind::Conflict => NO_AVAILABILITY_MESSAGE.to_string(),
        ErrorKind::Network | ErrorKind::Timeout | ErrorKind::Unauthorized => err.user_message(),
        _ => BOOKING_FAILED_MESSAGE.to_string(),
    }
}
