use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult, ErrorKind};
use crate::flows::{require_email, require_fields};
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use villa_shared::Feedback;
use villa_shared::protocol::CreateFeedback;

pub const BOOKING_NOT_FOUND_MESSAGE: &str = "No booking found for this booking ID and email.";
pub const ALREADY_SUBMITTED_MESSAGE: &str = "Feedback has already been submitted for this booking.";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackForm {
    pub booking_id: String,
    pub email: String,
    /// 0 表示尚未选择
    pub rating: u8,
    pub comment: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> ClientResult<CreateFeedback> {
        require_fields(&[
            ("Booking ID", &self.booking_id),
            ("Email", &self.email),
            ("Comment", &self.comment),
        ])?;
        let booking_id = self
            .booking_id
            .trim()
            .parse::<u64>()
            .map_err(|_| ClientError::validation("Booking ID must be a number"))?;
        require_email(&self.email)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ClientError::validation("Please select a rating from 1 to 5"));
        }

        Ok(CreateFeedback {
            booking_id,
            email: self.email.trim().to_string(),
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        })
    }
}

pub async fn submit<C: HttpClient, S: KeyValueStore>(
    api: &ApiClient<C, S>,
    form: &FeedbackForm,
) -> ClientResult<Feedback> {
    let req = form.validate()?;
    api.send(&req)
        .await
        .map_err(|e| e.in_op_with("feedback.submit", req.booking_id.to_string()))
}

pub fn failure_message(err: &ClientError) -> String {
    match err.kind {
        ErrorKind::NotFound => BOOKING_NOT_FOUND_MESSAGE.to_string(),
        ErrorKind::Conflict => ALREADY_SUBMITTED_MESSAGE.to_string(),
        _ => err.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::signed_in_client;
    use crate::request::HttpMethod;
    use serde_json::json;
    use villa_shared::UserType;

    const FEEDBACK_URL: &str = "http://api.test/api/feedbacks";

    fn form() -> FeedbackForm {
        FeedbackForm {
            booking_id: "12".into(),
            email: "ana@example.com".into(),
            rating: 5,
            comment: "Wonderful stay".into(),
        }
    }

    #[tokio::test]
    async fn test_submit_posts_numeric_booking_id() {
        let api = signed_in_client(UserType::Customer);
        api.http().mock_response(
            HttpMethod::Post,
            FEEDBACK_URL,
            201,
            json!({
                "_id": "f1",
                "bookingId": 12,
                "email": "ana@example.com",
                "rating": 5,
                "comment": "Wonderful stay"
            }),
        );

        let feedback = submit(&api, &form()).await.unwrap();
        assert_eq!(feedback.id, "f1");
        assert_eq!(
            api.http().last_json().unwrap(),
            json!({
                "bookingId": 12,
                "email": "ana@example.com",
                "rating": 5,
                "comment": "Wonderful stay"
            })
        );
    }

    #[tokio::test]
    async fn test_backend_rejections_have_specific_messages() {
        let api = signed_in_client(UserType::Customer);

        api.http()
            .mock_response(HttpMethod::Post, FEEDBACK_URL, 404, json!({ "message": "nope" }));
        let err = submit(&api, &form()).await.unwrap_err();
        assert_eq!(failure_message(&err), BOOKING_NOT_FOUND_MESSAGE);

        api.http()
            .mock_response(HttpMethod::Post, FEEDBACK_URL, 409, json!({}));
        let err = submit(&api, &form()).await.unwrap_err();
        assert_eq!(failure_message(&err), ALREADY_SUBMITTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_sent() {
        let api = signed_in_client(UserType::Customer);
        for (f, message) in [
            (
                FeedbackForm {
                    rating: 0,
                    ..form()
                },
                "Please select a rating from 1 to 5",
            ),
            (
                FeedbackForm {
                    rating: 6,
                    ..form()
                },
                "Please select a rating from 1 to 5",
            ),
            (
                FeedbackForm {
                    booking_id: "BK-12".into(),
                    ..form()
                },
                "Booking ID must be a number",
            ),
            (
                FeedbackForm {
                    comment: "  ".into(),
                    ..form()
                },
                "Comment is required",
            ),
        ] {
            let err = submit(&api, &f).await.unwrap_err();
            assert_eq!(failure_message(&err), message);
        }
        assert_eq!(api.http().request_count(), 0);
    }
}
