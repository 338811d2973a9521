use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, SubmitButton, SuccessAlert, TextArea, TextField};
use crate::hooks::{in_scope, use_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::flows::feedback::{self, FeedbackForm, MAX_RATING, MIN_RATING};

#[component]
pub fn FeedbackPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_scope();

    let booking_id = RwSignal::new(String::new());
    let email = RwSignal::new(
        auth.state
            .get_untracked()
            .user
            .map(|u| u.email)
            .unwrap_or_default(),
    );
    let rating = RwSignal::new(0u8);
    let comment = RwSignal::new(String::new());

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = FeedbackForm {
            booking_id: booking_id.get(),
            email: email.get(),
            rating: rating.get(),
            comment: comment.get(),
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(feedback::failure_message(&e)));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_success_msg.set(None);

        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, feedback::submit(&api, &form)).await else {
                return;
            };
            set_is_submitting.set(false);
            match result {
                Ok(_) => {
                    set_success_msg.set(Some("Thank you for your feedback!".to_string()));
                    booking_id.set(String::new());
                    rating.set(0);
                    comment.set(String::new());
                }
                Err(e) => {
                    villa::log_warn!("[Feedback] {}", e);
                    set_error_msg.set(Some(feedback::failure_message(&e)));
                }
            }
        });
    };

    view! {
        <div class="container mx-auto p-4 md:p-8 max-w-2xl">
            <h1 class="text-3xl font-bold mb-2">"Share your experience"</h1>
            <p class="text-base-content/70 mb-6">"Tell us about your stay using the booking ID from your confirmation."</p>
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error_msg />
                    <SuccessAlert message=success_msg />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <TextField label="Booking ID" value=booking_id kind="number" />
                        <TextField label="Email" value=email kind="email" />
                    </div>
                    <div class="form-control">
                        <label class="label"><span class="label-text">"Rating"</span></label>
                        <div class="rating rating-lg">
                            {(MIN_RATING..=MAX_RATING)
                                .map(|star| view! {
                                    <input
                                        type="radio"
                                        name="rating"
                                        class="mask mask-star-2 bg-warning"
                                        aria-label=format!("{} star", star)
                                        prop:checked=move || rating.get() == star
                                        on:change=move |_| rating.set(star)
                                    />
                                })
                                .collect_view()}
                        </div>
                    </div>
                    <TextArea label="Comment" value=comment />
                    <div class="form-control mt-4">
                        <SubmitButton loading=is_submitting label="Submit feedback" busy_label="Submitting..." />
                    </div>
                </form>
            </div>
        </div>
    }
}
