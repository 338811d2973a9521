use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, SubmitButton, TextArea, TextField};
use crate::hooks::{in_scope, use_scope};
use crate::web::router::{Link, use_router};
use crate::web::today;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::ClientError;
use villa::flows::booking::{self, BookingForm, BookingReceipt};
use villa::route::{AppRoute, query_value};
use villa_shared::BOOKABLE_CATEGORIES;

#[component]
pub fn BookingPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let preset_category = query_value(&router.current_path().get_untracked(), "category")
        .filter(|c| BOOKABLE_CATEGORIES.contains(&c.as_str()))
        .unwrap_or_default();
    let user = auth.state.get_untracked().user;

    let name = RwSignal::new(user.as_ref().map(|u| u.display_name()).unwrap_or_default());
    let email = RwSignal::new(user.map(|u| u.email).unwrap_or_default());
    let phone = RwSignal::new(String::new());
    let check_in = RwSignal::new(String::new());
    let check_out = RwSignal::new(String::new());
    let guests = RwSignal::new(BookingForm::default().guests);
    let category = RwSignal::new(preset_category);
    let special_requests = RwSignal::new(String::new());

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (receipt, set_receipt) = signal(Option::<BookingReceipt>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(today) = today() else {
            set_error_msg.set(Some(booking::failure_message(&ClientError::validation(
                "Please enter valid dates",
            ))));
            return;
        };
        let form = BookingForm {
            name: name.get(),
            email: email.get(),
            phone: phone.get(),
            check_in: check_in.get(),
            check_out: check_out.get(),
            guests: guests.get(),
            category: category.get(),
            special_requests: special_requests.get(),
        };
        if let Err(e) = form.validate(today) {
            set_error_msg.set(Some(booking::failure_message(&e)));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, booking::submit(&api, &form, today)).await else {
                return;
            };
            set_is_submitting.set(false);
            match result {
                Ok(done) => set_receipt.set(Some(done)),
                Err(e) => {
                    villa::log_warn!("[Booking] {}", e);
                    set_error_msg.set(Some(booking::failure_message(&e)));
                }
            }
        });
    };

    let min_date = today().map(|d| d.to_string()).unwrap_or_default();

    view! {
        <div class="container mx-auto p-4 md:p-8 max-w-3xl">
            <Show
                when=move || receipt.get().is_none()
                fallback=move || view! {
                    {move || receipt.get().map(|r| view! { <ReceiptCard receipt=r /> })}
                    <div class="flex justify-center gap-2 mt-6">
                        <button class="btn btn-outline" on:click=move |_| set_receipt.set(None)>
                            "Book another stay"
                        </button>
                        <Link to=AppRoute::Home.to_path() class="btn btn-primary">"Back to home"</Link>
                    </div>
                }
            >
                <h1 class="text-3xl font-bold mb-6">"Book your stay"</h1>
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_submit.clone()>
                        <ErrorAlert message=error_msg />
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <TextField label="Name" value=name />
                            <TextField label="Email" value=email kind="email" />
                            <TextField label="Phone" value=phone kind="tel" />
                            <TextField label="Guests" value=guests kind="number" />
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Check-in date"</span></label>
                                <input
                                    type="date"
                                    min=min_date.clone()
                                    class="input input-bordered w-full"
                                    prop:value=move || check_in.get()
                                    on:input=move |ev| check_in.set(event_target_value(&ev))
                                />
                            </div>
                            <div class="form-control">
                                <label class="label"><span class="label-text">"Check-out date"</span></label>
                                <input
                                    type="date"
                                    min=move || check_in.get()
                                    class="input input-bordered w-full"
                                    prop:value=move || check_out.get()
                                    on:input=move |ev| check_out.set(event_target_value(&ev))
                                />
                            </div>
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Room category"</span></label>
                            <select
                                class="select select-bordered w-full"
                                prop:value=move || category.get()
                                on:change=move |ev| category.set(event_target_value(&ev))
                            >
                                <option value="">"Select a category"</option>
                                {BOOKABLE_CATEGORIES
                                    .iter()
                                    .map(|c| view! { <option value=*c>{*c}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <TextArea label="Special requests" value=special_requests />
                        <div class="form-control mt-4">
                            <SubmitButton loading=is_submitting label="Confirm booking" busy_label="Booking..." />
                        </div>
                    </form>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ReceiptCard(receipt: BookingReceipt) -> impl IntoView {
    let room = receipt
        .room_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "To be assigned".to_string());

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-success">"Booking confirmed"</h2>
                <p class="text-base-content/70">"Thank you, " {receipt.guest_name.clone()} "! We look forward to hosting you."</p>
                <div class="overflow-x-auto">
                    <table class="table">
                        <tbody>
                            <tr><th>"Booking ID"</th><td>{receipt.booking_id}</td></tr>
                            <tr><th>"Room"</th><td>{room}</td></tr>
                            <tr><th>"Category"</th><td>{receipt.category.clone()}</td></tr>
                            <tr><th>"Check-in"</th><td>{receipt.check_in.to_string()}</td></tr>
                            <tr><th>"Check-out"</th><td>{receipt.check_out.to_string()}</td></tr>
                            <tr><th>"Nights"</th><td>{receipt.nights}</td></tr>
                            <tr><th>"Guests"</th><td>{receipt.guests}</td></tr>
                            <tr><th>"Email"</th><td>{receipt.email.clone()}</td></tr>
                            <tr><th>"Status"</th><td><span class="badge badge-info">{receipt.status.label()}</span></td></tr>
                        </tbody>
                    </table>
                </div>
                <p class="text-sm text-base-content/70">
                    "Keep your booking ID. You will need it to leave feedback after your stay."
                </p>
            </div>
        </div>
    }
}
