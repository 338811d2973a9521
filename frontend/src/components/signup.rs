use crate::auth::{config, use_auth};
use crate::components::common::{ErrorAlert, SubmitButton, TextField};
use crate::hooks::{in_scope, use_scope};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::flows::registration::{self, RegistrationForm};
use villa::route::AppRoute;

#[component]
pub fn SignupPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationForm {
            first_name: first_name.get(),
            last_name: last_name.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.user_message()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, registration::submit(&api, config(), &form)).await
            else {
                return;
            };
            set_is_submitting.set(false);
            match result {
                Ok(state) => router.navigate_with(AppRoute::VerifyEmail.to_path(), state),
                Err(e) => set_error_msg.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-lg">
                <h1 class="text-3xl font-bold">"Create your account"</h1>
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error_msg />
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <TextField label="First name" value=first_name />
                            <TextField label="Last name" value=last_name />
                        </div>
                        <TextField label="Email" value=email kind="email" />
                        <TextField label="Password" value=password kind="password" />
                        <TextField label="Confirm password" value=confirm_password kind="password" />
                        <div class="form-control mt-4">
                            <SubmitButton loading=is_submitting label="Sign up" busy_label="Creating account..." />
                        </div>
                        <p class="text-sm text-center mt-2">
                            "Already registered? "
                            <Link to=AppRoute::Login.to_path() class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
