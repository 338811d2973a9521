use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, SubmitButton, TextField};
use crate::hooks::{in_scope, use_scope};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::flows::login::{self, LoginForm};
use villa::route::AppRoute;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 被守卫拦截前的地址
    let from = router.nav_state().get_untracked().from_path().map(str::to_string);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm {
            email: email.get(),
            password: password.get(),
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.user_message()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let scope = scope.clone();
        let from = from.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, login::submit(&api, &form, from.as_deref())).await
            else {
                return;
            };
            set_is_submitting.set(false);
            match result {
                Ok(destination) => {
                    auth.refresh();
                    router.navigate(&destination);
                }
                Err(e) => {
                    villa::log_warn!("[Login] {}", e);
                    set_error_msg.set(Some(login::failure_message(&e)));
                }
            }
        });
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Welcome back"</h1>
                    <p class="text-base-content/70">"Sign in to book your stay"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error_msg />
                        <TextField label="Email" value=email kind="email" placeholder="you@example.com" />
                        <TextField label="Password" value=password kind="password" />
                        <div class="text-right">
                            <Link to=AppRoute::ForgotPassword.to_path() class="link link-hover text-sm">
                                "Forgot password?"
                            </Link>
                        </div>
                        <div class="form-control mt-4">
                            <SubmitButton loading=is_submitting label="Login" busy_label="Signing in..." />
                        </div>
                        <p class="text-sm text-center mt-2">
                            "No account yet? "
                            <Link to=AppRoute::Signup.to_path() class="link link-primary">"Sign up"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
