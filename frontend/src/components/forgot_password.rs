use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, SubmitButton, SuccessAlert, TextField};
use crate::hooks::{in_scope, use_scope};
use crate::web::router::{Link, use_router};
use crate::web::sleep;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::flows::FlowStatus;
use villa::flows::password_reset::{PasswordReset, RESET_REDIRECT_DELAY, ResetStep};
use villa::route::AppRoute;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let flow = RwSignal::new(PasswordReset::new());
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let step = move || flow.with(|f| f.step);
    let is_loading = Signal::derive(move || flow.with(|f| f.status.is_loading()));
    let error = Signal::derive(move || flow.with(|f| f.status.error().map(str::to_string)));
    let notice = Signal::derive(move || {
        flow.with(|f| match f.step {
            ResetStep::EnterCode => Some(format!("A reset code has been sent to {}", f.email)),
            ResetStep::Completed => {
                Some("Password reset successfully! Redirecting to login...".to_string())
            }
            ResetStep::RequestCode => None,
        })
    });

    // 把输入框的内容合并进状态机快照
    let snapshot = move || {
        let mut current = flow.get_untracked();
        current.email = email.get_untracked();
        current.otp = otp.get_untracked();
        current.new_password = new_password.get_untracked();
        current.confirm_password = confirm_password.get_untracked();
        current
    };

    let on_send_code = {
        let scope = scope.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if is_loading.get_untracked() {
                return;
            }
            let mut current = snapshot();
            flow.update(|f| f.status = FlowStatus::Loading);
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let settled = in_scope(&scope, async move {
                    let _ = current.send_code(&api).await;
                    Ok(current)
                })
                .await;
                if let Some(Ok(settled)) = settled {
                    flow.set(settled);
                }
            });
        }
    };

    let on_reset = {
        let scope = scope.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if is_loading.get_untracked() {
                return;
            }
            let mut current = snapshot();
            flow.update(|f| f.status = FlowStatus::Loading);
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let Some(Ok(settled)) = in_scope(&scope, async move {
                    let _ = current.reset(&api).await;
                    Ok(current)
                })
                .await
                else {
                    return;
                };
                let completed = settled.step == ResetStep::Completed;
                flow.set(settled);
                if completed
                    && in_scope(&scope, async {
                        sleep(RESET_REDIRECT_DELAY).await;
                        Ok(())
                    })
                    .await
                    .is_some()
                {
                    router.navigate(AppRoute::Login.to_path());
                }
            });
        }
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Reset your password"</h1>
                <div class="card w-full shadow-2xl bg-base-100">
                    <div class="card-body">
                        <ErrorAlert message=error />
                        <SuccessAlert message=notice />
                        <Show when=move || step() == ResetStep::RequestCode>
                            <form on:submit=on_send_code.clone()>
                                <TextField label="Email" value=email kind="email" placeholder="you@example.com" />
                                <div class="form-control mt-4">
                                    <SubmitButton loading=is_loading label="Send code" busy_label="Sending..." />
                                </div>
                            </form>
                        </Show>
                        <Show when=move || step() == ResetStep::EnterCode>
                            <form on:submit=on_reset.clone()>
                                <TextField label="Verification code" value=otp placeholder="1234" />
                                <TextField label="New password" value=new_password kind="password" />
                                <TextField label="Confirm password" value=confirm_password kind="password" />
                                <div class="form-control mt-4">
                                    <SubmitButton loading=is_loading label="Reset password" busy_label="Resetting..." />
                                </div>
                            </form>
                        </Show>
                        <p class="text-sm text-center mt-2">
                            <Link to=AppRoute::Login.to_path() class="link link-primary">"Back to login"</Link>
                        </p>
                    </div>
                </div>
            </div>
        </div>
    }
}
