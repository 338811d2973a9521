use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, SuccessAlert};
use crate::hooks::{in_scope, use_scope};
use crate::web::router::{Link, use_router};
use crate::web::sleep;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::flows::FlowStatus;
use villa::flows::otp::OTP_LEN;
use villa::flows::verification::{EmailVerification, VERIFIED_REDIRECT_DELAY};
use villa::route::{AppRoute, NavState};

#[component]
pub fn VerifyEmailPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let initial = match router.nav_state().get_untracked() {
        NavState::VerifyEmail { email, otp } => EmailVerification::new(&email, otp.as_deref()),
        _ => EmailVerification::default(),
    };
    let has_email = !initial.email.is_empty();
    let flow = RwSignal::new(initial);
    let boxes: [NodeRef<Input>; OTP_LEN] = std::array::from_fn(|_| NodeRef::new());

    // 按状态机的焦点位置同步 DOM 焦点
    let sync_focus = move || {
        let index = flow.with_untracked(|f| f.otp.focus());
        if let Some(input) = boxes[index].get_untracked() {
            let _ = input.focus();
        }
    };

    let is_loading = move || flow.with(|f| f.status.is_loading());
    let error = Signal::derive(move || flow.with(|f| f.status.error().map(str::to_string)));
    let notice = Signal::derive(move || {
        flow.with(|f| match f.status {
            FlowStatus::Done => Some("Email verified! Redirecting to login...".to_string()),
            _ => f.notice.clone(),
        })
    });

    let verify = {
        let scope = scope.clone();
        move || {
            if is_loading() {
                return;
            }
            let mut current = flow.get_untracked();
            flow.update(|f| f.status = FlowStatus::Loading);
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let Some(result) = in_scope(&scope, async move {
                    let outcome = current.verify(&api).await;
                    Ok((current, outcome.is_ok()))
                })
                .await
                else {
                    return;
                };
                let Ok((settled, verified)) = result else {
                    return;
                };
                flow.set(settled);
                if verified
                    && in_scope(&scope, async {
                        sleep(VERIFIED_REDIRECT_DELAY).await;
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

    let resend = {
        let scope = scope.clone();
        move |_| {
            let mut current = flow.get_untracked();
            flow.update(|f| f.status = FlowStatus::Loading);
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let settled = in_scope(&scope, async move {
                    let _ = current.resend(&api).await;
                    Ok(current)
                })
                .await;
                if let Some(Ok(settled)) = settled {
                    flow.set(settled);
                }
            });
        }
    };

    let on_submit = {
        let verify = verify.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            verify();
        }
    };

    let digit_box = move |index: usize| {
        let on_input = move |ev: web_sys::Event| {
            let value = event_target_value(&ev);
            flow.update(|f| f.otp.input(index, &value));
            sync_focus();
        };
        let on_keydown = move |ev: web_sys::KeyboardEvent| {
            if ev.key() == "Backspace" && flow.with_untracked(|f| f.otp.digit(index).is_none()) {
                ev.prevent_default();
                flow.update(|f| f.otp.backspace(index));
                sync_focus();
            }
        };
        let on_paste = move |ev: web_sys::ClipboardEvent| {
            let text = ev
                .clipboard_data()
                .and_then(|data| data.get_data("text").ok())
                .unwrap_or_default();
            ev.prevent_default();
            let mut pasted = false;
            flow.update(|f| pasted = f.otp.paste(&text));
            if pasted {
                sync_focus();
            }
        };

        view! {
            <input
                node_ref=boxes[index]
                type="text"
                inputmode="numeric"
                class="input input-bordered w-14 h-14 text-center text-2xl"
                prop:value=move || flow.with(|f| f.otp.digit(index).map(String::from).unwrap_or_default())
                on:input=on_input
                on:keydown=on_keydown
                on:paste=on_paste
            />
        }
    };

    view! {
        <div class="hero min-h-[80vh] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Verify your email"</h1>
                <Show
                    when=move || has_email
                    fallback=|| view! {
                        <div class="card bg-base-100 shadow-xl p-8 text-center">
                            <p>"We could not find an email to verify."</p>
                            <Link to=AppRoute::Signup.to_path() class="btn btn-primary mt-4">"Back to sign up"</Link>
                        </div>
                    }
                >
                    <div class="card w-full shadow-2xl bg-base-100">
                        <form class="card-body items-center" on:submit=on_submit.clone()>
                            <p class="text-sm text-center text-base-content/70">
                                "Enter the 4-digit code sent to "
                                <span class="font-semibold">{move || flow.with(|f| f.email.clone())}</span>
                            </p>
                            <ErrorAlert message=error />
                            <SuccessAlert message=notice />
                            <div class="flex gap-3 my-4">
                                {(0..OTP_LEN).map(digit_box).collect_view()}
                            </div>
                            <button type="submit" class="btn btn-primary w-full" disabled=is_loading>
                                {move || if is_loading() { "Verifying..." } else { "Verify" }}
                            </button>
                            <button type="button" class="btn btn-link btn-sm" disabled=is_loading on:click=resend.clone()>
                                "Resend code"
                            </button>
                        </form>
                    </div>
                </Show>
            </div>
        </div>
    }
}
