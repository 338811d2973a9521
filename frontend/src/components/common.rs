use leptos::prelude::*;

/// 内联错误区
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn SuccessAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div role="status" class="alert alert-success text-sm py-2">
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div class="flex justify-center py-12">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 提交按钮，加载期间禁用
#[component]
pub fn SubmitButton(
    #[prop(into)] loading: Signal<bool>,
    label: &'static str,
    busy_label: &'static str,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary w-full" disabled=move || loading.get()>
            {move || if loading.get() {
                view! { <span class="loading loading-spinner"></span> {busy_label} }.into_any()
            } else {
                label.into_any()
            }}
        </button>
    }
}

/// 文本输入框
#[component]
pub fn TextField(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=kind
                placeholder=placeholder
                class="input input-bordered w-full"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn TextArea(label: &'static str, value: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <textarea
                class="textarea textarea-bordered w-full"
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

/// 上一页 / 下一页
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total: Signal<usize>,
    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="join flex justify-center p-4">
            <button
                class="join-item btn btn-sm"
                disabled=move || page.get() <= 1
                on:click=move |_| on_prev.run(())
            >
                "«"
            </button>
            <button class="join-item btn btn-sm btn-disabled">
                {move || format!("Page {} of {}", page.get(), total.get())}
            </button>
            <button
                class="join-item btn btn-sm"
                disabled=move || page.get() >= total.get()
                on:click=move |_| on_next.run(())
            >
                "»"
            </button>
        </div>
    }
}
