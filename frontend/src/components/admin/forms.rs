//! 后台新建/编辑表单页
//!
//! 编辑时从导航状态取出实体预填；保存成功后回到对应列表。

use super::AdminLayout;
use crate::auth::{config, use_auth};
use crate::components::common::{ErrorAlert, SubmitButton, TextArea, TextField};
use crate::hooks::{Load, in_scope, load_once, use_scope};
use crate::web::read_file;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::admin::forms::{CategoryForm, GalleryForm, RoomForm};
use villa::catalog;
use villa::request::MediaFile;
use villa::route::{AdminRoute, AppRoute, NavState};

/// 文件选择框，读取完成后回调
#[component]
fn FilePicker(
    label: &'static str,
    #[prop(optional)] multiple: bool,
    on_files: Callback<Vec<MediaFile>>,
    on_error: Callback<String>,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(list) = input.files() else {
            return;
        };
        let files: Vec<web_sys::File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        if files.is_empty() {
            return;
        }
        spawn_local(async move {
            let mut loaded = Vec::with_capacity(files.len());
            for file in files {
                match read_file(file).await {
                    Ok(media) => loaded.push(media),
                    Err(e) => {
                        on_error.run(e.user_message());
                        return;
                    }
                }
            }
            on_files.run(loaded);
        });
    };

    view! {
        <div class="form-control">
            <label class="label"><span class="label-text">{label}</span></label>
            <input
                type="file"
                accept="image/*"
                multiple=multiple
                class="file-input file-input-bordered w-full"
                on:change=on_change
            />
        </div>
    }
}

/// 房型下拉框，选项来自后端房型列表
#[component]
fn CategorySelect(value: RwSignal<String>) -> impl IntoView {
    let scope = use_scope();
    let categories = load_once(&scope, "Admin.CategorySelect", |api| async move {
        catalog::categories(&api).await
    });
    let options = move || {
        let current = value.get();
        categories.with(|c| {
            catalog::category_options(c.ready().map(Vec::as_slice).unwrap_or_default(), &current)
        })
    };
    let failed = Signal::derive(move || categories.with(Load::error));

    view! {
        <div class="form-control">
            <label class="label"><span class="label-text">"Category"</span></label>
            <select
                class="select select-bordered w-full"
                disabled=move || categories.with(Load::is_loading)
                prop:value=move || {
                    // 选项重建后重新同步选中项
                    categories.track();
                    value.get()
                }
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">"Select a category"</option>
                {move || {
                    options()
                        .into_iter()
                        .map(|name| view! { <option value=name.clone()>{name}</option> })
                        .collect_view()
                }}
            </select>
            <ErrorAlert message=failed />
        </div>
    }
}

#[component]
fn FormActions(
    #[prop(into)] loading: Signal<bool>,
    label: &'static str,
    back: AdminRoute,
) -> impl IntoView {
    let router = use_router();
    view! {
        <div class="flex gap-2 mt-4">
            <button
                type="button"
                class="btn btn-ghost flex-1"
                on:click=move |_| router.navigate(AppRoute::Admin(back).to_path())
            >
                "Cancel"
            </button>
            <div class="flex-1">
                <SubmitButton loading=loading label=label busy_label="Saving..." />
            </div>
        </div>
    }
}

// =========================================================
// Category
// =========================================================

#[component]
pub fn CategoryFormPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let base = match router.nav_state().get_untracked() {
        NavState::EditCategory(category) => CategoryForm::edit(&category),
        _ => CategoryForm::default(),
    };
    let title = if base.is_edit() { "Edit category" } else { "New category" };
    let name = RwSignal::new(base.name.clone());
    let price = RwSignal::new(base.price.clone());
    let description = RwSignal::new(base.description.clone());
    let features = RwSignal::new(base.features.clone());
    let image = RwSignal::new(base.image.clone());
    let upload = RwSignal::new(Option::<MediaFile>::None);

    let (is_saving, set_is_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_files = Callback::new(move |mut files: Vec<MediaFile>| upload.set(files.pop()));
    let on_file_error = Callback::new(move |message: String| set_error_msg.set(Some(message)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = CategoryForm {
            name: name.get(),
            price: price.get(),
            description: description.get(),
            features: features.get(),
            image: image.get(),
            upload: upload.get(),
            ..base.clone()
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.user_message()));
            return;
        }

        set_is_saving.set(true);
        set_error_msg.set(None);
        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, form.submit(&api, &config().media)).await else {
                return;
            };
            set_is_saving.set(false);
            match result {
                Ok(_) => router.navigate(AppRoute::Admin(AdminRoute::Categories).to_path()),
                Err(e) => {
                    villa::log_error!("[Admin.CategoryForm] {}", e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <AdminLayout title=title>
            <div class="card bg-base-100 shadow max-w-2xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error_msg />
                    <TextField label="Name" value=name />
                    <TextField label="Price per night" value=price kind="number" />
                    <TextArea label="Description" value=description />
                    <TextArea label="Features (comma separated)" value=features />
                    <Show when=move || !image.get().is_empty()>
                        <img src=move || image.get() alt="Current image" class="w-48 rounded" />
                    </Show>
                    <FilePicker label="Image" on_files=on_files on_error=on_file_error />
                    <FormActions loading=is_saving label="Save category" back=AdminRoute::Categories />
                </form>
            </div>
        </AdminLayout>
    }
}

// =========================================================
// Room
// =========================================================

#[component]
pub fn RoomFormPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let base = match router.nav_state().get_untracked() {
        NavState::EditRoom(room) => RoomForm::edit(&room),
        _ => RoomForm::default(),
    };
    let is_edit = base.is_edit();
    let title = if is_edit { "Edit room" } else { "New room" };
    let room_id = RwSignal::new(base.room_id.clone());
    let category = RwSignal::new(base.category.clone());
    let max_guests = RwSignal::new(base.max_guests.clone());
    let available = RwSignal::new(base.available);
    let special_description = RwSignal::new(base.special_description.clone());
    let notes = RwSignal::new(base.notes.clone());
    // 已有照片保存在草稿里
    let draft = RwSignal::new(base);
    let uploads = RwSignal::new(Vec::<MediaFile>::new());

    let (is_saving, set_is_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_files = Callback::new(move |files: Vec<MediaFile>| uploads.set(files));
    let on_file_error = Callback::new(move |message: String| set_error_msg.set(Some(message)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RoomForm {
            room_id: room_id.get(),
            category: category.get(),
            max_guests: max_guests.get(),
            available: available.get(),
            special_description: special_description.get(),
            notes: notes.get(),
            uploads: uploads.get(),
            ..draft.get()
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.user_message()));
            return;
        }

        set_is_saving.set(true);
        set_error_msg.set(None);
        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, form.submit(&api, &config().media)).await else {
                return;
            };
            set_is_saving.set(false);
            match result {
                Ok(_) => router.navigate(AppRoute::Admin(AdminRoute::Rooms).to_path()),
                Err(e) => {
                    villa::log_error!("[Admin.RoomForm] {}", e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
        });
    };

    let remove_photo = move |url: String| draft.update(|f| f.remove_photo(&url));

    view! {
        <AdminLayout title=title>
            <div class="card bg-base-100 shadow max-w-2xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error_msg />
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label"><span class="label-text">"Room ID"</span></label>
                            <input
                                type="number"
                                class="input input-bordered w-full"
                                disabled=is_edit
                                prop:value=move || room_id.get()
                                on:input=move |ev| room_id.set(event_target_value(&ev))
                            />
                        </div>
                        <TextField label="Max guests" value=max_guests kind="number" />
                    </div>
                    <CategorySelect value=category />
                    <label class="label cursor-pointer justify-start gap-3">
                        <input
                            type="checkbox"
                            class="toggle toggle-success"
                            prop:checked=move || available.get()
                            on:change=move |ev| available.set(event_target_checked(&ev))
                        />
                        <span class="label-text">"Available for booking"</span>
                    </label>
                    <TextArea label="Special description" value=special_description />
                    <TextArea label="Notes" value=notes />
                    <div class="flex flex-wrap gap-2">
                        {move || {
                            draft
                                .with(|f| f.photos.clone())
                                .into_iter()
                                .map(|url| {
                                    let target = url.clone();
                                    view! {
                                        <div class="indicator">
                                            <button
                                                type="button"
                                                class="indicator-item badge badge-error"
                                                on:click=move |_| remove_photo(target.clone())
                                            >
                                                "×"
                                            </button>
                                            <img src=url alt="Room photo" class="w-24 h-24 object-cover rounded" />
                                        </div>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                    <FilePicker label="Add photos" multiple=true on_files=on_files on_error=on_file_error />
                    <p class="text-xs text-base-content/60">
                        {move || match uploads.with(Vec::len) {
                            0 => String::new(),
                            n => format!("{} new photo(s) will be uploaded", n),
                        }}
                    </p>
                    <FormActions loading=is_saving label="Save room" back=AdminRoute::Rooms />
                </form>
            </div>
        </AdminLayout>
    }
}

// =========================================================
// Gallery
// =========================================================

#[component]
pub fn GalleryFormPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let scope = use_scope();

    let base = match router.nav_state().get_untracked() {
        NavState::EditGallery(item) => GalleryForm::edit(&item),
        _ => GalleryForm::default(),
    };
    let title = if base.is_edit() { "Edit image" } else { "New image" };
    let name = RwSignal::new(base.name.clone());
    let description = RwSignal::new(base.description.clone());
    let category = RwSignal::new(base.category.clone());
    let image = RwSignal::new(base.image.clone());
    let upload = RwSignal::new(Option::<MediaFile>::None);

    let (is_saving, set_is_saving) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_files = Callback::new(move |mut files: Vec<MediaFile>| upload.set(files.pop()));
    let on_file_error = Callback::new(move |message: String| set_error_msg.set(Some(message)));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = GalleryForm {
            name: name.get(),
            description: description.get(),
            category: category.get(),
            image: image.get(),
            upload: upload.get(),
            ..base.clone()
        };
        if let Err(e) = form.validate() {
            set_error_msg.set(Some(e.user_message()));
            return;
        }

        set_is_saving.set(true);
        set_error_msg.set(None);
        let scope = scope.clone();
        spawn_local(async move {
            let api = auth.api();
            let Some(result) = in_scope(&scope, form.submit(&api, &config().media)).await else {
                return;
            };
            set_is_saving.set(false);
            match result {
                Ok(_) => router.navigate(AppRoute::Admin(AdminRoute::Gallery).to_path()),
                Err(e) => {
                    villa::log_error!("[Admin.GalleryForm] {}", e);
                    set_error_msg.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <AdminLayout title=title>
            <div class="card bg-base-100 shadow max-w-2xl">
                <form class="card-body" on:submit=on_submit>
                    <ErrorAlert message=error_msg />
                    <TextField label="Name" value=name />
                    <CategorySelect value=category />
                    <TextArea label="Description" value=description />
                    <Show when=move || !image.get().is_empty()>
                        <img src=move || image.get() alt="Current image" class="w-48 rounded" />
                    </Show>
                    <FilePicker label="Image" on_files=on_files on_error=on_file_error />
                    <FormActions loading=is_saving label="Save image" back=AdminRoute::Gallery />
                </form>
            </div>
        </AdminLayout>
    }
}
