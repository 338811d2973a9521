use super::AdminLayout;
use crate::auth::use_auth;
use crate::components::common::{ErrorAlert, Pagination, Spinner};
use crate::hooks::{in_scope, use_scope};
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::admin::{LocalRemove, resources};
use villa_shared::User;
use villa_shared::protocol::UserPage;

/// 信号中的当前用户页
#[derive(Clone, Copy)]
struct LoadedPage(RwSignal<Option<UserPage>>);

impl LocalRemove for LoadedPage {
    type Item = User;

    fn remove_local(&mut self, key: &String) {
        self.0.update(|d| {
            if let Some(page) = d {
                page.remove_local(key);
            }
        });
    }
}

/// 用户列表由后端分页；删除只改本页，删空时退回上一页
#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = use_auth();
    let scope = use_scope();

    let page = RwSignal::new(1u32);
    let data = RwSignal::new(Option::<UserPage>::None);
    let (is_loading, set_is_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let fetch = {
        let scope = scope.clone();
        move |target: u32| {
            set_is_loading.set(true);
            let scope = scope.clone();
            spawn_local(async move {
                let api = auth.api();
                let Some(result) = in_scope(&scope, resources::load_users(&api, target)).await else {
                    return;
                };
                set_is_loading.set(false);
                match result {
                    Ok(loaded) => {
                        set_error_msg.set(None);
                        page.set(loaded.current_page.max(1));
                        data.set(Some(loaded));
                    }
                    Err(e) => {
                        villa::log_error!("[Admin.Users] {}", e);
                        set_error_msg.set(Some(e.user_message()));
                    }
                }
            });
        }
    };
    fetch(1);

    let on_delete = {
        let scope = scope.clone();
        let fetch = fetch.clone();
        move |user: User| {
            let confirmed = window()
                .confirm_with_message(&format!("Delete user {}?", user.email))
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let scope = scope.clone();
            let fetch = fetch.clone();
            spawn_local(async move {
                let api = auth.api();
                let mut loaded = LoadedPage(data);
                let deleted = in_scope(
                    &scope,
                    resources::delete_from_view(&api, &mut loaded, &user.id, confirmed),
                )
                .await;
                match deleted {
                    Some(Ok(true)) => {
                        set_error_msg.set(None);
                        let step_back = data.with_untracked(|d| {
                            d.as_ref().filter(|p| p.should_step_back()).map(|p| p.current_page - 1)
                        });
                        if let Some(previous) = step_back {
                            fetch(previous);
                        }
                    }
                    Some(Ok(false)) | None => {}
                    Some(Err(e)) => set_error_msg.set(Some(e.user_message())),
                }
            });
        }
    };

    let total = Signal::derive(move || {
        data.with(|d| d.as_ref().map_or(1, |p| p.total_pages.max(1) as usize))
    });
    let on_prev = {
        let fetch = fetch.clone();
        Callback::new(move |_| {
            let current = page.get_untracked();
            if current > 1 {
                fetch(current - 1);
            }
        })
    };
    let on_next = {
        let fetch = fetch.clone();
        Callback::new(move |_| {
            let current = page.get_untracked();
            if (current as usize) < total.get_untracked() {
                fetch(current + 1);
            }
        })
    };

    view! {
        <AdminLayout title="Users">
            <ErrorAlert message=error_msg />
            <p class="text-sm text-base-content/60 mb-2">
                {move || data.with(|d| d.as_ref().map(|p| format!("{} users", p.total_users)).unwrap_or_default())}
            </p>
            <Show when=move || is_loading.get()>
                <Spinner />
            </Show>
            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Type"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let on_delete = on_delete.clone();
                            data.with(|d| d.as_ref().map(|p| p.users.clone()).unwrap_or_default())
                                .into_iter()
                                .map(|user| {
                                    let on_delete = on_delete.clone();
                                    let target = user.clone();
                                    view! {
                                        <tr>
                                            <td>{format!("{} {}", user.first_name, user.last_name)}</td>
                                            <td>{user.email.clone()}</td>
                                            <td><span class="badge badge-outline">{user.user_type.label()}</span></td>
                                            <td>
                                                <button
                                                    class="btn btn-error btn-xs"
                                                    on:click=move |_| on_delete(target.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </div>
            <Pagination page=Signal::derive(move || page.get() as usize) total=total on_prev=on_prev on_next=on_next />
        </AdminLayout>
    }
}
