use super::{AdminLayout, AdminList, Toolbar};
use crate::web::router::use_router;
use leptos::prelude::*;
use villa::admin::Listed;
use villa::route::{AdminRoute, AppRoute, NavState};
use villa_shared::Category;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let router = use_router();
    let list = AdminList::<Category>::new("Admin.Categories");
    let form_path = AppRoute::Admin(AdminRoute::CategoryForm).to_path();

    let rows = {
        let list = list.clone();
        move || {
            let list = list.clone();
            view! {
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Image"</th>
                            <th>"Name"</th>
                            <th>"Price"</th>
                            <th>"Features"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .rows()
                            .into_iter()
                            .map(|category| {
                                let list = list.clone();
                                let key = category.key();
                                let editing = category.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <div class="avatar">
                                                <div class="w-16 rounded">
                                                    <img src=category.image.clone() alt=category.name.clone() />
                                                </div>
                                            </div>
                                        </td>
                                        <td class="font-semibold">{category.name.clone()}</td>
                                        <td>{format!("${:.2}", category.price)}</td>
                                        <td class="text-xs">{category.features.join(", ")}</td>
                                        <td class="flex gap-1">
                                            <button
                                                class="btn btn-outline btn-xs"
                                                on:click=move |_| {
                                                    router.navigate_with(form_path, NavState::EditCategory(editing.clone()))
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn-error btn-xs"
                                                on:click=move |_| list.delete(key.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any()
        }
    };

    view! {
        <AdminLayout title="Categories">
            <Toolbar on_search=list.on_search()>
                <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate(form_path)>
                    "Add category"
                </button>
            </Toolbar>
            {list.frame(rows)}
        </AdminLayout>
    }
}
