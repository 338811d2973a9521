use super::{AdminLayout, AdminList, Toolbar};
use crate::hooks::in_scope;
use leptos::prelude::*;
use leptos::task::spawn_local;
use villa::admin::resources;
use villa_shared::{Feedback, FeedbackStatus};

#[component]
pub fn FeedbackAdminPage() -> impl IntoView {
    let list = AdminList::<Feedback>::new("Admin.Feedback");
    let filters: Vec<&'static str> = [FeedbackStatus::Visible, FeedbackStatus::Hidden]
        .iter()
        .map(FeedbackStatus::label)
        .collect();

    // 切换公开页可见性，成功后替换该行
    let toggle = {
        let list = list.clone();
        move |feedback: Feedback| {
            let list = list.clone();
            spawn_local(async move {
                let api = list.api();
                match in_scope(list.scope(), resources::toggle_feedback(&api, &feedback)).await {
                    Some(Ok(updated)) => list.replace(updated),
                    Some(Err(e)) => list.error.set(Some(e.user_message())),
                    None => {}
                }
            });
        }
    };

    let rows = {
        let list = list.clone();
        move || {
            let list = list.clone();
            let toggle = toggle.clone();
            view! {
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>"Booking"</th>
                            <th>"Email"</th>
                            <th>"Rating"</th>
                            <th>"Comment"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .rows()
                            .into_iter()
                            .map(|feedback| {
                                let list = list.clone();
                                let toggle = toggle.clone();
                                let id = feedback.id.clone();
                                let current = feedback.clone();
                                let visible = feedback.status == FeedbackStatus::Visible;
                                view! {
                                    <tr>
                                        <td>{feedback.booking_id}</td>
                                        <td>{feedback.email.clone()}</td>
                                        <td>{format!("{} / 5", feedback.rating)}</td>
                                        <td class="max-w-sm text-sm">{feedback.comment.clone()}</td>
                                        <td>
                                            <span class=if visible { "badge badge-success" } else { "badge badge-ghost" }>
                                                {feedback.status.label()}
                                            </span>
                                        </td>
                                        <td class="flex gap-1">
                                            <button
                                                class="btn btn-outline btn-xs"
                                                on:click=move |_| toggle(current.clone())
                                            >
                                                {if visible { "Hide" } else { "Show" }}
                                            </button>
                                            <button
                                                class="btn btn-error btn-xs"
                                                on:click=move |_| list.delete(id.clone())
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
        <AdminLayout title="Feedback">
            <Toolbar on_search=list.on_search() filters=filters on_filter=list.on_filter() />
            {list.frame(rows)}
        </AdminLayout>
    }
}
