use super::{AdminLayout, AdminList, Toolbar};
use leptos::prelude::*;
use villa_shared::{Booking, BookingStatus};

const STATUS_FILTERS: [BookingStatus; 3] = [
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Cancelled,
];

fn status_badge(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "badge badge-warning",
        BookingStatus::Confirmed => "badge badge-success",
        BookingStatus::Cancelled => "badge badge-error",
    }
}

#[component]
pub fn BookingsPage() -> impl IntoView {
    let list = AdminList::<Booking>::new("Admin.Bookings");
    let filters: Vec<&'static str> = STATUS_FILTERS.iter().map(BookingStatus::label).collect();

    let rows = {
        let list = list.clone();
        move || {
            let list = list.clone();
            view! {
                <table class="table table-zebra">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Category"</th>
                            <th>"Room"</th>
                            <th>"Check-in"</th>
                            <th>"Check-out"</th>
                            <th>"Status"</th>
                            <th>"Notes"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {list
                            .rows()
                            .into_iter()
                            .map(|booking| {
                                let list = list.clone();
                                let id = booking.booking_id;
                                view! {
                                    <tr>
                                        <td>{id}</td>
                                        <td>{booking.category.clone()}</td>
                                        <td>{booking.room_id.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string())}</td>
                                        <td>{booking.start.to_string()}</td>
                                        <td>{booking.end.to_string()}</td>
                                        <td><span class=status_badge(booking.status)>{booking.status.label()}</span></td>
                                        <td class="whitespace-pre-line text-xs max-w-xs">{booking.notes.clone()}</td>
                                        <td>
                                            <button class="btn btn-error btn-xs" on:click=move |_| list.delete(id)>
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
        <AdminLayout title="Bookings">
            <Toolbar on_search=list.on_search() filters=filters on_filter=list.on_filter() />
            {list.frame(rows)}
        </AdminLayout>
    }
}
