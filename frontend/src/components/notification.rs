use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::context::{NoticeKind, use_app};

/// Toast for the latest notice; it dismisses itself after the notice's
/// duration unless a newer one replaced it.
#[component]
pub fn NotificationToast() -> impl IntoView {
    let app = use_app();
    let notice = app.notice;

    Effect::new(move |_| {
        let Some(current) = notice.get() else {
            return;
        };
        Timeout::new(current.duration_ms, move || {
            if notice.get_untracked().is_some_and(|n| n.id == current.id) {
                notice.set(None);
            }
        })
        .forget();
    });

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    match notice.get().map(|n| n.kind) {
                        Some(NoticeKind::Error) => "alert alert-error shadow-lg",
                        Some(NoticeKind::Success) => "alert alert-success shadow-lg",
                        _ => "alert alert-info shadow-lg",
                    }
                }>
                    <span>{move || notice.get().map(|n| n.text).unwrap_or_default()}</span>
                    <button class="btn btn-ghost btn-xs" on:click=move |_| notice.set(None)>
                        "✕"
                    </button>
                </div>
            </div>
        </Show>
    }
}
