use leptos::prelude::*;
use marketplace_client::route::AppRoute;

use crate::context::use_app;
use crate::web::router::{Link, use_router};

/// Top bar shared by the signed-in pages.
#[component]
pub fn NavBar() -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let count = app.cart_count();
    let user = app.user;
    let endpoints = app.client().endpoints().clone();

    let is_seller = move || user.with(|u| u.as_ref().is_some_and(|u| u.is_seller()));
    let avatar = move || {
        user.with(|u| {
            u.as_ref()
                .and_then(|u| u.avatar.as_deref())
                .map(|a| endpoints.avatar_url(a))
        })
    };

    let on_logout = move |_| {
        app.logout();
        router.navigate_to(AppRoute::Login);
    };

    view! {
        <div class="navbar bg-base-100 shadow-sm px-4">
            <div class="flex-1">
                <Link route=AppRoute::Products class="btn btn-ghost text-xl">"Marketplace"</Link>
            </div>
            <div class="flex-none gap-2 items-center">
                <Show when=is_seller>
                    <Link route=AppRoute::SellerDashboard class="btn btn-ghost btn-sm">
                        "Dashboard"
                    </Link>
                </Show>
                <Link route=AppRoute::Cart class="btn btn-ghost btn-sm">
                    <div class="indicator">
                        <span>"Cart"</span>
                        <Show when=move || count.get() != 0>
                            <span class="badge badge-sm badge-primary indicator-item">
                                {move || count.get()}
                            </span>
                        </Show>
                    </div>
                </Link>
                {move || {
                    avatar()
                        .map(|src| {
                            view! {
                                <div class="avatar">
                                    <div class="w-8 rounded-full">
                                        <img src=src alt="avatar" />
                                    </div>
                                </div>
                            }
                        })
                }}
                <span class="text-sm opacity-70">
                    {move || user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default())}
                </span>
                <button class="btn btn-outline btn-sm" on:click=on_logout>
                    "Logout"
                </button>
            </div>
        </div>
    }
}
