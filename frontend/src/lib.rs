//! Marketplace browser application.
//!
//! - `web`: browser adapters (storage, fetch, History-API router, files)
//! - `context`: stores and their signals, shared through Leptos context
//! - `components`: pages and widgets
//!
//! Business rules live in `marketplace-client`; this crate only renders.

mod context;
mod components {
    mod alert;
    pub mod cart;
    pub mod dashboard;
    pub mod login;
    pub mod navbar;
    pub mod notification;
    pub mod product_detail;
    mod product_form_dialog;
    pub mod product_list;
    pub mod register;

    pub use alert::{ErrorAlert, Spinner};
}
pub(crate) mod web;

use leptos::prelude::*;
use marketplace_client::route::AppRoute;

use crate::components::cart::CartPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::notification::NotificationToast;
use crate::components::product_detail::ProductDetailPage;
use crate::components::product_list::ProductListPage;
use crate::components::register::RegisterPage;
use crate::context::AppContext;
use crate::web::router::{Link, Router, RouterOutlet};

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Products => view! { <ProductListPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailPage id=id /> }.into_any(),
        AppRoute::Cart => view! { <CartPage /> }.into_any(),
        AppRoute::SellerDashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center space-y-4">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl">"Page not found"</p>
                    <Link route=AppRoute::Products class="btn btn-primary">"Back to the shop"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <Router access=ctx.access()>
            <NotificationToast />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
