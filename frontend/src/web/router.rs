//! History-API router.
//!
//! All `window.history` access lives here. Every navigation runs
//! parse -> guard -> history update -> route signal.

use leptos::prelude::*;
use marketplace_client::guards::{self, Access};
use marketplace_client::route::AppRoute;
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(Ok(history)) = web_sys::window().map(|w| w.history()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(Ok(history)) = web_sys::window().map(|w| w.history()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// Current page plus the navigation entry points. Copied into every view
/// through context.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Injected by the app so the router does not depend on the session.
    access: Signal<Access>,
}

impl RouterService {
    fn new(access: Signal<Access>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let entered = guards::resolve(requested.clone(), access.get_untracked());
        if entered != requested {
            replace_history_state(&entered.to_path());
        }
        let (current_route, set_route) = signal(entered);
        Self {
            current_route,
            set_route,
            access,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Pushes a history entry for `route`, or for the page the guards send
    /// the visitor to instead.
    ///
    /// # Arguments
    /// - `route`: the page being requested
    pub fn navigate_to(&self, route: AppRoute) {
        let entered = guards::resolve(route, self.access.get_untracked());
        push_history_state(&entered.to_path());
        self.set_route.set(entered);
    }

    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let access = self.access;

        let closure = Closure::<dyn Fn()>::new(move || {
            let requested = AppRoute::from_path(&current_path());
            let entered = guards::resolve(requested.clone(), access.get_untracked());
            if entered != requested {
                replace_history_state(&entered.to_path());
            }
            set_route.set(entered);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        // The listener lives as long as the page.
        closure.forget();
    }

    /// Re-checks the open page when the session changes. Signing out leaves
    /// protected pages; signing in leaves the login page. The register page
    /// finishes its own flow before moving on.
    fn setup_access_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let access = self.access;

        Effect::new(move |_| {
            let access = access.get();
            let route = current_route.get_untracked();
            if access != Access::Anonymous && route == AppRoute::Register {
                return;
            }
            let entered = guards::resolve(route.clone(), access);
            if entered != route {
                log::info!("access now {access:?}, leaving {route} for {entered}");
                push_history_state(&entered.to_path());
                set_route.set(entered);
            }
        });
    }
}

fn provide_router(access: Signal<Access>) -> RouterService {
    let router = RouterService::new(access);
    router.init_popstate_listener();
    router.setup_access_redirect();
    provide_context(router);
    router
}

/// # Panics
/// Outside a [`Router`].
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(access: Signal<Access>, children: Children) -> impl IntoView {
    provide_router(access);
    children()
}

#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current_route().get())
}

/// In-app link that goes through the router instead of reloading the page.
#[component]
pub fn Link(
    route: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = route.to_path();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(route.clone());
    };
    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
