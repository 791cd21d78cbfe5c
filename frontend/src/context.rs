//! Application context shared by every page.
//!
//! The core stores are `Rc`-based, so they live in a local `StoredValue`.
//! Their published values are mirrored into signals once, here, and the views
//! only read the signals.

use leptos::prelude::*;
use marketplace_client::Marketplace;
use marketplace_client::config::ServiceEndpoints;
use marketplace_client::guards::Access;
use marketplace_shared::{CartItem, User};
use std::rc::Rc;

use crate::web::{BrowserStorage, FetchHttpClient, page_location};

pub type Client = Marketplace<FetchHttpClient>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
    pub duration_ms: u32,
}

#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<Rc<Client>, LocalStorage>,
    pub user: RwSignal<Option<User>>,
    pub cart: RwSignal<Vec<CartItem>>,
    pub notice: RwSignal<Option<Notice>>,
    next_notice: StoredValue<u64>,
}

impl AppContext {
    pub fn new() -> Self {
        let endpoints = ServiceEndpoints::resolve(&page_location());
        log::debug!("service endpoints: {endpoints:?}");
        let client = Rc::new(Marketplace::new(
            Rc::new(FetchHttpClient),
            endpoints,
            Rc::new(BrowserStorage),
        ));

        let user = RwSignal::new(client.session.current());
        let cart = RwSignal::new(client.cart.get_cart_items());
        client.session.subscribe(move |u| user.set(u.clone()));
        client.cart.subscribe(move |items| cart.set(items.clone()));

        Self {
            client: StoredValue::new_local(client),
            user,
            cart,
            notice: RwSignal::new(None),
            next_notice: StoredValue::new(0),
        }
    }

    pub fn client(&self) -> Rc<Client> {
        self.client.get_value()
    }

    pub fn access(&self) -> Signal<Access> {
        let user = self.user;
        Signal::derive(move || {
            user.with(|u| u.as_ref().map_or(Access::Anonymous, |u| Access::from(u.role)))
        })
    }

    pub fn cart_count(&self) -> Signal<u32> {
        let cart = self.cart;
        Signal::derive(move || cart.with(|items| items.iter().map(|i| i.quantity).sum()))
    }

    fn notify(&self, kind: NoticeKind, text: impl Into<String>, duration_ms: u32) {
        let id = self.next_notice.get_value() + 1;
        self.next_notice.set_value(id);
        self.notice.set(Some(Notice {
            id,
            kind,
            text: text.into(),
            duration_ms,
        }));
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Success, text, 3000);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Error, text, 4000);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(NoticeKind::Info, text, 3000);
    }

    pub fn logout(&self) {
        self.client().session.logout();
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
