//! Crumb browser front end
//!
//! One bundle serves both pages; the path decides which one renders.

use std::sync::Arc;

use crumb::{config::CartConfig, fixtures::bakery_catalog};
use leptos::prelude::*;

mod browser;
mod checkout;
mod order;
mod session;
mod storage;

/// Page selected by the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Order,
    Checkout,
}

impl Page {
    fn from_path(path: &str) -> Self {
        if path.trim_end_matches('/').ends_with("checkout.html") {
            Page::Checkout
        } else {
            Page::Order
        }
    }

    fn current() -> Self {
        web_sys::window()
            .and_then(|window| window.location().pathname().ok())
            .map_or(Page::Order, |path| Self::from_path(&path))
    }
}

/// Main app shell.
#[component]
fn App() -> impl IntoView {
    match bakery_catalog() {
        Ok(catalog) => {
            let catalog = Arc::new(catalog);
            let config = Arc::new(CartConfig::default());

            let page = match Page::current() {
                Page::Order => {
                    view! { <order::OrderPage catalog=catalog config=config /> }.into_any()
                }
                Page::Checkout => {
                    view! { <checkout::CheckoutPage catalog=catalog config=config /> }.into_any()
                }
            };

            view! {
                <main>
                    <header>
                        <h1>"The Cozy Crumb"</h1>
                        <nav>
                            <a href="index.html">"Order Now"</a>
                            <a href="checkout.html">"Checkout"</a>
                        </nav>
                    </header>
                    {page}
                </main>
            }
            .into_any()
        }
        Err(error) => view! {
            <main>
                <h1>"The Cozy Crumb"</h1>
                <p class="error">{error.to_string()}</p>
            </main>
        }
        .into_any(),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(App);
}
