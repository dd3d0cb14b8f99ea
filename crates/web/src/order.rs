//! Order Now page: menu, order form, favourites and cart preview

use std::sync::Arc;

use crumb::{
    actions::{Notifier, Selection, add_to_cart},
    catalog::{Catalog, CatalogAlias, CatalogItem, Section},
    config::CartConfig,
    money::format_amount,
    views::PreviewView,
};
use leptos::prelude::*;
use rusty_money::iso::Currency;

use crate::{
    browser::BrowserNotifier,
    session::{self, CartVersion},
};

/// `"Name ($price)"` label for the order form select.
pub(crate) fn option_label(item: &CatalogItem, currency: &Currency) -> String {
    format!(
        "{} ({})",
        item.name,
        format_amount(item.unit_price(), currency)
    )
}

/// Build the form selection for the chosen option.
pub(crate) fn selection<'a>(
    catalog: &'a Catalog,
    key: &'a str,
    quantity: &'a str,
    label: Option<&'a str>,
) -> Selection<'a> {
    let price = catalog.get(key).map(CatalogItem::unit_price);

    Selection {
        key,
        quantity,
        label,
        price,
    }
}

/// Build the selection for a favourite card.
pub(crate) fn favorite_selection<'a>(favorite: &'a CatalogAlias, quantity: &'a str) -> Selection<'a> {
    Selection {
        key: &favorite.alias,
        quantity,
        label: None,
        price: Some(favorite.unit_price()),
    }
}

/// Validate a selection and add it, reporting problems to the customer.
///
/// Returns whether the item was added.
fn submit(
    catalog: &Catalog,
    config: &CartConfig,
    version: CartVersion,
    selection: &Selection<'_>,
) -> bool {
    let request = match selection.to_request() {
        Ok(request) => request,
        Err(message) => {
            BrowserNotifier.error(message);

            return false;
        }
    };

    session::mutate(catalog, config, version, |service| {
        add_to_cart(service, request, &BrowserNotifier)
    })
    .flatten()
    .is_some()
}

#[component]
fn MenuSection(catalog: Arc<Catalog>, section: Section) -> impl IntoView {
    let currency = catalog.currency();

    view! {
        <section class="menu-section">
            <h3>{section.title()}</h3>
            <ul>
                {catalog
                    .section(section)
                    .map(|item| {
                        view! {
                            <li class="menu-item">
                                <span>{item.name.clone()}</span>
                                <span>{format_amount(item.unit_price(), currency)}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn OrderForm(catalog: Arc<Catalog>, config: Arc<CartConfig>, version: CartVersion) -> impl IntoView {
    let selected = RwSignal::new(String::from("none"));
    let quantity = RwSignal::new(String::from("1"));
    let currency = catalog.currency();

    let options = catalog
        .iter()
        .map(|item| {
            view! { <option value=item.key.clone()>{option_label(item, currency)}</option> }
        })
        .collect_view();

    let submit_catalog = Arc::clone(&catalog);

    let on_submit = move |event: leptos::ev::SubmitEvent| {
        event.prevent_default();

        let key = selected.get_untracked();
        let quantity_text = quantity.get_untracked();
        let label = submit_catalog
            .get(&key)
            .map(|item| option_label(item, submit_catalog.currency()));

        let chosen = selection(&submit_catalog, &key, &quantity_text, label.as_deref());

        if submit(&submit_catalog, &config, version, &chosen) {
            selected.set(String::from("none"));
            quantity.set(String::from("1"));
        }
    };

    view! {
        <form class="order-form" on:submit=on_submit>
            <label>
                "Item"
                <select
                    prop:value=move || selected.get()
                    on:change=move |event| selected.set(event_target_value(&event))
                >
                    <option value="none">"-- Select an item --"</option>
                    {options}
                </select>
            </label>
            <label>
                "Quantity"
                <input
                    type="number"
                    min="1"
                    prop:value=move || quantity.get()
                    on:input=move |event| quantity.set(event_target_value(&event))
                />
            </label>
            <button type="submit">"Add to Cart"</button>
        </form>
    }
}

#[component]
fn Favorites(catalog: Arc<Catalog>, config: Arc<CartConfig>, version: CartVersion) -> impl IntoView {
    let currency = catalog.currency();

    let cards = catalog
        .favorites()
        .into_iter()
        .map(|favorite| {
            let favorite = favorite.clone();
            let price = format_amount(favorite.unit_price(), currency);
            let title = favorite.alias.clone();
            let quantity_label = format!("{} quantity", favorite.alias);
            let quantity = RwSignal::new(String::from("1"));
            let catalog = Arc::clone(&catalog);
            let config = Arc::clone(&config);

            let on_add = move |_| {
                let quantity_text = quantity.get_untracked();

                if submit(&catalog, &config, version, &favorite_selection(&favorite, &quantity_text)) {
                    quantity.set(String::from("1"));
                }
            };

            view! {
                <li class="favorite-card">
                    <span>{title}</span>
                    <span>{price}</span>
                    <input
                        type="number"
                        min="1"
                        aria-label=quantity_label
                        prop:value=move || quantity.get()
                        on:input=move |event| quantity.set(event_target_value(&event))
                    />
                    <button type="button" on:click=on_add>
                        "Add to Cart"
                    </button>
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="favorites">
            <h3>"Signature Favorites"</h3>
            <ul>{cards}</ul>
        </section>
    }
}

#[component]
fn CartPreview(catalog: Arc<Catalog>, config: Arc<CartConfig>, version: CartVersion) -> impl IntoView {
    let current = move || {
        version.track();

        PreviewView::from_cart(&session::read_cart(&catalog, &config), catalog.currency())
    };

    view! {
        <aside class="cart-preview">
            <h3>"Your Cart"</h3>
            {move || {
                let preview = current();

                view! {
                    <ul>
                        {preview
                            .empty_message()
                            .map(|message| view! { <li class="cart-empty">{message}</li> })}
                        {preview
                            .lines
                            .into_iter()
                            .map(|line| view! { <li data-key=line.key>{line.text}</li> })
                            .collect_view()}
                    </ul>
                    <p class="cart-subtotal">"Subtotal: " {preview.subtotal}</p>
                }
            }}
            <a href="checkout.html">"Proceed to Checkout"</a>
        </aside>
    }
}

/// Order Now page.
#[component]
pub(crate) fn OrderPage(
    /// Menu data.
    catalog: Arc<Catalog>,
    /// Cart settings.
    config: Arc<CartConfig>,
) -> impl IntoView {
    let version = RwSignal::new(0_u64);

    view! {
        <div class="order-page">
            <section class="menu">
                <h2>"Our Menu"</h2>
                {Section::ALL
                    .into_iter()
                    .map(|section| view! { <MenuSection catalog=Arc::clone(&catalog) section=section /> })
                    .collect_view()}
            </section>
            <Favorites catalog=Arc::clone(&catalog) config=Arc::clone(&config) version=version />
            <OrderForm catalog=Arc::clone(&catalog) config=Arc::clone(&config) version=version />
            <CartPreview catalog=catalog config=config version=version />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use crumb::{
        actions::{INVALID_QUANTITY_MESSAGE, INVALID_SELECTION_MESSAGE},
        fixtures::bakery_catalog,
        service::AddItem,
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn option_labels_carry_price() -> TestResult {
        let catalog = bakery_catalog()?;
        let rye = catalog.get("classic-rye").ok_or("classic-rye missing")?;

        assert_eq!(option_label(rye, catalog.currency()), "Classic Rye ($9.50)");

        Ok(())
    }

    #[test]
    fn selection_uses_catalog_price_and_plain_label() -> TestResult {
        let catalog = bakery_catalog()?;
        let label = "Classic Rye ($9.50)";

        let request = selection(&catalog, "classic-rye", "2", Some(label)).to_request()?;

        assert_eq!(
            request,
            AddItem::new("classic-rye", 2)
                .with_name("Classic Rye")
                .with_price(Decimal::new(950, 2))
        );

        Ok(())
    }

    #[test]
    fn placeholder_option_is_rejected() -> TestResult {
        let catalog = bakery_catalog()?;

        assert_eq!(
            selection(&catalog, "none", "1", None).to_request(),
            Err(INVALID_SELECTION_MESSAGE)
        );

        Ok(())
    }

    #[test]
    fn favorite_quantity_is_validated() -> TestResult {
        let catalog = bakery_catalog()?;
        let favorites = catalog.favorites();
        let kraken = favorites
            .iter()
            .find(|favorite| favorite.alias == "Sourdough Loaf (The Kraken)")
            .ok_or("kraken missing")?;

        let request = favorite_selection(kraken, "3").to_request()?;

        assert_eq!(request.key, "Sourdough Loaf (The Kraken)");
        assert_eq!(request.quantity, 3);
        assert_eq!(
            favorite_selection(kraken, "0").to_request(),
            Err(INVALID_QUANTITY_MESSAGE)
        );

        Ok(())
    }
}
