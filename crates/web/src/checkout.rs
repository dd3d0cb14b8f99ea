//! Checkout page: cart table, pickup details and place order

use std::sync::Arc;

use crumb::{
    actions::{confirm_and_remove, place_order},
    catalog::Catalog,
    config::CartConfig,
    pickup::{PICKUP_SLOTS, PickupDetails},
    views::{CartTableView, TableRow},
};
use leptos::prelude::*;
use tracing::warn;

use crate::{
    browser::{BrowserNavigator, BrowserNotifier},
    session::{self, CartVersion},
};

/// Accessible label for a row's remove button.
pub(crate) fn remove_label(row: &TableRow) -> String {
    format!("Remove {} ({}) from cart", row.name, row.line_total)
}

#[component]
fn CartRow(
    row: TableRow,
    catalog: Arc<Catalog>,
    config: Arc<CartConfig>,
    version: CartVersion,
) -> impl IntoView {
    let label = remove_label(&row);
    let key = row.key.clone();

    view! {
        <tr>
            <td>{row.name}</td>
            <td class="numeric">{row.quantity}</td>
            <td class="numeric">{row.line_total}</td>
            <td>
                <button
                    type="button"
                    class="remove-item"
                    aria-label=label
                    on:click=move |_| {
                        session::mutate(&catalog, &config, version, |service| {
                            if let Err(error) = confirm_and_remove(service, &key, &BrowserNotifier) {
                                warn!(%error, "failed to remove item");
                            }
                        });
                    }
                >
                    "Remove"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn TextField(
    label: &'static str,
    kind: &'static str,
    required: bool,
    value: RwSignal<String>,
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                required=required
                prop:value=move || value.get()
                on:input=move |event| value.set(event_target_value(&event))
            />
        </label>
    }
}

/// Checkout page.
#[component]
pub(crate) fn CheckoutPage(
    /// Menu data.
    catalog: Arc<Catalog>,
    /// Cart settings.
    config: Arc<CartConfig>,
) -> impl IntoView {
    let version = RwSignal::new(0_u64);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let pickup = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());

    let details = move || PickupDetails {
        name: name.get(),
        email: email.get(),
        phone: phone.get(),
        pickup: pickup.get(),
        notes: notes.get(),
    };

    let table_catalog = Arc::clone(&catalog);
    let table_config = Arc::clone(&config);

    let table = Memo::new(move |_| {
        version.track();

        let cart = session::read_cart(&table_catalog, &table_config);

        CartTableView::build(
            &cart,
            &details().fields(),
            table_config.tax_rate,
            table_catalog.currency(),
        )
    });

    let row_catalog = Arc::clone(&catalog);
    let row_config = Arc::clone(&config);

    let rows = move || {
        table.with(|current| {
            current
                .rows
                .iter()
                .cloned()
                .map(|row| {
                    view! {
                        <CartRow
                            row=row
                            catalog=Arc::clone(&row_catalog)
                            config=Arc::clone(&row_config)
                            version=version
                        />
                    }
                })
                .collect_view()
        })
    };

    let on_place_order = move |_| {
        let fields = details().fields();

        session::mutate(&catalog, &config, version, |service| {
            if let Err(error) =
                place_order(service, &fields, &config, &BrowserNotifier, &BrowserNavigator)
            {
                warn!(%error, "failed to place order");
            }
        });
    };

    view! {
        <div class="checkout-page">
            <section class="cart-table">
                <h2>"Your Order"</h2>
                {move || {
                    table
                        .with(CartTableView::empty_message)
                        .map(|message| view! { <p class="cart-empty">{message}</p> })
                }}
                <table>
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Qty"</th>
                            <th>"Total"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
                <dl class="totals">
                    <dt>"Subtotal"</dt>
                    <dd>{move || table.with(|view| view.totals.subtotal.clone())}</dd>
                    <dt>"Tax"</dt>
                    <dd>{move || table.with(|view| view.totals.tax.clone())}</dd>
                    <dt>"Total"</dt>
                    <dd>{move || table.with(|view| view.totals.grand_total.clone())}</dd>
                </dl>
            </section>
            <form class="pickup-details" on:submit=|event| event.prevent_default()>
                <h2>"Pickup Details"</h2>
                <TextField label="Name" kind="text" required=true value=name />
                <TextField label="Email" kind="email" required=true value=email />
                <TextField label="Phone" kind="tel" required=true value=phone />
                <label>
                    "Pickup Time"
                    <select required on:change=move |event| pickup.set(event_target_value(&event))>
                        <option value="">"-- Choose a time --"</option>
                        {PICKUP_SLOTS
                            .into_iter()
                            .map(|slot| view! { <option value=slot>{slot}</option> })
                            .collect_view()}
                    </select>
                </label>
                <TextField label="Notes" kind="text" required=false value=notes />
            </form>
            <p class="validation-message">
                {move || table.with(|view| view.gate.message_text())}
            </p>
            <button
                type="button"
                class="place-order"
                disabled=move || !table.with(|view| view.gate.is_enabled())
                on:click=on_place_order
            >
                "Place Order"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_label_names_item_and_total() {
        let row = TableRow {
            key: "ciabatta".to_string(),
            name: "Ciabatta".to_string(),
            quantity: 3,
            line_total: "$15.00".to_string(),
        };

        assert_eq!(remove_label(&row), "Remove Ciabatta ($15.00) from cart");
    }
}
