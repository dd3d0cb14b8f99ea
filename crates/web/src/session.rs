//! Per-event access to the persisted cart

use crumb::{
    actions::{Notifier, STORAGE_FAILURE_MESSAGE},
    cart::Cart,
    catalog::Catalog,
    config::CartConfig,
    service::CartService,
    store::{CartStore, StorageError},
};
use leptos::prelude::*;
use tracing::warn;

use crate::{browser::BrowserNotifier, storage::LocalStorage};

/// Bumped after every write so views re-read storage.
pub(crate) type CartVersion = RwSignal<u64>;

pub(crate) fn open_service<'c>(
    catalog: &'c Catalog,
    config: &CartConfig,
) -> Result<CartService<'c, LocalStorage>, StorageError> {
    let storage = LocalStorage::open()?;

    Ok(CartService::new(
        catalog,
        CartStore::with_key(storage, config.storage_key.clone()),
    ))
}

/// Load the cart for rendering. Unavailable storage renders as empty.
pub(crate) fn read_cart(catalog: &Catalog, config: &CartConfig) -> Cart {
    match open_service(catalog, config) {
        Ok(service) => service.cart(),
        Err(error) => {
            warn!(%error, "cart storage unavailable");

            Cart::new()
        }
    }
}

/// Run a cart mutation, then bump the version.
pub(crate) fn mutate<T>(
    catalog: &Catalog,
    config: &CartConfig,
    version: CartVersion,
    action: impl FnOnce(&mut CartService<'_, LocalStorage>) -> T,
) -> Option<T> {
    let mut service = match open_service(catalog, config) {
        Ok(service) => service,
        Err(error) => {
            warn!(%error, "cart storage unavailable");
            BrowserNotifier.error(STORAGE_FAILURE_MESSAGE);

            return None;
        }
    };

    let result = action(&mut service);

    version.update(|version| *version = version.wrapping_add(1));

    Some(result)
}
