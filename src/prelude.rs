//! Crumb prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    actions::{Navigator, Notifier, Selection, add_to_cart, confirm_and_remove, place_order},
    cart::{Cart, CartError, LineItem},
    catalog::{Catalog, CatalogAlias, CatalogError, CatalogItem, CatalogKey, Resolution, Section},
    config::CartConfig,
    fixtures::{FixtureError, bakery_catalog, load_catalog},
    gating::{FieldState, GateMessage, GateState},
    money::format_amount,
    pickup::PickupDetails,
    pricing::{FormattedTotals, Totals},
    service::{AddItem, AddItemError, Added, CartService},
    store::{CartStore, KeyValueStorage, MemoryStorage, StorageError, StoreError},
    views::{CartTableView, PreviewLine, PreviewView, TableRow, ViewError},
};
