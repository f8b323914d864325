use super::*;
use crate::cart::Cart;
use crate::catalog::{CatalogProvider, StaticCatalog};
use crate::checkout::{CheckoutDetails, DiscountChoice, LogisticsInput, build_summary};
use crate::identity::CustomerIdentity;
use crate::rewards::{CustomerActivity, UserRewardState};
use shared::models::{BranchLocation, PaymentMethod, Voltage};

fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    OrdersManager::with_storage(storage)
}

fn identity(customer_id: &str) -> CustomerIdentity {
    CustomerIdentity::new(customer_id)
        .with_name("Ana Souza")
        .with_phone("45999990000")
}

fn cart_with(items: &[(&str, u32)]) -> Cart {
    let catalog = StaticCatalog::standard();
    let mut cart = Cart::new();
    for (id, qty) in items {
        cart.add_line(catalog.get_product(id).unwrap(), None);
        cart.set_quantity(id, i64::from(*qty) - 1);
    }
    cart
}

fn delivery_details(branch: BranchLocation) -> CheckoutDetails {
    CheckoutDetails {
        branch: Some(branch),
        payment_method: Some(PaymentMethod::Pix),
        logistics: LogisticsInput {
            delivery_address: Some("Av. Brasil, 10".to_string()),
            ..Default::default()
        },
        discount: DiscountChoice::None,
        ..Default::default()
    }
}

fn event_details(discount: DiscountChoice) -> CheckoutDetails {
    CheckoutDetails {
        branch: Some(BranchLocation::MarechalCandidoRondon),
        payment_method: Some(PaymentMethod::Card),
        logistics: LogisticsInput {
            event_address: Some("Salão Paroquial".to_string()),
            event_date: Some("2026-12-24".to_string()),
            event_time: Some("19:30".to_string()),
            voltage: Some(Voltage::V110),
            ..Default::default()
        },
        discount,
        ..Default::default()
    }
}

/// Give `customer_id` a redeemed, unused discount for `mission_id`
fn seed_redeemed(manager: &OrdersManager, customer_id: &str, mission_id: u32) {
    let missions = MissionCatalog::standard();
    let mut state = UserRewardState::new();
    state.evaluate_completion(
        &missions,
        &CustomerActivity {
            orders_placed: 5,
            collectibles_owned: 5,
            max_items_in_single_order: 10,
            bulk_order_placed: true,
        },
    );
    state.redeem(&missions, mission_id).unwrap();

    let storage = manager.storage();
    let txn = storage.begin_write().unwrap();
    storage
        .store_reward_state(&txn, customer_id, &state)
        .unwrap();
    txn.commit().unwrap();
}

/// Summary for a simple growler delivery order
fn simple_summary(customer_id: &str, branch: BranchLocation) -> CheckoutSummary {
    build_summary(
        &cart_with(&[("growler-pilsen-cristal-1l", 2)]),
        &delivery_details(branch),
        &identity(customer_id),
        &[],
    )
    .unwrap()
}

/// Summary for the bulk scenario, discounted with whatever is available
fn discounted_bulk_summary(manager: &OrdersManager, customer_id: &str) -> CheckoutSummary {
    let available = manager
        .storage()
        .get_reward_state(customer_id)
        .unwrap()
        .available_discounts(&MissionCatalog::standard());
    build_summary(
        &cart_with(&[("keg-pilsen-30", 1), ("growler-pilsen-cristal-1l", 2)]),
        &event_details(DiscountChoice::Auto),
        &identity(customer_id),
        &available,
    )
    .unwrap()
}

mod test_concurrency;
mod test_core;
