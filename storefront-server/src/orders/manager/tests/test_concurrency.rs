use super::*;
use shared::error::{AppError, ErrorCode};
use std::sync::Barrier;
use std::thread;

#[test]
fn test_concurrent_creates_consume_discount_once() {
    let manager = Arc::new(create_test_manager());
    seed_redeemed(&manager, "c-1", 3);

    let summary = discounted_bulk_summary(&manager, "c-1");
    assert_eq!(summary.mission_id, Some(3));

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let manager = Arc::clone(&manager);
            let barrier = Arc::clone(&barrier);
            let summary = summary.clone();
            thread::spawn(move || {
                barrier.wait();
                manager.create(&summary).map_err(AppError::from)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let created: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    let rejected: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(created.len(), 1);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].code, ErrorCode::DiscountAlreadyConsumed);

    let orders = manager.list(&OrderFilter::default()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, created[0].order.id);
    assert_eq!(manager.storage().get_stats().unwrap().line_count, 2);

    let state = manager.storage().get_reward_state("c-1").unwrap();
    assert!(state.used().contains(&3));
    assert!(state.is_consistent());
}

#[test]
fn test_concurrent_creates_without_discount_all_succeed() {
    let manager = Arc::new(create_test_manager());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let summary = simple_summary(&format!("c-{}", i % 3), BranchLocation::FozDoIguacu);
                manager.create(&summary).unwrap().order.number
            })
        })
        .collect();

    let mut numbers: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 8, "order numbers must be unique");
    assert_eq!(manager.storage().current_order_number().unwrap(), 8);
}
