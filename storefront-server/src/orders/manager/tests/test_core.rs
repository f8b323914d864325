use super::*;
use shared::models::Logistics;

#[test]
fn test_create_bulk_order_consumes_discount() {
    let manager = create_test_manager();
    seed_redeemed(&manager, "c-1", 3);

    let summary = discounted_bulk_summary(&manager, "c-1");
    assert_eq!(summary.mission_id, Some(3));
    assert_eq!(summary.final_total, 411.40);

    let detail = manager.create(&summary).unwrap();
    assert_eq!(detail.order.status, OrderStatus::InProgress);
    assert_eq!(detail.order.total, 411.40);
    assert_eq!(detail.order.subtotal, 484.0);
    assert_eq!(detail.order.discount_percent, Some(15));
    assert_eq!(detail.order.mission_id, Some(3));
    assert!(matches!(detail.order.logistics, Logistics::Event { .. }));
    assert_eq!(detail.lines.len(), 2);

    let stored = manager.get(&detail.order.id).unwrap();
    assert_eq!(stored, detail);

    let state = manager.storage().get_reward_state("c-1").unwrap();
    assert!(state.used().contains(&3));
    assert!(state.redeemed().contains(&3));
    assert!(state.is_consistent());
    assert!(
        state
            .available_discounts(&MissionCatalog::standard())
            .iter()
            .all(|d| d.mission_id != 3)
    );
}

#[test]
fn test_create_assigns_sequential_numbers() {
    let manager = create_test_manager();
    let a = manager
        .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
        .unwrap();
    let b = manager
        .create(&simple_summary("c-2", BranchLocation::FozDoIguacu))
        .unwrap();

    assert_eq!(a.order.number, "PED-00001");
    assert_eq!(b.order.number, "PED-00002");
    assert_ne!(a.order.id, b.order.id);
    assert_eq!(a.lines[0].line_no, 0);
    assert_eq!(a.lines[0].order_id, a.order.id);
}

#[test]
fn test_create_with_spent_discount_persists_nothing() {
    let manager = create_test_manager();
    seed_redeemed(&manager, "c-1", 3);

    let summary = discounted_bulk_summary(&manager, "c-1");
    manager.create(&summary).unwrap();
    let stats_before = manager.storage().get_stats().unwrap();

    // Same summary replayed: the discount is already spent
    let err = manager.create(&summary).unwrap_err();
    assert!(matches!(err, ManagerError::DiscountAlreadyConsumed(3)));

    let stats_after = manager.storage().get_stats().unwrap();
    assert_eq!(stats_after.order_count, stats_before.order_count);
    assert_eq!(stats_after.line_count, stats_before.line_count);
    assert_eq!(stats_after.last_order_number, stats_before.last_order_number);
}

#[test]
fn test_create_with_unredeemed_discount_fails() {
    let manager = create_test_manager();
    let mut summary = simple_summary("c-1", BranchLocation::FozDoIguacu);
    summary.mission_id = Some(1);
    summary.discount_percent = Some(5);

    let err = manager.create(&summary).unwrap_err();
    assert!(matches!(err, ManagerError::DiscountUnavailable(1)));
    assert!(manager.list(&OrderFilter::default()).unwrap().is_empty());
}

#[test]
fn test_create_without_lines_is_rejected() {
    let manager = create_test_manager();
    let mut summary = simple_summary("c-1", BranchLocation::FozDoIguacu);
    summary.lines.clear();
    assert!(matches!(
        manager.create(&summary),
        Err(ManagerError::EmptyOrder)
    ));
}

#[test]
fn test_create_completes_missions_from_history() {
    let manager = create_test_manager();

    manager
        .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
        .unwrap();
    let state = manager.storage().get_reward_state("c-1").unwrap();
    assert_eq!(state.completed().iter().copied().collect::<Vec<_>>(), vec![1]);

    let bulk = build_summary(
        &cart_with(&[("keg-ipa-30", 1), ("growler-american-ipa-1l", 9)]),
        &event_details(DiscountChoice::None),
        &identity("c-1"),
        &[],
    )
    .unwrap();
    manager.create(&bulk).unwrap();

    let state = manager.storage().get_reward_state("c-1").unwrap();
    // first order, bulk order, ten items in one order
    assert_eq!(
        state.completed().iter().copied().collect::<Vec<_>>(),
        vec![1, 3, 4]
    );
    assert!(state.redeemed().is_empty());
}

#[test]
fn test_cancelled_orders_do_not_count_towards_missions() {
    let manager = create_test_manager();
    for _ in 0..4 {
        manager
            .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
            .unwrap();
    }
    manager
        .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
        .unwrap();
    assert!(
        manager
            .storage()
            .get_reward_state("c-1")
            .unwrap()
            .completed()
            .contains(&5)
    );

    let other = manager
        .create(&simple_summary("c-2", BranchLocation::FozDoIguacu))
        .unwrap();
    manager
        .transition(&other.order.id, OrderStatus::Cancelled)
        .unwrap();
    for _ in 0..4 {
        manager
            .create(&simple_summary("c-2", BranchLocation::FozDoIguacu))
            .unwrap();
    }
    let state = manager.storage().get_reward_state("c-2").unwrap();
    assert!(!state.completed().contains(&5));
}

#[test]
fn test_get_unknown_order() {
    let manager = create_test_manager();
    assert!(matches!(
        manager.get("missing"),
        Err(ManagerError::OrderNotFound(_))
    ));
}

#[test]
fn test_list_filters_and_orders_newest_first() {
    let manager = create_test_manager();
    let a = manager
        .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
        .unwrap();
    let b = manager
        .create(&simple_summary("c-2", BranchLocation::MarechalCandidoRondon))
        .unwrap();
    let c = manager
        .create(&simple_summary("c-1", BranchLocation::MarechalCandidoRondon))
        .unwrap();

    let all = manager.list(&OrderFilter::default()).unwrap();
    let numbers: Vec<&str> = all.iter().map(|o| o.number.as_str()).collect();
    assert_eq!(numbers, vec!["PED-00003", "PED-00002", "PED-00001"]);

    let mine = manager
        .list(&OrderFilter {
            customer_id: Some("c-1".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, c.order.id);
    assert_eq!(mine[1].id, a.order.id);

    let marechal = manager
        .list(&OrderFilter {
            branch: Some(BranchLocation::MarechalCandidoRondon),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(marechal.len(), 2);

    manager
        .transition(&b.order.id, OrderStatus::EnRoute)
        .unwrap();
    let en_route = manager
        .list(&OrderFilter {
            status: Some(OrderStatus::EnRoute),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(en_route.len(), 1);
    assert_eq!(en_route[0].id, b.order.id);
}

#[tokio::test]
async fn test_create_broadcasts_event() {
    let manager = create_test_manager();
    let mut rx = manager.subscribe();

    let detail = manager
        .create(&simple_summary("c-1", BranchLocation::FozDoIguacu))
        .unwrap();

    match rx.recv().await.unwrap() {
        OrderEvent::Created { order, lines } => {
            assert_eq!(order.id, detail.order.id);
            assert_eq!(lines.len(), 1);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}
