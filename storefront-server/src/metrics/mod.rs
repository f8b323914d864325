//! Metrics Aggregator
//!
//! Pure read-side computation over an [`OrderSnapshot`]. Cancelled orders
//! are excluded from revenue, counts, daily sales and top products, but
//! still count towards the regional split.

use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{BranchLocation, Order, OrderLine, OrderStatus};
use std::collections::{HashMap, HashSet};

use crate::checkout::money::{to_decimal, to_f64};
use crate::orders::OrderSnapshot;
use crate::utils::time::local_date;

/// Days in the sales series, ending today
pub const SALES_WINDOW_DAYS: i64 = 7;

/// Default number of top products
pub const DEFAULT_TOP_N: usize = 3;

/// pt-BR short weekday labels, Sunday first
const WEEKDAY_LABELS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySales {
    pub date: NaiveDate,
    /// Short weekday label, e.g. `seg`
    pub day: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionShare {
    pub branch: BranchLocation,
    pub order_count: u64,
    /// Whole percent, rounded half up
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub revenue_total: f64,
    pub order_count: u64,
    pub cancelled_count: u64,
    pub average_ticket: f64,
    pub sales_by_day: Vec<DaySales>,
    pub top_products: Vec<TopProduct>,
    pub regional_share: Vec<RegionShare>,
}

fn is_counted(order: &Order) -> bool {
    order.status != OrderStatus::Cancelled
}

pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize]
}

/// Sum of `total` over non-cancelled orders
pub fn revenue_total(orders: &[Order]) -> f64 {
    let total: Decimal = orders
        .iter()
        .filter(|o| is_counted(o))
        .map(|o| to_decimal(o.total))
        .sum();
    to_f64(total)
}

/// Seven buckets, `today − 6` through `today`, in the business time zone
///
/// Days without orders report 0.
pub fn sales_by_day(orders: &[Order], today: NaiveDate, tz: Tz) -> Vec<DaySales> {
    let first = today - Duration::days(SALES_WINDOW_DAYS - 1);
    let mut buckets = vec![Decimal::ZERO; SALES_WINDOW_DAYS as usize];

    for order in orders.iter().filter(|o| is_counted(o)) {
        let Some(date) = local_date(order.created_at, tz) else {
            continue;
        };
        if date < first || date > today {
            continue;
        }
        let index = (date - first).num_days() as usize;
        buckets[index] += to_decimal(order.total);
    }

    buckets
        .into_iter()
        .zip(0..)
        .map(|(total, offset)| {
            let date = first + Duration::days(offset);
            DaySales {
                date,
                day: weekday_label(date).to_string(),
                total: to_f64(total),
            }
        })
        .collect()
}

/// Quantities per product name over non-cancelled orders, highest first
///
/// Ties keep first-seen order, where lines are seen by order creation time
/// and then line position.
pub fn top_products(orders: &[Order], lines: &[OrderLine], n: usize) -> Vec<TopProduct> {
    let counted: HashMap<&str, (i64, &str)> = orders
        .iter()
        .filter(|o| is_counted(o))
        .map(|o| (o.id.as_str(), (o.created_at, o.number.as_str())))
        .collect();

    let mut seen: Vec<(&OrderLine, (i64, &str))> = lines
        .iter()
        .filter_map(|l| counted.get(l.order_id.as_str()).map(|key| (l, *key)))
        .collect();
    seen.sort_by(|(a, ka), (b, kb)| ka.cmp(kb).then(a.line_no.cmp(&b.line_no)));

    let mut totals: Vec<TopProduct> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (line, _) in seen {
        match index.get(line.product_name.as_str()) {
            Some(&i) => totals[i].quantity += u64::from(line.quantity),
            None => {
                index.insert(line.product_name.as_str(), totals.len());
                totals.push(TopProduct {
                    name: line.product_name.clone(),
                    quantity: u64::from(line.quantity),
                });
            }
        }
    }

    // stable sort keeps first-seen order among equal quantities
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(n);
    totals
}

/// Orders per branch as a share of all located orders
///
/// Every known branch is reported; the denominator floors at 1.
pub fn regional_share(orders: &[Order]) -> Vec<RegionShare> {
    let total = (orders.len() as u64).max(1);
    BranchLocation::ALL
        .iter()
        .map(|&branch| {
            let count = orders.iter().filter(|o| o.branch == branch).count() as u64;
            RegionShare {
                branch,
                order_count: count,
                percent: ((count * 100 + total / 2) / total) as u32,
            }
        })
        .collect()
}

/// Build the full report for `today`
pub fn build_report(snapshot: &OrderSnapshot, today: NaiveDate, tz: Tz, top_n: usize) -> MetricsReport {
    let orders = &snapshot.orders;
    let order_count = orders.iter().filter(|o| is_counted(o)).count() as u64;
    let cancelled_count = orders.len() as u64 - order_count;
    let revenue = revenue_total(orders);
    let average_ticket = if order_count == 0 {
        0.0
    } else {
        to_f64(to_decimal(revenue) / Decimal::from(order_count))
    };

    let ids: HashSet<&str> = orders.iter().map(|o| o.id.as_str()).collect();
    let orphans = snapshot
        .lines
        .iter()
        .filter(|l| !ids.contains(l.order_id.as_str()))
        .count();
    if orphans > 0 {
        tracing::warn!(orphans, "Order lines without a parent order ignored");
    }

    MetricsReport {
        revenue_total: revenue,
        order_count,
        cancelled_count,
        average_ticket,
        sales_by_day: sales_by_day(orders, today, tz),
        top_products: top_products(orders, &snapshot.lines, top_n),
        regional_share: regional_share(orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CustomerSnapshot, LineAddOns, Logistics, PaymentMethod, ProductCategory};

    const TZ: Tz = chrono_tz::America::Sao_Paulo;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Noon on `day` in the business time zone
    fn noon(day: NaiveDate) -> i64 {
        crate::utils::time::day_start_millis(day, TZ) + 12 * 3_600_000
    }

    fn order(
        id: &str,
        total: f64,
        status: OrderStatus,
        branch: BranchLocation,
        created_at: i64,
    ) -> Order {
        Order {
            id: id.to_string(),
            number: format!("PED-{}", id),
            customer: CustomerSnapshot {
                customer_id: "c-1".to_string(),
                name: "Ana".to_string(),
                phone: None,
                birth_date: None,
            },
            total,
            subtotal: total,
            payment_method: PaymentMethod::Pix,
            branch,
            logistics: Logistics::Delivery {
                address: "Rua 1".to_string(),
            },
            bulk_volume_liters: 0.0,
            status,
            discount_percent: None,
            mission_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn line(order_id: &str, line_no: u32, name: &str, quantity: u32) -> OrderLine {
        OrderLine {
            order_id: order_id.to_string(),
            line_no,
            product_id: name.to_lowercase(),
            product_name: name.to_string(),
            category: ProductCategory::Growler,
            unit_price: 10.0,
            quantity,
            add_ons: LineAddOns::default(),
        }
    }

    #[test]
    fn test_revenue_excludes_cancelled() {
        let orders = vec![
            order("1", 100.10, OrderStatus::Completed, BranchLocation::FozDoIguacu, 0),
            order("2", 50.0, OrderStatus::Cancelled, BranchLocation::FozDoIguacu, 0),
            order("3", 0.20, OrderStatus::InProgress, BranchLocation::FozDoIguacu, 0),
        ];
        assert_eq!(revenue_total(&orders), 100.30);
        assert_eq!(revenue_total(&[]), 0.0);
    }

    #[test]
    fn test_sales_by_day_always_seven_buckets() {
        let today = date(2026, 10, 19);
        let empty = sales_by_day(&[], today, TZ);
        assert_eq!(empty.len(), 7);
        assert!(empty.iter().all(|d| d.total == 0.0));
        assert_eq!(empty[0].date, date(2026, 10, 13));
        assert_eq!(empty[6].date, today);
        // 2026-10-19 is a Monday
        assert_eq!(empty[6].day, "seg");
        assert_eq!(empty[5].day, "dom");
        assert_eq!(empty[4].day, "sáb");
    }

    #[test]
    fn test_sales_by_day_buckets_by_local_date() {
        let today = date(2026, 10, 19);
        let orders = vec![
            order("1", 10.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, noon(today)),
            order("2", 5.5, OrderStatus::InProgress, BranchLocation::FozDoIguacu, noon(today)),
            order("3", 99.0, OrderStatus::Cancelled, BranchLocation::FozDoIguacu, noon(today)),
            order(
                "4",
                20.0,
                OrderStatus::EnRoute,
                BranchLocation::FozDoIguacu,
                noon(date(2026, 10, 13)),
            ),
            // outside the window
            order(
                "5",
                70.0,
                OrderStatus::Completed,
                BranchLocation::FozDoIguacu,
                noon(date(2026, 10, 12)),
            ),
            // 23:30 local on the 18th is already the 19th in UTC
            order(
                "6",
                1.0,
                OrderStatus::Completed,
                BranchLocation::FozDoIguacu,
                crate::utils::time::day_end_millis(date(2026, 10, 18), TZ) - 1_800_000,
            ),
        ];

        let series = sales_by_day(&orders, today, TZ);
        assert_eq!(series.len(), 7);
        assert_eq!(series[6].total, 15.5);
        assert_eq!(series[5].total, 1.0);
        assert_eq!(series[0].total, 20.0);
        assert_eq!(series[1..5].iter().map(|d| d.total).sum::<f64>(), 0.0);
    }

    #[test]
    fn test_top_products_sorted_with_first_seen_ties() {
        let orders = vec![
            order("a", 0.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, 1),
            order("b", 0.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, 2),
            order("c", 0.0, OrderStatus::Cancelled, BranchLocation::FozDoIguacu, 3),
        ];
        let lines = vec![
            line("b", 0, "IPA", 3),
            line("a", 1, "Lager", 2),
            line("a", 0, "Pilsen", 2),
            line("b", 1, "Pilsen", 1),
            line("c", 0, "Vinho", 50),
        ];

        let top = top_products(&orders, &lines, 3);
        assert_eq!(
            top,
            vec![
                TopProduct {
                    name: "Pilsen".to_string(),
                    quantity: 3
                },
                TopProduct {
                    name: "IPA".to_string(),
                    quantity: 3
                },
                TopProduct {
                    name: "Lager".to_string(),
                    quantity: 2
                },
            ]
        );
        assert_eq!(top_products(&orders, &lines, 1).len(), 1);
        assert!(top_products(&orders, &[], 3).is_empty());
    }

    #[test]
    fn test_regional_share_rounds_and_includes_cancelled() {
        let orders = vec![
            order("1", 0.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, 0),
            order("2", 0.0, OrderStatus::Cancelled, BranchLocation::FozDoIguacu, 0),
            order("3", 0.0, OrderStatus::InProgress, BranchLocation::MarechalCandidoRondon, 0),
        ];
        let share = regional_share(&orders);
        let foz = share.iter().find(|s| s.branch == BranchLocation::FozDoIguacu).unwrap();
        let marechal = share
            .iter()
            .find(|s| s.branch == BranchLocation::MarechalCandidoRondon)
            .unwrap();
        assert_eq!((foz.order_count, foz.percent), (2, 67));
        assert_eq!((marechal.order_count, marechal.percent), (1, 33));
    }

    #[test]
    fn test_regional_share_rounds_each_branch_independently() {
        let mut orders = vec![order(
            "m",
            0.0,
            OrderStatus::Completed,
            BranchLocation::MarechalCandidoRondon,
            0,
        )];
        for i in 0..7 {
            let id = format!("f{i}");
            orders.push(order(&id, 0.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, 0));
        }
        let share = regional_share(&orders);
        let percent = |branch| share.iter().find(|s| s.branch == branch).unwrap().percent;

        // 12.5% and 87.5% both round half up, so the shares sum to 101
        assert_eq!(percent(BranchLocation::MarechalCandidoRondon), 13);
        assert_eq!(percent(BranchLocation::FozDoIguacu), 88);
    }

    #[test]
    fn test_regional_share_without_orders() {
        let share = regional_share(&[]);
        assert_eq!(share.len(), BranchLocation::ALL.len());
        assert!(share.iter().all(|s| s.percent == 0 && s.order_count == 0));
    }

    #[test]
    fn test_build_report() {
        let today = date(2026, 10, 19);
        let snapshot = OrderSnapshot {
            orders: vec![
                order("a", 30.0, OrderStatus::Completed, BranchLocation::FozDoIguacu, noon(today)),
                order("b", 15.0, OrderStatus::EnRoute, BranchLocation::FozDoIguacu, noon(today)),
                order("c", 40.0, OrderStatus::Cancelled, BranchLocation::FozDoIguacu, noon(today)),
            ],
            lines: vec![line("a", 0, "Pilsen", 2), line("b", 0, "IPA", 1)],
        };

        let report = build_report(&snapshot, today, TZ, DEFAULT_TOP_N);
        assert_eq!(report.revenue_total, 45.0);
        assert_eq!(report.order_count, 2);
        assert_eq!(report.cancelled_count, 1);
        assert_eq!(report.average_ticket, 22.5);
        assert_eq!(report.sales_by_day.len(), 7);
        assert_eq!(report.sales_by_day[6].total, 45.0);
        assert_eq!(report.top_products[0].name, "Pilsen");
        let foz = report
            .regional_share
            .iter()
            .find(|s| s.branch == BranchLocation::FozDoIguacu)
            .unwrap();
        assert_eq!((foz.order_count, foz.percent), (3, 100));
    }
}
