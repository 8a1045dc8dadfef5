//! Admin dashboard statistics, computed from plain snapshots of the stores.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::clients::{CategoryClient, OrderClient, ProductClient};
use crate::domain::{AdminSession, Order, OrderStatus, Product};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub name: String,
    pub product_count: usize,
    pub in_stock: usize,
    pub on_promotion: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderStats {
    pub total_orders: usize,
    pub by_status: IndexMap<OrderStatus, usize>,
    /// Sum of completed order totals.
    pub completed_revenue: Decimal,
    /// Sum of pending and processing order totals.
    pub open_revenue: Decimal,
}

/// One row per known category, in the given order. Products whose label
/// has no category record are grouped under their label at the end.
pub fn category_stats(products: &[Product], categories: &[String]) -> Vec<CategoryStat> {
    let mut stats: IndexMap<String, CategoryStat> = categories
        .iter()
        .map(|name| {
            (
                name.clone(),
                CategoryStat {
                    name: name.clone(),
                    product_count: 0,
                    in_stock: 0,
                    on_promotion: 0,
                },
            )
        })
        .collect();

    for product in products {
        let stat = stats
            .entry(product.category.clone())
            .or_insert_with(|| CategoryStat {
                name: product.category.clone(),
                product_count: 0,
                in_stock: 0,
                on_promotion: 0,
            });
        stat.product_count += 1;
        if product.in_stock {
            stat.in_stock += 1;
        }
        if product.is_on_promotion() {
            stat.on_promotion += 1;
        }
    }
    stats.into_values().collect()
}

pub fn order_stats(orders: &[Order]) -> OrderStats {
    let mut by_status: IndexMap<OrderStatus, usize> =
        OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();
    let mut completed_revenue = Decimal::ZERO;
    let mut open_revenue = Decimal::ZERO;

    for order in orders {
        *by_status.entry(order.status).or_insert(0) += 1;
        match order.status {
            OrderStatus::Completed => completed_revenue += order.total,
            OrderStatus::Pending | OrderStatus::Processing => open_revenue += order.total,
            OrderStatus::Cancelled => {}
        }
    }

    OrderStats {
        total_orders: orders.len(),
        by_status,
        completed_revenue,
        open_revenue,
    }
}

/// Everything the admin dashboard shows, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub categories: Vec<CategoryStat>,
    pub orders: OrderStats,
    /// Newest first.
    pub recent_orders: Vec<Order>,
}

impl DashboardSnapshot {
    #[instrument(skip_all)]
    pub async fn collect(
        session: &AdminSession,
        products: &ProductClient,
        categories: &CategoryClient,
        orders: &OrderClient,
    ) -> Result<Self, String> {
        let product_list = products.list_products().await.map_err(|e| e.to_string())?;
        let category_names: Vec<String> = categories
            .list_category_records()
            .await
            .map_err(|e| e.to_string())?
            .into_iter()
            .map(|category| category.name)
            .collect();
        let recent_orders = orders.list_orders(session).await.map_err(|e| e.to_string())?;

        let snapshot = Self {
            categories: category_stats(&product_list, &category_names),
            orders: order_stats(&recent_orders),
            recent_orders,
        };
        info!(
            products = product_list.len(),
            orders = snapshot.orders.total_orders,
            "Dashboard collected"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::domain::CustomerInfo;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn order(id: &str, total: Decimal, status: OrderStatus) -> Order {
        let product = Product::new("p1", "Lamp", "Home", total);
        Order {
            id: id.into(),
            customer: CustomerInfo::new("Dana", "555", "1 Main St"),
            items: vec![CartLine::from_product(&product)],
            total,
            payment_proof: None,
            status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_category_stats_counts() {
        let products = vec![
            Product::new("p1", "Lamp", "Home", dec!(40)).with_promotion(10),
            Product::new("p2", "Rug", "Home", dec!(90)).out_of_stock(),
            Product::new("p3", "Ball", "Sports", dec!(15)),
            Product::new("p4", "Mystery", "Legacy", dec!(5)),
        ];
        let stats = category_stats(&products, &["Home".into(), "Sports".into(), "Garden".into()]);

        let names: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Home", "Sports", "Garden", "Legacy"]);
        assert_eq!(
            stats[0],
            CategoryStat {
                name: "Home".into(),
                product_count: 2,
                in_stock: 1,
                on_promotion: 1,
            }
        );
        assert_eq!(stats[2].product_count, 0);
        assert_eq!(stats[3].product_count, 1);
    }

    #[test]
    fn test_order_stats_revenue_split() {
        let orders = vec![
            order("o1", dec!(100), OrderStatus::Completed),
            order("o2", dec!(20.50), OrderStatus::Completed),
            order("o3", dec!(30), OrderStatus::Pending),
            order("o4", dec!(12), OrderStatus::Processing),
            order("o5", dec!(999), OrderStatus::Cancelled),
        ];
        let stats = order_stats(&orders);

        assert_eq!(stats.total_orders, 5);
        assert_eq!(stats.completed_revenue, dec!(120.50));
        assert_eq!(stats.open_revenue, dec!(42));
        assert_eq!(stats.by_status[&OrderStatus::Completed], 2);
        assert_eq!(stats.by_status[&OrderStatus::Cancelled], 1);
    }

    #[test]
    fn test_order_stats_empty() {
        let stats = order_stats(&[]);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.by_status.len(), 4);
        assert!(stats.by_status.values().all(|count| *count == 0));
        assert_eq!(stats.open_revenue, Decimal::ZERO);
    }
}
