mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod admin_actor;
mod category_actor;
mod order_actor;
mod product_actor;
mod storage_actor;

mod cart;
mod catalog;
mod checkout;
mod dashboard;
mod storefront;

use rust_decimal_macros::dec;
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, StoreConfig, StoreSystem};
use crate::dashboard::DashboardSnapshot;
use crate::domain::{CustomerInfo, OrderStatus, Product, Upload};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting storefront");

    let config = StoreConfig::load();
    let admin_username = config.admin_username.clone();
    let admin_password = config.admin_password.clone();
    let system = StoreSystem::start(config).await?;

    // Admin seeds the catalog
    let span = tracing::info_span!("catalog_seeding");
    let session = async {
        let session = system
            .admin_client
            .login(&admin_username, &admin_password)
            .await
            .map_err(|e| e.to_string())?;
        system.seed_categories(&session).await?;

        let products = [
            Product::new("", "Wireless Headphones", "Electronics", dec!(79.99)),
            Product::new("", "Smart Watch", "Electronics", dec!(199.99)).with_promotion(10),
            Product::new("", "Leather Wallet", "Accessories", dec!(39.99)),
            Product::new("", "Yoga Mat", "Sports", dec!(29.99)).out_of_stock(),
        ];
        for product in products {
            let id = system
                .product_client
                .create_product(&session, product.into(), None)
                .await
                .map_err(|e| e.to_string())?;
            info!(product_id = %id, "Product seeded");
        }
        Ok::<_, String>(session)
    }
    .instrument(span)
    .await?;

    // Shopper browses and checks out
    let storefront = &system.storefront_client;
    let span = tracing::info_span!("shopping");
    let checkout_result = async {
        let source = storefront.load_catalog().await.map_err(|e| e.to_string())?;
        info!(?source, "Catalog ready");

        let electronics = storefront
            .select_category("Electronics".to_string())
            .await
            .map_err(|e| e.to_string())?;
        for product in &electronics {
            storefront.add_item(product.id.clone()).await.map_err(|e| e.to_string())?;
        }
        let cart = storefront.cart().await.map_err(|e| e.to_string())?;
        info!(items = cart.item_count, total = %cart.display_total, "Cart ready");

        let customer = CustomerInfo::new("Alice", "555-0100", "12 Market Street");
        let proof = Upload::new("transfer.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
        storefront.checkout(customer, Some(proof)).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    let receipt = match checkout_result {
        Ok(receipt) => {
            info!(order_id = %receipt.order_id, total = %receipt.total, "Order placed");
            if let Some(warning) = &receipt.upload_warning {
                warn!(%warning, "Payment proof was not stored");
            }
            Some(receipt)
        }
        Err(e) => {
            error!(error = %e, "Checkout failed");
            None
        }
    };

    // Admin processes the order and reviews the dashboard
    let span = tracing::info_span!("order_admin");
    async {
        if let Some(receipt) = &receipt {
            for status in [OrderStatus::Processing, OrderStatus::Completed] {
                system
                    .order_client
                    .update_order_status(&session, receipt.order_id.clone(), status)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        }
        let dashboard = DashboardSnapshot::collect(
            &session,
            &system.product_client,
            &system.category_client,
            &system.order_client,
        )
        .await?;
        for stat in &dashboard.categories {
            info!(
                category = %stat.name,
                products = stat.product_count,
                in_stock = stat.in_stock,
                on_promotion = stat.on_promotion,
                "Category stats"
            );
        }
        info!(
            orders = dashboard.orders.total_orders,
            completed_revenue = %dashboard.orders.completed_revenue,
            open_revenue = %dashboard.orders.open_revenue,
            "Order stats"
        );
        system.admin_client.logout(&session).await.map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
