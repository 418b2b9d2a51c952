mod actor_framework;
mod app_system;
mod cart_actor;
mod catalog_actor;
mod clients;
mod config;
mod domain;
mod error;
mod http;
mod order_actor;
mod session_actor;

#[cfg(test)]
mod mock_framework;

use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

use crate::app_system::{setup_tracing, MarketSystem};
use crate::config::Config;
use crate::domain::{Category, ProductCreate, Role, SessionCreate, Unit};
use crate::http::AppState;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load();

    info!("Starting farm market backend");
    let system = MarketSystem::new();

    if config.seed_demo {
        seed_demo_data(&system).await?;
    }

    let app = http::router(AppState::new(&system));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", address, e))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

/// Seeded accounts and listings so the frontend has something to render out of
/// the box. Tokens are minted fresh each boot and logged for manual testing.
async fn seed_demo_data(system: &MarketSystem) -> Result<(), String> {
    info!("Seeding demo data");

    let month_secs = 60 * 60 * 24 * 30;
    let farmer_token = system
        .session_client
        .create_session(SessionCreate { user_id: "farmer_1".into(), role: Role::Farmer, ttl_secs: month_secs })
        .await
        .map_err(|e| e.to_string())?;
    let customer_token = system
        .session_client
        .create_session(SessionCreate { user_id: "customer_1".into(), role: Role::Customer, ttl_secs: month_secs })
        .await
        .map_err(|e| e.to_string())?;

    let listings = [
        ("Tomato", 50.0, 10, Unit::Kg, Category::Vegetables, "tomato.jpg"),
        ("Alphonso Mango", 250.0, 40, Unit::Kg, Category::Fruits, "mango.jpg"),
        ("Basmati Rice", 120.0, 200, Unit::Kg, Category::Grains, "rice.jpg"),
        ("Buffalo Milk", 80.0, 25, Unit::Liters, Category::Dairy, "milk.jpg"),
    ];
    for (name, price, quantity, unit, category, image) in listings {
        system
            .catalog_client
            .create_product(ProductCreate {
                name: name.into(),
                price,
                quantity,
                unit,
                category,
                image: image.into(),
                farmer_id: "farmer_1".into(),
            })
            .await
            .map_err(|e| e.to_string())?;
    }

    info!(token = %farmer_token, "Demo farmer session (user=farmer_1)");
    info!(token = %customer_token, "Demo customer session (user=customer_1)");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received SIGTERM, shutting down");
    };

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
