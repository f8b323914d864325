//! Storefront Server: order & rewards engine for a beverage storefront
//!
//! # Architecture
//!
//! ```text
//! Catalog ─► Cart ─► Checkout (◄─ Rewards) ─► Orders (redb) ─► Relay
//!                                                │
//!                                             Metrics
//! ```
//!
//! # Modules
//!
//! ```text
//! storefront-server/src/
//! ├── core/        # config, state, server
//! ├── api/         # HTTP routes and handlers
//! ├── catalog/     # product provider
//! ├── cart/        # request-scoped cart aggregate
//! ├── checkout/    # summary and money
//! ├── rewards/     # missions and reward ledger
//! ├── orders/      # lifecycle manager and storage
//! ├── metrics/     # statistics report
//! ├── relay/       # outbound order messages
//! ├── identity/    # resolved customer identity
//! └── utils/       # logging, time, validation
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod identity;
pub mod metrics;
pub mod orders;
pub mod relay;
pub mod rewards;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use orders::{OrderStorage, OrdersManager};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize logging from the environment
pub fn setup_environment() -> anyhow::Result<Config> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(anyhow::anyhow!("Failed to load .env: {}", e));
    }

    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json),
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
