use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tierpay::config::Config;
use tierpay::modules::agencies::controllers::configure_agency_routes;
use tierpay::modules::agencies::repositories::{AgencyRepository, MySqlAgencyRepository};
use tierpay::modules::agencies::services::HierarchyWalker;
use tierpay::modules::commissions::controllers::{
    configure_bonus_routes, configure_commission_routes, configure_ledger_routes,
};
use tierpay::modules::commissions::repositories::{
    CommissionRepository, HierarchyBonusRepository, LedgerRepository, MySqlCommissionRepository,
    MySqlHierarchyBonusRepository, MySqlLedgerRepository, MySqlPaymentRepository,
    PaymentRepository,
};
use tierpay::modules::commissions::services::{
    CommissionCalculator, CommissionLedger, CommissionService,
};
use tierpay::modules::health::configure_health_routes;
use tierpay::modules::rates::models::RateDefaults;
use tierpay::modules::rates::repositories::{MySqlRateRepository, RateRepository};
use tierpay::modules::rates::services::RateTable;
use tierpay::modules::sales::repositories::{MySqlSaleRepository, SaleRepository};
use tierpay::modules::taxes::services::TaxEvaluator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tierpay=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting TierPay Agency Commission Platform");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Repositories
    let agencies: Arc<dyn AgencyRepository> =
        Arc::new(MySqlAgencyRepository::new(db_pool.clone()));
    let sales: Arc<dyn SaleRepository> = Arc::new(MySqlSaleRepository::new(db_pool.clone()));
    let product_rates: Arc<dyn RateRepository> =
        Arc::new(MySqlRateRepository::new(db_pool.clone()));
    let records: Arc<dyn CommissionRepository> =
        Arc::new(MySqlCommissionRepository::new(db_pool.clone()));
    let bonuses: Arc<dyn HierarchyBonusRepository> =
        Arc::new(MySqlHierarchyBonusRepository::new(db_pool.clone()));
    let entries: Arc<dyn LedgerRepository> = Arc::new(MySqlLedgerRepository::new(db_pool.clone()));
    let payments: Arc<dyn PaymentRepository> =
        Arc::new(MySqlPaymentRepository::new(db_pool.clone()));

    // Services
    let rate_table = Arc::new(RateTable::new(
        product_rates,
        RateDefaults::from_config(&config.commission),
    ));
    let walker = Arc::new(HierarchyWalker::new(agencies.clone()));
    let ledger = Arc::new(CommissionLedger::new(
        agencies.clone(),
        records.clone(),
        bonuses,
        entries,
        payments,
        TaxEvaluator::new(),
    ));
    let calculator = CommissionCalculator::new(rate_table, TaxEvaluator::new(), &config.commission);
    let commission_service = Arc::new(CommissionService::new(
        sales,
        agencies,
        walker.clone(),
        calculator,
        records,
        ledger.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(walker.clone()))
            .app_data(web::Data::new(ledger.clone()))
            .app_data(web::Data::new(commission_service.clone()))
            .configure(configure_health_routes)
            .configure(configure_agency_routes)
            .configure(configure_commission_routes)
            .configure(configure_bonus_routes)
            .configure(configure_ledger_routes)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
