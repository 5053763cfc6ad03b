use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryInquiryRepository, InMemoryPropertyRepository, InMemoryUserRepository,
};
use crate::routes;
use addis_estate::accounts::{AccountService, AccountsState};
use addis_estate::auth::{AuthGuard, TokenAuthority};
use addis_estate::config::AppConfig;
use addis_estate::error::AppError;
use addis_estate::inquiries::{InquiriesState, InquiryService};
use addis_estate::listings::{ListingService, ListingsState};
use addis_estate::moderation::{AdminState, ModerationService};
use addis_estate::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let users = Arc::new(InMemoryUserRepository::default());
    let properties = Arc::new(InMemoryPropertyRepository::default());
    let inquiries = Arc::new(InMemoryInquiryRepository::default());
    let tokens = Arc::new(TokenAuthority::from_config(&config.auth));
    let guard = Arc::new(AuthGuard::new(users.clone(), tokens.clone()));

    let accounts = Arc::new(AccountService::new(users.clone(), tokens));
    let listings = Arc::new(ListingService::new(properties.clone(), users.clone()));
    let messaging = Arc::new(InquiryService::new(inquiries.clone(), properties.clone()));
    let moderation = Arc::new(ModerationService::new(users, properties, inquiries));

    if let Some(seed) = &config.admin_seed {
        let (admin, created) = accounts
            .seed_admin(&seed.email, &seed.phone, &seed.password)
            .map_err(|err| AppError::Api(err.into()))?;
        if created {
            info!(email = %admin.email, "seeded bootstrap admin account");
        } else {
            info!(email = %admin.email, "bootstrap admin already present");
        }
    }

    let app = routes::marketplace_router(
        AccountsState {
            service: accounts,
            guard: guard.clone(),
        },
        ListingsState {
            service: listings,
            guard: guard.clone(),
        },
        InquiriesState {
            service: messaging,
            guard: guard.clone(),
        },
        AdminState {
            service: moderation,
            guard,
        },
    )
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "real-estate marketplace API ready");

    axum::serve(listener, app).await?;
    Ok(())
}
