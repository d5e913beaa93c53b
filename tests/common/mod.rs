use std::sync::Arc;

use sea_orm::DatabaseConnection;

use bms_backend::config::{
    AppConfig, EmailConfig, PaymentConfig, ScreeningConfig, SlaConfig,
};
use bms_backend::services::email::MockEmailSender;
use bms_backend::services::payments::MockPaymentGateway;
use bms_backend::services::screening::MockScreeningService;
use bms_backend::AppState;

/// Config used by the API tests; never read from the environment
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgresql://test".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        screening: ScreeningConfig {
            api_url: "https://screening.test".to_string(),
            api_key: String::new(),
            cache_ttl_secs: 60,
        },
        email: EmailConfig {
            api_url: "https://email.test".to_string(),
            api_key: String::new(),
            from_address: "ops@test.example".to_string(),
        },
        payments: PaymentConfig {
            api_url: "https://payments.test".to_string(),
            secret_key: String::new(),
        },
        sla: SlaConfig::default(),
    }
}

/// Build an `AppState` over the given (usually mocked) connection with
/// deterministic adapters for every external port
pub fn test_state(db: DatabaseConnection) -> AppState {
    AppState {
        db: Arc::new(db),
        config: Arc::new(test_config()),
        screening: Arc::new(MockScreeningService),
        email: Arc::new(MockEmailSender::default()),
        payments: Arc::new(MockPaymentGateway),
    }
}
