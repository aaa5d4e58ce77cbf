#![cfg(feature = "logger")]

use strata::{Config, Layer, Level, Logger, LoggerError, Metadata, SharedBuffer, Sink};

mod services {
    pub mod auth {
        pub fn login(logger: &strata::Logger) {
            strata::info!(logger, "User {} logged in", 42);
        }
    }
}

#[test]
fn features_are_reported() {
    assert!(strata::is_enabled("engine"));
    assert!(strata::is_enabled("logger"));
    assert!(!strata::is_enabled("metrics"));
}

#[test]
fn engine_is_usable_without_a_logger() -> Result<(), strata::EngineError> {
    let resolver = strata::Resolver::new(Config::default())?;
    assert_eq!(resolver.resolve("shop/internal/orders/repo"), Layer::new("orders/repo"));
    let skip = &Config::default().skip_segments;
    assert_eq!(strata::extract("internal/pkg", 2, skip), strata::UNKNOWN_LABEL);
    assert_eq!(strata::extract("shop/db/", 2, skip), "DB/");
    Ok(())
}

#[test]
fn macros_work_through_the_facade() -> Result<(), LoggerError> {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder().json().sink(Sink::Buffer(buffer.clone())).build()?;

    services::auth::login(&logger);

    let value: serde_json::Value =
        serde_json::from_str(buffer.lines()[0].as_str()).expect("JSON line");
    assert_eq!(value["layer"], "SERVICES/AUTH");
    assert_eq!(value["message"], "User 42 logged in");
    Ok(())
}

#[test]
fn scope_carries_metadata() -> Result<(), LoggerError> {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder().sink(Sink::Buffer(buffer.clone())).build()?;

    let scope = logger.scope("shop/internal/payments/stripe");
    scope.log_with(Level::Error, "Charge failed", Metadata::new().with("code", "card_declined"));

    let line = buffer.contents();
    assert!(line.starts_with("[ERROR] [PAYMENTS/STRIPE] ["), "{line}");
    assert!(line.trim_end().ends_with("Charge failed code=card_declined"), "{line}");
    Ok(())
}
