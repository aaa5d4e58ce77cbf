use serde_json::Value;
use std::thread;
use strata_logger::{Config, Layer, Level, Logger, LoggerError, Metadata, SharedBuffer, Sink};

fn buffered(builder: strata_logger::LoggerBuilder) -> Result<(Logger, SharedBuffer), LoggerError> {
    let buffer = SharedBuffer::new();
    let logger = builder.sink(Sink::Buffer(buffer.clone())).build()?;
    Ok((logger, buffer))
}

#[test]
fn plain_text_line_layout() -> Result<(), LoggerError> {
    let (logger, buffer) = buffered(Logger::builder())?;

    logger.log_with(
        Level::Info,
        "github.com/user/myapp/internal/api/v1/handlers",
        "Request started",
        Metadata::new().with("userID", 123).with("session", "abc"),
    );

    let line = buffer.contents();
    assert!(line.starts_with("[INFO] [V1/HANDLERS] ["), "{line}");
    assert!(line.ends_with("] Request started session=abc userID=123\n"), "{line}");
    Ok(())
}

#[test]
fn json_lines_parse_independently() -> Result<(), LoggerError> {
    let (logger, buffer) = buffered(Logger::builder().json())?;

    logger.error("app/internal/db/postgres", "Connection lost");
    logger.log_with(Level::Warn, "app/cache/redis", "Slow reply", Metadata::new().with("ms", 250));

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(&lines[0]).expect("valid JSON");
    assert_eq!(first["level"], "ERROR");
    assert_eq!(first["layer"], "DB/POSTGRES");
    assert_eq!(first["message"], "Connection lost");
    assert!(first.get("metadata").is_none());

    let second: Value = serde_json::from_str(&lines[1]).expect("valid JSON");
    assert_eq!(second["layer"], "CACHE/REDIS");
    assert_eq!(second["metadata"]["ms"], 250);
    Ok(())
}

#[test]
fn strict_mode_drops_lines_outside_allow_list() -> Result<(), LoggerError> {
    let config = Config::builder().strict_mode(true).allow_layer(Layer::HTTP).build()?;
    let (logger, buffer) = buffered(Logger::builder().config(config))?;

    logger.set_depth_for("app/http", 1)?;
    logger.info("app/http", "allowed by extraction");
    logger.info("app/db", "dropped");

    logger.set_layer_for("app/gateway", "Http");
    logger.info("app/gateway/routes", "allowed by explicit layer");

    let lines = buffer.lines();
    assert_eq!(lines.len(), 2, "{lines:?}");
    assert!(lines[0].starts_with("[INFO] [HTTP] ["));
    assert!(lines[1].starts_with("[INFO] [Http] ["));
    Ok(())
}

#[test]
fn ancestor_override_reaches_cached_descendants() -> Result<(), LoggerError> {
    let (logger, buffer) = buffered(Logger::builder())?;

    logger.info("app/internal/db/postgres", "before");
    logger.set_layer_for("app/internal/db", "Database");
    logger.info("app/internal/db/postgres", "after");

    let lines = buffer.lines();
    assert!(lines[0].starts_with("[INFO] [DB/POSTGRES] ["));
    assert!(lines[1].starts_with("[INFO] [Database] ["));
    Ok(())
}

#[test]
fn concurrent_lines_do_not_interleave() -> Result<(), LoggerError> {
    let (logger, buffer) = buffered(Logger::builder().json())?;

    thread::scope(|scope| {
        for worker in 0..8 {
            let logger = logger.clone();
            scope.spawn(move || {
                for i in 0..50 {
                    logger.log_with(
                        Level::Info,
                        format!("app/workers/w{worker}"),
                        "tick",
                        Metadata::new().with("i", i),
                    );
                }
            });
        }
    });

    let lines = buffer.lines();
    assert_eq!(lines.len(), 400);
    for line in &lines {
        let value: Value = serde_json::from_str(line).expect("each line is a full JSON object");
        assert_eq!(value["message"], "tick");
    }
    Ok(())
}

#[test]
fn unknown_path_logs_unknown_layer() -> Result<(), LoggerError> {
    let (logger, buffer) = buffered(Logger::builder())?;

    logger.info("internal/pkg", "nothing left after skipping");

    assert!(buffer.contents().starts_with("[INFO] [UNKNOWN] ["));
    Ok(())
}
