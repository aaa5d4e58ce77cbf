use strata::{Level, Logger, Metadata};

pub(crate) fn handle_user(logger: &Logger) -> anyhow::Result<()> {
    strata::set_depth!(logger, 1)?;
    strata::info!(logger, "Handling user request");

    let scope = strata::scope!(logger);
    scope.log_with(
        Level::Info,
        "Request started",
        Metadata::new().with("userID", 123).with("session", "abc"),
    );

    repository::load_user(logger, 123);
    scope.info("Request finished");
    Ok(())
}

mod repository {
    use strata::Logger;

    pub(crate) fn load_user(logger: &Logger, id: u64) {
        strata::set_layer!(logger, "Database");
        strata::debug!(logger, "SELECT * FROM users WHERE id = {id}");
    }
}
