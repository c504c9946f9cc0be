use tracing_subscriber::EnvFilter;

/// Installs the fmt sink. `log` records from this crate and its dependencies are forwarded
/// through the subscriber. Level comes from `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    match result {
        Ok(()) => log::debug!("logger initialised"),
        Err(e) => eprintln!("logger already initialised: {e}"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_harmless() {
        super::init();
        super::init();
        log::info!("still logging");
    }
}
