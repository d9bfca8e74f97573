/// Trait for the time source used by cooldown checks and counter stamps.
///
/// Injected so tests can run against a manually advanced clock instead of
/// ambient wall-clock state.
pub trait Clock: Send + Sync {
    /// Human-readable clock name for logging.
    fn name(&self) -> &'static str;

    /// Current time as unix seconds.
    fn now_secs(&self) -> u64;
}
