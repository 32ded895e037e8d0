use std::sync::Once;

static START: Once = Once::new();

/// Install a logger once for the whole test binary
pub fn setup() {
    START.call_once(|| {
        loggerv::Logger::new()
            .verbosity(2)
            .module_path(true)
            .line_numbers(true)
            .init()
            .unwrap();
    });
}
