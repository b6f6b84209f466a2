#![no_main]

use libfuzzer_sys::fuzz_target;
use visage_runtime::{AnimationDriver, DriverConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    // anything that parses must also be accepted by the driver
    if let Ok(config) = DriverConfig::from_json_str(json) {
        assert!(AnimationDriver::new(config).is_ok());
    }
});
