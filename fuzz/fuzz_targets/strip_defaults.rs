#![no_main]

use libfuzzer_sys::fuzz_target;
use opgen::backend::params::strip_param_defaults;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let once = strip_param_defaults(s);
        let _ = strip_param_defaults(&once);
    }
});
