#![no_main]

use libfuzzer_sys::fuzz_target;
use opgen::backend::{EmitConfig, emit_op_decls, emit_op_defs};
use opgen_schema::RecordSet;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the loader
        if let Ok(records) = RecordSet::from_json_str(s, "fuzz.json") {
            // If loading succeeds, fuzz both generators
            let config = EmitConfig::default();
            let mut out = String::new();
            let _ = emit_op_decls(&records.ops, &config, &mut out);
            out.clear();
            let _ = emit_op_defs(&records.ops, &config, &mut out);
        }
    }
});
