#![no_main]
use libfuzzer_sys::fuzz_target;
use verifactu::responses::parse_query_response;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_query_response(s);
    }
});
