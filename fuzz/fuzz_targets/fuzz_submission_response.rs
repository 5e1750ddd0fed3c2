#![no_main]
use libfuzzer_sys::fuzz_target;
use verifactu::responses::parse_submission_response;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_submission_response(s);
    }
});
