#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text must tokenize without panicking
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = saikac::lexer::tokenize(s);
    }
});
