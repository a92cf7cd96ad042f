#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  detect_js::fuzz::fuzz_detect(data);
});
