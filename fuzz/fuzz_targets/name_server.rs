#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    use berserker::nameserver::NameServer;
    use std::str::FromStr;

    if let Ok(s) = std::str::from_utf8(data) {
        let _ = NameServer::from_str(s);
    }
});
