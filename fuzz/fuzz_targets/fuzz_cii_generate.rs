#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any invoice that deserializes must generate without panicking.
    if let Ok(invoice) = serde_json::from_slice::<xrechnung_cii::Invoice>(data) {
        let _ = xrechnung_cii::xrechnung::to_cii_xml(&invoice);
    }
});
