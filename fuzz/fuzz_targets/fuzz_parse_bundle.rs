#![no_main]
use attack_diff::model::{Domain, ObjectKind, Snapshot};
use libfuzzer_sys::fuzz_target;

/// Fuzz bundle parsing and snapshot indexing.
///
/// Feeds arbitrary UTF-8 strings to `parse_bundle_str`; bundles that parse
/// are indexed per kind, which must either succeed or report a duplicate id.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(bundle) = attack_diff::parsers::parse_bundle_str(s) {
            for kind in ObjectKind::ALL {
                let _ = Snapshot::from_bundle(&bundle, kind, Domain::Enterprise);
            }
        }
    }
});
