#![no_main]

use libfuzzer_sys::fuzz_target;
use yaml_contents::Parse;

fuzz_target!(|data: &[u8]| {
    if let Ok(yaml_str) = std::str::from_utf8(data) {
        // Skip extremely large inputs to avoid timeout
        if yaml_str.len() > 1_000_000 {
            return;
        }

        // Parsing never fails and never loses text
        let parse = Parse::parse_yaml(yaml_str);
        let tree = parse.tree();
        if !yaml_str.contains('\r') {
            assert_eq!(tree.to_string(), yaml_str);
        }

        // Realigning twice gives the same text as realigning once
        let once = yaml_contents::align::realign(yaml_str);
        assert_eq!(yaml_contents::align::realign(&once), once);
    }
});
