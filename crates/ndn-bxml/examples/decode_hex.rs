//! Simple decoder to inspect Binary-XML name encodings.
//!
//! Pass a hex string, e.g.:
//! `cargo run --example decode_hex f2fa8d6100fa9562630000`

use ndn_bxml::{decode_name, limits};

fn parse_hex(s: &str) -> Option<Vec<u8>> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

fn main() {
    let hex: String = std::env::args().skip(1).collect::<Vec<_>>().join("");
    let hex = if hex.is_empty() {
        // Name{"a", "bc"}
        "f2fa8d6100fa9562630000".to_string()
    } else {
        hex
    };

    let bytes = parse_hex(&hex).expect("argument is not a hex string");
    println!("Input: {} bytes", bytes.len());

    match decode_name(&bytes, limits::DEFAULT_MAX_NAME_COMPONENTS) {
        Ok(name) => {
            println!("Name: {}", name);
            println!("Components: {}", name.len());
            for (i, component) in name.iter().enumerate() {
                let hex: String = component.iter().map(|b| format!("{b:02x}")).collect();
                println!("  [{}] {} bytes: {}", i, component.len(), hex);
            }
        }
        Err(err) => {
            println!("Decode failed: {}", err);
            std::process::exit(1);
        }
    }
}
