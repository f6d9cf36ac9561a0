//! Build script for bahnsteig-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates messages.txt at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bahnsteig_core::panel;

fn main() {
    setup_linker();
    validate_messages();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Selector bytes the wire grammar knows.
const SELECTORS: &[char] = &['L', 'G', 'W', '1', '2', 'Z', 'U', 'N', 'X', '<', '>'];

/// Byte capacities of the field slots, in table order.
const SLOT_CAPS: [(&str, usize); 7] = [
    ("departure time", panel::DEPARTURE_LEN),
    ("train number", panel::TRAIN_NUMBER_LEN),
    ("destination", panel::DESTINATION_LEN),
    ("route line 1", panel::ROUTE_LINE_LEN),
    ("route line 2", panel::ROUTE_LINE_LEN),
    ("consist", panel::CONSIST_LEN),
    ("scroll text", panel::SCROLL_TEXT_LEN),
];

/// Validate the embedded message table at compile time so a typo in the
/// factory content fails the build instead of garbling the display.
fn validate_messages() {
    println!("cargo:rerun-if-changed=messages.txt");

    let path = Path::new("messages.txt");
    if !path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: messages.txt not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds its factory message table from              ║\n\
            ║  messages.txt in the bahnsteig-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let table = fs::read_to_string(path).expect("messages.txt is not readable as UTF-8");

    let mut errors = Vec::new();
    let mut entry_count = 0;

    for (entry_no, entry) in table.split('§').skip(1).enumerate() {
        let entry = entry.trim_end_matches(['\r', '\n']);
        entry_count += 1;

        if entry.contains('\n') {
            errors.push(format!("entry {}: spans more than one line", entry_no));
            continue;
        }

        let mut slot = 0;
        for field in entry.split('|') {
            if let Some(rest) = field.strip_prefix('#') {
                match rest.chars().next() {
                    Some(sel) if SELECTORS.contains(&sel) => {}
                    Some(sel) => {
                        errors.push(format!(
                            "entry {}: unknown selector '{}' in inline command",
                            entry_no, sel
                        ));
                    }
                    None => {
                        errors.push(format!("entry {}: empty inline command", entry_no));
                    }
                }
                continue;
            }

            match SLOT_CAPS.get(slot) {
                Some((name, cap)) => {
                    if field.len() > *cap {
                        errors.push(format!(
                            "entry {}: {} is {} bytes, capacity is {}",
                            entry_no,
                            name,
                            field.len(),
                            cap
                        ));
                    }
                }
                None => {
                    errors.push(format!("entry {}: more than 7 fields", entry_no));
                    break;
                }
            }
            slot += 1;
        }
    }

    if entry_count == 0 {
        errors.push("table contains no entries".to_string());
    }

    if !errors.is_empty() {
        panic!(
            "\nmessages.txt is invalid:\n{}\n",
            errors
                .iter()
                .map(|e| format!("  • {}", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=messages.txt validated: {} entries", entry_count);
}
