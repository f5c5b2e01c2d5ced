//! Fuzzing entry points for the isoshim-core parsers
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_options

use std::path::Path;

pub fn fuzz_parse_archive(data: &[u8]) {
    use isoshim_core::options::parse_archive_command_line_with;

    let text = String::from_utf8_lossy(data);
    let tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();

    // Try to parse - should never panic
    let _ = parse_archive_command_line_with(&tokens, Path::new("/fuzz"), false);
}

pub fn fuzz_eval(data: &[u8]) {
    use isoshim_core::variables::{eval_variables, Scope};

    let text = String::from_utf8_lossy(data);

    // Try to evaluate - should never panic
    let _ = eval_variables(&text, &Scope::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_parse_archive_empty() {
        fuzz_parse_archive(&[]);
    }

    #[test]
    fn test_fuzz_parse_archive_random() {
        fuzz_parse_archive(&[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_fuzz_parse_archive_flag_like() {
        fuzz_parse_archive(b"--config-variable OS= -s x.isolated --");
    }

    #[test]
    fn test_fuzz_eval_empty() {
        fuzz_eval(&[]);
    }

    #[test]
    fn test_fuzz_eval_unbalanced() {
        fuzz_eval(b"<(<(<(a <()");
    }

    #[test]
    fn test_fuzz_eval_random() {
        fuzz_eval(&[0xFF; 1024]);
    }
}
