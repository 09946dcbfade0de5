#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use reflow_text::{WrapMode, WrapOptions, reflow};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    mode: u8,
    width: u8,
    preserve_lines: bool,
    unwrap_first: bool,
    preserve_indentation: bool,
    force_break_long_words: bool,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 2048 {
        return;
    }

    let mode = WrapMode::ALL[usize::from(input.mode) % WrapMode::ALL.len()];
    let options = WrapOptions::new(usize::from(input.width))
        .mode(mode)
        .preserve_lines(input.preserve_lines)
        .unwrap_first(input.unwrap_first)
        .preserve_indentation(input.preserve_indentation)
        .force_break_long_words(input.force_break_long_words);

    match reflow(&input.text, &options) {
        Ok(first) => {
            // Deterministic.
            let second = reflow(&input.text, &options);
            assert_eq!(Ok(first), second);
        }
        Err(_) => assert_eq!(options.width, 0),
    }
});
