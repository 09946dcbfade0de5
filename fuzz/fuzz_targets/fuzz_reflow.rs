#![no_main]

use libfuzzer_sys::fuzz_target;
use reflow_text::line::display_width;
use reflow_text::stats::TextStats;
use reflow_text::{WrapMode, WrapOptions, detect_if_already_wrapped, reflow, unwrap_paragraphs};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Cap length to keep fuzzing fast.
    if text.len() > 2048 {
        return;
    }

    // Stats, unwrap and detection must never panic.
    let _stats = TextStats::from_text(text);
    let _merged = unwrap_paragraphs(text, true);
    let _wrapped = detect_if_already_wrapped(text);

    for width in [1, 10, 40, 80, 200] {
        for mode in WrapMode::ALL {
            let options = WrapOptions::new(width).mode(mode);
            let Ok(result) = reflow(text, &options) else {
                panic!("width {width} rejected");
            };

            // Char mode only overshoots for a single grapheme wider than the
            // width, which ASCII never has.
            if mode == WrapMode::Char {
                for line in result.lines().filter(|line| line.is_ascii()) {
                    let w = display_width(line);
                    assert!(
                        w <= width,
                        "char line exceeds width {}: width={} '{}'",
                        width,
                        w,
                        line
                    );
                }
            }
        }
    }
});
