//! Prompt directive tokens.
//!
//! The video task API has no structured fields for duration, frame rate,
//! resolution or aspect ratio. It parses them out of the text prompt as
//! `--flag value` tokens instead. A caller who already wrote a flag into the
//! prompt keeps it: the structured value for that flag is dropped.

use std::fmt::Write;

pub const DURATION: &str = "--dur";
pub const FPS: &str = "--fps";
pub const RESOLUTION: &str = "--rs";
pub const RATIO: &str = "--ratio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub flag: &'static str,
    pub value: String,
}

impl Directive {
    pub fn new(flag: &'static str, value: impl ToString) -> Self {
        Self {
            flag,
            value: value.to_string(),
        }
    }
}

/// Plain substring match on the literal flag.
pub fn has_flag(prompt: &str, flag: &str) -> bool {
    prompt.contains(flag)
}

/// Appends each directive as ` <flag> <value>`, in order, unless the original
/// prompt already mentions its flag.
pub fn encode(prompt: &str, directives: &[Directive]) -> String {
    let mut out = prompt.to_string();
    for d in directives {
        if !has_flag(prompt, d.flag) {
            let _ = write!(out, " {} {}", d.flag, d.value);
        }
    }
    out
}

/// Aspect ratio the service expects for a given resolution.
pub fn ratio_for(resolution: &str) -> &'static str {
    if resolution == "720p" {
        "16:9"
    } else {
        "adaptive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(dur: u32, fps: u32, rs: &str) -> Vec<Directive> {
        vec![
            Directive::new(DURATION, dur),
            Directive::new(FPS, fps),
            Directive::new(RESOLUTION, rs),
            Directive::new(RATIO, ratio_for(rs)),
        ]
    }

    #[test]
    fn appends_all_directives_in_order() {
        assert_eq!(
            encode("a cat", &all(5, 24, "720p")),
            "a cat --dur 5 --fps 24 --rs 720p --ratio 16:9"
        );
    }

    #[test]
    fn embedded_flag_suppresses_only_that_directive() {
        assert_eq!(
            encode("a cat --fps 30", &all(5, 24, "1080p")),
            "a cat --fps 30 --dur 5 --rs 1080p --ratio adaptive"
        );
    }

    #[test]
    fn every_flag_embedded_leaves_prompt_untouched() {
        let prompt = "x --ratio 9:16 --rs 480p --dur 3 --fps 24";
        assert_eq!(encode(prompt, &all(5, 24, "720p")), prompt);
    }

    #[test]
    fn flag_detection_is_a_raw_substring_match() {
        assert!(has_flag("foo--durable", DURATION));
        assert!(!has_flag("a cat", RATIO));
    }

    #[test]
    fn ratio_policy() {
        assert_eq!(ratio_for("720p"), "16:9");
        assert_eq!(ratio_for("1080p"), "adaptive");
        assert_eq!(ratio_for("480p"), "adaptive");
    }
}
