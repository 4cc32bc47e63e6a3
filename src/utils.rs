use indicatif::ProgressStyle;

pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {human_pos}/{human_len} {percent}% ({per_sec})")
        .expect("hardcoded")
}

/// "DEN HAAG" -> "Den haag". Only the first character is upper-cased.
pub fn capitalize(s: &str) -> String {
    let lower = s.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_place() {
        assert_eq!(capitalize("AMSTERDAM"), "Amsterdam");
        assert_eq!(capitalize("'S-GRAVENHAGE"), "'s-gravenhage");
        assert_eq!(capitalize("den HAAG"), "Den haag");
        assert_eq!(capitalize(""), "");
    }
}
