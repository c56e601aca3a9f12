//! Text normalization for code-mixed Hindi/English commands
//!
//! Commands arrive as free text mixing romanized Hindi and English within
//! one utterance ("ramesh ko 200 bhejo"). Normalization lower-cases, trims,
//! and substitutes known code-mixed words with canonical English so the
//! keyword tables downstream only need English entries.

/// Code-mixed vocabulary, substituted in this order in a single pass.
/// Overlapping substitutions are not re-scanned.
pub const CODE_MIXED_VOCABULARY: &[(&str, &str)] = &[
    ("bhejo", "send"),
    ("kitna", "how much"),
    ("kitne", "how much"),
    ("paisa", "money"),
    ("rupaye", "rupees"),
    ("rupay", "rupees"),
    ("dikhao", "show"),
    ("batao", "tell"),
    ("de do", "give"),
    ("dena", "give"),
    ("bijli", "electricity"),
    ("pani", "water"),
];

/// Lower-case, trim, and translate code-mixed vocabulary to English.
/// Always returns a string, possibly unchanged.
pub fn normalize(text: &str) -> String {
    let mut text = text.trim().to_lowercase();
    for (mixed, english) in CODE_MIXED_VOCABULARY {
        if text.contains(mixed) {
            text = text.replace(mixed, english);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  Check My Balance  "), "check my balance");
    }

    #[test]
    fn test_code_mixed_substitution() {
        assert_eq!(normalize("ramesh ko 200 bhejo"), "ramesh ko 200 send");
        assert_eq!(normalize("bijli ka bill"), "electricity ka bill");
        assert_eq!(
            normalize("mere account mein kitna paisa hai"),
            "mere account mein how much money hai"
        );
    }

    #[test]
    fn test_rupaye_before_rupay() {
        // Longer form is listed first so the single pass does not leave a
        // dangling "e" behind.
        assert_eq!(normalize("500 rupaye bhejo"), "500 rupees send");
        assert_eq!(normalize("500 rupay"), "500 rupees");
    }

    #[test]
    fn test_plain_english_unchanged() {
        assert_eq!(normalize("send 200 to ramesh"), "send 200 to ramesh");
    }
}
