pub fn preview(text: &str, max: usize) -> Option<String> {
    if text.chars().count() <= max {
        return None;
    }

    let mut r = text.chars().take(max).collect::<String>();
    r.push_str("...");

    Some(r)
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn test_preview_short_text() -> anyhow::Result<()> {
        let r = preview("short", 50);

        assert_eq!(None, r);

        Ok(())
    }

    #[test]
    fn test_preview_exact_length() -> anyhow::Result<()> {
        let text = "a".repeat(50);

        let r = preview(&text, 50);

        assert_eq!(None, r);

        Ok(())
    }

    #[test]
    fn test_preview_long_text() -> anyhow::Result<()> {
        let text = "a".repeat(120);

        let r = preview(&text, 50);

        let expected = format!("{}...", "a".repeat(50));

        assert_eq!(Some(expected), r);

        Ok(())
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() -> anyhow::Result<()> {
        let text = "ö".repeat(51);

        let r = preview(&text, 50);

        let expected = format!("{}...", "ö".repeat(50));

        assert_eq!(Some(expected), r);

        Ok(())
    }
}
