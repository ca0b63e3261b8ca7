//! Reading-time estimate shown next to an article.

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Minutes needed to read `text`, rounded to the nearest whole minute.
pub fn reading_minutes(text: &str, words_per_minute: u32) -> u64 {
    let words = text.split_whitespace().count() as f64;
    let wpm = f64::from(words_per_minute.max(1));
    (words / wpm).round() as u64
}

/// Formatted estimate, e.g. `"2 mins"`.
pub fn read_time_label(text: &str, words_per_minute: u32) -> String {
    format!("{} mins", reading_minutes(text, words_per_minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn four_hundred_words_take_two_minutes() {
        assert_eq!(read_time_label(&words(400), DEFAULT_WORDS_PER_MINUTE), "2 mins");
    }

    #[test]
    fn rounds_to_nearest_minute() {
        assert_eq!(reading_minutes(&words(299), 200), 1);
        assert_eq!(reading_minutes(&words(300), 200), 2);
        assert_eq!(reading_minutes(&words(50), 200), 0);
    }

    #[test]
    fn any_whitespace_separates_words() {
        assert_eq!(reading_minutes("a\tb\nc  d", 2), 2);
    }
}
