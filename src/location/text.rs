//! Query tokenization and stop-word filtering.

/// English stop-words (the standard NLTK list).
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
    "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below",
    "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
    "further", "then", "once", "here", "there", "when", "where", "why", "how",
    "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s",
    "t", "can", "will", "just", "don", "don't", "should", "should've", "now", "d",
    "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
    "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
    "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't",
    "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Split lowercased text into maximal alphanumeric runs.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lowercase, tokenize, drop stop-words and tokens that are not purely
/// alphabetic, and join the survivors with single spaces.
pub fn filter_query(query: &str) -> String {
    tokenize(query)
        .into_iter()
        .filter(|t| t.chars().all(char::is_alphabetic) && !is_stop_word(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, map anything that is not alphanumeric to a space, and collapse
/// whitespace. Applied to both sides before best-match scoring.
pub fn full_process(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_list() {
        assert_eq!(STOP_WORDS.len(), 179);
        assert!(is_stop_word("me"));
        assert!(!is_stop_word("near"));
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(
            tokenize("I'm at Lajpat Nagar, need a toilet!"),
            ["i", "m", "at", "lajpat", "nagar", "need", "a", "toilet"]
        );
    }

    #[test]
    fn test_filter_query() {
        assert_eq!(filter_query("Where can I find a toilet near Arjun Nagar?"), "find toilet near arjun nagar");
        assert_eq!(filter_query("please help me"), "please help");
        assert_eq!(filter_query("Stop 42 at Gate B2"), "stop gate");
        assert_eq!(filter_query("to the"), "");
    }

    #[test]
    fn test_full_process() {
        assert_eq!(full_process("  Hauz-Khas  Village! "), "hauz khas village");
        assert_eq!(full_process("???"), "");
    }
}
