use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"(?u)[\p{L}\p{M}\p{N}]+").expect("valid regex");
    static ref TITLE: Regex = Regex::new(r"(?is)<title[^>]*>(.*?)</title\s*>").expect("valid regex");
}

/// Normalized text of a document: NFKC, lowercased, markup replaced by spaces.
///
/// Owns the buffer and hands out terms lazily. Calling [`Tokens::iter`] again
/// restarts the sequence from the first term.
#[derive(Debug, Clone)]
pub struct Tokens {
    buffer: String,
}

impl Tokens {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        WORD.find_iter(&self.buffer).map(|m| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Tokenize text into terms: tags stripped, NFKC normalized, lowercased, split
/// on anything that is not a letter, combining mark or digit.
pub fn tokenize(text: &str) -> Tokens {
    let stripped = TAG.replace_all(text, " ");
    let buffer = stripped.nfkc().collect::<String>().to_lowercase();
    Tokens { buffer }
}

/// Terms of a single search keyword, normalized exactly like document text.
///
/// A keyword with inner punctuation such as `hong-kong` yields several terms.
/// Empty when the keyword holds no letters or digits.
pub fn keyword_terms(keyword: &str) -> Vec<String> {
    tokenize(keyword).iter().map(str::to_string).collect()
}

/// Text of the first `<title>` element, trimmed. Empty when there is none.
pub fn extract_title(html: &str) -> String {
    TITLE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("<b>Running</b>, runner's RUN!");
        let words: Vec<&str> = t.iter().collect();
        assert_eq!(words, vec!["running", "runner", "s", "run"]);
    }

    #[test]
    fn tokens_restart() {
        let t = tokenize("james hcm");
        assert_eq!(t.iter().count(), 2);
        assert_eq!(t.iter().collect::<Vec<_>>(), vec!["james", "hcm"]);
    }

    #[test]
    fn markup_only_is_empty() {
        assert!(tokenize("<html><body></body></html>").is_empty());
        assert!(tokenize("  ,.;  ").is_empty());
    }

    #[test]
    fn keyword_terms_split_like_text() {
        assert_eq!(keyword_terms("  HCM, "), vec!["hcm"]);
        assert_eq!(keyword_terms("zzz-not-present"), vec!["zzz", "not", "present"]);
        assert_eq!(keyword_terms("O'Brien"), vec!["o", "brien"]);
        assert!(keyword_terms("!!!").is_empty());
        assert!(keyword_terms("").is_empty());
    }

    #[test]
    fn combining_marks_stay_in_the_word() {
        let t = tokenize("हिंदी भाषा");
        assert_eq!(t.iter().collect::<Vec<_>>(), vec!["हिंदी", "भाषा"]);
    }

    #[test]
    fn title_extraction() {
        let html = "<html><head><title> Customer: James </title></head><body>1 James</body></html>";
        assert_eq!(extract_title(html), "Customer: James");
        assert_eq!(extract_title("no markup"), "");
    }
}
