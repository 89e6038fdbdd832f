//! Fenced code block extraction from model replies.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Either a multi-line block, whose whole opener line (language tag plus any
    // info string) is dropped and whose closer may be indented, or a fence
    // opened and closed on a single line. The body is lazy, so each block ends
    // at the first closing fence after its opener.
    static ref FENCED_BLOCK: Regex = Regex::new(
        r"(?s)```[ \t]*([A-Za-z0-9_+#.\-]*)[^`\n]*\n(.*?)(?:\r?\n)?[ \t]*```|```([^`\n]+)```"
    )
    .unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: String,
}

/// All fenced blocks in appearance order. Text without fences yields nothing.
pub fn extract_blocks(text: &str) -> Vec<CodeBlock> {
    FENCED_BLOCK
        .captures_iter(text)
        .map(|cap| {
            let language = cap
                .get(1)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let content = cap
                .get(2)
                .or_else(|| cap.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            CodeBlock {
                language,
                content: content.to_string(),
            }
        })
        .collect()
}

/// Block bodies only, fence lines stripped, inner whitespace untouched.
pub fn extract(text: &str) -> Vec<String> {
    extract_blocks(text)
        .into_iter()
        .map(|block| block.content)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fences() {
        assert!(extract("no code here").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_tagged_and_untagged_blocks() {
        let blocks = extract("```python\nprint(1)\n```\n```\nraw\n```");
        assert_eq!(blocks, vec!["print(1)".to_string(), "raw".to_string()]);
    }

    #[test]
    fn test_language_tag_reported() {
        let blocks = extract_blocks("```python\nprint(1)\n```\n```\nraw\n```");
        assert_eq!(blocks[0].language.as_deref(), Some("python"));
        assert_eq!(blocks[1].language, None);
    }

    #[test]
    fn test_preserves_inner_whitespace() {
        let text = "Код:\n```python\n\ndef main():\n    pass\n\n```\nГотово";
        assert_eq!(extract(text), vec!["\ndef main():\n    pass\n".to_string()]);
    }

    #[test]
    fn test_first_closing_fence_wins() {
        let text = "```a\none\n``` middle ```b\ntwo\n```";
        assert_eq!(extract(text), vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_unclosed_fence_ignored() {
        assert!(extract("```python\nprint(1)\n").is_empty());
        let text = "```\nfirst\n```\n```python\ndangling";
        assert_eq!(extract(text), vec!["first".to_string()]);
    }

    #[test]
    fn test_crlf_fences() {
        let text = "```python\r\nprint(1)\r\n```";
        assert_eq!(extract(text), vec!["print(1)".to_string()]);
    }

    #[test]
    fn test_space_before_language_tag() {
        let blocks = extract_blocks("``` python\nprint(1)\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language.as_deref(), Some("python"));
        assert_eq!(blocks[0].content, "print(1)");
    }

    #[test]
    fn test_info_string_dropped_with_opener_line() {
        let text = "```py title=\"bot.py\"\nprint(1)\n```";
        let blocks = extract_blocks(text);
        assert_eq!(blocks[0].language.as_deref(), Some("py"));
        assert_eq!(blocks[0].content, "print(1)");

        assert_eq!(extract("```py:bot.py\nprint(1)\n```"), vec!["print(1)".to_string()]);
    }

    #[test]
    fn test_indented_closer() {
        assert_eq!(
            extract("```python\nprint(1)\n   ```"),
            vec!["print(1)".to_string()]
        );
    }

    #[test]
    fn test_single_line_fence() {
        let blocks = extract_blocks("Запусти ```print(1)``` и готово");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, None);
        assert_eq!(blocks[0].content, "print(1)");
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(extract("```\n```"), vec![String::new()]);
    }

    #[test]
    fn test_other_languages_are_extracted() {
        let text = "```txt\npython-telegram-bot==20.7\n```\n```bash\npip install -r requirements.txt\n```";
        let blocks = extract_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language.as_deref(), Some("txt"));
        assert_eq!(blocks[1].content, "pip install -r requirements.txt");
    }
}
