//! Heuristic filename assignment for extracted code blocks.
//!
//! Each block is classified on its own, top to bottom through [`FileKind`]'s
//! priority order. The result is a plain map: when two blocks land on the same
//! filename the later block replaces the earlier one.

use telebot_protocol::FileMap;

const MAIN_MARKERS: [&str; 3] = [
    "def main()",
    "if __name__ == '__main__'",
    "if __name__ == \"__main__\"",
];

const CONFIG_MARKERS: [&str; 2] = ["BOT_TOKEN", "DATABASE_URL"];

const FRAMEWORK_PACKAGE: &str = "python-telegram-bot";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Entrypoint,
    Config,
    Requirements,
}

impl FileKind {
    const PRIORITY: [FileKind; 3] = [
        FileKind::Entrypoint,
        FileKind::Config,
        FileKind::Requirements,
    ];

    pub fn priority_order() -> &'static [FileKind] {
        &Self::PRIORITY
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Self::Entrypoint => "bot.py",
            Self::Config => "config.py",
            Self::Requirements => "requirements.txt",
        }
    }

    /// `code` must already be trimmed.
    pub fn matches(&self, code: &str) -> bool {
        match self {
            Self::Entrypoint => MAIN_MARKERS.iter().any(|m| code.contains(m)),
            Self::Config => CONFIG_MARKERS.iter().any(|m| code.contains(m)),
            Self::Requirements => code
                .split_whitespace()
                .next()
                .map(is_framework_requirement)
                .unwrap_or(false),
        }
    }
}

// `python-telegram-bot`, `python-telegram-bot==20.7`, `python-telegram-bot[job-queue]>=20`
fn is_framework_requirement(token: &str) -> bool {
    match token.strip_prefix(FRAMEWORK_PACKAGE) {
        Some(rest) => {
            rest.is_empty() || rest.starts_with(&['=', '<', '>', '~', '!', '[', ';'][..])
        }
        None => false,
    }
}

/// Filename for the block at 1-based `position` among all extracted blocks.
pub fn classify_block(code: &str, position: usize) -> String {
    let code = code.trim();
    FileKind::priority_order()
        .iter()
        .find(|kind| kind.matches(code))
        .map(|kind| kind.filename().to_string())
        .unwrap_or_else(|| format!("module_{}.py", position))
}

/// Map every block to a filename, storing trimmed contents.
pub fn classify<S: AsRef<str>>(blocks: &[S]) -> FileMap {
    let mut files = FileMap::new();
    for (idx, block) in blocks.iter().enumerate() {
        let code = block.as_ref().trim();
        let filename = classify_block(code, idx + 1);
        if files.insert(filename.clone(), code.to_string()).is_some() {
            tracing::debug!(%filename, position = idx + 1, "later block replaced earlier file");
        }
    }
    files
}
