//! Upstream prompt assembly.
//!
//! Message order is fixed: persona first, caller messages in their original
//! order, then at most one context message. Context always goes last so the
//! model reads it as the current project state rather than as instructions.

use telebot_protocol::{ChatMessage, ChatRequest, FileMap, GenerateRequest};

pub const DEFAULT_CONTEXT_LIMIT: usize = 500;

pub const ELLIPSIS: &str = "...";

pub const SYSTEM_PROMPT: &str = "Ты - эксперт по разработке Telegram-ботов на Python. Твоя задача - создавать, редактировать и улучшать Telegram-ботов с использованием библиотеки python-telegram-bot.

Основные принципы:
1. Используй библиотеку python-telegram-bot (v20+)
2. Предоставляй готовый к использованию код
3. Объясняй функционал на русском языке
4. Следи за безопасностью и лучшими практиками
5. Используй асинхронное программирование

При создании кода четко указывай имена файлов и их содержимое.";

const CONTEXT_HEADER: &str = "Текущий контекст проекта:\n";

/// First `limit` characters of `content`, always followed by [`ELLIPSIS`].
///
/// The marker is appended even when nothing was cut off.
pub fn truncate(content: &str, limit: usize) -> String {
    let end = content
        .char_indices()
        .nth(limit)
        .map(|(idx, _)| idx)
        .unwrap_or(content.len());
    let mut out = String::with_capacity(end + ELLIPSIS.len());
    out.push_str(&content[..end]);
    out.push_str(ELLIPSIS);
    out
}

/// Builds upstream message sequences for a fixed per-file context limit.
#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    context_limit: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_LIMIT)
    }
}

impl PromptComposer {
    pub fn new(context_limit: usize) -> Self {
        Self { context_limit }
    }

    pub fn compose(&self, request: &ChatRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(request.messages.len() + 2);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(request.messages.iter().cloned());
        if let Some(context) = self.context_message(&request.project_context) {
            messages.push(context);
        }
        messages
    }

    pub fn compose_generation(&self, request: &GenerateRequest) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(request.prompt.as_str()),
        ];
        if let Some(context) = self.context_message(&request.context) {
            messages.push(context);
        }
        messages
    }

    fn context_message(&self, files: &FileMap) -> Option<ChatMessage> {
        if files.is_empty() {
            return None;
        }
        let mut info = String::from(CONTEXT_HEADER);
        for (filename, content) in files {
            info.push_str("\n--- ");
            info.push_str(filename);
            info.push_str(" ---\n");
            info.push_str(&truncate(content, self.context_limit));
            info.push('\n');
        }
        Some(ChatMessage::system(info))
    }
}

/// [`PromptComposer::compose`] with the default context limit.
pub fn compose(request: &ChatRequest) -> Vec<ChatMessage> {
    PromptComposer::default().compose(request)
}
