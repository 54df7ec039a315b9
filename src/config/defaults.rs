//! Compiled-in default document and the built-in summary templates.

use crate::config::document::Document;
use serde_json::{json, Map, Value};

/// Section holding the prompt templates.
pub const TEMPLATES_SECTION: &str = "templates";

/// Section holding the chat system prompt.
pub const SYSTEM_PROMPT_SECTION: &str = "system_prompt";

/// Placeholder replaced with the meeting transcript.
pub const TRANSCRIPT_PLACEHOLDER: &str = "{audiotranscript}";

/// Placeholder replaced with the user's chat message.
pub const USER_MESSAGE_PLACEHOLDER: &str = "{usermessage}";

/// Placeholder replaced with the previous chat history.
pub const HISTORY_PLACEHOLDER: &str = "{messagestory}";

/// Ids of the built-in templates, in the order they are written.
pub const BUILTIN_TEMPLATE_IDS: [&str; 4] = ["default", "detailed", "tasks", "decisions"];

const DEFAULT_SYSTEM_PROMPT: &str = "
Вот ваша прошлая история переписки с пользователем {messagestory}. 
Отвечай на вопросы пользователя: {usermessage} по транскрипту совещания: {audiotranscript}.
";

const SUMMARY_PROMPT: &str = "
Создай краткое резюме (не более 300 слов) следующего транскрипта встречи:

{audiotranscript}

Выдели 3-5 основных обсуждаемых тем и ключевые решения.
";

const DETAILED_PROMPT: &str = "
Сделай детальный анализ следующего транскрипта встречи:

{audiotranscript}

Структурируй анализ по следующим разделам:
1. Основные темы и вопросы
2. Ключевые аргументы и точки зрения
3. Принятые решения
4. Открытые вопросы, требующие дальнейшего обсуждения
5. Общие выводы и рекомендации
";

const TASKS_PROMPT: &str = "
Извлеки из транскрипта встречи все упомянутые задачи и дела:

{audiotranscript}

Для каждой задачи укажи:
1. Описание задачи
2. Ответственное лицо (если указано)
3. Срок выполнения (если указан)
4. Приоритет (если можно определить)

Представь результат в виде четко структурированного списка задач.
";

const DECISIONS_PROMPT: &str = "
Проанализируй транскрипт встречи и выдели все принятые решения:

{audiotranscript}

Для каждого решения укажи:
1. Суть принятого решения
2. Краткое обоснование
3. Кто выступал за и против (если применимо)
4. Какие следующие шаги были определены

Дополнительно отметь, какие решения требуют дополнительного согласования.
";

/// The default document. `templates` is empty here; first-run synthesis
/// fills it with [`builtin_templates`].
pub fn default_document() -> Document {
    let value = json!({
        "audio": {
            "microphone": "",
            "system_audio": "",
            "auto_save": true,
            "save_path": "",
            "auto_send": false
        },
        "whisper": {
            "model": "base",
            "language": "ru",
            "temperature": 0
        },
        "ai": {
            "provider": "openai",
            "openai_key": "",
            "claude_key": "",
            "model": "",
            "temperature": 0.7,
            "max_tokens": 1000
        },
        "local_models": {
            "installed": [],
            "path": ""
        },
        "templates": {},
        "system_prompt": DEFAULT_SYSTEM_PROMPT,
        "ui": {
            "theme": "system",
            "transcript_font_size": "medium",
            "chat_mode_default": true
        },
        "format": {
            "transcription": "txt",
            "include_timestamps": true,
            "include_sources": true
        }
    });

    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// The four built-in templates keyed by id, in [`BUILTIN_TEMPLATE_IDS`] order.
pub fn builtin_templates() -> Map<String, Value> {
    let entries = [
        (
            "default",
            "Краткое резюме",
            "Стандартный шаблон для краткого резюме транскрипта",
            SUMMARY_PROMPT,
        ),
        (
            "detailed",
            "Детальный анализ",
            "Шаблон для детального анализа транскрипта",
            DETAILED_PROMPT,
        ),
        (
            "tasks",
            "Список задач",
            "Шаблон для извлечения задач из транскрипта",
            TASKS_PROMPT,
        ),
        (
            "decisions",
            "Ключевые решения",
            "Шаблон для выделения принятых решений",
            DECISIONS_PROMPT,
        ),
    ];

    let mut templates = Map::new();
    for (id, name, description, prompt) in entries {
        templates.insert(
            id.to_string(),
            json!({
                "name": name,
                "description": description,
                "prompt": prompt,
            }),
        );
    }
    templates
}

/// Default document with the built-in templates installed.
pub fn first_run_document() -> Document {
    let mut document = default_document();
    document.insert(
        TEMPLATES_SECTION.to_string(),
        Value::Object(builtin_templates()),
    );
    document
}
