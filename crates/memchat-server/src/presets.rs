//! Named sampling presets.
//!
//! Each preset is a full set of generation parameters tuned for one style of
//! answer. Clients may name a preset in a chat request; explicitly supplied
//! fields still win.

use serde::Serialize;

use crate::models::GenerationParams;

#[derive(Debug, Clone, Serialize)]
pub struct Preset {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub params: GenerationParams,
}

const fn params(
    max_new_tokens: usize,
    temperature: f32,
    top_p: f32,
    repetition_penalty: f32,
) -> GenerationParams {
    GenerationParams {
        max_new_tokens,
        temperature,
        top_p,
        repetition_penalty,
    }
}

static PRESETS: [Preset; 12] = [
    Preset {
        key: "concise_answer",
        label: "Concise Answer",
        description: "Gives short and direct factual responses.",
        params: params(100, 0.2, 0.9, 1.05),
    },
    Preset {
        key: "detailed_explanation",
        label: "Detailed Explanation",
        description: "Provides longer, well-structured explanations with details.",
        params: params(300, 0.5, 0.95, 1.05),
    },
    Preset {
        key: "creative_writing",
        label: "Creative Writing",
        description: "Generates stories, poems, and imaginative text.",
        params: params(400, 1.0, 0.95, 1.0),
    },
    Preset {
        key: "brainstorming",
        label: "Brainstorming",
        description: "Suggests multiple ideas, options, or approaches.",
        params: params(250, 0.9, 1.0, 1.05),
    },
    Preset {
        key: "summarization",
        label: "Summarization",
        description: "Condenses long text into short and clear summaries.",
        params: params(120, 0.3, 0.85, 1.1),
    },
    Preset {
        key: "translation",
        label: "Translation",
        description: "Translates text between languages with high accuracy.",
        params: params(200, 0.4, 0.9, 1.0),
    },
    Preset {
        key: "code_generation",
        label: "Code Generation",
        description: "Writes code snippets or fixes programming errors.",
        params: params(250, 0.3, 0.85, 1.1),
    },
    Preset {
        key: "step_by_step_reasoning",
        label: "Step-by-Step Reasoning",
        description: "Solves math, logic, or technical problems step by step.",
        params: params(300, 0.4, 0.9, 1.05),
    },
    Preset {
        key: "storytelling",
        label: "Storytelling",
        description: "Writes long narrative stories with creativity.",
        params: params(500, 1.1, 0.98, 1.0),
    },
    Preset {
        key: "bullet_points",
        label: "Bullet Points",
        description: "Structures answers as lists or outlines.",
        params: params(150, 0.4, 0.85, 1.1),
    },
    Preset {
        key: "qa_factual",
        label: "Strict Q&A",
        description: "Answers with only factual information, no creativity.",
        params: params(120, 0.2, 0.8, 1.1),
    },
    Preset {
        key: "chatty_casual",
        label: "Chatty & Casual",
        description: "Acts like a friendly chatbot with informal responses.",
        params: params(250, 0.8, 0.95, 1.0),
    },
];

/// All presets, in display order.
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by key.
pub fn find(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<_> = all().iter().map(|p| p.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), all().len());
    }

    #[test]
    fn find_by_key() {
        let preset = find("storytelling").unwrap();
        assert_eq!(preset.params.max_new_tokens, 500);
        assert_eq!(preset.params.temperature, 1.1);
        assert!(find("nonexistent").is_none());
    }
}
