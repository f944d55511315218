use serde::{Deserialize, Serialize};

pub const CONDENSE_QUESTION_PROMPT: &str = "Given the following conversation and a follow up question, rephrase the follow up question to be a standalone question.

Chat History:
{chat_history}
Follow Up Input: {question}
Standalone question:";

pub const ANSWERING_PROMPT: &str = "Context:
{summaries}

Please reply to the question using only the information Context section above. If you can't answer a question using the context, reply politely that the information is not in the knowledge base. DO NOT make up your own answers. You detect the language of the question and answer in the same language.  If asked for enumerations list all of them and do not invent any.

The context is structured like this:

Content:  <information>
Source: [url/to/file.pdf](url/to/file.pdf_SAS_TOKEN_PLACEHOLDER_)
<and more of them>

When you give your answer, you ALWAYS MUST include the source in your response in the following format: <answer> [[file.pdf]]
Always use double square brackets to reference the filename source, e.g. [[file.pdf]]. When using multiple sources, list each source separately, e.g. [[file1.pdf]][[file2.pdf]].

Question: {question}
Answer:";

pub const POST_ANSWERING_PROMPT: &str = "You help fact checking if the given answer for the question below is aligned to the sources. If the answer is correct, then reply with \"True\", if the answer is not correct, then reply with \"False\". DO NOT ANSWER with anything else.

Sources:
{summaries}

Question: {question}
Answer: {answer}";

pub const POST_ANSWERING_FILTER: &str = "I'm sorry, but I can't answer this question correctly. Please try again by altering or rephrasing your question.";

pub const DEFAULT_CHUNK_SIZE: u32 = 500;
pub const DEFAULT_CHUNK_OVERLAP: u32 = 100;

/// The active pipeline configuration as stored in `config/active.json`.
///
/// Every field is required on the wire; a document missing any of them is
/// rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub prompts: Prompts,
    pub messages: Messages,
    /// Applied in document order.
    pub chunking: Vec<Chunking>,
    pub logging: Logging,
}

/// Prompt templates. Placeholders such as `{question}` or `{summaries}` are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompts {
    pub condense_question_prompt: String,
    pub answering_prompt: String,
    pub post_answering_prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Shown to the user when the post-answering check rejects an answer.
    pub post_answering_filter: String,
}

/// One document chunking rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunking {
    #[serde(rename = "strategy")]
    pub chunking_strategy: ChunkingStrategy,
    #[serde(rename = "size")]
    pub chunk_size: u32,
    #[serde(rename = "overlap")]
    pub chunk_overlap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    Layout,
    Page,
    FixedSizeOverlap,
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Logging {
    pub log_user_interactions: bool,
    pub log_tokens: bool,
}

impl Config {
    /// Chunking rules whose overlap is not smaller than their size.
    pub fn inconsistent_chunking(&self) -> impl Iterator<Item = (usize, &Chunking)> {
        self.chunking.iter().enumerate().filter(|(_, c)| !c.is_consistent())
    }
}

impl Chunking {
    #[must_use]
    pub const fn new(chunking_strategy: ChunkingStrategy, chunk_size: u32, chunk_overlap: u32) -> Self {
        Self { chunking_strategy, chunk_size, chunk_overlap }
    }

    /// `true` when `chunk_overlap < chunk_size`. Not enforced on load.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.chunk_overlap < self.chunk_size
    }
}

impl ChunkingStrategy {
    pub const ALL: [Self; 4] = [Self::Layout, Self::Page, Self::FixedSizeOverlap, Self::Paragraph];

    /// The token used in stored documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Page => "page",
            Self::FixedSizeOverlap => "fixed_size_overlap",
            Self::Paragraph => "paragraph",
        }
    }
}

impl std::fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Default ---

impl Default for Config {
    fn default() -> Self {
        Self {
            prompts: Prompts::default(),
            messages: Messages::default(),
            chunking: vec![Chunking::default()],
            logging: Logging::default(),
        }
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            condense_question_prompt: CONDENSE_QUESTION_PROMPT.to_owned(),
            answering_prompt: ANSWERING_PROMPT.to_owned(),
            post_answering_prompt: POST_ANSWERING_PROMPT.to_owned(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self { post_answering_filter: POST_ANSWERING_FILTER.to_owned() }
    }
}

impl Default for Chunking {
    fn default() -> Self {
        Self::new(ChunkingStrategy::FixedSizeOverlap, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self { log_user_interactions: true, log_tokens: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_tokens_match_display() {
        for strategy in ChunkingStrategy::ALL {
            assert_eq!(strategy.to_string(), strategy.as_str());
        }
    }

    #[test]
    fn consistency_is_strict() {
        assert!(Chunking::new(ChunkingStrategy::Page, 1000, 0).is_consistent());
        assert!(!Chunking::new(ChunkingStrategy::Page, 100, 100).is_consistent());
        assert!(!Chunking::new(ChunkingStrategy::Layout, 0, 0).is_consistent());
    }

    #[test]
    fn inconsistent_chunking_reports_positions() {
        let mut config = Config::default();
        config.chunking.push(Chunking::new(ChunkingStrategy::Paragraph, 10, 20));

        let bad: Vec<_> = config.inconsistent_chunking().map(|(i, _)| i).collect();
        assert_eq!(bad, vec![1]);
    }
}
