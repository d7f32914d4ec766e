/*!
 * Translation of JSON trees using AI providers.
 *
 * - `core`: the translation service (translate, extract, polish) and its usage stats
 * - `extract`: recovery of a JSON document from free-form provider output
 * - `prompts`: prompt templates and builders
 */

// Re-export main types for easier usage
pub use self::core::{TranslationOptions, TranslationService, UsageStats};
pub use self::extract::{clean_json_string, extract_json_from_response};

// Re-export prompt types
pub use self::prompts::{PromptStyle, PromptTemplate, TreePromptBuilder};

// Submodules
pub mod core;
pub mod extract;
pub mod prompts;
