/*!
 * Prompt engineering for locale tree translation.
 *
 * This module provides:
 * - The translate and polish prompt templates
 * - Prompt styles for locale files, short variant strings and variant content
 * - Extraction of the embedded document from a rendered prompt
 */

pub mod templates;

// Re-export main types
pub use templates::{PromptStyle, PromptTemplate, TreePromptBuilder, embedded_document};
