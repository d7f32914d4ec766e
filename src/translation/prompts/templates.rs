/*!
 * Prompt templates for locale tree translation.
 *
 * Every prompt embeds the tree as 2-space indented JSON between `"""`
 * markers and asks for the result inside a fenced ```` ```json ```` block.
 */

use serde_json::Value;

/// Delimiter placed around the embedded document
pub const DOCUMENT_DELIMITER: &str = "\"\"\"";

/// Prompt template with `{placeholder}` variables.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// First pass: translate the document.
    pub const TREE_TRANSLATOR: &'static str = r#"Translate the following JSON document into {target_language}.

"""
{document}
"""

{instructions}

Return only the translated JSON, wrapped in ```json and ```."#;

    /// Second pass: make the translated document read naturally.
    pub const TREE_POLISHER: &'static str = r#"Polish the wording of the following JSON document so that it reads the way a native {target_language} speaker would put it.

"""
{document}
"""

{instructions}

Return only the polished JSON, wrapped in ```json and ```."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn tree_translator() -> Self {
        Self::new(Self::TREE_TRANSLATOR)
    }

    pub fn tree_polisher() -> Self {
        Self::new(Self::TREE_POLISHER)
    }

    /// Render the template with the given variables.
    pub fn render(&self, target_language: &str, document: &str, instructions: &str) -> String {
        self.template
            .replace("{target_language}", target_language)
            .replace("{document}", document)
            .replace("{instructions}", instructions)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::tree_translator()
    }
}

/// Flavor of the translation instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// Incremental updates and repairs of namespace files
    #[default]
    Standard,
    /// Whole-file translation; keep the length close to the English text
    SimilarLength,
    /// Variant content updates; example prompts stay in English
    Variant,
}

impl PromptStyle {
    /// Whether this style gets the second, polishing pass
    pub fn polishes(&self) -> bool {
        !matches!(self, Self::Variant)
    }
}

/// Builder for the translate and polish prompts of one target language.
#[derive(Debug, Clone)]
pub struct TreePromptBuilder {
    target_language: String,
    style: PromptStyle,
    protected_terms: Vec<String>,
    custom_instructions: Option<String>,
}

impl TreePromptBuilder {
    /// `target_language` is the display name used in the prompt, e.g. "Chinese Simplified"
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            style: PromptStyle::default(),
            protected_terms: Vec::new(),
            custom_instructions: None,
        }
    }

    pub fn with_style(mut self, style: PromptStyle) -> Self {
        self.style = style;
        self
    }

    /// Terms such as brand names that must be left untranslated.
    pub fn with_protected_terms(mut self, terms: &[String]) -> Self {
        self.protected_terms = terms.to_vec();
        self
    }

    pub fn with_custom_instructions(mut self, instructions: &str) -> Self {
        self.custom_instructions = Some(instructions.to_string());
        self
    }

    /// Render the first-pass prompt for `tree`.
    pub fn build_translation(&self, tree: &Value) -> String {
        let mut rules = Vec::new();

        if !self.protected_terms.is_empty() {
            rules.push(format!(
                "Do not translate brand names and terms such as {}.",
                self.protected_terms.join(", ")
            ));
        }
        match self.style {
            PromptStyle::Standard => rules.push("Do not translate currency amounts.".to_string()),
            PromptStyle::SimilarLength => rules.push(
                "Keep every translated string close in length to the English original.".to_string(),
            ),
            PromptStyle::Variant => rules.push(
                "Keep the `prompt` fields inside `examples` arrays in English.".to_string(),
            ),
        }
        rules.extend(Self::structure_rules());
        if let Some(custom) = &self.custom_instructions {
            rules.push(custom.clone());
        }

        PromptTemplate::tree_translator().render(&self.target_language, &render_document(tree), &numbered(&rules))
    }

    /// Render the second-pass prompt for an already translated `tree`.
    pub fn build_polish(&self, tree: &Value) -> String {
        let mut rules = Vec::new();
        if !self.protected_terms.is_empty() {
            rules.push(format!("Leave {} as is.", self.protected_terms.join(", ")));
        }
        rules.extend(Self::structure_rules());

        PromptTemplate::tree_polisher().render(&self.target_language, &render_document(tree), &numbered(&rules))
    }

    fn structure_rules() -> Vec<String> {
        vec![
            "Keep the original JSON structure. Arrays must stay arrays and must never be turned into objects."
                .to_string(),
            "String values must not contain control characters. Escape every line break as \\n.".to_string(),
            "The output must be valid JSON that a strict JSON parser accepts. Add no comments or explanations."
                .to_string(),
        ]
    }
}

fn render_document(tree: &Value) -> String {
    serde_json::to_string_pretty(tree).unwrap_or_else(|_| "{}".to_string())
}

fn numbered(rules: &[String]) -> String {
    rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The document embedded between the first pair of `"""` markers of a prompt.
pub fn embedded_document(prompt: &str) -> Option<&str> {
    let start = prompt.find(DOCUMENT_DELIMITER)? + DOCUMENT_DELIMITER.len();
    let length = prompt[start..].find(DOCUMENT_DELIMITER)?;
    Some(prompt[start..start + length].trim())
}
