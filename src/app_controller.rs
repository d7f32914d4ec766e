use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use serde_json::{Map, Value};
use std::fmt::Display;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::SyncError;
use crate::file_utils::FileManager;
use crate::providers::{Provider, ProviderClient};
use crate::translation::{PromptStyle, TranslationService};
use crate::tree::{ExcludedKeys, ExtractedKeys, find_differences, find_missing, is_empty_diff, merge_changes};
use crate::variants::{LoaderStats, StaticPath, VariantLoader, loader::INDEX_FILE};
use crate::vcs::{GitRevisionProvider, PreviousRevisionProvider};

// @module: Application controller for locale synchronization

/// File the per-file failures of a run are appended to, under the project root
pub const ISSUES_LOG_FILE: &str = "localesync.issues.log";

/// Outcome counters of one pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Target files written
    pub written: usize,
    /// Files or languages left alone (up to date, already translated)
    pub skipped: usize,
    /// File/language pairs that failed
    pub failures: usize,
    /// One line per failure
    pub issues: Vec<String>,
}

impl RunReport {
    fn record_failure(&mut self, context: impl Display, error: impl Display) {
        error!("{}: {}", context, error);
        self.failures += 1;
        self.issues.push(format!("{}: {}", context, error));
    }

    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

/// Scope of a variant update run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantUpdateOptions {
    /// Only this tool
    pub tool: Option<String>,
    /// Only this variant
    pub variant: Option<String>,
    /// A single variant file; tool and variant are derived from it when unset
    pub path: Option<PathBuf>,
    /// Retranslate the whole content instead of the diff
    pub force: bool,
}

impl VariantUpdateOptions {
    /// Fill `tool` and `variant` from `path` (`.../variants/<tool>/<variant>.json`)
    pub fn with_derived_names(mut self) -> Self {
        if let Some((tool, variant)) = self.path.as_deref().and_then(tool_and_variant_from_path) {
            self.tool.get_or_insert(tool);
            self.variant.get_or_insert(variant);
        }
        self
    }

    fn matches(&self, tool: &str, variant: &str) -> bool {
        self.tool.as_deref().is_none_or(|t| t == tool) && self.variant.as_deref().is_none_or(|v| v == variant)
    }
}

/// `(tool, variant)` of a path of the form `.../variants/<tool>/<variant>.json`
pub fn tool_and_variant_from_path(path: &Path) -> Option<(String, String)> {
    let parts: Vec<&str> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let variants_idx = parts.iter().rposition(|p| *p == "variants")?;
    let tool = parts.get(variants_idx + 1)?;
    let file = parts.get(variants_idx + 2)?;
    let variant = Path::new(file).file_stem()?.to_str()?;
    Some((tool.to_string(), variant.to_string()))
}

/// Main application controller for locale synchronization
pub struct Controller<P: Provider = ProviderClient> {
    // @field: App configuration
    config: Config,

    // @field: Project root the configured paths are relative to
    root: PathBuf,

    // @field: Translation service
    translator: TranslationService<P>,

    // @field: Source of previous file revisions
    revisions: Box<dyn PreviousRevisionProvider>,

    // @field: Languages the pipelines write
    languages: Vec<String>,
}

impl Controller<ProviderClient> {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let translator =
            TranslationService::from_config(&config.translation).context("Failed to create translation service")?;
        let revisions = Box::new(GitRevisionProvider::new(&root));
        Ok(Self::build(config, root, translator, revisions))
    }
}

impl<P: Provider> Controller<P> {
    /// Controller over an explicit provider
    pub fn with_provider(config: Config, root: impl Into<PathBuf>, provider: P) -> Self {
        let root = root.into();
        let options = crate::translation::TranslationOptions::from_common(&config.translation.common);
        let translator = TranslationService::with_options(provider, options);
        let revisions = Box::new(GitRevisionProvider::new(&root));
        Self::build(config, root, translator, revisions)
    }

    fn build(
        config: Config,
        root: PathBuf,
        translator: TranslationService<P>,
        revisions: Box<dyn PreviousRevisionProvider>,
    ) -> Self {
        let languages = config.target_languages.clone();
        Self {
            config,
            root,
            translator,
            revisions,
            languages,
        }
    }

    /// Replace the git-backed revision provider
    pub fn with_revisions(mut self, revisions: Box<dyn PreviousRevisionProvider>) -> Self {
        self.revisions = revisions;
        self
    }

    /// Restrict the run to these languages instead of the configured ones
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        if !languages.is_empty() {
            self.languages = languages;
        }
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn target_languages(&self) -> &[String] {
        &self.languages
    }

    pub fn translator(&self) -> &TranslationService<P> {
        &self.translator
    }

    /// Check that the provider answers
    pub async fn test_connection(&self) -> Result<()> {
        self.translator
            .test_connection()
            .await
            .context("Provider connection test failed")
    }

    fn locales_dir(&self) -> PathBuf {
        self.config.resolve(&self.root, &self.config.paths.locales_dir)
    }

    fn source_dir(&self) -> PathBuf {
        self.locales_dir().join(&self.config.source_language)
    }

    /// Path of the `language` counterpart of a source-locale file
    fn target_path(&self, language: &str, source_file: &Path) -> PathBuf {
        let relative = source_file
            .strip_prefix(self.source_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source_file.file_name().map(PathBuf::from).unwrap_or_default());
        self.locales_dir().join(language).join(relative)
    }

    /// A source file named on the command line, with `.json` added when missing
    fn named_source_file(&self, name: &str) -> PathBuf {
        let file_name = if name.ends_with(".json") { name.to_string() } else { format!("{}.json", name) };
        self.source_dir().join(file_name)
    }

    fn source_files(&self) -> Result<Vec<PathBuf>> {
        let source_dir = self.source_dir();
        if !FileManager::dir_exists(&source_dir) {
            return Err(anyhow!("Source locale directory not found: {:?}", source_dir));
        }
        FileManager::list_files(&source_dir, "json")
            .with_context(|| format!("Failed to list source files in {:?}", source_dir))
    }

    /// Pathspec of a configured location, relative to the root, with forward slashes
    fn pathspec(&self, relative: &Path, pattern: Option<&str>) -> String {
        let base = relative.to_string_lossy().replace('\\', "/");
        let base = base.trim_end_matches('/');
        match pattern {
            Some(pattern) => format!("{}/{}", base, pattern),
            None => base.to_string(),
        }
    }

    pub fn variant_loader(&self) -> VariantLoader {
        VariantLoader::from_config(&self.config, &self.root)
    }

    /// An existing target tree, or `{}` when it is missing or unreadable
    fn read_target_or_empty(&self, path: &Path) -> Value {
        match FileManager::read_target_json(path) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("{}; treating it as empty", e);
                Value::Object(Map::new())
            }
        }
    }

    /// Translate `diff`, merge it into the target file and write it back
    async fn translate_into(
        &self,
        diff: &Value,
        target_path: &Path,
        language: &str,
        style: PromptStyle,
        extracted: Option<&ExtractedKeys>,
    ) -> Result<(), SyncError> {
        let existing = self.read_target_or_empty(target_path);
        let translated = self.translator.translate_tree(diff, language, style).await?;
        let merged = merge_changes(&existing, &translated);
        let merged = match extracted {
            Some(extracted) => extracted.restore(&merged),
            None => merged,
        };
        FileManager::write_json(target_path, &merged)?;
        Ok(())
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    fn announce(&self, pipeline: &str) {
        info!(
            "localesync {}: {} - {} ({} languages)",
            pipeline,
            self.translator.provider().name(),
            self.translator.provider().model(),
            self.languages.len()
        );
    }

    /// Log the summary of a run and keep its issues in the issues log
    fn finish(&self, pipeline: &str, report: &RunReport, start_time: Instant) {
        info!(
            "{} completed in {}: {} written, {} skipped, {} failed",
            pipeline,
            Self::format_duration(start_time.elapsed()),
            report.written,
            report.skipped,
            report.failures
        );

        if report.issues.is_empty() {
            return;
        }

        let log_file_path = self.root.join(ISSUES_LOG_FILE);
        let context = format!(
            "{} - {} - {} ({} issues)",
            pipeline,
            self.translator.provider().name(),
            self.translator.provider().model(),
            report.issues.len()
        );
        let mut content = context;
        for issue in &report.issues {
            content.push_str("\n  ");
            content.push_str(issue);
        }
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &content) {
            warn!("Failed to write issues log: {}", e);
        }
    }

    // @returns: Human-readable duration
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Translate every source file into every language that does not have it yet.
    pub async fn run_translate_missing(&self) -> Result<RunReport> {
        let start_time = Instant::now();
        let files = self.source_files()?;
        info!("Found {} JSON files to translate", files.len());
        self.announce("translate");

        let mut report = RunReport::default();
        let progress_bar = self.progress_bar((files.len() * self.languages.len()) as u64);

        for language in &self.languages {
            debug!("Processing translations for language: {}", language);

            for file in &files {
                progress_bar.inc(1);
                let target_path = self.target_path(language, file);
                if target_path.exists() {
                    debug!("{:?} already exists in {}, skipping", target_path.file_name(), language);
                    report.skipped += 1;
                    continue;
                }

                progress_bar.set_message(format!("{} {:?}", language, file.file_name().unwrap_or_default()));
                let result = async {
                    let source = FileManager::read_source_json(file)?;
                    let translated = self
                        .translator
                        .translate_tree(&source, language, PromptStyle::SimilarLength)
                        .await?;
                    FileManager::write_json(&target_path, &translated)
                }
                .await;

                match result {
                    Ok(()) => {
                        info!("Saved {:?}", target_path);
                        report.written += 1;
                    }
                    Err(e) => report.record_failure(format!("{:?} ({})", file, language), e),
                }
            }
        }

        progress_bar.finish_and_clear();
        self.finish("translate", &report, start_time);
        Ok(report)
    }

    /// Resync the target files of changed source files.
    ///
    /// Without `force`, changed files come from the revision provider and each
    /// is diffed against its previous revision. With `force`, every source
    /// file (or the one named by `file`) is retranslated in full.
    pub async fn run_update(&self, force: bool, file: Option<&str>) -> Result<RunReport> {
        let start_time = Instant::now();

        let changed_files = match (force, file) {
            (_, Some(name)) => vec![self.named_source_file(name)],
            (true, None) => self.source_files()?,
            (false, None) => {
                let relative = self.config.paths.locales_dir.join(&self.config.source_language);
                let pathspec = self.pathspec(&relative, Some("*.json"));
                let source_dir = self.source_dir();
                self.revisions
                    .changed_files(&pathspec)
                    .into_iter()
                    .filter(|p| p.starts_with(&source_dir) && p.extension().is_some_and(|e| e == "json"))
                    .collect()
            }
        };

        let mut report = RunReport::default();
        if changed_files.is_empty() {
            info!("No changed JSON files found in {:?}", self.source_dir());
            return Ok(report);
        }

        info!("Found {} JSON files to process:", changed_files.len());
        for file in &changed_files {
            info!("  - {:?}", file);
        }
        self.announce("update");

        let progress_bar = self.progress_bar((changed_files.len() * self.languages.len()) as u64);

        for file in &changed_files {
            let source = match FileManager::read_source_json(file) {
                Ok(source) => source,
                Err(e) => {
                    progress_bar.inc(self.languages.len() as u64);
                    report.record_failure(format!("{:?}", file), e);
                    continue;
                }
            };

            let differences = if force {
                source
            } else {
                let previous = self
                    .revisions
                    .previous_version(file)
                    .unwrap_or_else(|| Value::Object(Map::new()));
                find_differences(&previous, &source)
            };

            if is_empty_diff(&differences) {
                info!("No changes detected in {:?}, skipping", file);
                progress_bar.inc(self.languages.len() as u64);
                report.skipped += 1;
                continue;
            }
            debug!("Found changes in {:?}: {}", file, differences);

            for language in &self.languages {
                progress_bar.inc(1);
                progress_bar.set_message(format!("{} {:?}", language, file.file_name().unwrap_or_default()));
                let target_path = self.target_path(language, file);

                match self
                    .translate_into(&differences, &target_path, language, PromptStyle::Standard, None)
                    .await
                {
                    Ok(()) => {
                        info!("Updated {:?}", target_path);
                        report.written += 1;
                    }
                    Err(e) => report.record_failure(format!("{:?} ({})", file, language), e),
                }
            }
        }

        progress_bar.finish_and_clear();
        self.finish("update", &report, start_time);
        Ok(report)
    }

    /// Translate the keys each target file is missing relative to its source file.
    pub async fn run_fix(&self, file: Option<&str>) -> Result<RunReport> {
        let start_time = Instant::now();

        let files = match file {
            Some(name) => {
                let path = self.named_source_file(name);
                if !FileManager::file_exists(&path) {
                    return Err(anyhow!("File not found: {:?}", path));
                }
                vec![path]
            }
            None => self.source_files()?,
        };
        info!("Found {} source JSON files to check", files.len());
        self.announce("fix");

        let mut report = RunReport::default();
        let progress_bar = self.progress_bar((files.len() * self.languages.len()) as u64);

        for file in &files {
            let source = match FileManager::read_source_json(file) {
                Ok(source) => source,
                Err(e) => {
                    progress_bar.inc(self.languages.len() as u64);
                    report.record_failure(format!("{:?}", file), e);
                    continue;
                }
            };

            for language in &self.languages {
                progress_bar.inc(1);
                let target_path = self.target_path(language, file);
                let existing = self.read_target_or_empty(&target_path);
                let missing = find_missing(&source, &existing);

                if is_empty_diff(&missing) {
                    debug!("{}: no missing translations in {:?}", language, target_path);
                    report.skipped += 1;
                    continue;
                }

                info!(
                    "{}: found {} missing keys in {:?}, translating",
                    language,
                    missing.as_object().map_or(0, Map::len),
                    target_path.file_name().unwrap_or_default()
                );
                progress_bar.set_message(format!("{} {:?}", language, file.file_name().unwrap_or_default()));

                match self
                    .translate_into(&missing, &target_path, language, PromptStyle::Standard, None)
                    .await
                {
                    Ok(()) => report.written += 1,
                    Err(e) => report.record_failure(format!("{:?} ({})", file, language), e),
                }
            }
        }

        progress_bar.finish_and_clear();
        self.finish("fix", &report, start_time);
        Ok(report)
    }

    /// Resync variant translations from changed variant content.
    ///
    /// Excluded keys are withheld from the provider and copied verbatim from
    /// the source into every target file.
    pub async fn run_variants_update(&self, options: &VariantUpdateOptions) -> Result<RunReport> {
        let start_time = Instant::now();
        let options = options.clone().with_derived_names();
        let loader = self.variant_loader();
        let excluded = ExcludedKeys::new(self.config.variants.excluded_keys.iter().cloned());

        let mut report = RunReport::default();
        if loader.uses_separate_files() {
            let files = self.changed_variant_files(&loader, &options)?;
            if files.is_empty() {
                info!("No changed JSON files found in {:?}", loader.paths().variants_dir);
                return Ok(report);
            }

            info!("Found {} changed variant file(s) to process", files.len());
            self.announce("variants");

            for file in &files {
                let Some((tool, variant)) = self.tool_and_variant(&loader, file) else {
                    warn!("Cannot tell tool and variant of {:?}, skipping", file);
                    continue;
                };

                let source = match FileManager::read_source_json(file) {
                    Ok(source) => source,
                    Err(e) => {
                        report.record_failure(format!("{}/{}", tool, variant), e);
                        continue;
                    }
                };
                let previous = if options.force { None } else { self.revisions.previous_version(file) };

                self.update_variant(
                    &loader,
                    &excluded,
                    &tool,
                    &variant,
                    &source,
                    previous.as_ref(),
                    options.force,
                    &mut report,
                )
                .await;
            }
        } else {
            let legacy_file = loader.paths().legacy_file.clone();
            let legacy_changed = options.force
                || options.path.is_some()
                || !self
                    .revisions
                    .changed_files(&self.pathspec(&self.config.paths.legacy_variants_file, None))
                    .is_empty();
            if !legacy_changed {
                info!("No changes detected in {:?}", legacy_file);
                return Ok(report);
            }

            info!("Processing legacy file {:?}", legacy_file);
            self.announce("variants");

            let current = FileManager::read_source_json(&legacy_file)
                .with_context(|| format!("Failed to read {:?}", legacy_file))?;
            let previous = self.revisions.previous_version(&legacy_file).unwrap_or(Value::Null);

            let Some(tools) = current.as_object() else {
                return Err(anyhow!("{:?} is not a JSON object", legacy_file));
            };
            for (tool, tool_data) in tools {
                let Some(variants) = tool_data.get("variants").and_then(Value::as_object) else {
                    continue;
                };
                for (variant, variant_data) in variants {
                    if !options.matches(tool, variant) {
                        continue;
                    }
                    let previous_variant = previous
                        .get(tool)
                        .and_then(|t| t.get("variants"))
                        .and_then(|v| v.get(variant))
                        .map(variant_content);
                    let previous_variant = if options.force { None } else { previous_variant };

                    self.update_variant(
                        &loader,
                        &excluded,
                        tool,
                        variant,
                        variant_content(variant_data),
                        previous_variant,
                        options.force,
                        &mut report,
                    )
                    .await;
                }
            }
        }

        self.finish("variants", &report, start_time);
        Ok(report)
    }

    /// Diff one variant, then translate and merge it for every language
    #[allow(clippy::too_many_arguments)]
    async fn update_variant(
        &self,
        loader: &VariantLoader,
        excluded: &ExcludedKeys,
        tool: &str,
        variant: &str,
        source: &Value,
        previous: Option<&Value>,
        force: bool,
        report: &mut RunReport,
    ) {
        let (processed, extracted) = excluded.extract(source);
        let differences = if force {
            processed
        } else {
            let (previous_processed, _) = excluded.extract(previous.unwrap_or(&Value::Null));
            find_differences(&previous_processed, &processed)
        };

        if is_empty_diff(&differences) {
            if self.refresh_excluded(loader, tool, variant, &extracted, report) == 0 {
                info!("No changes detected for {}/{}, skipping", tool, variant);
                report.skipped += 1;
            }
            return;
        }
        debug!("Found changes in {}/{}: {}", tool, variant, differences);

        for language in &self.languages {
            info!("Updating translations for {}/{} in {}", tool, variant, language);
            let target_path = loader.translation_file_path(language, tool, variant);

            match self
                .translate_into(&differences, &target_path, language, PromptStyle::Variant, Some(&extracted))
                .await
            {
                Ok(()) => report.written += 1,
                Err(e) => report.record_failure(format!("{}/{} ({})", tool, variant, language), e),
            }
        }
    }

    /// Copy the current excluded values into existing target files that
    /// differ from them. Returns the number of files written.
    fn refresh_excluded(
        &self,
        loader: &VariantLoader,
        tool: &str,
        variant: &str,
        extracted: &ExtractedKeys,
        report: &mut RunReport,
    ) -> usize {
        if extracted.is_empty() {
            return 0;
        }

        let mut written = 0;
        for language in &self.languages {
            let target_path = loader.translation_file_path(language, tool, variant);
            if !target_path.exists() {
                continue;
            }
            let existing = match FileManager::read_target_json(&target_path) {
                Ok(existing) => existing,
                Err(e) => {
                    report.record_failure(format!("{}/{} ({})", tool, variant, language), e);
                    continue;
                }
            };

            let restored = extracted.restore(&existing);
            if restored == existing {
                continue;
            }
            match FileManager::write_json(&target_path, &restored) {
                Ok(()) => {
                    info!("Refreshed excluded keys of {}/{} in {}", tool, variant, language);
                    report.written += 1;
                    written += 1;
                }
                Err(e) => report.record_failure(format!("{}/{} ({})", tool, variant, language), e),
            }
        }
        written
    }

    /// Variant files to process in the separated layout
    fn changed_variant_files(&self, loader: &VariantLoader, options: &VariantUpdateOptions) -> Result<Vec<PathBuf>> {
        if let Some(path) = &options.path {
            return Ok(vec![self.config.resolve(&self.root, path)]);
        }

        let variants_dir = loader.paths().variants_dir.clone();
        let candidates = if options.force {
            FileManager::find_files(&variants_dir, "json")
                .with_context(|| format!("Failed to list variant files in {:?}", variants_dir))?
        } else {
            let pathspec = self.pathspec(&self.config.paths.variants_dir, Some("**/*.json"));
            self.revisions.changed_files(&pathspec)
        };

        Ok(candidates
            .into_iter()
            .filter(|p| p.starts_with(&variants_dir) && p.extension().is_some_and(|e| e == "json"))
            .filter(|p| p.file_name().is_none_or(|name| name != INDEX_FILE))
            .filter(|p| {
                self.tool_and_variant(loader, p)
                    .is_some_and(|(tool, variant)| options.matches(&tool, &variant))
            })
            .collect())
    }

    /// Tool and variant of a file under the variants directory
    fn tool_and_variant(&self, loader: &VariantLoader, path: &Path) -> Option<(String, String)> {
        if let Ok(relative) = path.strip_prefix(&loader.paths().variants_dir) {
            let mut parts = relative.components();
            if let (Some(tool), Some(file), None) = (parts.next(), parts.next(), parts.next()) {
                let variant = Path::new(file.as_os_str()).file_stem()?.to_str()?;
                return Some((tool.as_os_str().to_str()?.to_string(), variant.to_string()));
            }
        }
        tool_and_variant_from_path(path)
    }

    /// Translate every variant into every language that does not have it yet.
    pub async fn run_variants_translate_all(&self) -> Result<RunReport> {
        let start_time = Instant::now();
        let loader = self.variant_loader();
        let excluded = ExcludedKeys::new(self.config.variants.excluded_keys.iter().cloned());

        let tools = loader.load_all_tool_data().context("Failed to load variant data")?;
        let total: usize = tools.iter().map(|(_, data)| data.variants.len()).sum();
        self.announce("variants --all");

        let mut report = RunReport::default();
        let progress_bar = self.progress_bar((total * self.languages.len()) as u64);

        for (tool, data) in &tools {
            for (variant, content) in &data.variants {
                let (processed, extracted) = excluded.extract(content);

                for language in &self.languages {
                    progress_bar.inc(1);
                    let target_path = loader.translation_file_path(language, tool, variant);
                    if target_path.exists() {
                        debug!("{}/{}.json already exists in {}, skipping", tool, variant, language);
                        report.skipped += 1;
                        continue;
                    }

                    progress_bar.set_message(format!("{} {}/{}", language, tool, variant));
                    let result = async {
                        let translated = self
                            .translator
                            .translate_tree(&processed, language, PromptStyle::SimilarLength)
                            .await?;
                        FileManager::write_json(&target_path, &extracted.restore(&translated))
                    }
                    .await;

                    match result {
                        Ok(()) => {
                            info!("Saved {:?}", target_path);
                            report.written += 1;
                        }
                        Err(e) => report.record_failure(format!("{}/{} ({})", tool, variant, language), e),
                    }
                }
            }
        }

        progress_bar.finish_and_clear();
        self.finish("variants --all", &report, start_time);
        Ok(report)
    }

    /// Static page paths of every tool, variant and locale
    pub fn static_paths(&self) -> Result<Vec<StaticPath>> {
        let mut locales = vec![self.config.source_language.clone()];
        locales.extend(self.languages.iter().cloned());
        Ok(self.variant_loader().static_paths(&locales)?)
    }

    /// Statistics of the variant content
    pub fn loader_stats(&self) -> Result<LoaderStats> {
        Ok(self.variant_loader().stats()?)
    }
}

/// The translatable part of a legacy variant entry: its `content` when present
fn variant_content(variant: &Value) -> &Value {
    match variant.get("content") {
        Some(content) if !content.is_null() => content,
        _ => variant,
    }
}
