/*!
 * Tests for the variant content loader
 */

use anyhow::Result;
use serde_json::json;

use crate::common::TestProject;
use localesync::errors::LoaderError;
use localesync::variants::{CachePort, InMemoryCache, LoaderPaths, ToolData, VariantIndex, VariantLoader};

fn loader_for(project: &TestProject, blocked: &[&str]) -> VariantLoader {
    let mut config = project.config(&["ja"]);
    config.variants.blocked_keywords = blocked.iter().map(|k| k.to_string()).collect();
    VariantLoader::from_config(&config, project.root())
}

fn separated_project() -> Result<TestProject> {
    let project = TestProject::new()?;
    project.write_variant_index(&["ai-anime-generator", "photo-to-sketch"])?;
    project.write_json(
        "variants/ai-anime-generator/ghibli.json",
        &json!({"seo": {"title": "Ghibli"}, "placeholderText": "A girl", "content": {"header": {"title": "Ghibli Art"}, "faq": ["q"]}}),
    )?;
    project.write_json(
        "variants/ai-anime-generator/naruto.json",
        &json!({"seo": {"title": "Naruto"}, "content": {"header": {"title": "Naruto Art"}}}),
    )?;
    project.write_json(
        "variants/photo-to-sketch/pencil.json",
        &json!({"seo": {"title": "Pencil"}}),
    )?;
    Ok(project)
}

#[test]
fn test_loadVariantData_withSourceLocale_shouldReturnBaseContent() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &[]);

    assert!(loader.uses_separate_files());
    let data = loader.load_variant_data("ai-anime-generator", "ghibli", None).unwrap();
    assert_eq!(data["seo"]["title"], "Ghibli");
    assert!(loader.load_variant_data("ai-anime-generator", "missing", None).is_none());
    Ok(())
}

#[test]
fn test_loadVariantData_withTranslation_shouldOverlayIt() -> Result<()> {
    let project = separated_project()?;
    project.write_json(
        "locales/ja/variants/ai-anime-generator/ghibli.json",
        &json!({"seo": {"title": "ジブリ"}, "content": {"header": {"title": "ジブリアート"}}}),
    )?;
    let loader = loader_for(&project, &[]);

    let data = loader.load_variant_data("ai-anime-generator", "ghibli", Some("ja")).unwrap();

    assert_eq!(data["seo"]["title"], "ジブリ");
    assert_eq!(data["content"]["header"]["title"], "ジブリアート");
    // Untranslated parts come from the base file
    assert_eq!(data["content"]["faq"], json!(["q"]));
    assert_eq!(data["placeholderText"], "A girl");

    // A locale without translation falls back to the base content
    let fallback = loader.load_variant_data("ai-anime-generator", "ghibli", Some("ko")).unwrap();
    assert_eq!(fallback["seo"]["title"], "Ghibli");
    Ok(())
}

#[test]
fn test_loadVariantData_shouldBeCachedUntilCleared() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &[]);

    let first = loader.load_variant_data("photo-to-sketch", "pencil", None).unwrap();
    project.write_json("variants/photo-to-sketch/pencil.json", &json!({"seo": {"title": "Changed"}}))?;

    assert_eq!(loader.load_variant_data("photo-to-sketch", "pencil", None).unwrap(), first);

    loader.clear_cache();
    let reloaded = loader.load_variant_data("photo-to-sketch", "pencil", None).unwrap();
    assert_eq!(reloaded["seo"]["title"], "Changed");
    Ok(())
}

#[test]
fn test_loadToolData_shouldListVariantsInFileOrder() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &[]);

    let data = loader.load_tool_data("ai-anime-generator").unwrap();
    let keys: Vec<&String> = data.variants.keys().collect();
    assert_eq!(keys, vec!["ghibli", "naruto"]);
    assert_eq!(data.base_template, "ai-anime-generator");

    assert!(loader.variant_exists("ai-anime-generator", "naruto"));
    assert!(!loader.variant_exists("photo-to-sketch", "naruto"));
    assert!(loader.tool_exists("photo-to-sketch")?);
    assert!(!loader.tool_exists("unknown")?);
    Ok(())
}

#[test]
fn test_blockedKeywords_shouldHideMatchingToolsAndVariants() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &["NARUTO"]);

    assert!(loader.is_blocked("naruto-style"));
    assert!(loader.load_variant_data("ai-anime-generator", "naruto", None).is_none());
    assert_eq!(loader.get_variant_keys("ai-anime-generator"), vec!["ghibli".to_string()]);
    Ok(())
}

#[test]
fn test_staticPaths_shouldCoverEveryToolVariantAndLocale() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &[]);

    let paths = loader.static_paths(&["en".to_string(), "ja".to_string()])?;
    assert_eq!(paths.len(), 6);
    assert_eq!(paths[0].tool, "ai-anime-generator");
    assert_eq!(paths[0].variant, "ghibli");
    assert_eq!(paths[0].locale.as_deref(), Some("en"));

    let without_locale = loader.static_paths(&[])?;
    assert_eq!(without_locale.len(), 3);
    assert!(without_locale.iter().all(|p| p.locale.is_none()));
    Ok(())
}

#[test]
fn test_stats_shouldCountToolsAndVariants() -> Result<()> {
    let project = separated_project()?;
    let loader = loader_for(&project, &[]);

    let stats = loader.stats()?;
    assert_eq!(stats.tools, 2);
    assert_eq!(stats.variants, 3);
    assert!(stats.using_separate_files);
    assert_eq!(stats.cache_size, 2);
    Ok(())
}

#[test]
fn test_loadVariantIndex_withMissingIndex_shouldFail() -> Result<()> {
    let project = TestProject::new()?;
    let loader = loader_for(&project, &[]);

    assert!(matches!(loader.load_variant_index(), Err(LoaderError::IndexNotFound(_))));
    assert!(!loader.uses_separate_files());
    Ok(())
}

#[test]
fn test_loadVariantIndex_withBrokenIndex_shouldFail() -> Result<()> {
    let project = TestProject::new()?;
    crate::common::create_test_file(project.root(), "variants/index.json", "{\"tools\": [")?;
    let loader = loader_for(&project, &[]);

    assert!(matches!(loader.load_variant_index(), Err(LoaderError::IndexUnreadable(_))));
    Ok(())
}

#[test]
fn test_legacyLayout_shouldServeVariantsFromSingleFile() -> Result<()> {
    let project = TestProject::new()?;
    project.write_json(
        "variant-pages.json",
        &json!({
            "ai-anime-generator": {
                "baseTemplate": "ai-anime-generator",
                "variants": {
                    "ghibli": {"seo": {"title": "Ghibli"}},
                    "naruto": {"seo": {"title": "Naruto"}}
                }
            },
            "broken-tool": "not an object"
        }),
    )?;
    let loader = loader_for(&project, &[]);

    assert!(!loader.uses_separate_files());
    let data = loader.load_variant_data("ai-anime-generator", "naruto", None).unwrap();
    assert_eq!(data["seo"]["title"], "Naruto");

    let all = loader.load_all_tool_data()?;
    assert_eq!(all.len(), 1);
    assert_eq!(loader.get_all_tool_keys()?, vec!["ai-anime-generator".to_string()]);
    assert_eq!(loader.stats()?.variants, 2);
    Ok(())
}

#[test]
fn test_withCaches_shouldUseProvidedBackends() -> Result<()> {
    let project = separated_project()?;
    let tool_cache: InMemoryCache<ToolData> = InMemoryCache::new("tool");
    let loader = VariantLoader::with_caches(
        LoaderPaths::from_config(&project.config(&["ja"]), project.root()),
        Vec::new(),
        Box::new(InMemoryCache::<VariantIndex>::new("variant index")),
        Box::new(tool_cache.clone()),
        Box::new(InMemoryCache::<serde_json::Value>::new("variant")),
    );

    assert!(loader.load_tool_data("photo-to-sketch").is_some());
    assert!(loader.load_tool_data("photo-to-sketch").is_some());

    assert_eq!(tool_cache.len(), 1);
    assert_eq!(tool_cache.stats().hits, 1);
    Ok(())
}
