/*!
 * End-to-end tests of the variant content pipelines
 */

use anyhow::Result;
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::common::{InMemoryRevisions, TestProject};
use localesync::app_controller::{Controller, VariantUpdateOptions};
use localesync::providers::mock::MockProvider;

const TAG: &str = "[T] ";
const GHIBLI: &str = "variants/ai-anime-generator/ghibli.json";

fn ghibli_current() -> Value {
    json!({
        "seo": {"title": "Ghibli Style Generator", "description": "Turn photos into Ghibli art"},
        "placeholderText": "Describe your scene",
        "content": {
            "header": {"title": "Ghibli Art"},
            "examples": [{"prompt": "a cat on a roof", "defaultStyle": "ghibli-soft"}],
            "xposts": ["https://x.com/post/1"]
        }
    })
}

fn ghibli_previous() -> Value {
    json!({
        "seo": {"title": "Ghibli Generator", "description": "Turn photos into Ghibli art"},
        "placeholderText": "Old placeholder",
        "content": {
            "header": {"title": "Ghibli Art"},
            "examples": [{"prompt": "a cat on a roof", "defaultStyle": "ghibli"}],
            "xposts": []
        }
    })
}

/// Separated layout with two tools and an existing Japanese translation of ghibli
fn separated_project() -> Result<TestProject> {
    let project = TestProject::new()?;
    project.write_variant_index(&["ai-anime-generator", "photo-to-sketch"])?;
    project.write_json(GHIBLI, &ghibli_current())?;
    project.write_json(
        "variants/ai-anime-generator/naruto.json",
        &json!({"seo": {"title": "Naruto Generator"}, "placeholderText": "A ninja"}),
    )?;
    project.write_json("variants/photo-to-sketch/pencil.json", &json!({"seo": {"title": "Pencil Sketch"}}))?;
    project.write_json(
        "locales/ja/variants/ai-anime-generator/ghibli.json",
        &json!({
            "seo": {"title": "ジブリジェネレーター", "description": "写真をジブリ風に"},
            "placeholderText": "古いプレースホルダー",
            "content": {"header": {"title": "ジブリアート"}, "examples": [{"prompt": "a cat on a roof"}]}
        }),
    )?;
    Ok(project)
}

fn controller(project: &TestProject, provider: MockProvider, revisions: InMemoryRevisions) -> Controller<MockProvider> {
    Controller::with_provider(project.config(&["ja"]), project.root(), provider).with_revisions(Box::new(revisions))
}

#[tokio::test]
async fn test_variantsUpdate_shouldTranslateDiffAndKeepExcludedKeysVerbatim() -> Result<()> {
    let project = separated_project()?;
    let revisions = InMemoryRevisions::new()
        .with_previous(project.path(GHIBLI), ghibli_previous())
        .with_changed(project.path(GHIBLI))
        .with_changed(project.path("variants/index.json"));
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), revisions)
        .run_variants_update(&VariantUpdateOptions::default())
        .await?;

    assert_eq!(report.written, 1);
    assert!(report.is_clean());

    let translated = project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?;
    assert_eq!(translated["seo"]["title"], "[T] Ghibli Style Generator");
    assert_eq!(translated["seo"]["description"], "写真をジブリ風に");
    assert_eq!(translated["content"]["header"]["title"], "ジブリアート");
    // Excluded keys are copied from the source, never translated
    assert_eq!(translated["placeholderText"], "Describe your scene");
    assert_eq!(translated["content"]["examples"][0]["defaultStyle"], "ghibli-soft");
    assert_eq!(translated["content"]["xposts"], json!(["https://x.com/post/1"]));

    // Variant updates get a single pass and never see excluded values
    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Ghibli Style Generator"));
    assert!(!prompts[0].contains("Describe your scene"));
    assert!(!prompts[0].contains("ghibli-soft"));
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withOnlyExcludedChanges_shouldCopyThemWithoutTranslating() -> Result<()> {
    let project = separated_project()?;
    let mut previous = ghibli_current();
    previous["placeholderText"] = json!("Something else entirely");
    let revisions = InMemoryRevisions::new()
        .with_previous(project.path(GHIBLI), previous)
        .with_changed(project.path(GHIBLI));
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), revisions)
        .run_variants_update(&VariantUpdateOptions::default())
        .await?;

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(provider.request_count(), 0);

    let translated = project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?;
    assert_eq!(translated["placeholderText"], "Describe your scene");
    assert_eq!(translated["content"]["examples"][0]["defaultStyle"], "ghibli-soft");
    // Translated text is left as it was
    assert_eq!(translated["seo"]["title"], "ジブリジェネレーター");
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withExcludedKeysAlreadyCurrent_shouldSkipVariant() -> Result<()> {
    let project = separated_project()?;
    project.write_json(
        "locales/ja/variants/ai-anime-generator/naruto.json",
        &json!({"seo": {"title": "ナルトジェネレーター"}, "placeholderText": "A ninja"}),
    )?;
    let naruto = "variants/ai-anime-generator/naruto.json";
    let revisions = InMemoryRevisions::new()
        .with_previous(
            project.path(naruto),
            json!({"seo": {"title": "Naruto Generator"}, "placeholderText": "A samurai"}),
        )
        .with_changed(project.path(naruto));
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), revisions)
        .run_variants_update(&VariantUpdateOptions::default())
        .await?;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.written, 0);
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withToolFilter_shouldIgnoreOtherTools() -> Result<()> {
    let project = separated_project()?;
    let revisions = InMemoryRevisions::new()
        .with_changed(project.path(GHIBLI))
        .with_changed(project.path("variants/photo-to-sketch/pencil.json"));
    let provider = MockProvider::tagging(TAG);

    let options = VariantUpdateOptions {
        tool: Some("photo-to-sketch".to_string()),
        ..VariantUpdateOptions::default()
    };
    let report = controller(&project, provider.clone(), revisions)
        .run_variants_update(&options)
        .await?;

    assert_eq!(report.written, 1);
    assert_eq!(
        project.read_json("locales/ja/variants/photo-to-sketch/pencil.json")?,
        json!({"seo": {"title": "[T] Pencil Sketch"}})
    );
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withPath_shouldDeriveToolAndVariant() -> Result<()> {
    let project = separated_project()?;
    let revisions = InMemoryRevisions::new().with_previous(project.path(GHIBLI), ghibli_previous());

    let options = VariantUpdateOptions {
        path: Some(PathBuf::from(GHIBLI)),
        ..VariantUpdateOptions::default()
    };
    let report = controller(&project, MockProvider::tagging(TAG), revisions)
        .run_variants_update(&options)
        .await?;

    assert_eq!(report.written, 1);
    let translated = project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?;
    assert_eq!(translated["seo"]["title"], "[T] Ghibli Style Generator");
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withForce_shouldRetranslateEveryVariant() -> Result<()> {
    let project = separated_project()?;
    let provider = MockProvider::tagging(TAG);

    let options = VariantUpdateOptions {
        force: true,
        ..VariantUpdateOptions::default()
    };
    let report = controller(&project, provider.clone(), InMemoryRevisions::new())
        .run_variants_update(&options)
        .await?;

    assert_eq!(report.written, 3);
    assert_eq!(provider.request_count(), 3);

    let ghibli = project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?;
    assert_eq!(ghibli["seo"]["description"], "[T] Turn photos into Ghibli art");
    assert_eq!(ghibli["content"]["examples"][0]["prompt"], "[T] a cat on a roof");
    assert_eq!(ghibli["content"]["examples"][0]["defaultStyle"], "ghibli-soft");

    let naruto = project.read_json("locales/ja/variants/ai-anime-generator/naruto.json")?;
    assert_eq!(naruto, json!({"seo": {"title": "[T] Naruto Generator"}, "placeholderText": "A ninja"}));
    assert!(!project.exists("locales/ja/variants/index.json"));
    Ok(())
}

#[tokio::test]
async fn test_variantsUpdate_withFailingLanguage_shouldRecordFailure() -> Result<()> {
    let project = separated_project()?;
    let revisions = InMemoryRevisions::new().with_changed(project.path("variants/photo-to-sketch/pencil.json"));
    let provider = MockProvider::tagging(TAG).with_failure_on("Japanese");

    let controller = Controller::with_provider(project.config(&["ja", "fr"]), project.root(), provider)
        .with_revisions(Box::new(revisions));
    let report = controller.run_variants_update(&VariantUpdateOptions::default()).await?;

    assert_eq!(report.written, 1);
    assert_eq!(report.failures, 1);
    assert!(report.issues[0].contains("photo-to-sketch/pencil (ja)"));
    assert!(project.exists("locales/fr/variants/photo-to-sketch/pencil.json"));
    Ok(())
}

#[tokio::test]
async fn test_variantsTranslateAll_shouldOnlyFillMissingTargets() -> Result<()> {
    let project = separated_project()?;
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), InMemoryRevisions::new())
        .run_variants_translate_all()
        .await?;

    assert_eq!(report.written, 2);
    assert_eq!(report.skipped, 1);
    // Translate and polish per written file
    assert_eq!(provider.request_count(), 4);

    assert_eq!(
        project.read_json("locales/ja/variants/ai-anime-generator/naruto.json")?,
        json!({"seo": {"title": "[T] Naruto Generator"}, "placeholderText": "A ninja"})
    );
    // The existing translation is left alone
    let ghibli = project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?;
    assert_eq!(ghibli["placeholderText"], "古いプレースホルダー");
    Ok(())
}

#[tokio::test]
async fn test_legacyLayout_shouldUpdateVariantContent() -> Result<()> {
    let project = TestProject::new()?;
    let legacy = project.write_json(
        "variant-pages.json",
        &json!({
            "ai-anime-generator": {
                "baseTemplate": "ai-anime-generator",
                "variants": {
                    "ghibli": {
                        "seo": {"title": "SEO is not translated here"},
                        "content": {"header": {"title": "New title"}, "placeholderText": "A girl"}
                    },
                    "naruto": {"header": {"title": "Naruto"}}
                }
            }
        }),
    )?;
    let revisions = InMemoryRevisions::new()
        .with_previous(
            legacy.clone(),
            json!({
                "ai-anime-generator": {
                    "variants": {
                        "ghibli": {"content": {"header": {"title": "Old title"}, "placeholderText": "A boy"}},
                        "naruto": {"header": {"title": "Naruto"}}
                    }
                }
            }),
        )
        .with_changed(legacy);
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), revisions)
        .run_variants_update(&VariantUpdateOptions::default())
        .await?;

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(
        project.read_json("locales/ja/variants/ai-anime-generator/ghibli.json")?,
        json!({"header": {"title": "[T] New title"}, "placeholderText": "A girl"})
    );
    assert!(!project.exists("locales/ja/variants/ai-anime-generator/naruto.json"));
    Ok(())
}

#[tokio::test]
async fn test_legacyLayout_withoutChanges_shouldDoNothing() -> Result<()> {
    let project = TestProject::new()?;
    project.write_json("variant-pages.json", &json!({"tool": {"variants": {"v": {"a": "b"}}}}))?;
    let provider = MockProvider::tagging(TAG);

    let report = controller(&project, provider.clone(), InMemoryRevisions::new())
        .run_variants_update(&VariantUpdateOptions::default())
        .await?;

    assert_eq!(report, Default::default());
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

#[test]
fn test_staticPaths_shouldIncludeSourceAndTargetLocales() -> Result<()> {
    let project = separated_project()?;
    let controller = controller(&project, MockProvider::working(), InMemoryRevisions::new());

    let paths = controller.static_paths()?;
    assert_eq!(paths.len(), 6);
    assert!(paths.iter().any(|p| p.locale.as_deref() == Some("en") && p.variant == "pencil"));
    assert!(paths.iter().any(|p| p.locale.as_deref() == Some("ja") && p.variant == "naruto"));

    let stats = controller.loader_stats()?;
    assert_eq!((stats.tools, stats.variants), (2, 3));
    Ok(())
}
