//! End-to-end pipeline tests: catalog-built tasks through the runner and a
//! mock provider, down to files on disk and the rendered summary.

use async_trait::async_trait;
use easel::error::GenerateError;
use easel::invoker::AssetInvoker;
use easel::provider::{AspectRatio, GeneratedImage, ImageProvider, ImageRequest};
use easel::runner::{TaskRunner, TaskSpec};
use easel::summary::RunSummary;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Provider that succeeds unless the prompt mentions a poisoned word.
struct ScriptedProvider {
    poison: &'static str,
}

#[async_trait]
impl ImageProvider for ScriptedProvider {
    async fn generate(&self, request: &ImageRequest) -> Result<GeneratedImage, GenerateError> {
        if request.prompt.contains(self.poison) {
            return Err(GenerateError::EmptyGeneration(
                "prompt was filtered".to_string(),
            ));
        }
        Ok(GeneratedImage {
            bytes: b"not actually a png".to_vec(),
            extension: "png",
            model: "scripted".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn task(zone: &str, item_id: &str, prompt: &str, destination: PathBuf) -> TaskSpec {
    TaskSpec {
        zone: zone.to_string(),
        item_id: item_id.to_string(),
        prompt: prompt.to_string(),
        aspect: AspectRatio::Square1x1,
        reference: None,
        destination,
    }
}

#[tokio::test]
async fn three_tasks_bound_two_with_one_failure() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("sky");

    let tasks = vec![
        task("sky", "a", "a clear prompt", dest.clone()),
        task("sky", "b", "a POISONED prompt", dest.clone()),
        task("sky", "c", "another clear prompt", dest.clone()),
    ];

    let invoker = Arc::new(AssetInvoker::new(Arc::new(ScriptedProvider {
        poison: "POISONED",
    })));
    let runner = TaskRunner::new(2);
    let results = runner.run(invoker, tasks).await;

    assert_eq!(results.len(), 3);
    let summary = RunSummary::from_results(&results);
    let text = summary.render();
    assert!(text.contains("Successful: 2/3"), "got: {}", text);
    assert!(text.contains("Failed: 1"));
    assert!(text.contains("sky/b: "));
    assert!(text.contains("prompt was filtered"));
    assert!(!summary.all_failed());

    // two real files landed under the zone directory
    let written: Vec<_> = std::fs::read_dir(&dest).unwrap().collect();
    assert_eq!(written.len(), 2);
}

#[tokio::test]
async fn results_correlate_by_key_not_position() {
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("forest");

    let tasks: Vec<TaskSpec> = (0..8)
        .map(|i| task("forest", &format!("creature-{i}"), "fine", dest.clone()))
        .collect();

    let invoker = Arc::new(AssetInvoker::new(Arc::new(ScriptedProvider {
        poison: "POISONED",
    })));
    let results = TaskRunner::new(3).run(invoker, tasks).await;

    let keys: HashSet<String> = results.iter().map(|r| r.item_id.clone()).collect();
    assert_eq!(keys.len(), 8, "every submitted task produced its own result");
    for result in &results {
        match &result.outcome {
            easel::runner::TaskOutcome::Success { output_path } => {
                let name = output_path.file_name().unwrap().to_str().unwrap();
                assert!(
                    name.starts_with(&format!("{}-", result.item_id)),
                    "output file {} should carry its task's stem",
                    name
                );
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }
}

#[tokio::test]
async fn empty_selection_produces_empty_summary() {
    let invoker = Arc::new(AssetInvoker::new(Arc::new(ScriptedProvider {
        poison: "POISONED",
    })));
    let results = TaskRunner::new(4).run(invoker, vec![]).await;
    let summary = RunSummary::from_results(&results);
    assert!(summary.render().contains("Successful: 0/0"));
}
