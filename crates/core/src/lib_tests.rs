use super::*;
use async_trait::async_trait;
use base64::Engine;
use label_gate_developer_platforms::errors::Error;
use label_gate_developer_platforms::github::decode_base64_content;
use label_gate_developer_platforms::models::Label;
use std::sync::{Arc, Mutex};
use tokio::test;

// Mock provider serving canned labels and config content.
#[derive(Debug)]
struct MockProvider {
    labels: Arc<Mutex<Vec<Label>>>,
    config: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    fn new(label_names: &[&str], config: Option<&str>) -> Self {
        let labels = label_names
            .iter()
            .map(|name| Label {
                name: name.to_string(),
            })
            .collect();
        Self {
            labels: Arc::new(Mutex::new(labels)),
            config: Arc::new(Mutex::new(config.map(|c| c.to_string()))),
        }
    }
}

#[async_trait]
impl PullRequestProvider for MockProvider {
    async fn list_labels(
        &self,
        _context: &RunContext,
        _pr_number: u64,
    ) -> Result<Vec<Label>, Error> {
        let labels = self.labels.lock().unwrap();
        Ok(labels.clone())
    }
}

#[async_trait]
impl ConfigFetcher for MockProvider {
    async fn fetch_config(
        &self,
        _context: &RunContext,
        _path: &str,
    ) -> Result<Option<String>, Error> {
        let config = self.config.lock().unwrap();
        Ok(config.clone())
    }
}

// Mock provider whose label listing fails.
#[derive(Debug)]
struct FailingLabelsProvider;

#[async_trait]
impl PullRequestProvider for FailingLabelsProvider {
    async fn list_labels(
        &self,
        _context: &RunContext,
        _pr_number: u64,
    ) -> Result<Vec<Label>, Error> {
        Err(Error::ApiError())
    }
}

#[async_trait]
impl ConfigFetcher for FailingLabelsProvider {
    async fn fetch_config(
        &self,
        _context: &RunContext,
        _path: &str,
    ) -> Result<Option<String>, Error> {
        unimplemented!("Not needed for this test")
    }
}

// Mock provider whose config fetch fails.
#[derive(Debug)]
struct FailingConfigProvider;

#[async_trait]
impl PullRequestProvider for FailingConfigProvider {
    async fn list_labels(
        &self,
        _context: &RunContext,
        _pr_number: u64,
    ) -> Result<Vec<Label>, Error> {
        Ok(vec![Label {
            name: "wip".to_string(),
        }])
    }
}

#[async_trait]
impl ConfigFetcher for FailingConfigProvider {
    async fn fetch_config(
        &self,
        _context: &RunContext,
        _path: &str,
    ) -> Result<Option<String>, Error> {
        Err(Error::ApiError())
    }
}

fn test_context() -> RunContext {
    RunContext {
        repo_owner: "octocat".to_string(),
        repo_name: "hello-world".to_string(),
        sha: "0cd1a9dfbd1e5f56f7b9d3b9dcbbe638e6b85b7c".to_string(),
    }
}

#[test]
async fn test_gate_not_satisfied_without_overlap() {
    let provider = MockProvider::new(&["wip"], Some("- ready\n- approved\n"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert_eq!(result.pull_request, 85);
    assert_eq!(result.labels, vec!["wip".to_string()]);
    assert_eq!(result.outcome, GateOutcome::NotSatisfied);
    assert!(!result.outcome.is_satisfied());
}

#[test]
async fn test_gate_satisfied_on_overlap() {
    let provider = MockProvider::new(&["wip", "approved"], Some("- ready\n- approved\n"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert_eq!(result.outcome, GateOutcome::Satisfied);
    assert!(result.outcome.is_satisfied());
}

#[test]
async fn test_gate_preserves_label_order() {
    let provider = MockProvider::new(&["a", "b"], Some("- z\n"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert_eq!(result.labels, vec!["a".to_string(), "b".to_string()]);
}

#[test]
async fn test_gate_with_empty_label_set_is_not_satisfied() {
    let provider = MockProvider::new(&[], Some("- ready\n- approved\n"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert!(result.labels.is_empty());
    assert_eq!(result.outcome, GateOutcome::NotSatisfied);
}

#[test]
async fn test_missing_config_short_circuits_the_evaluation() {
    let provider = MockProvider::new(&["wip"], None);
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert_eq!(result.outcome, GateOutcome::AllowListEmpty);
    assert_eq!(result.labels, vec!["wip".to_string()]);
}

#[test]
async fn test_empty_config_document_short_circuits_the_evaluation() {
    let provider = MockProvider::new(&["wip"], Some(""));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await
        .unwrap();

    assert_eq!(result.outcome, GateOutcome::AllowListEmpty);
}

#[test]
async fn test_malformed_config_is_an_error() {
    let provider = MockProvider::new(&["wip"], Some("{ unclosed"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await;

    assert!(matches!(result, Err(LabelGateError::ConfigError(_))));
}

#[test]
async fn test_non_string_config_entry_is_an_error() {
    let provider = MockProvider::new(&["wip"], Some("- ready\n- 3\n"));
    let gate = LabelGate::new(provider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await;

    assert!(matches!(result, Err(LabelGateError::InvalidAllowList(_))));
}

#[test]
async fn test_label_listing_failure_propagates() {
    let gate = LabelGate::new(FailingLabelsProvider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await;

    match result {
        Err(LabelGateError::GitProviderError(message)) => {
            assert!(message.contains("85"), "message was: {}", message);
        }
        other => panic!("expected GitProviderError, got {:?}", other),
    }
}

#[test]
async fn test_config_fetch_failure_propagates() {
    let gate = LabelGate::new(FailingConfigProvider);

    let result = gate
        .check_pull_request(&test_context(), 85, ".github/acceptable-labels.yml")
        .await;

    assert!(matches!(result, Err(LabelGateError::GitProviderError(_))));
}

#[test]
async fn test_allow_list_round_trips_through_transport_encoding() {
    let names = vec!["ready-for-review".to_string(), "approved".to_string()];
    let document = names
        .iter()
        .map(|name| format!("- {}\n", name))
        .collect::<String>();

    let encoded = base64::engine::general_purpose::STANDARD.encode(&document);
    let decoded = decode_base64_content(&encoded).unwrap();
    let allow_list = AllowList::parse(&decoded).unwrap();

    assert_eq!(allow_list.entries(), names.as_slice());
}
