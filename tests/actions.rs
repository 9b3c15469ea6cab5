// tests/actions.rs

mod common;

use common::{Call, FakeGateway, config_with, prod_and_staging};
use opie::core::{
    actions::{self, ActionError, StackService},
    config::{Config, ConfigError},
};
use tempfile::TempDir;

fn writes(gateway: &FakeGateway) -> usize {
    gateway.count(|c| {
        matches!(
            c,
            Call::StartInstance(_) | Call::StopInstance(_) | Call::CreateDeployment { .. }
        )
    })
}

#[tokio::test]
async fn test_start_scoped_by_stack_name() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let action = service.start(&["web1", "staging"]).await.unwrap();

    assert_eq!(action.instance.id, "i-staging-web1");
    assert_eq!(action.instance.stack_name, "staging");
    assert_eq!(writes(&gateway), 1);
    assert!(gateway
        .calls()
        .contains(&Call::StartInstance("i-staging-web1".to_string())));
}

#[tokio::test]
async fn test_stop_unique_instance() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let action = service.stop(&["worker"]).await.unwrap();

    assert_eq!(action.instance.id, "i-staging-worker");
    assert_eq!(
        gateway.count(|c| *c == Call::StopInstance("i-staging-worker".to_string())),
        1
    );
}

#[tokio::test]
async fn test_ambiguous_instance_sends_nothing() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let err = service.start(&["web1"]).await.unwrap_err();

    match &err {
        ActionError::AmbiguousInstance { tokens, candidates } => {
            assert_eq!(tokens, "web1");
            assert_eq!(candidates.len(), 2);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
    let message = err.to_string();
    assert!(message.contains("    web1 : prod"));
    assert!(message.contains("    web1 : staging"));
    assert!(message.ends_with("Include the stack name to clarify."));
    assert_eq!(writes(&gateway), 0);
}

#[tokio::test]
async fn test_unknown_instance_sends_nothing() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let err = service.stop(&["db1", "prod"]).await.unwrap_err();

    assert!(matches!(err, ActionError::InstanceNotFound { ref tokens } if tokens == "db1 prod"));
    assert_eq!(writes(&gateway), 0);
}

#[tokio::test]
async fn test_list_without_stacks_is_an_error() {
    let gateway = prod_and_staging();
    let config = config_with(&[]);
    let service = StackService::new(&gateway, &config);

    let err = service.list().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "No configured stacks, use add-stack to configure a stack id."
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_deploy_within_one_stack() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let action = service.deploy(&["api", "web1", "prod"], None).await.unwrap();

    assert_eq!(action.app.id, "a-prod-api");
    assert_eq!(action.instance.id, "i-prod-web1");
    assert_eq!(action.comment, "");
    assert_eq!(action.ack.deployment_id.as_deref(), Some("d-0001"));

    let deployments: Vec<_> = gateway
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::CreateDeployment { .. }))
        .collect();
    assert_eq!(
        deployments,
        vec![Call::CreateDeployment {
            stack_id: "s1".to_string(),
            app_id: "a-prod-api".to_string(),
            instance_ids: vec!["i-prod-web1".to_string()],
            comment: String::new(),
        }]
    );
}

#[tokio::test]
async fn test_deploy_forwards_comment() {
    let gateway = prod_and_staging().with_app("s2", "a-staging-admin", "admin");
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let action = service
        .deploy(&["admin", "worker"], Some("hotfix"))
        .await
        .unwrap();

    assert_eq!(action.comment, "hotfix");
    assert!(gateway.calls().contains(&Call::CreateDeployment {
        stack_id: "s2".to_string(),
        app_id: "a-staging-admin".to_string(),
        instance_ids: vec!["i-staging-worker".to_string()],
        comment: "hotfix".to_string(),
    }));
}

#[tokio::test]
async fn test_deploy_across_stacks_is_rejected() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    // `api` names prod's app first, while `worker` only runs on staging.
    let err = service.deploy(&["api", "worker"], None).await.unwrap_err();

    match err {
        ActionError::StackMismatch {
            app_stack,
            instance_stack,
            ..
        } => {
            assert_eq!(app_stack, "prod");
            assert_eq!(instance_stack, "staging");
        }
        other => panic!("expected a stack mismatch, got {:?}", other),
    }
    assert_eq!(writes(&gateway), 0);
}

#[tokio::test]
async fn test_deploy_without_app_is_rejected() {
    let gateway = prod_and_staging();
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let err = service.deploy(&["worker"], None).await.unwrap_err();

    assert!(matches!(err, ActionError::AppNotFound { ref tokens } if tokens == "worker"));
    assert_eq!(writes(&gateway), 0);
}

#[tokio::test]
async fn test_remote_failure_surfaces_before_any_write() {
    let gateway = prod_and_staging().failing("s2");
    let config = config_with(&["s1", "s2"]);
    let service = StackService::new(&gateway, &config);

    let err = service.start(&["web1", "prod"]).await.unwrap_err();

    assert!(matches!(err, ActionError::Aggregate(_)));
    assert_eq!(writes(&gateway), 0);
}

#[test]
fn test_add_stack_id_persists_valid_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".opie.json");
    let mut config = Config::load_or_create(&path).unwrap();

    let err = actions::add_stack_id(&mut config, "").unwrap_err();
    assert!(matches!(err, ActionError::Config(ConfigError::InvalidStackId)));
    assert_eq!(err.to_string(), "Invalid stack id");

    actions::add_stack_id(&mut config, "abc123").unwrap();

    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.stack_ids, vec!["abc123"]);
}
