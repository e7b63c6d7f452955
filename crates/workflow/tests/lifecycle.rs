use workflow::config::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_VERIFICATION_NETWORK};
use workflow::demo::{demo_catalog, demo_event, demo_results};
use workflow::{StorageWorkflow, WorkflowConfig, WorkflowError};

// Well-known development key, never funded
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn test_config(private_key: Option<&str>) -> WorkflowConfig {
    WorkflowConfig {
        network: "calibration".to_string(),
        rpc_url: None,
        private_key: private_key.map(str::to_string),
        deposit_amount: 2.5,
        contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        verification_network: DEFAULT_VERIFICATION_NETWORK.to_string(),
    }
}

#[tokio::test]
async fn operations_fail_before_initialization() {
    let workflow = StorageWorkflow::new(test_config(Some(TEST_KEY))).unwrap();

    let err = workflow.store_event(demo_event()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow
        .store_results(1, demo_results())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow.store_catalog(demo_catalog()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow.fetch("bafkzcib123").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow.ensure_collateral(2.5).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow.storage_info().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    let err = workflow.balances().await.unwrap_err();
    assert!(matches!(err, WorkflowError::Uninitialized));

    assert!(matches!(
        workflow.address().unwrap_err(),
        WorkflowError::Uninitialized
    ));
    assert!(matches!(
        workflow.piece_url("bafkzcib123").unwrap_err(),
        WorkflowError::Uninitialized
    ));
}

#[tokio::test]
async fn initialize_builds_the_session_wallet() {
    let mut workflow = StorageWorkflow::new(test_config(Some(TEST_KEY))).unwrap();
    workflow.initialize().await.unwrap();

    assert!(workflow.is_initialized());
    assert_eq!(
        workflow.address().unwrap().to_lowercase(),
        "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );

    let url = workflow.piece_url("bafkzcibtest").unwrap();
    assert!(url.ends_with("bafkzcibtest"));
}

#[tokio::test]
async fn initialize_twice_is_a_no_op() {
    let mut workflow = StorageWorkflow::new(test_config(Some(TEST_KEY))).unwrap();
    workflow.initialize().await.unwrap();
    workflow.initialize().await.unwrap();
    assert!(workflow.is_initialized());
}

#[tokio::test]
async fn initialize_without_key_is_a_configuration_error() {
    let mut workflow = StorageWorkflow::new(test_config(None)).unwrap();
    let err = workflow.initialize().await.unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("PRIVATE_KEY"));
    assert!(!workflow.is_initialized());
}

#[tokio::test]
async fn closed_session_rejects_everything() {
    let mut workflow = StorageWorkflow::new(test_config(Some(TEST_KEY))).unwrap();
    workflow.initialize().await.unwrap();

    workflow.close();
    assert!(workflow.is_closed());

    let err = workflow.store_event(demo_event()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::SessionClosed));

    let err = workflow.fetch("bafkzcib123").await.unwrap_err();
    assert!(matches!(err, WorkflowError::SessionClosed));

    // Closed is terminal, re-initialization is refused
    let err = workflow.initialize().await.unwrap_err();
    assert!(matches!(err, WorkflowError::SessionClosed));

    // And closing again changes nothing
    workflow.close();
    assert!(workflow.is_closed());
}

#[tokio::test]
async fn close_works_from_any_state() {
    let mut workflow = StorageWorkflow::new(test_config(None)).unwrap();
    assert!(!workflow.is_closed());

    workflow.close();
    assert!(workflow.is_closed());

    let err = workflow.initialize().await.unwrap_err();
    assert!(matches!(err, WorkflowError::SessionClosed));
}

#[tokio::test]
async fn full_workflow_refuses_a_closed_session() {
    let mut workflow = StorageWorkflow::new(test_config(Some(TEST_KEY))).unwrap();
    workflow.close();

    let err = workflow
        .full_workflow(demo_event(), demo_results(), demo_catalog())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::SessionClosed));
}
