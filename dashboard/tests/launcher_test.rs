use dashboard::launcher::build_store;
use faxboard::settings::{BackendKind, BackendSettings};
use faxboard::{FormValues, RecordStore, RequestState};
use faxboard::{FormController, FormMode, SubmitOutcome};
use std::time::Duration;

fn memory_settings(seed_user: Option<&str>) -> BackendSettings {
    BackendSettings {
        kind: BackendKind::Memory,
        url: String::new(),
        api_key: String::new(),
        access_token: None,
        timeout_s: Duration::from_secs(1),
        seed_user: seed_user.map(str::to_string),
    }
}

#[tokio::test]
async fn memory_backend_enforces_required_columns() {
    let registry = dashboard::registry().unwrap();
    let store = build_store(&memory_settings(None), &registry).unwrap();
    let schema = registry.get("faxes").unwrap();
    let form = FormController::mount(schema, store.clone(), FormMode::Create);
    let values: FormValues = [("account_id", "a1"), ("direction", "outbound")].into_iter().collect();
    let outcome = form.submit(values.clone()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("null value in column \"user_id\" of relation \"faxes\" violates not-null constraint".into())
    );

    let store = build_store(&memory_settings(Some("u1")), &registry).unwrap();
    let form = FormController::mount(schema, store.clone(), FormMode::Create);
    assert!(matches!(form.submit(values).await, SubmitOutcome::Navigate(_)));
    let rows = store.list("faxes", 10).await.unwrap();
    assert_eq!(rows[0]["user_id"], serde_json::json!("u1"));
}

#[tokio::test]
async fn rest_backend_is_built_from_settings() {
    let registry = dashboard::registry().unwrap();
    let settings = BackendSettings { kind: BackendKind::Rest, url: "http://127.0.0.1:9/".into(), ..memory_settings(None) };
    let store = build_store(&settings, &registry).unwrap();
    assert_eq!(store.current_user().await, None);
    let _ = RequestState::new(store, registry);
}
