use faxboard::store::{MemoryStore, RecordingStore, StoreCall};
use faxboard::{
    EntitySchema, FieldKind, FormController, FormMode, FormState, FormValues, LoadOutcome, Navigation, Record,
    RecordId, RecordStore, Registry, StoreError, SubmitOutcome,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

fn registry() -> Registry {
    dashboard::registry().unwrap()
}

fn store(registry: &Registry) -> Arc<RecordingStore<MemoryStore>> {
    Arc::new(RecordingStore::new(MemoryStore::new().with_user("u1").constrain_required(registry)))
}

fn sample(kind: FieldKind, name: &str) -> String {
    match kind {
        FieldKind::Text => format!("{}-value", name),
        FieldKind::Number => "7".to_string(),
        FieldKind::DateTime => "2024-05-01T10:30".to_string(),
        FieldKind::Url => "https://files.example.com/doc.pdf".to_string(),
        FieldKind::Boolean => "on".to_string(),
    }
}

fn valid_values(schema: &EntitySchema) -> FormValues {
    schema.input_fields().map(|f| (f.name, sample(f.kind, f.name))).collect()
}

fn existing_row(schema: &EntitySchema, id: &str) -> Record {
    let mut row: Record = schema.fields.iter().map(|f| (f.name.to_string(), Value::Null)).collect();
    for field in schema.input_fields() {
        row.insert(field.name.to_string(), field.kind.coerce(Some(&sample(field.kind, field.name))));
    }
    for field in schema.current_user_fields() {
        row.insert(field.name.to_string(), json!("u1"));
    }
    row.insert("id".into(), json!(id));
    row
}

fn field_names(schema: &EntitySchema) -> BTreeSet<String> {
    schema.fields.iter().map(|f| f.name.to_string()).collect()
}

#[tokio::test]
async fn loading_a_missing_id_fails_for_every_schema() {
    let registry = registry();
    for schema in registry.iter() {
        let store = store(&registry);
        let form = FormController::mount(schema, store.clone(), FormMode::Edit(RecordId::from("missing")));
        let outcome = form.load(RecordId::from("missing")).await;
        assert!(matches!(outcome, LoadOutcome::Failed(_)), "{}: {:?}", schema.table, outcome);
        assert_eq!(form.state(), FormState::LoadFailed, "{}", schema.table);
        assert!(form.snapshot().loaded_record.is_none());
    }
}

#[tokio::test]
async fn create_submit_inserts_once_with_every_field_for_every_schema() {
    let registry = registry();
    for schema in registry.iter() {
        let store = store(&registry);
        let form = FormController::mount(schema, store.clone(), FormMode::Create);
        let outcome = form.submit(valid_values(schema)).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Navigate(Navigation { to: schema.list_route(), refresh: true }),
            "{}",
            schema.table
        );
        assert_eq!(form.state(), FormState::Success);

        let writes = store.writes();
        assert_eq!(writes.len(), 1, "{}", schema.table);
        let StoreCall::Insert { table, record } = &writes[0] else { panic!("{}: expected insert", schema.table) };
        assert_eq!(table, schema.table);
        assert_eq!(record.keys().cloned().collect::<BTreeSet<_>>(), field_names(schema));
        for field in schema.current_user_fields() {
            assert_eq!(record[field.name], json!("u1"));
        }
        assert_eq!(store.inner().count(schema.table).await, 1);

        assert_eq!(form.submit(valid_values(schema)).await, SubmitOutcome::Ignored);
        assert_eq!(store.writes().len(), 1);
    }
}

#[tokio::test]
async fn edit_submit_updates_the_loaded_record_for_every_schema() {
    let registry = registry();
    for schema in registry.iter() {
        let store = store(&registry);
        store.inner().seed(schema.table, existing_row(schema, "rec-1")).await;
        let form = FormController::mount(schema, store.clone(), FormMode::Edit(RecordId::from("rec-1")));
        assert_eq!(form.load(RecordId::from("rec-1")).await, LoadOutcome::Loaded, "{}", schema.table);
        let values = form.snapshot().values;
        let outcome = form.submit(values).await;
        assert!(matches!(outcome, SubmitOutcome::Navigate(_)), "{}: {:?}", schema.table, outcome);

        let writes = store.writes();
        assert_eq!(writes.len(), 1, "{}", schema.table);
        match &writes[0] {
            StoreCall::Update { table, id, partial } => {
                assert_eq!(table, schema.table);
                assert_eq!(id, &RecordId::from("rec-1"));
                assert!(schema.current_user_fields().all(|f| !partial.contains_key(f.name)));
            }
            other => panic!("{}: expected update, got {:?}", schema.table, other),
        }
        assert!(!store.calls().contains(&StoreCall::CurrentUser));
    }
}

#[tokio::test]
async fn second_submit_while_first_is_outstanding_writes_nothing() {
    let registry = registry();
    for schema in registry.iter() {
        let store = Arc::new(RecordingStore::gated(MemoryStore::new().with_user("u1")));
        let form = FormController::mount(schema, store.clone(), FormMode::Create);
        let first = tokio::spawn({
            let form = form.clone();
            let values = valid_values(schema);
            async move { form.submit(values).await }
        });
        while store.writes().is_empty() {
            tokio::task::yield_now().await;
        }
        let second = form.submit(valid_values(schema)).await;
        assert_eq!(second, SubmitOutcome::Ignored, "{}", schema.table);
        store.release(1);
        assert!(matches!(first.await.unwrap(), SubmitOutcome::Navigate(_)));
        assert_eq!(store.writes().len(), 1, "{}", schema.table);
    }
}

#[tokio::test]
async fn empty_numbers_are_sent_as_null_and_numeric_strings_as_numbers() {
    let registry = registry();
    let schema = registry.get("usage-logs").unwrap();
    let store = store(&registry);
    let form = FormController::mount(schema, store.clone(), FormMode::Create);
    let values: FormValues = [
        ("account_id", "a1"),
        ("period_start", "2024-05-01T00:00"),
        ("period_end", "2024-05-31T23:59"),
        ("pages_sent", ""),
        ("pages_received", "12"),
        ("total_faxes_sent", "2.5"),
    ]
    .into_iter()
    .collect();
    form.submit(values).await;
    let StoreCall::Insert { record, .. } = &store.writes()[0] else { panic!("expected insert") };
    assert_eq!(record["pages_sent"], Value::Null);
    assert_eq!(record["pages_received"], json!(12));
    assert_eq!(record["total_faxes_sent"], json!(2.5));
    assert_eq!(record["total_faxes_received"], Value::Null);
}

#[tokio::test]
async fn account_created_with_only_owner_id() {
    let registry = registry();
    let schema = registry.get("accounts").unwrap();
    let store = store(&registry);
    let form = FormController::mount(schema, store.clone(), FormMode::Create);
    let mut values = FormValues::new();
    for field in schema.input_fields() {
        values.set(field.name, "");
    }
    values.set("owner_id", "u1");
    let outcome = form.submit(values).await;

    let StoreCall::Insert { record, .. } = &store.writes()[0] else { panic!("expected insert") };
    assert_eq!(
        Value::Object(record.clone()),
        json!({
            "owner_id": "u1",
            "subscription_plan": null,
            "subscription_status": null,
            "stripe_customer_id": null,
            "stripe_subscription_id": null,
            "pages_sent_this_month": null,
            "pages_received_this_month": null,
            "billing_period_start": null,
            "billing_period_end": null,
        })
    );
    assert_eq!(outcome, SubmitOutcome::Navigate(Navigation { to: "/dashboard/accounts".into(), refresh: true }));
}

#[tokio::test]
async fn fax_number_edit_form_is_populated_from_loaded_record() {
    let registry = registry();
    let schema = registry.get("fax-numbers").unwrap();
    let store = store(&registry);
    let row = json!({ "id": "abc", "account_id": "x", "number": "555", "label": null, "status": "active" });
    store.inner().seed("fax_numbers", row.as_object().cloned().unwrap()).await;
    let form = FormController::mount(schema, store.clone(), FormMode::Edit(RecordId::from("abc")));
    form.load(RecordId::from("abc")).await;
    let session = form.snapshot();
    assert_eq!(session.values.get("account_id"), Some("x"));
    assert_eq!(session.values.get("number"), Some("555"));
    assert_eq!(session.values.get("label"), Some(""));
    assert_eq!(session.values.get("status"), Some("active"));
}

#[tokio::test]
async fn rejected_submit_shows_backend_message_and_stays_on_form() {
    let registry = registry();
    let schema = registry.get("contacts").unwrap();
    let store = store(&registry);
    store.fail_next(StoreError::Rejected("duplicate key".into()));
    let form = FormController::mount(schema, store.clone(), FormMode::Create);
    let outcome = form.submit(valid_values(schema)).await;
    assert_eq!(outcome, SubmitOutcome::Failed("duplicate key".into()));
    let session = form.snapshot();
    assert_eq!(session.state, FormState::Failed);
    assert_eq!(session.last_error.as_deref(), Some("duplicate key"));
    assert_eq!(session.values, valid_values(schema));
    assert_eq!(store.inner().count("contacts").await, 0);
    assert!(store.inner().list("contacts", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn late_responses_after_unmount_are_dropped() {
    let registry = registry();
    let schema = registry.get("faxes").unwrap();
    let memory = MemoryStore::new().with_user("u1");
    memory.seed("faxes", existing_row(schema, "f1")).await;
    let store = Arc::new(RecordingStore::gated(memory));
    let form = FormController::mount(schema, store.clone(), FormMode::Edit(RecordId::from("f1")));
    let pending = tokio::spawn({
        let form = form.clone();
        async move { form.load(RecordId::from("f1")).await }
    });
    while store.calls().is_empty() {
        tokio::task::yield_now().await;
    }
    form.unmount();
    store.release(1);
    assert_eq!(pending.await.unwrap(), LoadOutcome::Discarded);
    assert!(form.snapshot().loaded_record.is_none());
    assert_eq!(form.state(), FormState::Loading);
}

#[test]
fn only_entities_with_a_user_column_take_the_current_user() {
    let registry = registry();
    let sourced: Vec<_> =
        registry.iter().filter(|s| s.current_user_fields().next().is_some()).map(|s| s.table).collect();
    assert_eq!(sourced, vec!["contacts", "cover_page_templates", "faxes"]);
}
