use faxboard::*;

#[derive(Form)]
#[form(table = "fax_batches", route = "batches", label = "Batch", plural = "Batches")]
pub struct FaxBatch {
    #[field(current_user)]
    pub owner_id: String,
    #[field(label = "Batch name")]
    pub name: String,
    #[field(datetime)]
    pub scheduled_at: Option<String>,
    #[field(url, required)]
    pub manifest_url: Option<String>,
    pub retry_ratio: Option<f64>,
    pub urgent: bool,
}

fn main() {
    let schema = <FaxBatch as FormEntity>::schema();
    assert_eq!((schema.table, schema.route, schema.label, schema.plural), ("fax_batches", "batches", "Batch", "Batches"));
    let owner = schema.field("owner_id").unwrap();
    assert_eq!(owner.default_source, DefaultSource::CurrentUser);
    assert_eq!(schema.field("name").unwrap().label, "Batch name");
    assert_eq!(schema.field("scheduled_at").unwrap().kind, FieldKind::DateTime);
    let manifest = schema.field("manifest_url").unwrap();
    assert_eq!((manifest.kind, manifest.required), (FieldKind::Url, true));
    assert_eq!(schema.field("urgent").unwrap().kind, FieldKind::Boolean);
    assert!(schema.validate().is_ok());

    let registry = Registry::discover().unwrap();
    assert!(registry.get("batches").is_some());
}
