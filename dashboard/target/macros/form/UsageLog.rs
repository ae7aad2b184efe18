impl faxboard::FormEntity for UsageLog {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "usage_logs",
            route: "usage-logs",
            label: "Usage Log",
            plural: "Usage Logs",
            fields: &[
                faxboard::FieldDescriptor {
                    name: "account_id",
                    label: "Account Id",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "period_start",
                    label: "Period Start",
                    kind: faxboard::FieldKind::DateTime,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "period_end",
                    label: "Period End",
                    kind: faxboard::FieldKind::DateTime,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "pages_sent",
                    label: "Pages Sent",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "pages_received",
                    label: "Pages Received",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "total_faxes_sent",
                    label: "Total Faxes Sent",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "total_faxes_received",
                    label: "Total Faxes Received",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
            ],
        };
        &SCHEMA
    }
}
faxboard::inventory::submit! {
    faxboard::FormInfo { name : "UsageLog", schema_fn : < UsageLog as
    faxboard::FormEntity > ::schema, }
}
