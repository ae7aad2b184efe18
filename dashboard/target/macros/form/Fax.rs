impl faxboard::FormEntity for Fax {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "faxes",
            route: "faxes",
            label: "Fax",
            plural: "Faxes",
            fields: &[
                faxboard::FieldDescriptor {
                    name: "account_id",
                    label: "Account Id",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "user_id",
                    label: "User Id",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::CurrentUser,
                },
                faxboard::FieldDescriptor {
                    name: "direction",
                    label: "Direction",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "to_number",
                    label: "To Number",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "from_number",
                    label: "From Number",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "status",
                    label: "Status",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "failure_reason",
                    label: "Failure Reason",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "page_count",
                    label: "Page Count",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "document_url",
                    label: "Document Url",
                    kind: faxboard::FieldKind::Url,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "cover_page_text",
                    label: "Cover Page Text",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "vendor_fax_id",
                    label: "Vendor Fax Id",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "sent_at",
                    label: "Sent At",
                    kind: faxboard::FieldKind::DateTime,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "delivered_at",
                    label: "Delivered At",
                    kind: faxboard::FieldKind::DateTime,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
            ],
        };
        &SCHEMA
    }
}
faxboard::inventory::submit! {
    faxboard::FormInfo { name : "Fax", schema_fn : < Fax as faxboard::FormEntity >
    ::schema, }
}
