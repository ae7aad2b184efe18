impl faxboard::FormEntity for FaxNumber {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "fax_numbers",
            route: "fax-numbers",
            label: "Fax Number",
            plural: "Fax Numbers",
            fields: &[
                faxboard::FieldDescriptor {
                    name: "account_id",
                    label: "Account Id",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "number",
                    label: "Number",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "label",
                    label: "Label",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "assigned_user_id",
                    label: "Assigned User Id",
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
                    name: "vendor_number_id",
                    label: "Vendor Number Id",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "area_code",
                    label: "Area Code",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
            ],
        };
        &SCHEMA
    }
}
faxboard::inventory::submit! {
    faxboard::FormInfo { name : "FaxNumber", schema_fn : < FaxNumber as
    faxboard::FormEntity > ::schema, }
}
