impl faxboard::FormEntity for Contact {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "contacts",
            route: "contacts",
            label: "Contact",
            plural: "Contacts",
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
                    name: "name",
                    label: "Name",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "fax_number",
                    label: "Fax Number",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "company",
                    label: "Company",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "email",
                    label: "Email",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "notes",
                    label: "Notes",
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
    faxboard::FormInfo { name : "Contact", schema_fn : < Contact as faxboard::FormEntity
    > ::schema, }
}
