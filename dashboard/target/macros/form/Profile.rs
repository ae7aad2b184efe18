impl faxboard::FormEntity for Profile {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "profiles",
            route: "profiles",
            label: "Profile",
            plural: "Profiles",
            fields: &[
                faxboard::FieldDescriptor {
                    name: "full_name",
                    label: "Full Name",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "role",
                    label: "Role",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "account_id",
                    label: "Account Id",
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
    faxboard::FormInfo { name : "Profile", schema_fn : < Profile as faxboard::FormEntity
    > ::schema, }
}
