impl faxboard::FormEntity for CoverPageTemplate {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "cover_page_templates",
            route: "cover-page-templates",
            label: "Cover Page Template",
            plural: "Cover Page Templates",
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
                    name: "content",
                    label: "Content",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "is_default",
                    label: "Is Default",
                    kind: faxboard::FieldKind::Boolean,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
            ],
        };
        &SCHEMA
    }
}
faxboard::inventory::submit! {
    faxboard::FormInfo { name : "CoverPageTemplate", schema_fn : < CoverPageTemplate as
    faxboard::FormEntity > ::schema, }
}
