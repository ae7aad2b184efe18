impl faxboard::FormEntity for Account {
    fn schema() -> &'static faxboard::EntitySchema {
        static SCHEMA: faxboard::EntitySchema = faxboard::EntitySchema {
            table: "accounts",
            route: "accounts",
            label: "Account",
            plural: "Accounts",
            fields: &[
                faxboard::FieldDescriptor {
                    name: "owner_id",
                    label: "Owner Id",
                    kind: faxboard::FieldKind::Text,
                    required: true,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "subscription_plan",
                    label: "Subscription Plan",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "subscription_status",
                    label: "Subscription Status",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "stripe_customer_id",
                    label: "Stripe Customer Id",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "stripe_subscription_id",
                    label: "Stripe Subscription Id",
                    kind: faxboard::FieldKind::Text,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "pages_sent_this_month",
                    label: "Pages Sent This Month",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "pages_received_this_month",
                    label: "Pages Received This Month",
                    kind: faxboard::FieldKind::Number,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "billing_period_start",
                    label: "Billing Period Start",
                    kind: faxboard::FieldKind::DateTime,
                    required: false,
                    default_source: faxboard::DefaultSource::None,
                },
                faxboard::FieldDescriptor {
                    name: "billing_period_end",
                    label: "Billing Period End",
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
    faxboard::FormInfo { name : "Account", schema_fn : < Account as faxboard::FormEntity
    > ::schema, }
}
