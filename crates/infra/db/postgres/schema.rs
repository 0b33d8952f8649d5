// Mirrors migrations/2025-01-01-000000_create_shop_tables/up.sql.

diesel::table! {
    messages (id) {
        id -> Int8,
        user_id -> Text,
        subject -> Text,
        message -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    subscriptions (id) {
        id -> Int8,
        user_id -> Text,
        plan_id -> Text,
        start_date -> Timestamptz,
        end_date -> Timestamptz,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(messages, subscriptions);
