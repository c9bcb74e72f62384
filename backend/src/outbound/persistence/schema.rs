//! Diesel table definitions.
//!
//! Kept in sync with `backend/migrations`. These definitions are internal to
//! the persistence adapter.

diesel::table! {
    /// Member sessions; `kid` is the token presented in `X-Vulnetix`.
    sessions (kid) {
        kid -> Text,
        member_email -> Text,
        /// Sessions at or past this instant are expired.
        expiry -> Timestamptz,
        issued -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per upstream feed request made on behalf of a member.
    integration_usage_log (id) {
        id -> Uuid,
        member_email -> Text,
        /// One of `osv`, `first`, `vulncheck`, `github` (check constraint).
        source -> Text,
        status_code -> Nullable<Int4>,
        request_path -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    spdx_info (spdx_id) {
        spdx_id -> Text,
        spdx_version -> Text,
        name -> Text,
        document_namespace -> Nullable<Text>,
        member_email -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Artifacts; `spdx_id` references `spdx_info` and is unique.
    artifacts (uuid) {
        uuid -> Uuid,
        display_identifier -> Text,
        download_location -> Nullable<Text>,
        spdx_id -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    links (id) {
        id -> Uuid,
        url -> Text,
        artifact_uuid -> Uuid,
    }
}

diesel::joinable!(artifacts -> spdx_info (spdx_id));
diesel::joinable!(links -> artifacts (artifact_uuid));

diesel::allow_tables_to_appear_in_same_query!(
    sessions,
    integration_usage_log,
    spdx_info,
    artifacts,
    links,
);
