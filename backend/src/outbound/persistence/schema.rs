//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    metadata (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        keywords -> Nullable<Text>,
        is_active -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    heroes (id) {
        id -> Uuid,
        greeting -> Nullable<Text>,
        full_name -> Nullable<Text>,
        title -> Nullable<Text>,
        bio -> Nullable<Text>,
        is_active -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    abouts (id) {
        id -> Uuid,
        about -> Nullable<Text>,
        avatar -> Nullable<Text>,
        is_active -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    skill_groups (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        is_active -> Bool,
    }
}

diesel::table! {
    skills (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        icon -> Nullable<Text>,
        group_id -> Nullable<Uuid>,
        is_active -> Bool,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        image -> Nullable<Text>,
        demo_url -> Nullable<Text>,
        source_url -> Nullable<Text>,
        ordering_index -> Nullable<Int4>,
        is_active -> Bool,
        created -> Timestamptz,
    }
}

diesel::table! {
    project_skills (project_id, skill_id) {
        project_id -> Uuid,
        skill_id -> Uuid,
    }
}

diesel::table! {
    contacts (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        is_active -> Bool,
    }
}

diesel::table! {
    info_items (id) {
        id -> Uuid,
        key -> Nullable<Text>,
        value -> Nullable<Text>,
        link -> Nullable<Text>,
        icon -> Nullable<Text>,
        contact_id -> Nullable<Uuid>,
        is_active -> Bool,
    }
}

diesel::table! {
    social_links (id) {
        id -> Uuid,
        title -> Nullable<Text>,
        link -> Nullable<Text>,
        icon -> Nullable<Text>,
        contact_id -> Nullable<Uuid>,
        is_active -> Bool,
    }
}

diesel::table! {
    sections (id) {
        id -> Uuid,
        about_me -> Bool,
        projects -> Bool,
        skills -> Bool,
        process -> Bool,
        contact -> Bool,
    }
}

diesel::table! {
    footers (id) {
        id -> Uuid,
        copyright_text -> Nullable<Text>,
    }
}

diesel::table! {
    messages (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        message -> Text,
        created -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Varchar,
        username -> Varchar,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        bio -> Nullable<Text>,
        website -> Nullable<Text>,
        profile_picture -> Nullable<Text>,
        phone -> Nullable<Varchar>,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
        last_login -> Nullable<Timestamptz>,
        date_joined -> Timestamptz,
    }
}

diesel::joinable!(skills -> skill_groups (group_id));
diesel::joinable!(project_skills -> projects (project_id));
diesel::joinable!(project_skills -> skills (skill_id));
diesel::joinable!(info_items -> contacts (contact_id));
diesel::joinable!(social_links -> contacts (contact_id));

diesel::allow_tables_to_appear_in_same_query!(
    metadata,
    heroes,
    abouts,
    skill_groups,
    skills,
    projects,
    project_skills,
    contacts,
    info_items,
    social_links,
    sections,
    footers,
    messages,
    users,
);
