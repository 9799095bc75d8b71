//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! Contacts deliberately carry no foreign key to campaigns: deleting a
//! campaign leaves its contacts in place, and a contact's referral history
//! keeps ids of contacts that were later deleted.

diesel::table! {
    /// User accounts table.
    ///
    /// Users are created by an external signup flow; this service only reads
    /// them to resolve token subjects. The credential hash never leaves the
    /// persistence layer.
    users (id) {
        /// Primary key: UUID v4 identifier, also the token subject.
        id -> Uuid,
        /// Optional display name.
        name -> Nullable<Text>,
        /// Address the user signed up with.
        email -> Text,
        /// Credential hash owned by the external login service.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Referral campaigns table.
    ///
    /// `public_code` carries a unique index; it stands in for the internal id
    /// on the public signup surface.
    campaigns (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// User who created the campaign.
        owner -> Uuid,
        /// Campaign name shown in dashboards and mails.
        name -> Text,
        /// Base URL referral links are built from.
        referral_url -> Nullable<Text>,
        /// Public slug identifying the campaign in signup requests.
        public_code -> Text,
        /// Mail template for the signup confirmation.
        signup_template_id -> Nullable<Text>,
        /// Mail template for referral nudges.
        nudge_template_id -> Nullable<Text>,
        /// Mail template for campaign completion; stored, never dispatched.
        completion_template_id -> Nullable<Text>,
        /// Referral count at which nudge mails stop; zero disables nudging.
        nudge_threshold -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contacts table: one row per signup.
    ///
    /// `(email, campaign_id)` and `referral_code` carry unique indexes; the
    /// former is the arbiter for duplicate signups under concurrency.
    contacts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Campaign the contact signed up under. Not a foreign key.
        campaign_id -> Uuid,
        /// Public campaign code as supplied at signup, kept for audit.
        campaign_public_code -> Text,
        /// Contact's name.
        name -> Nullable<Text>,
        /// Address signup and nudge mails are sent to.
        email -> Text,
        /// Contact's mobile number.
        mobile -> Nullable<Text>,
        /// Caller-supplied correlation identifier.
        external_id -> Nullable<Text>,
        /// Unique slug identifying this contact as a referrer.
        referral_code -> Text,
        /// Ids of contacts who signed up with this contact's code, in signup
        /// order.
        referred_contacts -> Array<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
