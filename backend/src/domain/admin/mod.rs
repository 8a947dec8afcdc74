//! Administrative surface: entity descriptors, list filtering and branding.

mod descriptors;
mod listing;
mod site_settings;

pub use descriptors::{
    EntityDescriptor, EntityKind, descriptor, with_status_icon, with_timestamp_readonly,
};
pub use listing::{
    ListFilter, ListFilterError, ListQuery, Listable, ListedRow, STATUS_SYMBOL, StatusColour,
    StatusFilter, decorate, preview, status_icon,
};
pub use site_settings::AdminSiteSettings;
