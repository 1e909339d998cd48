//! Application use cases (orchestration over ports).

mod lookup_ad_hoc_filters;
mod sync_variables;

pub use lookup_ad_hoc_filters::LookupAdHocFilters;
pub use sync_variables::{SyncVariables, SyncVariablesOutput};
