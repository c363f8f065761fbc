pub mod pipeline;

pub use pipeline::{DEFAULT_PAGE_SIZE, PageRequest, Paged, RoleFilter, run_query};
