pub mod error;
pub mod validate;

pub mod flow_service;
pub mod project_service;
pub mod table_service;
pub mod template_service;
pub mod user_service;
pub mod viz_service;

pub use error::CatalogError;
pub use flow_service::*;
pub use project_service::*;
pub use table_service::*;
pub use template_service::*;
pub use user_service::*;
pub use viz_service::*;
