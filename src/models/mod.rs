pub mod dataset;
pub mod maintenance;
pub mod month;
pub mod operational;
pub mod work_site;

pub use dataset::Dataset;
pub use maintenance::MaintenanceRecord;
pub use month::Month;
pub use operational::OperationalRecord;
pub use work_site::{WorkSiteReference, WorkSiteTable};
