mod due_date;
mod repeat;
mod service_name;
mod status;

pub use due_date::{next_due_date, occurs_on};
pub use repeat::Repeat;
pub use service_name::ServiceName;
pub use status::{Phase, Status};
