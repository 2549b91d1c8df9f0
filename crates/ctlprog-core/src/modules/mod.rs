pub mod control;
pub mod observability;
pub mod serialization;
pub mod solution;

mod timestep;
mod traits;

pub use control::{ControlBlock, write_control};
pub use observability::{ControlEvent, MemorySink, TracingSink};
pub use solution::{discover_control_files, load_solution, parse_solution};
pub use timestep::run_timestep;
pub use traits::ObservabilitySink;
