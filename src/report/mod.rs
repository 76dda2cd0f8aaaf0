pub mod cleanup;
pub mod contract;
pub mod generator;

pub use cleanup::strip_code_fences;
pub use contract::{DISCLAIMER, SystemContract};
pub use generator::{
    ATTACHMENT_INSTRUCTION, DEFAULT_TEMPERATURE, DEMO_INSTRUCTION, FAILURE_PLACEHOLDER,
    ReportGenerator, ReportRequest, effective_instruction,
};
