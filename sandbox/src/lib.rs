pub mod error;
pub mod executor;
pub mod policy;
pub mod template;
pub mod toolchain;

pub use error::SandboxError;
pub use executor::{EXIT_CODE_INTERNAL_ERROR, ExecutionResult, Sandbox};
pub use policy::HidePolicy;
pub use toolchain::{ToolchainRegistry, ToolchainSpec};
