//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod address;
pub mod credential;
pub mod error;
pub mod publish_repo;
pub mod ssh;

pub use address::{RepoAddress, SshProxy, parse_address, parse_ssh_proxy};
pub use credential::{
    Credential, EventContext, Secret, personal_token_remote, platform_token_remote, ssh_remote,
};
pub use error::{CredentialError, SshError};
pub use publish_repo::{RepoSlug, resolve_publish_repo};
