//! # Dependency Injection Abstractions
//!
//! 服务注册发现的抽象层，定义注册能力契约、候选类型描述和服务容器接口。
//!
//! ## 核心接口
//!
//! - [`ServiceCollection`] - 服务容器接口
//! - [`DbServiceRegistration`] / [`IdentityServicesRegistration`] /
//!   [`ServicesRegistrationWithConfig`] / [`ServicesRegistration`] /
//!   [`RepositoriesRegistration`] - 五种注册能力契约
//! - [`CandidateType`] - 候选类型描述
//! - [`RegistrationModule`] - 注册模块
//! - [`register_candidate`] - 进程级模块注册表

pub mod candidate;
pub mod capability;
pub mod container;
pub mod module;
pub mod registry;

pub use candidate::*;
pub use capability::*;
pub use container::*;
pub use module::*;
pub use registry::*;
