//! # 服务注册发现实现
//!
//! 提供服务容器、注册方法调用器和发现引擎的具体实现。
//!
//! ```rust,no_run
//! use di_impl::{add_service_registration, ServiceCollectionImpl};
//!
//! let mut services = ServiceCollectionImpl::new();
//! add_service_registration(&mut services, None).expect("服务注册失败");
//! ```

pub mod collection;
pub mod discovery;
pub mod extension;
pub mod invoker;

pub use collection::ServiceCollectionImpl;
pub use discovery::{
    discover_and_register, DiscoveryReport, DiscoveryState, InvocationRecord, ServiceRegistrar,
};
pub use extension::{add_service_registration, add_service_registration_from, ServiceRegistrationExt};
pub use invoker::{invoke, invoke_with_config};
