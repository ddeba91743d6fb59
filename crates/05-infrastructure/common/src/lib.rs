//! # Infrastructure Common
//!
//! 服务注册发现机制的公共类型。
//!
//! ## 核心类型
//!
//! - [`RegistrationError`] - 发现和调用过程的错误分类
//! - [`Configuration`] - 透传给注册代码的只读配置
//! - [`TypeInfo`] - 类型元数据
//! - [`Lifetime`] - 服务生命周期

pub mod configuration;
pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
