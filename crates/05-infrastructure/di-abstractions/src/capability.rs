//! 注册能力契约
//!
//! 五种注册角色，签名两两重叠，但以 [`CapabilityKind`] 区分身份。
//! 一个类型可以同时实现多个契约。

use crate::container::ServiceCollection;
use infrastructure_common::{BoxError, Configuration};
use std::fmt;

/// 所有契约统一的注册方法名
pub const ADD_SERVICES: &str = "add_services";

/// 数据库服务注册
pub trait DbServiceRegistration: Send + Sync {
    /// 注册数据库相关服务
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError>;
}

/// 身份认证服务注册
pub trait IdentityServicesRegistration: Send + Sync {
    /// 注册身份认证相关服务
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError>;
}

/// 需要配置的通用服务注册
pub trait ServicesRegistrationWithConfig: Send + Sync {
    /// 注册服务
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError>;
}

/// 通用服务注册
pub trait ServicesRegistration: Send + Sync {
    /// 注册服务
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError>;
}

/// 仓储注册
pub trait RepositoriesRegistration: Send + Sync {
    /// 注册仓储
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError>;
}

/// 注册能力类别
///
/// 变体声明顺序即调用优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// [`DbServiceRegistration`]
    Database,
    /// [`IdentityServicesRegistration`]
    Identity,
    /// [`ServicesRegistrationWithConfig`]
    ServicesWithConfig,
    /// [`ServicesRegistration`]
    Services,
    /// [`RepositoriesRegistration`]
    Repositories,
}

impl CapabilityKind {
    /// 发现过程中各类别的处理顺序
    pub const PRIORITY_ORDER: [Self; 5] = [
        Self::Database,
        Self::Identity,
        Self::ServicesWithConfig,
        Self::Services,
        Self::Repositories,
    ];

    /// 注册方法是否接收配置参数
    pub fn requires_configuration(self) -> bool {
        matches!(
            self,
            Self::Database | Self::Identity | Self::ServicesWithConfig
        )
    }

    /// 契约要求的方法名
    pub fn method_name(self) -> &'static str {
        ADD_SERVICES
    }

    /// 契约 trait 名称
    pub fn contract_name(self) -> &'static str {
        match self {
            Self::Database => "DbServiceRegistration",
            Self::Identity => "IdentityServicesRegistration",
            Self::ServicesWithConfig => "ServicesRegistrationWithConfig",
            Self::Services => "ServicesRegistration",
            Self::Repositories => "RepositoriesRegistration",
        }
    }

    /// 类别短名称，用于日志
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Identity => "identity",
            Self::ServicesWithConfig => "services_with_config",
            Self::Services => "services",
            Self::Repositories => "repositories",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contract_name())
    }
}
