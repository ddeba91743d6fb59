//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 注册代码可返回的任意错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置键不存在: {key}")]
    KeyNotFound { key: String },

    #[error("配置类型转换失败: {message}")]
    TypeConversionError { message: String },

    #[error("配置序列化失败: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed { type_name: String, source: BoxError },
}

/// 缺失的成员类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingMember {
    /// 无参构造函数
    Constructor,
    /// 注册方法（名称或签名不匹配）
    Method,
}

impl fmt::Display for MissingMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constructor => f.write_str("zero-argument constructor"),
            Self::Method => f.write_str("registration method"),
        }
    }
}

/// 服务注册发现错误类型
///
/// 错误消息是宿主可见的契约，保持固定格式。
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Cannot create an instance of type '{type_name}' because it is not a class.")]
    NotAClass { type_name: String },

    #[error("Method '{method_name}' not found on type '{type_name}' (missing {missing}).")]
    MethodNotFound {
        type_name: String,
        method_name: String,
        missing: MissingMember,
    },

    #[error("Error invoking method '{method_name}' on type '{type_name}': {source}")]
    InvocationFailed {
        type_name: String,
        method_name: String,
        source: BoxError,
    },

    #[error("Error during service discovery: {source}")]
    DiscoveryFailed { source: Box<RegistrationError> },
}

impl RegistrationError {
    /// 包装为发现失败错误
    pub fn discovery_failed(source: Self) -> Self {
        Self::DiscoveryFailed {
            source: Box::new(source),
        }
    }

    /// 去掉 `DiscoveryFailed` 外层，返回实际出错的错误
    pub fn innermost(&self) -> &Self {
        match self {
            Self::DiscoveryFailed { source } => source.innermost(),
            other => other,
        }
    }

    /// 出错的类型名称
    pub fn type_name(&self) -> Option<&str> {
        match self.innermost() {
            Self::NotAClass { type_name }
            | Self::MethodNotFound { type_name, .. }
            | Self::InvocationFailed { type_name, .. } => Some(type_name),
            Self::DiscoveryFailed { .. } => None,
        }
    }

    /// 出错的方法名称
    pub fn method_name(&self) -> Option<&str> {
        match self.innermost() {
            Self::MethodNotFound { method_name, .. } | Self::InvocationFailed { method_name, .. } => {
                Some(method_name)
            }
            Self::NotAClass { .. } | Self::DiscoveryFailed { .. } => None,
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type RegistrationResult<T> = Result<T, RegistrationError>;
