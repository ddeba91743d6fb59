//! 服务容器实现

use di_abstractions::{ServiceCollection, ServiceDescriptor, ServiceImplementation};
use infrastructure_common::{DependencyError, DependencyResult};
use std::sync::Arc;
use tracing::debug;

/// 只追加的服务容器
///
/// 保留全部注册记录；同一服务多次注册时，解析取最后一次注册。
#[derive(Debug, Clone, Default)]
pub struct ServiceCollectionImpl {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollectionImpl {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析服务
    pub fn resolve<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let descriptor = self
            .descriptors
            .iter()
            .rev()
            .find(|descriptor| descriptor.is::<T>())
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: type_name.to_string(),
            })?;

        let instance = match &descriptor.implementation {
            ServiceImplementation::Instance(instance) => instance.clone(),
            ServiceImplementation::Factory(factory) => {
                factory().map_err(|source| DependencyError::ComponentCreationFailed {
                    type_name: type_name.to_string(),
                    source,
                })?
            }
        };

        instance
            .downcast::<T>()
            .map_err(|_| DependencyError::ComponentCreationFailed {
                type_name: type_name.to_string(),
                source: "类型转换失败".into(),
            })
    }
}

impl ServiceCollection for ServiceCollectionImpl {
    fn add(&mut self, descriptor: ServiceDescriptor) {
        debug!(
            "注册服务: {} ({})",
            descriptor.service_type, descriptor.lifetime
        );
        self.descriptors.push(descriptor);
    }

    fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }
}
