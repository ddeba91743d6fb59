//! 服务容器抽象接口
//!
//! 发现机制只通过"注册服务/工厂"使用容器，容器的存储和解析语义由实现方决定。

use infrastructure_common::{BoxError, Lifetime, TypeInfo};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 服务实例
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// 服务工厂函数类型
pub type ServiceFactoryFn = Arc<dyn Fn() -> Result<ServiceInstance, BoxError> + Send + Sync>;

/// 服务实现方式
#[derive(Clone)]
pub enum ServiceImplementation {
    /// 预先创建的实例
    Instance(ServiceInstance),
    /// 工厂函数
    Factory(ServiceFactoryFn),
}

impl fmt::Debug for ServiceImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(<instance>)"),
            Self::Factory(_) => f.write_str("Factory(<function>)"),
        }
    }
}

/// 服务描述符
///
/// 容器中的一条服务构造配方
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// 服务类型
    pub service_type: TypeInfo,
    /// 生命周期
    pub lifetime: Lifetime,
    /// 实现方式
    pub implementation: ServiceImplementation,
}

impl ServiceDescriptor {
    /// 创建单例实例描述符
    pub fn instance<T>(instance: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self {
            service_type: TypeInfo::of::<T>(),
            lifetime: Lifetime::Singleton,
            implementation: ServiceImplementation::Instance(Arc::new(instance)),
        }
    }

    /// 创建工厂描述符
    pub fn factory<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let factory: ServiceFactoryFn =
            Arc::new(move || factory().map(|service| Arc::new(service) as ServiceInstance));

        Self {
            service_type: TypeInfo::of::<T>(),
            lifetime,
            implementation: ServiceImplementation::Factory(factory),
        }
    }

    /// 是否为指定服务类型
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.service_type.is::<T>()
    }
}

/// 服务容器 trait
///
/// 只追加的服务配方注册表，由宿主拥有，发现过程中以可变借用传入
pub trait ServiceCollection: Send + Sync {
    /// 追加一条服务注册
    fn add(&mut self, descriptor: ServiceDescriptor);

    /// 按注册顺序返回所有服务描述符
    fn descriptors(&self) -> &[ServiceDescriptor];

    /// 已注册的服务数量
    fn len(&self) -> usize {
        self.descriptors().len()
    }

    /// 容器是否为空
    fn is_empty(&self) -> bool {
        self.descriptors().is_empty()
    }
}

/// 服务容器扩展方法
///
/// 对 `dyn ServiceCollection` 同样可用，注册代码拿到的正是 trait object
pub trait ServiceCollectionExt: ServiceCollection {
    /// 注册单例实例
    fn add_singleton<T>(&mut self, instance: T) -> &mut Self
    where
        T: Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::instance(instance));
        self
    }

    /// 注册可能失败的工厂
    fn add_factory<T, F>(&mut self, lifetime: Lifetime, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.add(ServiceDescriptor::factory(lifetime, factory));
        self
    }

    /// 注册瞬时服务
    fn add_transient<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Transient, move || Ok(factory()))
    }

    /// 注册作用域服务
    fn add_scoped<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.add_factory(Lifetime::Scoped, move || Ok(factory()))
    }

    /// 检查服务是否已注册
    fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.descriptors().iter().any(ServiceDescriptor::is::<T>)
    }

    /// 指定服务类型的注册次数
    fn registrations_of<T: ?Sized + 'static>(&self) -> usize {
        self.descriptors()
            .iter()
            .filter(|descriptor| descriptor.is::<T>())
            .count()
    }
}

impl<S: ServiceCollection + ?Sized> ServiceCollectionExt for S {}
