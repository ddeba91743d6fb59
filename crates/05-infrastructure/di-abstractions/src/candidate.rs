//! 候选类型描述
//!
//! 候选类型替代运行时反射：记录类型名称、是否可实例化、声明的能力契约、
//! 无参构造函数以及按名称绑定的注册方法。

use crate::capability::{
    CapabilityKind, DbServiceRegistration, IdentityServicesRegistration,
    RepositoriesRegistration, ServicesRegistration, ServicesRegistrationWithConfig, ADD_SERVICES,
};
use crate::container::ServiceCollection;
use infrastructure_common::{BoxError, Configuration, TypeInfo};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 候选类型实例
pub type CandidateInstance = Box<dyn Any + Send + Sync>;

/// 无参构造函数
pub type ConstructorFn = Arc<dyn Fn() -> Result<CandidateInstance, BoxError> + Send + Sync>;

/// 接收配置的注册方法
pub type ConfiguredMethodFn = Arc<
    dyn Fn(&(dyn Any + Send + Sync), &mut dyn ServiceCollection, Option<&Configuration>) -> Result<(), BoxError>
        + Send
        + Sync,
>;

/// 不接收配置的注册方法
pub type PlainMethodFn = Arc<
    dyn Fn(&(dyn Any + Send + Sync), &mut dyn ServiceCollection) -> Result<(), BoxError>
        + Send
        + Sync,
>;

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 可实例化的具体类型
    Class,
    /// 抽象类型（trait object 等），不能实例化
    Abstract,
}

/// 注册方法签名
#[derive(Clone)]
pub enum RegistrationMethod {
    /// `add_services(services, configuration)`
    WithConfiguration(ConfiguredMethodFn),
    /// `add_services(services)`
    WithoutConfiguration(PlainMethodFn),
}

impl RegistrationMethod {
    /// 是否接收配置参数
    pub fn takes_configuration(&self) -> bool {
        matches!(self, Self::WithConfiguration(_))
    }
}

impl fmt::Debug for RegistrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithConfiguration(_) => f.write_str("WithConfiguration(<function>)"),
            Self::WithoutConfiguration(_) => f.write_str("WithoutConfiguration(<function>)"),
        }
    }
}

/// 方法绑定：某个能力契约下按名称可调用的方法
#[derive(Debug, Clone)]
pub struct MethodBinding {
    /// 所属契约
    pub capability: CapabilityKind,
    /// 方法名
    pub name: String,
    /// 方法实现
    pub method: RegistrationMethod,
}

impl MethodBinding {
    /// 创建方法绑定
    pub fn new(capability: CapabilityKind, name: impl Into<String>, method: RegistrationMethod) -> Self {
        Self {
            capability,
            name: name.into(),
            method,
        }
    }
}

/// 候选类型
#[derive(Clone)]
pub struct CandidateType {
    type_info: TypeInfo,
    kind: TypeKind,
    constructor: Option<ConstructorFn>,
    capabilities: Vec<CapabilityKind>,
    methods: Vec<MethodBinding>,
}

impl CandidateType {
    /// 通过 `Default` 构造的具体类型
    pub fn of<T>() -> CandidateBuilder<T>
    where
        T: Default + Send + Sync + 'static,
    {
        Self::with_constructor(|| Ok(T::default()))
    }

    /// 使用自定义（可能失败的）无参构造函数的具体类型
    pub fn with_constructor<T, F>(constructor: F) -> CandidateBuilder<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let constructor: ConstructorFn =
            Arc::new(move || constructor().map(|instance| Box::new(instance) as CandidateInstance));

        CandidateBuilder::new(Self {
            constructor: Some(constructor),
            ..Self::bare(TypeInfo::of::<T>(), TypeKind::Class)
        })
    }

    /// 没有无参构造函数的具体类型
    pub fn without_constructor<T>() -> CandidateBuilder<T>
    where
        T: Send + Sync + 'static,
    {
        CandidateBuilder::new(Self::bare(TypeInfo::of::<T>(), TypeKind::Class))
    }

    /// 抽象类型，例如被误扫描进来的 `dyn Trait`
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self::bare(TypeInfo::of::<T>(), TypeKind::Abstract)
    }

    fn bare(type_info: TypeInfo, kind: TypeKind) -> Self {
        Self {
            type_info,
            kind,
            constructor: None,
            capabilities: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// 声明实现某个能力契约（不绑定方法）
    pub fn declare(mut self, capability: CapabilityKind) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// 添加方法绑定
    pub fn with_method(mut self, binding: MethodBinding) -> Self {
        self.methods.push(binding);
        self
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 完整类型名称
    pub fn type_name(&self) -> &str {
        &self.type_info.name
    }

    /// 类型种类
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 是否为可实例化的具体类型
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// 无参构造函数
    pub fn constructor(&self) -> Option<&ConstructorFn> {
        self.constructor.as_ref()
    }

    /// 按声明顺序返回能力契约
    pub fn capabilities(&self) -> &[CapabilityKind] {
        &self.capabilities
    }

    /// 是否声明了指定契约
    pub fn implements(&self, capability: CapabilityKind) -> bool {
        self.capabilities.contains(&capability)
    }

    /// 查找指定契约下的命名方法
    pub fn method(&self, capability: CapabilityKind, name: &str) -> Option<&MethodBinding> {
        self.methods
            .iter()
            .find(|binding| binding.capability == capability && binding.name == name)
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateType")
            .field("type_info", &self.type_info)
            .field("kind", &self.kind)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .field("capabilities", &self.capabilities)
            .field("methods", &self.methods)
            .finish()
    }
}

/// 强类型候选构建器
///
/// 每个能力方法都要求 `T` 实现对应契约，缺少实现会在编译期报错。
pub struct CandidateBuilder<T> {
    candidate: CandidateType,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CandidateBuilder<T>
where
    T: Send + Sync + 'static,
{
    fn new(candidate: CandidateType) -> Self {
        Self {
            candidate,
            _marker: PhantomData,
        }
    }

    /// 声明数据库服务注册
    pub fn database(self) -> Self
    where
        T: DbServiceRegistration,
    {
        self.bind_configured(
            CapabilityKind::Database,
            <T as DbServiceRegistration>::add_services,
        )
    }

    /// 声明身份认证服务注册
    pub fn identity(self) -> Self
    where
        T: IdentityServicesRegistration,
    {
        self.bind_configured(
            CapabilityKind::Identity,
            <T as IdentityServicesRegistration>::add_services,
        )
    }

    /// 声明需要配置的通用服务注册
    pub fn services_with_config(self) -> Self
    where
        T: ServicesRegistrationWithConfig,
    {
        self.bind_configured(
            CapabilityKind::ServicesWithConfig,
            <T as ServicesRegistrationWithConfig>::add_services,
        )
    }

    /// 声明通用服务注册
    pub fn services(self) -> Self
    where
        T: ServicesRegistration,
    {
        self.bind_plain(
            CapabilityKind::Services,
            <T as ServicesRegistration>::add_services,
        )
    }

    /// 声明仓储注册
    pub fn repositories(self) -> Self
    where
        T: RepositoriesRegistration,
    {
        self.bind_plain(
            CapabilityKind::Repositories,
            <T as RepositoriesRegistration>::add_services,
        )
    }

    /// 完成构建
    pub fn build(self) -> CandidateType {
        self.candidate
    }

    fn bind_configured(
        mut self,
        capability: CapabilityKind,
        call: fn(&T, &mut dyn ServiceCollection, Option<&Configuration>) -> Result<(), BoxError>,
    ) -> Self {
        let method: ConfiguredMethodFn = Arc::new(
            move |instance: &(dyn Any + Send + Sync),
                  services: &mut dyn ServiceCollection,
                  configuration: Option<&Configuration>| {
                call(downcast::<T>(instance)?, services, configuration)
            },
        );

        self.candidate = self
            .candidate
            .declare(capability)
            .with_method(MethodBinding::new(
                capability,
                ADD_SERVICES,
                RegistrationMethod::WithConfiguration(method),
            ));
        self
    }

    fn bind_plain(
        mut self,
        capability: CapabilityKind,
        call: fn(&T, &mut dyn ServiceCollection) -> Result<(), BoxError>,
    ) -> Self {
        let method: PlainMethodFn = Arc::new(
            move |instance: &(dyn Any + Send + Sync), services: &mut dyn ServiceCollection| {
                call(downcast::<T>(instance)?, services)
            },
        );

        self.candidate = self
            .candidate
            .declare(capability)
            .with_method(MethodBinding::new(
                capability,
                ADD_SERVICES,
                RegistrationMethod::WithoutConfiguration(method),
            ));
        self
    }
}

impl<T> From<CandidateBuilder<T>> for CandidateType {
    fn from(builder: CandidateBuilder<T>) -> Self {
        builder.candidate
    }
}

fn downcast<T: 'static>(instance: &(dyn Any + Send + Sync)) -> Result<&T, BoxError> {
    instance.downcast_ref::<T>().ok_or_else(|| {
        format!("instance is not of type '{}'", std::any::type_name::<T>()).into()
    })
}

/// 可被发现的注册类型
///
/// 通常由 `#[service_registration]` 宏生成
pub trait RegistrationType: Send + Sync + 'static {
    /// 该类型的候选描述
    fn candidate_type() -> CandidateType
    where
        Self: Sized;
}
