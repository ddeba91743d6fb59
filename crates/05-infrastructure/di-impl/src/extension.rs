//! 宿主入口
//!
//! 应用启动时调用一次，失败应视为致命启动错误。

use crate::discovery::ServiceRegistrar;
use di_abstractions::{registered_modules, RegistrationModule, ServiceCollection};
use infrastructure_common::{Configuration, RegistrationResult};

/// 扫描进程内已登记的全部模块并注册服务
pub fn add_service_registration(
    services: &mut dyn ServiceCollection,
    configuration: Option<&Configuration>,
) -> RegistrationResult<()> {
    let modules = registered_modules();
    add_service_registration_from(&modules, services, configuration)
}

/// 扫描显式给定的模块并注册服务
pub fn add_service_registration_from(
    modules: &[RegistrationModule],
    services: &mut dyn ServiceCollection,
    configuration: Option<&Configuration>,
) -> RegistrationResult<()> {
    ServiceRegistrar::new()
        .discover_and_register(modules, services, configuration)
        .map(|_| ())
}

/// 服务容器上的注册扩展方法
pub trait ServiceRegistrationExt: ServiceCollection {
    /// 见 [`add_service_registration`]
    fn add_service_registration(
        &mut self,
        configuration: Option<&Configuration>,
    ) -> RegistrationResult<()>;

    /// 见 [`add_service_registration_from`]
    fn add_service_registration_from(
        &mut self,
        modules: &[RegistrationModule],
        configuration: Option<&Configuration>,
    ) -> RegistrationResult<()>;
}

impl<S: ServiceCollection> ServiceRegistrationExt for S {
    fn add_service_registration(
        &mut self,
        configuration: Option<&Configuration>,
    ) -> RegistrationResult<()> {
        add_service_registration(self, configuration)
    }

    fn add_service_registration_from(
        &mut self,
        modules: &[RegistrationModule],
        configuration: Option<&Configuration>,
    ) -> RegistrationResult<()> {
        add_service_registration_from(modules, self, configuration)
    }
}
