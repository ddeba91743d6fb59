//! 进程级模块注册表
//!
//! 模块在初始化阶段（通常由 `#[service_registration]` 生成的 ctor 函数）
//! 把候选类型登记到这里，宿主启动时整体扫描。

use crate::candidate::CandidateType;
use crate::module::RegistrationModule;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

/// 全局模块注册表，按首次登记顺序保存
static MODULE_REGISTRY: Lazy<RwLock<Vec<RegistrationModule>>> =
    Lazy::new(|| RwLock::new(Vec::new()));

/// 登记整个模块
///
/// 同一模块登记两次会被扫描两次
pub fn register_module(module: RegistrationModule) {
    debug!("登记注册模块: {} ({} 个类型)", module.name(), module.len());
    MODULE_REGISTRY.write().push(module);
}

/// 向指定模块登记候选类型，模块不存在时创建
pub fn register_candidate(module_name: &str, candidate: CandidateType) {
    debug!("登记候选类型: {} -> {}", module_name, candidate.type_name());

    let mut modules = MODULE_REGISTRY.write();
    if let Some(module) = modules.iter_mut().find(|m| m.name() == module_name) {
        module.push(candidate);
    } else {
        modules.push(RegistrationModule::new(module_name).with_type(candidate));
    }
}

/// 当前已登记模块的快照
pub fn registered_modules() -> Vec<RegistrationModule> {
    MODULE_REGISTRY.read().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::ServicesRegistration;
    use crate::container::ServiceCollection;
    use infrastructure_common::BoxError;

    #[derive(Default)]
    struct CacheRegistration;

    impl ServicesRegistration for CacheRegistration {
        fn add_services(&self, _services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
            Ok(())
        }
    }

    #[test]
    fn test_register_candidate_groups_by_module() {
        let module_name = "registry_tests::grouping";
        register_candidate(module_name, CandidateType::of::<CacheRegistration>().services().build());
        register_candidate(module_name, CandidateType::of::<CacheRegistration>().services().build());

        let modules = registered_modules();
        let matching: Vec<_> = modules.iter().filter(|m| m.name() == module_name).collect();

        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].len(), 2);
    }

    #[test]
    fn test_register_module_keeps_duplicates() {
        let module_name = "registry_tests::duplicates";
        let module = RegistrationModule::new(module_name)
            .with_type(CandidateType::of::<CacheRegistration>().services());

        register_module(module.clone());
        register_module(module);

        let count = registered_modules()
            .iter()
            .filter(|m| m.name() == module_name)
            .count();
        assert_eq!(count, 2);
    }
}
