//! Centralized integration tests for di-impl crate
//!
//! 覆盖进程级注册表入口和注册器状态机

use di_abstractions::{
    register_candidate, register_module, CandidateType, CapabilityKind,
    IdentityServicesRegistration, RegistrationModule, RegistrationType, ServiceCollection,
    ServiceCollectionExt, ServicesRegistration,
};
use di_impl::{
    add_service_registration, invoke, DiscoveryState, ServiceCollectionImpl, ServiceRegistrar,
    ServiceRegistrationExt,
};
use infrastructure_common::{BoxError, Configuration, MissingMember, RegistrationError};
use serde_json::json;
use std::sync::Once;

/// 身份配置
#[derive(Debug, Clone, PartialEq)]
struct IdentityOptions {
    issuer: String,
}

#[derive(Default)]
struct IdentityRegistration;

impl IdentityServicesRegistration for IdentityRegistration {
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError> {
        let issuer = match configuration {
            Some(configuration) => configuration.get_required("identity.issuer")?,
            None => "local".to_string(),
        };
        services.add_singleton(IdentityOptions { issuer });
        Ok(())
    }
}

impl RegistrationType for IdentityRegistration {
    fn candidate_type() -> CandidateType {
        CandidateType::of::<Self>().identity().build()
    }
}

#[derive(Debug, Default)]
struct AuditService;

#[derive(Default)]
struct AuditRegistration;

impl ServicesRegistration for AuditRegistration {
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        services.add_transient(AuditService::default);
        Ok(())
    }
}

#[derive(Default)]
struct FailingRegistration;

impl ServicesRegistration for FailingRegistration {
    fn add_services(&self, _services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        Err("审计存储不可用".into())
    }
}

static REGISTER: Once = Once::new();

/// 本测试二进制只登记一次，且只登记能成功的模块
fn register_global_modules() {
    REGISTER.call_once(|| {
        register_module(RegistrationModule::new("identity").with::<IdentityRegistration>());
        register_candidate(
            "audit",
            CandidateType::of::<AuditRegistration>().services().build(),
        );
    });
}

#[test]
fn test_global_registry_entry_point() -> anyhow::Result<()> {
    register_global_modules();
    let configuration = Configuration::new(json!({ "identity": { "issuer": "adsp" } }));
    let mut services = ServiceCollectionImpl::new();

    add_service_registration(&mut services, Some(&configuration))?;

    assert_eq!(services.resolve::<IdentityOptions>()?.issuer, "adsp");
    assert_eq!(services.registrations_of::<AuditService>(), 1);
    Ok(())
}

#[test]
fn test_global_registry_via_extension_trait() -> anyhow::Result<()> {
    register_global_modules();
    let mut services = ServiceCollectionImpl::new();

    services.add_service_registration(None)?;

    assert_eq!(services.resolve::<IdentityOptions>()?.issuer, "local");
    Ok(())
}

#[test]
fn test_registrar_state_after_success() -> anyhow::Result<()> {
    let module = RegistrationModule::new("audit")
        .with_type(CandidateType::of::<AuditRegistration>().services());
    let mut registrar = ServiceRegistrar::new();
    let mut services = ServiceCollectionImpl::new();
    assert_eq!(registrar.state(), DiscoveryState::NotStarted);

    let report = registrar.discover_and_register(&[module], &mut services, None)?;

    assert_eq!(registrar.state(), DiscoveryState::Complete);
    assert_eq!(report.invocation_count(), 1);
    assert_eq!(report.count_for(CapabilityKind::Services), 1);
    Ok(())
}

#[test]
fn test_registrar_state_after_failure() {
    let module = RegistrationModule::new("audit")
        .with_type(CandidateType::of::<AuditRegistration>().services())
        .with_type(CandidateType::of::<FailingRegistration>().services());
    let mut registrar = ServiceRegistrar::new();
    let mut services = ServiceCollectionImpl::new();

    let err = registrar
        .discover_and_register(&[module], &mut services, None)
        .unwrap_err();

    assert_eq!(registrar.state(), DiscoveryState::Failed);
    assert!(err.to_string().contains("审计存储不可用"));
    assert!(err.type_name().unwrap().ends_with("FailingRegistration"));
    // 失败前的注册保留
    assert_eq!(services.registrations_of::<AuditService>(), 1);
}

#[test]
fn test_invoke_reports_missing_method_name() {
    let candidate: CandidateType = CandidateType::of::<AuditRegistration>().services().into();
    let mut services = ServiceCollectionImpl::new();

    let err = invoke(&candidate, CapabilityKind::Services, &mut services, "AddServices").unwrap_err();

    assert!(matches!(
        err,
        RegistrationError::MethodNotFound {
            missing: MissingMember::Method,
            ..
        }
    ));
    assert_eq!(err.method_name(), Some("AddServices"));
    assert!(services.is_empty());
}
