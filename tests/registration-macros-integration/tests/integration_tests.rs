//! Centralized integration tests for registration-macros crate

use di_abstractions::{
    registered_modules, CapabilityKind, RegistrationType, RepositoriesRegistration,
    ServiceCollection, ServiceCollectionExt, ServicesRegistration, ServicesRegistrationWithConfig,
};
use di_impl::{add_service_registration, ServiceCollectionImpl};
use infrastructure_common::{BoxError, Configuration};
use registration_macros::service_registration;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Default)]
pub struct CatalogService;

#[derive(Debug, Default)]
pub struct CatalogRepository;

#[derive(Default)]
#[service_registration(repositories, services)]
pub struct CatalogRegistration;

impl ServicesRegistration for CatalogRegistration {
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        services.add_transient(CatalogService::default);
        Ok(())
    }
}

impl RepositoriesRegistration for CatalogRegistration {
    fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        services.add_singleton(CatalogRepository);
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PricingOptions {
    pub currency: String,
}

#[derive(Default)]
#[service_registration(with_config, module = "pricing")]
pub struct PricingRegistration;

impl ServicesRegistrationWithConfig for PricingRegistration {
    fn add_services(
        &self,
        services: &mut dyn ServiceCollection,
        configuration: Option<&Configuration>,
    ) -> Result<(), BoxError> {
        let currency = match configuration {
            Some(configuration) => configuration.get_required::<String>("pricing.currency")?,
            None => "USD".to_string(),
        };
        services.add_singleton(PricingOptions { currency });
        Ok(())
    }
}

#[test]
fn test_macro_builds_candidate_type() {
    let candidate = <CatalogRegistration as RegistrationType>::candidate_type();

    assert!(candidate.is_class());
    assert!(candidate.type_name().ends_with("CatalogRegistration"));
    assert_eq!(
        candidate.capabilities(),
        &[CapabilityKind::Repositories, CapabilityKind::Services]
    );
}

#[test]
fn test_ctor_registers_under_module_path() {
    let modules = registered_modules();
    let module = modules
        .iter()
        .find(|m| m.name() == module_path!())
        .expect("声明处的模块已登记");

    assert!(module
        .types()
        .iter()
        .any(|candidate| candidate.type_name().ends_with("CatalogRegistration")));
}

#[test]
fn test_ctor_registers_under_custom_module() {
    let modules = registered_modules();
    let pricing = modules
        .iter()
        .find(|m| m.name() == "pricing")
        .expect("自定义模块已登记");

    assert_eq!(pricing.len(), 1);
    assert!(pricing.types()[0].implements(CapabilityKind::ServicesWithConfig));
}

#[test]
fn test_add_service_registration_discovers_macro_types() {
    let configuration = Configuration::new(json!({ "pricing": { "currency": "CNY" } }));
    let mut services = ServiceCollectionImpl::new();

    add_service_registration(&mut services, Some(&configuration)).unwrap();

    assert_eq!(services.registrations_of::<CatalogService>(), 1);
    assert_eq!(services.registrations_of::<CatalogRepository>(), 1);
    assert_eq!(
        services.resolve::<PricingOptions>().unwrap().currency,
        "CNY"
    );
}

#[test]
fn test_add_service_registration_without_configuration() {
    let mut services = ServiceCollectionImpl::new();

    add_service_registration(&mut services, None).unwrap();

    assert_eq!(
        services.resolve::<PricingOptions>().unwrap().currency,
        "USD"
    );
}
