use di_abstractions::{RegistrationType, ServiceCollection, ServicesRegistration};
use infrastructure_common::BoxError;
use registration_macros::service_registration;

#[derive(Default)]
#[service_registration(services)]
struct OkRegistration;

impl ServicesRegistration for OkRegistration {
    fn add_services(&self, _services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
        Ok(())
    }
}

fn main() {
    // 宏生成的候选描述应能直接取用
    let candidate = <OkRegistration as RegistrationType>::candidate_type();
    assert!(candidate.type_name().ends_with("OkRegistration"));
}
