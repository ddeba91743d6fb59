use registration_macros::service_registration;

#[service_registration(services, services)]
struct AuditRegistration;

fn main() {}
