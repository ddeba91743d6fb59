use registration_macros::service_registration;

#[service_registration(caching)]
struct CacheRegistration;

fn main() {}
