//! # Registration Macros
//!
//! 这个 crate 提供了服务注册类型的自动登记宏。
//!
//! ## 核心宏
//!
//! - [`service_registration`] - 生成候选类型描述并在程序初始化时登记
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_abstractions::{ServiceCollection, ServiceCollectionExt, ServicesRegistration};
//! use infrastructure_common::BoxError;
//! use registration_macros::service_registration;
//!
//! #[derive(Default)]
//! #[service_registration(services)]
//! pub struct OrderRegistration;
//!
//! impl ServicesRegistration for OrderRegistration {
//!     fn add_services(&self, services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
//!         services.add_singleton(OrderService::default());
//!         Ok(())
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod registration;
mod utils;

/// 服务注册类型登记宏
///
/// 为结构体实现 `di_abstractions::RegistrationType`，并生成一个 `#[ctor::ctor]`
/// 函数，在程序初始化时把候选类型登记到进程级模块注册表。
/// 使用方需要依赖 `di-abstractions` 和 `ctor`。
///
/// # 参数
///
/// - `database` - 实现 `DbServiceRegistration`
/// - `identity` - 实现 `IdentityServicesRegistration`
/// - `with_config` - 实现 `ServicesRegistrationWithConfig`
/// - `services` - 实现 `ServicesRegistration`
/// - `repositories` - 实现 `RepositoriesRegistration`
/// - `module = "name"` - 自定义模块名称（默认为声明处的 `module_path!()`）
///
/// 结构体必须实现 `Default`；缺少对应契约的实现会在编译期报错。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Default)]
/// #[service_registration(database, repositories, module = "orders")]
/// pub struct OrderRegistration;
/// ```
///
/// 声明的能力与实现的契约一致时：
///
/// ```
/// use di_abstractions::{DbServiceRegistration, RegistrationType, ServiceCollection};
/// use infrastructure_common::{BoxError, Configuration};
/// use registration_macros::service_registration;
///
/// #[derive(Default)]
/// #[service_registration(database)]
/// pub struct PostgresRegistration;
///
/// impl DbServiceRegistration for PostgresRegistration {
///     fn add_services(
///         &self,
///         _services: &mut dyn ServiceCollection,
///         _configuration: Option<&Configuration>,
///     ) -> Result<(), BoxError> {
///         Ok(())
///     }
/// }
///
/// fn main() {
///     assert!(PostgresRegistration::candidate_type().is_class());
/// }
/// ```
///
/// 声明了 `database` 却只实现了 `ServicesRegistration`，无法通过编译：
///
/// ```compile_fail
/// use di_abstractions::{ServiceCollection, ServicesRegistration};
/// use infrastructure_common::BoxError;
/// use registration_macros::service_registration;
///
/// #[derive(Default)]
/// #[service_registration(database)]
/// pub struct OnlyServices;
///
/// impl ServicesRegistration for OnlyServices {
///     fn add_services(&self, _services: &mut dyn ServiceCollection) -> Result<(), BoxError> {
///         Ok(())
///     }
/// }
///
/// fn main() {}
/// ```
#[proc_macro_attribute]
pub fn service_registration(args: TokenStream, input: TokenStream) -> TokenStream {
    registration::expand(args.into(), input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
