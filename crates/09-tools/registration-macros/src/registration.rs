//! 服务注册宏实现

use crate::utils::{lit_str_value, registration_fn_ident};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Error, Ident, ItemStruct, Meta,
    Result, Token,
};

/// 宏支持的能力契约
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Database,
    Identity,
    ServicesWithConfig,
    Services,
    Repositories,
}

impl Capability {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "database" => Some(Self::Database),
            "identity" => Some(Self::Identity),
            "with_config" | "services_with_config" => Some(Self::ServicesWithConfig),
            "services" => Some(Self::Services),
            "repositories" => Some(Self::Repositories),
            _ => None,
        }
    }

    /// 对应的 `CandidateBuilder` 方法名
    fn builder_method(self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Identity => "identity",
            Self::ServicesWithConfig => "services_with_config",
            Self::Services => "services",
            Self::Repositories => "repositories",
        }
    }
}

/// 服务注册宏参数
#[derive(Debug, Clone, Default)]
pub struct RegistrationArgs {
    /// 按书写顺序声明的能力
    pub capabilities: Vec<Capability>,
    /// 自定义模块名称，默认为 `module_path!()`
    pub module: Option<String>,
}

impl Parse for RegistrationArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = RegistrationArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) => {
                    let ident = path
                        .get_ident()
                        .ok_or_else(|| Error::new_spanned(&path, "期望能力名称"))?;
                    let capability = Capability::from_ident(ident).ok_or_else(|| {
                        Error::new_spanned(
                            ident,
                            "未知的注册能力，可选: database, identity, with_config, services, repositories",
                        )
                    })?;
                    if args.capabilities.contains(&capability) {
                        return Err(Error::new_spanned(ident, "重复声明的注册能力"));
                    }
                    args.capabilities.push(capability);
                }
                Meta::NameValue(nv) if nv.path.is_ident("module") => {
                    args.module = Some(lit_str_value(&nv.value)?);
                }
                other => return Err(Error::new_spanned(other, "不支持的参数")),
            }
        }

        if args.capabilities.is_empty() {
            return Err(Error::new(input.span(), "至少需要声明一种注册能力"));
        }

        Ok(args)
    }
}

/// 展开 #[service_registration] 宏
pub fn expand(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let args: RegistrationArgs = syn::parse2(args)?;
    let input_struct: ItemStruct = syn::parse2(input)?;

    if !input_struct.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input_struct.generics,
            "注册类型不支持泛型参数",
        ));
    }

    let struct_name = &input_struct.ident;
    let builder_calls = args.capabilities.iter().map(|capability| {
        let method = Ident::new(capability.builder_method(), struct_name.span());
        quote! { .#method() }
    });

    let module_name = match &args.module {
        Some(name) => quote! { #name },
        None => quote! { ::std::module_path!() },
    };
    let registration_fn_name = registration_fn_ident(struct_name);

    Ok(quote! {
        #input_struct

        impl ::di_abstractions::RegistrationType for #struct_name {
            fn candidate_type() -> ::di_abstractions::CandidateType {
                ::di_abstractions::CandidateType::of::<Self>()
                    #(#builder_calls)*
                    .build()
            }
        }

        // 使用 ctor 在程序启动时登记候选类型
        #[ctor::ctor]
        fn #registration_fn_name() {
            ::di_abstractions::register_candidate(
                #module_name,
                <#struct_name as ::di_abstractions::RegistrationType>::candidate_type(),
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capabilities_in_order() {
        let args: RegistrationArgs = syn::parse_str("repositories, with_config, database").unwrap();

        assert_eq!(
            args.capabilities,
            vec![
                Capability::Repositories,
                Capability::ServicesWithConfig,
                Capability::Database
            ]
        );
        assert_eq!(args.module, None);
    }

    #[test]
    fn test_parse_module_override() {
        let args: RegistrationArgs = syn::parse_str(r#"services, module = "orders""#).unwrap();

        assert_eq!(args.capabilities, vec![Capability::Services]);
        assert_eq!(args.module.as_deref(), Some("orders"));
    }

    #[test]
    fn test_parse_rejects_bad_arguments() {
        assert!(syn::parse_str::<RegistrationArgs>("").is_err());
        assert!(syn::parse_str::<RegistrationArgs>("caching").is_err());
        assert!(syn::parse_str::<RegistrationArgs>("services, services").is_err());
        assert!(syn::parse_str::<RegistrationArgs>("priority = 1").is_err());
    }

    #[test]
    fn test_expand_generates_candidate_and_ctor() {
        let expanded = expand(
            quote! { services, repositories },
            quote! {
                #[derive(Default)]
                pub struct OrderRegistration;
            },
        )
        .unwrap()
        .to_string();

        assert!(expanded.contains("RegistrationType for OrderRegistration"));
        let services_at = expanded.find("services").unwrap();
        let repositories_at = expanded.find("repositories").unwrap();
        assert!(services_at < repositories_at);
        assert!(expanded.contains("__register_service_registration_order_registration"));
        assert!(expanded.contains("module_path"));
    }

    #[test]
    fn test_expand_rejects_generics() {
        let result = expand(
            quote! { services },
            quote! {
                pub struct Generic<T>(T);
            },
        );
        assert!(result.is_err());
    }
}
