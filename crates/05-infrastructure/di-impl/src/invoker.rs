//! 注册方法调用器
//!
//! 构造候选类型的实例并调用指定契约下的命名注册方法。
//! 五类契约共用同一套校验和错误包装。

use di_abstractions::{
    CandidateInstance, CandidateType, CapabilityKind, MethodBinding, RegistrationMethod,
    ServiceCollection,
};
use infrastructure_common::{
    Configuration, MissingMember, RegistrationError, RegistrationResult,
};
use tracing::debug;

/// 调用接收配置的注册方法 `method_name(services, configuration)`
///
/// 配置原样透传，`None` 也会传给注册方法。
pub fn invoke_with_config(
    candidate: &CandidateType,
    capability: CapabilityKind,
    services: &mut dyn ServiceCollection,
    configuration: Option<&Configuration>,
    method_name: &str,
) -> RegistrationResult<()> {
    let binding = resolve_method(candidate, capability, method_name)?;
    let RegistrationMethod::WithConfiguration(method) = &binding.method else {
        return Err(method_not_found(candidate, method_name, MissingMember::Method));
    };

    let instance = construct(candidate, method_name)?;
    debug!(
        "调用注册方法: {}::{} ({}, 配置: {})",
        candidate.type_name(),
        method_name,
        capability,
        if configuration.is_some() { "有" } else { "无" }
    );

    method(&*instance, services, configuration)
        .map_err(|source| invocation_failed(candidate, method_name, source))
}

/// 调用不接收配置的注册方法 `method_name(services)`
pub fn invoke(
    candidate: &CandidateType,
    capability: CapabilityKind,
    services: &mut dyn ServiceCollection,
    method_name: &str,
) -> RegistrationResult<()> {
    let binding = resolve_method(candidate, capability, method_name)?;
    let RegistrationMethod::WithoutConfiguration(method) = &binding.method else {
        return Err(method_not_found(candidate, method_name, MissingMember::Method));
    };

    let instance = construct(candidate, method_name)?;
    debug!(
        "调用注册方法: {}::{} ({})",
        candidate.type_name(),
        method_name,
        capability
    );

    method(&*instance, services)
        .map_err(|source| invocation_failed(candidate, method_name, source))
}

/// 校验类型可实例化、存在无参构造函数和命名方法
fn resolve_method<'a>(
    candidate: &'a CandidateType,
    capability: CapabilityKind,
    method_name: &str,
) -> RegistrationResult<&'a MethodBinding> {
    if !candidate.is_class() {
        return Err(RegistrationError::NotAClass {
            type_name: candidate.type_name().to_string(),
        });
    }

    if candidate.constructor().is_none() {
        return Err(method_not_found(
            candidate,
            method_name,
            MissingMember::Constructor,
        ));
    }

    candidate
        .method(capability, method_name)
        .ok_or_else(|| method_not_found(candidate, method_name, MissingMember::Method))
}

/// 使用无参构造函数创建一次性实例
fn construct(candidate: &CandidateType, method_name: &str) -> RegistrationResult<CandidateInstance> {
    let constructor = candidate
        .constructor()
        .ok_or_else(|| method_not_found(candidate, method_name, MissingMember::Constructor))?;

    constructor().map_err(|source| invocation_failed(candidate, method_name, source))
}

fn method_not_found(
    candidate: &CandidateType,
    method_name: &str,
    missing: MissingMember,
) -> RegistrationError {
    RegistrationError::MethodNotFound {
        type_name: candidate.type_name().to_string(),
        method_name: method_name.to_string(),
        missing,
    }
}

fn invocation_failed(
    candidate: &CandidateType,
    method_name: &str,
    source: infrastructure_common::BoxError,
) -> RegistrationError {
    RegistrationError::InvocationFailed {
        type_name: candidate.type_name().to_string(),
        method_name: method_name.to_string(),
        source,
    }
}
